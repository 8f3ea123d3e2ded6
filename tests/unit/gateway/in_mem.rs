use std::boxed::Box;

use rust_decimal::Decimal;

use storefront::gateway::{AbsCartGateway, CartInMemGateway};
use storefront::model::OrderStatus;
use storefront::usecase::{
    AddCartItemUseCase, CartModifyUcResult, CheckoutUcResult, CheckoutUseCase,
    DiscardCartUseCase, LoadOrCreateCartUseCase, RetrieveOrderHistoryUseCase,
};

use crate::{ut_default_profile, ut_setup_cart_context, ut_setup_catalog, UT_OWNER_ID};

#[tokio::test]
async fn fake_backend_basic_contract() {
    let catalog = ut_setup_catalog();
    let gw = CartInMemGateway::new(catalog);
    let found = gw.fetch_draft_cart(UT_OWNER_ID).await.unwrap();
    assert!(found.is_none());
    let profile = ut_default_profile();
    let created = gw.create_cart(UT_OWNER_ID, &profile).await.unwrap();
    let cart_id = created.id_.unwrap();
    assert!(created.lines.is_empty());
    let line = gw.add_item(cart_id, 2603, 2).await.unwrap();
    assert!(line.id_.confirmed().is_some());
    assert_eq!(line.qty, 2);
    // server-side merge, a second add of the same product extends the row
    let line = gw.add_item(cart_id, 2603, 3).await.unwrap();
    assert_eq!(line.qty, 5);
    let found = gw.fetch_draft_cart(UT_OWNER_ID).await.unwrap().unwrap();
    assert_eq!(found.lines.len(), 1);
    assert_eq!(found.total_cost, Decimal::from(5000u32));
    // deleting an unknown item id is tolerated like the real service
    gw.remove_item(987654).await.unwrap();
    gw.clear_cart(UT_OWNER_ID).await.unwrap();
    let found = gw.fetch_draft_cart(UT_OWNER_ID).await.unwrap();
    assert!(found.is_none());
    let history = gw.fetch_order_history(UT_OWNER_ID).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, OrderStatus::Canceled);
}

#[tokio::test]
async fn double_add_settles_single_line() {
    let gw = CartInMemGateway::new(ut_setup_catalog());
    let ctx = ut_setup_cart_context(Box::new(gw));
    let catalog = ut_setup_catalog();
    let out = AddCartItemUseCase { ctx: ctx.clone() }
        .execute(catalog[0].clone(), 2)
        .await;
    assert!(matches!(out, CartModifyUcResult::Success(_)));
    let out = AddCartItemUseCase { ctx: ctx.clone() }
        .execute(catalog[0].clone(), 3)
        .await;
    let CartModifyUcResult::Success(settled) = out else {
        panic!("second add has to settle");
    };
    // whole sequence of adds for one product settles to one line whose
    // quantity is the sum of everything added
    assert_eq!(settled.lines.len(), 1);
    assert_eq!(settled.lines[0].qty, 5);
    assert!(settled.lines[0].id_.confirmed().is_some());
    assert_eq!(settled.total_cost, Decimal::from(5000u32));
    assert_eq!(ctx.store().snapshot(), Some(settled));
}

#[tokio::test]
async fn checkout_then_fresh_draft() {
    let gw = CartInMemGateway::new(ut_setup_catalog());
    let ctx = ut_setup_cart_context(Box::new(gw));
    let catalog = ut_setup_catalog();
    let out = AddCartItemUseCase { ctx: ctx.clone() }
        .execute(catalog[1].clone(), 1)
        .await;
    let CartModifyUcResult::Success(settled) = out else {
        panic!("add has to settle");
    };
    let old_id = settled.id_.unwrap();
    assert_eq!(settled.total_cost, Decimal::from(1800u32));
    let out = CheckoutUseCase { ctx: ctx.clone() }.execute().await;
    let CheckoutUcResult::Success(confirmed) = out else {
        panic!("checkout has to succeed");
    };
    assert_eq!(confirmed.id_, Some(old_id));
    assert!(ctx.store().snapshot().is_none());
    // next load starts a brand-new draft
    let fresh = LoadOrCreateCartUseCase { ctx: ctx.clone() }.execute().await;
    assert!(fresh.lines.is_empty());
    assert_ne!(fresh.id_, Some(old_id));
    let history = RetrieveOrderHistoryUseCase { ctx: ctx.clone() }
        .execute()
        .await
        .unwrap();
    let confirmed_count = history
        .iter()
        .filter(|h| h.status == OrderStatus::Confirmed)
        .count();
    assert_eq!(confirmed_count, 1);
}

#[tokio::test]
async fn discard_flow_cancels_draft() {
    let gw = CartInMemGateway::new(ut_setup_catalog());
    let ctx = ut_setup_cart_context(Box::new(gw));
    let catalog = ut_setup_catalog();
    let out = AddCartItemUseCase { ctx: ctx.clone() }
        .execute(catalog[2].clone(), 4)
        .await;
    let CartModifyUcResult::Success(settled) = out else {
        panic!("add has to settle");
    };
    let old_id = settled.id_.unwrap();
    let out = DiscardCartUseCase { ctx: ctx.clone() }.execute().await;
    assert!(out.lines.is_empty());
    assert_eq!(out.total_cost, Decimal::ZERO);
    assert_ne!(out.id_, Some(old_id));
    let history = RetrieveOrderHistoryUseCase { ctx: ctx.clone() }
        .execute()
        .await
        .unwrap();
    let canceled = history
        .iter()
        .find(|h| h.id_ == old_id)
        .expect("canceled draft stays in history");
    assert_eq!(canceled.status, OrderStatus::Canceled);
}
