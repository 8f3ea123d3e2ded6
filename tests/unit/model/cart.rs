use rust_decimal::Decimal;

use storefront::api::dto::{ListRespDto, OrderDto, ProductDto};
use storefront::model::{CartItemId, CartLineModel, CartMergeOutcome, CartModel};

use crate::{ut_setup_catalog, UT_OWNER_ID};

fn ut_empty_cart() -> CartModel {
    CartModel::empty(UT_OWNER_ID.to_string())
}

#[test]
fn add_product_appends_provisional_line() {
    let catalog = ut_setup_catalog();
    let mut cart = ut_empty_cart();
    let outcome = cart.add_product(&catalog[0], 2);
    let CartMergeOutcome::Appended(tmp_id) = outcome else {
        panic!("fresh product has to append a new line");
    };
    assert!(tmp_id.is_provisional());
    assert!(tmp_id.confirmed().is_none());
    assert_eq!(cart.lines.len(), 1);
    assert_eq!(cart.lines[0].qty, 2);
    assert_eq!(cart.total_cost, Decimal::from(2000u32));
}

#[test]
fn add_product_merges_quantity_additively() {
    let catalog = ut_setup_catalog();
    let mut cart = ut_empty_cart();
    let _ = cart.add_product(&catalog[0], 2);
    let outcome = cart.add_product(&catalog[0], 3);
    match outcome {
        CartMergeOutcome::Merged { id_, new_qty } => {
            assert!(id_.is_provisional());
            assert_eq!(new_qty, 5);
        }
        CartMergeOutcome::Appended(_) => panic!("same product must never duplicate a line"),
    }
    assert_eq!(cart.lines.len(), 1);
    assert_eq!(cart.total_cost, Decimal::from(5000u32));
}

#[test]
fn effective_price_prefers_discounted() {
    let catalog = ut_setup_catalog();
    assert_eq!(catalog[0].effective_price(), Decimal::from(1000u32));
    assert_eq!(catalog[1].effective_price(), Decimal::from(1800u32));
    let mut cart = ut_empty_cart();
    let _ = cart.add_product(&catalog[1], 1);
    assert_eq!(cart.total_cost, Decimal::from(1800u32));
}

#[test]
fn replace_provisional_keeps_position() {
    let catalog = ut_setup_catalog();
    let mut cart = ut_empty_cart();
    let CartMergeOutcome::Appended(tmp0) = cart.add_product(&catalog[0], 2) else {
        panic!("append expected");
    };
    let _ = cart.add_product(&catalog[2], 1);
    let confirmed = CartLineModel {
        id_: CartItemId::Confirmed(77),
        product_id: catalog[0].id,
        unit_price: Decimal::from(1000u32),
        qty: 2,
    };
    assert!(cart.replace_provisional(&tmp0, confirmed));
    // identity changed, position and quantity preserved
    assert_eq!(cart.lines[0].id_, CartItemId::Confirmed(77));
    assert_eq!(cart.lines[0].qty, 2);
    assert_eq!(cart.lines.len(), 2);
    assert_eq!(cart.total_cost, Decimal::from(2780u32));
    // replacing the already-swapped id again is a no-op
    assert!(!cart.replace_provisional(&tmp0, cart.lines[0].clone()));
}

#[test]
fn remove_and_update_recompute_total() {
    let catalog = ut_setup_catalog();
    let mut cart = ut_empty_cart();
    let CartMergeOutcome::Appended(id0) = cart.add_product(&catalog[0], 2) else {
        panic!("append expected");
    };
    let CartMergeOutcome::Appended(id1) = cart.add_product(&catalog[2], 4) else {
        panic!("append expected");
    };
    assert_eq!(cart.total_cost, Decimal::from(2000u32 + 3120));
    assert!(cart.set_line_qty(&id1, 1));
    assert_eq!(cart.total_cost, Decimal::from(2780u32));
    let removed = cart.remove_line(&id0);
    assert!(removed.is_some());
    assert_eq!(cart.lines.len(), 1);
    assert_eq!(cart.total_cost, Decimal::from(780u32));
    let ghost = CartItemId::Confirmed(12345);
    assert!(cart.remove_line(&ghost).is_none());
    assert!(!cart.set_line_qty(&ghost, 3));
}

#[test]
fn clear_lines_resets_total() {
    let catalog = ut_setup_catalog();
    let mut cart = ut_empty_cart();
    let _ = cart.add_product(&catalog[0], 2);
    let _ = cart.add_product(&catalog[1], 1);
    cart.clear_lines();
    assert!(cart.lines.is_empty());
    assert_eq!(cart.total_cost, Decimal::ZERO);
}

#[test]
fn normalize_order_missing_fields() {
    // a degenerate backend response lacking items and total must not
    // crash, it becomes an empty cart
    let serial = r#"{"id": 94}"#;
    let data = serde_json::from_str::<OrderDto>(serial).unwrap();
    let cart = CartModel::from((UT_OWNER_ID.to_string(), data));
    assert_eq!(cart.id_, Some(94));
    assert!(cart.lines.is_empty());
    assert_eq!(cart.total_cost, Decimal::ZERO);
}

#[test]
fn normalize_order_recomputes_missing_total() {
    let serial = r#"{
        "id": 95,
        "items": [
            {"id": 310, "product": {"id": 2604, "price": "2500", "final_price": "1800"}, "quantity": 2}
        ]
    }"#;
    let data = serde_json::from_str::<OrderDto>(serial).unwrap();
    let cart = CartModel::from((UT_OWNER_ID.to_string(), data));
    assert_eq!(cart.lines.len(), 1);
    assert_eq!(cart.lines[0].id_, CartItemId::Confirmed(310));
    assert_eq!(cart.lines[0].unit_price, Decimal::from(1800u32));
    assert_eq!(cart.total_cost, Decimal::from(3600u32));
}

#[test]
fn normalize_order_trusts_server_total() {
    let serial = r#"{
        "id": 96,
        "total_cost": "4100",
        "items": [
            {"id": 311, "product": {"id": 2603, "price": "1000"}, "quantity": 2}
        ]
    }"#;
    let data = serde_json::from_str::<OrderDto>(serial).unwrap();
    let cart = CartModel::from((UT_OWNER_ID.to_string(), data));
    // server truth wins over local recomputation until the next mutation
    assert_eq!(cart.total_cost, Decimal::from(4100u32));
}

#[test]
fn list_response_accepts_both_shapes() {
    let plain = r#"[{"id": 5}, {"id": 6}]"#;
    let decoded = serde_json::from_str::<ListRespDto<OrderDto>>(plain).unwrap();
    assert_eq!(decoded.into_vec().len(), 2);
    let paginated = r#"{"count": 1, "total_pages": 1, "results": [{"id": 7}]}"#;
    let decoded = serde_json::from_str::<ListRespDto<OrderDto>>(paginated).unwrap();
    let rows = decoded.into_vec();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, Some(7));
}

#[test]
fn product_price_decodes_plain_number() {
    let serial = r#"{"id": 2610, "price": 950}"#;
    let data = serde_json::from_str::<ProductDto>(serial).unwrap();
    assert_eq!(data.effective_price(), Decimal::from(950u32));
}
