use std::result::Result as DefaultResult;
use std::sync::Arc;

use crate::api::dto::ProductDto;
use crate::constant::hard_limit;
use crate::error::{AppError, AppErrorCode};
use crate::logging::{app_log_event, AppLogLevel};
use crate::model::{CartItemId, CartMergeOutcome, CartModel, OrderHistoryModel};
use crate::AppCartContext;

// Every mutating intent below follows the same two-phase shape: a
// synchronous optimistic projection into the store, then the remote call,
// then a mandatory resynchronization that replaces the store with server
// truth. The resync is what heals any divergence a failed or partially
// applied remote call leaves behind, so remote failures never propagate
// to the caller here (checkout is the one exception, it has no safe
// optimistic terminal state to fall back to).

pub struct LoadOrCreateCartUseCase {
    pub ctx: Arc<AppCartContext>,
}
pub struct AddCartItemUseCase {
    pub ctx: Arc<AppCartContext>,
}
pub struct UpdateCartItemUseCase {
    pub ctx: Arc<AppCartContext>,
}
pub struct RemoveCartItemUseCase {
    pub ctx: Arc<AppCartContext>,
}
pub struct DiscardCartUseCase {
    pub ctx: Arc<AppCartContext>,
}
pub struct CheckoutUseCase {
    pub ctx: Arc<AppCartContext>,
}
pub struct RetrieveOrderHistoryUseCase {
    pub ctx: Arc<AppCartContext>,
}

#[derive(Debug)]
pub enum CartModifyUcResult {
    Success(CartModel),
    NotFound,
    InvalidInput(AppError),
}

#[derive(Debug)]
pub enum CheckoutUcResult {
    /// confirmed order snapshot, the local cart has been retired
    Success(CartModel),
    EmptyCart,
    /// the cart was never persisted remotely, there is nothing to confirm
    NotCreated,
    /// surfaced to the caller, the stored cart is left unchanged so the
    /// user can retry
    Failure(AppError),
}

/// authoritative re-fetch of the whole cart, replacing whatever
/// optimistic projection the store currently holds, fetch-or-create
/// semantics included
///
/// failures leave the previous snapshot (or an unsaved empty cart) in
/// place instead of propagating, and the loading flag is cleared on
/// every path
pub(crate) async fn resync_cart(ctx: &AppCartContext) -> CartModel {
    let store = ctx.store();
    store.set_loading(true);
    let fetched = match ctx.gateway().fetch_draft_cart(ctx.owner()).await {
        Ok(Some(m)) => Ok(m),
        Ok(None) => ctx.gateway().create_cart(ctx.owner(), ctx.profile()).await,
        Err(e) => Err(e),
    };
    let settled = match fetched {
        Ok(m) => m,
        Err(e) => {
            let logctx_p = ctx.log_context();
            app_log_event!(logctx_p, AppLogLevel::WARNING, "cart-resync-failed: {}", e);
            store
                .snapshot()
                .unwrap_or_else(|| CartModel::empty(ctx.owner().to_string()))
        }
    };
    store.replace(settled.clone());
    store.set_loading(false);
    settled
} // end of fn resync_cart

fn validate_qty(qty: u32) -> DefaultResult<(), AppError> {
    if qty == 0 {
        Err(AppError {
            code: AppErrorCode::InvalidInput,
            detail: Some("quantity-zero".to_string()),
        })
    } else if qty > hard_limit::MAX_QTY_PER_LINE {
        Err(AppError {
            code: AppErrorCode::ExceedingMaxLimit,
            detail: Some(format!("quantity: {qty}")),
        })
    } else {
        Ok(())
    }
}

impl LoadOrCreateCartUseCase {
    pub async fn execute(self) -> CartModel {
        let _guard = self.ctx.acquire_settlement().await;
        resync_cart(&self.ctx).await
    }
}

impl AddCartItemUseCase {
    pub async fn execute(self, product: ProductDto, qty: u32) -> CartModifyUcResult {
        if let Err(e) = validate_qty(qty) {
            return CartModifyUcResult::InvalidInput(e);
        }
        let ctx = &self.ctx;
        let _guard = ctx.acquire_settlement().await;
        // baseline is the latest settled snapshot, fetch-or-create runs
        // first when the cart was never loaded
        let mut cart = match ctx.store().snapshot() {
            Some(c) => c,
            None => resync_cart(ctx).await,
        };
        if cart.lines.len() >= hard_limit::MAX_LINES_PER_CART
            && cart.find_line_by_product(product.id).is_none()
        {
            let e = AppError {
                code: AppErrorCode::ExceedingMaxLimit,
                detail: Some(format!("num-lines: {}", cart.lines.len())),
            };
            return CartModifyUcResult::InvalidInput(e);
        }
        // phase 1, optimistic projection
        let outcome = cart.add_product(&product, qty);
        ctx.store().replace(cart.clone());
        // phase 2, remote call
        let logctx_p = ctx.log_context();
        match outcome {
            CartMergeOutcome::Merged { id_, new_qty } => match id_.confirmed() {
                // additive merge, the remote call carries the new total
                // quantity, not a second add
                Some(sid) => {
                    if let Err(e) = ctx.gateway().update_item(sid, new_qty).await {
                        app_log_event!(logctx_p, AppLogLevel::WARNING, "merge-update: {}", e);
                    }
                }
                None => {
                    // the line it merged into is still unacknowledged,
                    // the resync below settles both edits at once
                    app_log_event!(logctx_p, AppLogLevel::DEBUG, "merge-on-provisional-line");
                }
            },
            CartMergeOutcome::Appended(tmp_id) => match cart.id_ {
                Some(cart_id) => {
                    match ctx.gateway().add_item(cart_id, product.id, qty).await {
                        Ok(confirmed) => {
                            // replacement, not patch: the backend item id
                            // and backend-computed price are authoritative
                            if let Some(mut latest) = ctx.store().snapshot() {
                                if latest.replace_provisional(&tmp_id, confirmed) {
                                    ctx.store().replace(latest);
                                }
                            }
                        }
                        Err(e) => {
                            app_log_event!(logctx_p, AppLogLevel::WARNING, "remote-add: {}", e);
                        }
                    }
                }
                None => {
                    app_log_event!(logctx_p, AppLogLevel::WARNING, "cart-missing-remote-id");
                }
            },
        } // end of match outcome
        CartModifyUcResult::Success(resync_cart(ctx).await)
    } // end of fn execute
} // end of impl AddCartItemUseCase

impl UpdateCartItemUseCase {
    pub async fn execute(self, item_id: CartItemId, qty: u32) -> CartModifyUcResult {
        // invalid quantity is rejected before any mutation or remote call
        if let Err(e) = validate_qty(qty) {
            return CartModifyUcResult::InvalidInput(e);
        }
        let ctx = &self.ctx;
        let _guard = ctx.acquire_settlement().await;
        let Some(mut cart) = ctx.store().snapshot() else {
            return CartModifyUcResult::NotFound;
        };
        if !cart.set_line_qty(&item_id, qty) {
            return CartModifyUcResult::NotFound;
        }
        ctx.store().replace(cart);
        let logctx_p = ctx.log_context();
        match item_id.confirmed() {
            Some(sid) => {
                if let Err(e) = ctx.gateway().update_item(sid, qty).await {
                    app_log_event!(logctx_p, AppLogLevel::WARNING, "remote-update: {}", e);
                }
            }
            None => {
                app_log_event!(logctx_p, AppLogLevel::DEBUG, "patch-on-provisional-line");
            }
        }
        CartModifyUcResult::Success(resync_cart(ctx).await)
    }
}

impl RemoveCartItemUseCase {
    pub async fn execute(self, item_id: CartItemId) -> CartModifyUcResult {
        let ctx = &self.ctx;
        let _guard = ctx.acquire_settlement().await;
        let Some(mut cart) = ctx.store().snapshot() else {
            return CartModifyUcResult::NotFound;
        };
        let Some(removed) = cart.remove_line(&item_id) else {
            return CartModifyUcResult::NotFound;
        };
        ctx.store().replace(cart);
        // a provisional line was never acknowledged remotely, dropping
        // it is a pure local rollback, no delete call goes out
        if let Some(sid) = removed.id_.confirmed() {
            if let Err(e) = ctx.gateway().remove_item(sid).await {
                let logctx_p = ctx.log_context();
                app_log_event!(logctx_p, AppLogLevel::WARNING, "remote-delete: {}", e);
            }
        }
        CartModifyUcResult::Success(resync_cart(ctx).await)
    }
}

impl DiscardCartUseCase {
    pub async fn execute(self) -> CartModel {
        let ctx = &self.ctx;
        let _guard = ctx.acquire_settlement().await;
        let mut cart = ctx
            .store()
            .snapshot()
            .unwrap_or_else(|| CartModel::empty(ctx.owner().to_string()));
        cart.clear_lines();
        ctx.store().replace(cart);
        if let Err(e) = ctx.gateway().clear_cart(ctx.owner()).await {
            let logctx_p = ctx.log_context();
            app_log_event!(logctx_p, AppLogLevel::WARNING, "remote-clear: {}", e);
        }
        resync_cart(ctx).await
    }
}

impl CheckoutUseCase {
    /// terminal state transition, no optimistic item mutation: the store
    /// is only touched after the backend acknowledged the confirmation
    pub async fn execute(self) -> CheckoutUcResult {
        let ctx = &self.ctx;
        let _guard = ctx.acquire_settlement().await;
        let Some(cart) = ctx.store().snapshot() else {
            return CheckoutUcResult::NotCreated;
        };
        let Some(cart_id) = cart.id_ else {
            return CheckoutUcResult::NotCreated;
        };
        if cart.lines.is_empty() {
            return CheckoutUcResult::EmptyCart;
        }
        match ctx.gateway().confirm_order(cart_id).await {
            Ok(confirmed) => {
                ctx.store().retire();
                CheckoutUcResult::Success(confirmed)
            }
            Err(e) => {
                let logctx_p = ctx.log_context();
                app_log_event!(logctx_p, AppLogLevel::ERROR, "checkout: {}", e);
                CheckoutUcResult::Failure(e)
            }
        }
    }
}

impl RetrieveOrderHistoryUseCase {
    // read-only view, it bypasses the store and the settlement lock
    pub async fn execute(self) -> DefaultResult<Vec<OrderHistoryModel>, AppError> {
        self.ctx
            .gateway()
            .fetch_order_history(self.ctx.owner())
            .await
    }
}
