mod base_client;
mod in_mem;
mod rest;

use std::boxed::Box;
use std::result::Result as DefaultResult;
use std::sync::Arc;

use async_trait::async_trait;

use crate::api::dto::OwnerProfileDto;
use crate::auth::AppBackendAuth;
use crate::confidentiality::AbstractConfidentiality;
use crate::config::AppApiClientCfg;
use crate::error::AppError;
use crate::logging::AppLogContext;
use crate::model::{CartLineModel, CartModel, OrderHistoryModel};

// make the in-memory gateway visible mainly for testing purpose
pub use in_mem::CartInMemGateway;
pub use rest::AppRestCartGateway;

// the gateway instance is used across awaits and shared between tasks,
// hence the `Send` and `Sync` super-traits
#[async_trait]
pub trait AbsCartGateway: Sync + Send {
    /// most recent draft cart of the given identity, `None` when the
    /// backend holds no draft for it
    async fn fetch_draft_cart(&self, owner: &str) -> DefaultResult<Option<CartModel>, AppError>;

    async fn create_cart(
        &self,
        owner: &str,
        profile: &OwnerProfileDto,
    ) -> DefaultResult<CartModel, AppError>;

    async fn add_item(
        &self,
        cart_id: u64,
        product_id: u64,
        qty: u32,
    ) -> DefaultResult<CartLineModel, AppError>;

    async fn update_item(&self, item_id: u64, qty: u32)
        -> DefaultResult<CartLineModel, AppError>;

    async fn remove_item(&self, item_id: u64) -> DefaultResult<(), AppError>;

    /// backend implements clear as cancelling the draft order along
    /// with its line items
    async fn clear_cart(&self, owner: &str) -> DefaultResult<(), AppError>;

    async fn confirm_order(&self, cart_id: u64) -> DefaultResult<CartModel, AppError>;

    async fn fetch_order_history(
        &self,
        owner: &str,
    ) -> DefaultResult<Vec<OrderHistoryModel>, AppError>;
} // end of trait AbsCartGateway

pub fn app_gateway_cart(
    cfg: &AppApiClientCfg,
    cfdntl: &dyn AbstractConfidentiality,
    logctx: Arc<AppLogContext>,
) -> DefaultResult<Box<dyn AbsCartGateway>, AppError> {
    let auth = AppBackendAuth::try_build(&cfg.auth, cfdntl)?;
    let obj = AppRestCartGateway::try_build(&cfg.backend_api, auth, logctx)?;
    Ok(Box::new(obj))
}
