pub mod api;
pub mod auth;
pub mod confidentiality;
pub mod config;
pub mod constant;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod model;
pub mod store;
pub mod usecase;

use std::boxed::Box;
use std::result::Result as DefaultResult;
use std::sync::Arc;

use tokio::sync::{Mutex as AsyncMutex, MutexGuard as AsyncMutexGuard};

use api::dto::OwnerProfileDto;
use error::{AppError, AppErrorCode};
use gateway::AbsCartGateway;
use logging::AppLogContext;
use store::AppCartStore;

pub type AppLogAlias = Arc<String>;

/// shared state of one storefront session: the owner identity the cart
/// belongs to, the profile used when a draft has to be created remotely,
/// the cart store and the remote gateway
///
/// the identity is immutable once set, a different identity means
/// building a new context
pub struct AppCartContext {
    owner: String,
    profile: OwnerProfileDto,
    store: Arc<AppCartStore>,
    gateway: Arc<Box<dyn AbsCartGateway>>,
    logctx: Arc<AppLogContext>,
    // serializes settlements, at most one optimistic-then-resync cycle
    // in flight per cart; a queued intent re-reads the store snapshot
    // after acquiring this lock so no update is lost
    settle_lock: AsyncMutex<()>,
}

impl AppCartContext {
    pub fn try_build(
        owner: String,
        profile: OwnerProfileDto,
        gateway: Box<dyn AbsCartGateway>,
        logctx: Arc<AppLogContext>,
    ) -> DefaultResult<Arc<Self>, AppError> {
        if owner.trim().is_empty() {
            return Err(AppError {
                code: AppErrorCode::EmptyInputData,
                detail: Some("owner-identity-empty".to_string()),
            });
        }
        let obj = Self {
            owner,
            profile,
            store: Arc::new(AppCartStore::new()),
            gateway: Arc::new(gateway),
            logctx,
            settle_lock: AsyncMutex::new(()),
        };
        Ok(Arc::new(obj))
    }

    pub fn owner(&self) -> &str {
        self.owner.as_str()
    }
    pub fn profile(&self) -> &OwnerProfileDto {
        &self.profile
    }
    pub fn store(&self) -> &AppCartStore {
        &self.store
    }
    pub fn log_context(&self) -> &Arc<AppLogContext> {
        &self.logctx
    }
    pub(crate) fn gateway(&self) -> &dyn AbsCartGateway {
        self.gateway.as_ref().as_ref()
    }
    pub(crate) async fn acquire_settlement(&self) -> AsyncMutexGuard<'_, ()> {
        self.settle_lock.lock().await
    }
} // end of impl AppCartContext
