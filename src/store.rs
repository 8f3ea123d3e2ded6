use std::sync::Mutex;

use crate::model::CartModel;

struct InnerCartStore {
    cart: Option<CartModel>,
    loading: bool,
}

/// single mutation authority over the in-memory cart snapshot, reads
/// and writes are atomic whole-value operations so no consumer ever
/// observes a partially mutated cart
///
/// no network call originates here and no business rule lives here,
/// only the reconciliation engine mutates this store
pub struct AppCartStore {
    inner: Mutex<InnerCartStore>,
}

impl Default for AppCartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AppCartStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(InnerCartStore {
                cart: None,
                loading: false,
            }),
        }
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, InnerCartStore> {
        // a poisoned lock only means another thread panicked mid-update,
        // the held value is still a complete cart snapshot
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn snapshot(&self) -> Option<CartModel> {
        self.guard().cart.clone()
    }

    pub fn replace(&self, next: CartModel) {
        self.guard().cart = Some(next);
    }

    /// drop the held cart after a successful checkout, the next mutating
    /// intent starts a fresh draft
    pub fn retire(&self) {
        self.guard().cart = None;
    }

    pub fn is_loading(&self) -> bool {
        self.guard().loading
    }

    pub fn set_loading(&self, flag: bool) {
        self.guard().loading = flag;
    }
}
