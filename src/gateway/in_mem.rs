use std::collections::BTreeMap;
use std::result::Result as DefaultResult;
use std::sync::Mutex;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::api::dto::{OrderStatusDto, OwnerProfileDto, ProductDto};
use crate::error::{AppError, AppErrorCode};
use crate::model::{CartItemId, CartLineModel, CartModel, OrderHistoryModel, OrderStatus};

use super::AbsCartGateway;

struct OrderRow {
    owner: String,
    status: OrderStatusDto,
}

struct ItemRow {
    order: u64,
    product_id: u64,
    unit_price: Decimal,
    qty: u32,
}

struct InnerBackend {
    next_order_id: u64,
    next_item_id: u64,
    orders: BTreeMap<u64, OrderRow>,
    items: BTreeMap<u64, ItemRow>,
}

/// in-process stand-in for the remote backend, it keeps draft orders and
/// line items in two tables and recomputes order totals server-side the
/// way the real service does, product prices come from a catalog snapshot
/// seeded at construction
pub struct CartInMemGateway {
    catalog: BTreeMap<u64, ProductDto>,
    inner: Mutex<InnerBackend>,
}

impl CartInMemGateway {
    pub fn new(products: Vec<ProductDto>) -> Self {
        let catalog = BTreeMap::from_iter(products.into_iter().map(|p| (p.id, p)));
        Self {
            catalog,
            inner: Mutex::new(InnerBackend {
                next_order_id: 1,
                next_item_id: 1,
                orders: BTreeMap::new(),
                items: BTreeMap::new(),
            }),
        }
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, InnerBackend> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn cart_snapshot(inner: &InnerBackend, oid: u64, owner: &str) -> CartModel {
        let lines = inner
            .items
            .iter()
            .filter(|(_k, row)| row.order == oid)
            .map(|(k, row)| CartLineModel {
                id_: CartItemId::Confirmed(*k),
                product_id: row.product_id,
                unit_price: row.unit_price,
                qty: row.qty,
            })
            .collect::<Vec<_>>();
        let mut obj = CartModel {
            id_: Some(oid),
            owner: owner.to_string(),
            lines,
            total_cost: Decimal::ZERO,
        };
        obj.recalc_total();
        obj
    }

    fn draft_of(inner: &InnerBackend, owner: &str) -> Option<u64> {
        inner
            .orders
            .iter()
            .find(|(_k, row)| row.owner == owner && row.status == OrderStatusDto::Draft)
            .map(|(k, _row)| *k)
    }
}

#[async_trait]
impl AbsCartGateway for CartInMemGateway {
    async fn fetch_draft_cart(&self, owner: &str) -> DefaultResult<Option<CartModel>, AppError> {
        let inner = self.guard();
        let found = Self::draft_of(&inner, owner);
        Ok(found.map(|oid| Self::cart_snapshot(&inner, oid, owner)))
    }

    async fn create_cart(
        &self,
        owner: &str,
        _profile: &OwnerProfileDto,
    ) -> DefaultResult<CartModel, AppError> {
        let mut inner = self.guard();
        let oid = inner.next_order_id;
        inner.next_order_id += 1;
        inner.orders.insert(
            oid,
            OrderRow {
                owner: owner.to_string(),
                status: OrderStatusDto::Draft,
            },
        );
        Ok(Self::cart_snapshot(&inner, oid, owner))
    }

    async fn add_item(
        &self,
        cart_id: u64,
        product_id: u64,
        qty: u32,
    ) -> DefaultResult<CartLineModel, AppError> {
        let product = self.catalog.get(&product_id).ok_or(AppError {
            code: AppErrorCode::RemoteSrvFailure,
            detail: Some(format!("product-not-exist: {product_id}")),
        })?;
        let mut inner = self.guard();
        if !inner.orders.contains_key(&cart_id) {
            return Err(AppError {
                code: AppErrorCode::CartNotCreated,
                detail: Some(format!("order-not-exist: {cart_id}")),
            });
        }
        // quantity merge is idempotent server-side, a second add of the
        // same product extends the existing row
        let found = inner
            .items
            .iter()
            .find(|(_k, row)| row.order == cart_id && row.product_id == product_id)
            .map(|(k, _row)| *k);
        let item_id = if let Some(k) = found {
            if let Some(row) = inner.items.get_mut(&k) {
                row.qty += qty;
            }
            k
        } else {
            let k = inner.next_item_id;
            inner.next_item_id += 1;
            inner.items.insert(
                k,
                ItemRow {
                    order: cart_id,
                    product_id,
                    unit_price: product.effective_price(),
                    qty,
                },
            );
            k
        };
        let row = inner.items.get(&item_id).ok_or(AppError {
            code: AppErrorCode::DataCorruption,
            detail: Some("item-row-vanished".to_string()),
        })?;
        Ok(CartLineModel {
            id_: CartItemId::Confirmed(item_id),
            product_id: row.product_id,
            unit_price: row.unit_price,
            qty: row.qty,
        })
    } // end of fn add_item

    async fn update_item(
        &self,
        item_id: u64,
        qty: u32,
    ) -> DefaultResult<CartLineModel, AppError> {
        let mut inner = self.guard();
        let row = inner.items.get_mut(&item_id).ok_or(AppError {
            code: AppErrorCode::CartLineNotExist,
            detail: Some(format!("item-not-exist: {item_id}")),
        })?;
        row.qty = qty;
        Ok(CartLineModel {
            id_: CartItemId::Confirmed(item_id),
            product_id: row.product_id,
            unit_price: row.unit_price,
            qty: row.qty,
        })
    }

    async fn remove_item(&self, item_id: u64) -> DefaultResult<(), AppError> {
        let mut inner = self.guard();
        let _discard = inner.items.remove(&item_id);
        Ok(())
    }

    async fn clear_cart(&self, owner: &str) -> DefaultResult<(), AppError> {
        let mut inner = self.guard();
        let Some(oid) = Self::draft_of(&inner, owner) else {
            return Ok(());
        };
        if let Some(row) = inner.orders.get_mut(&oid) {
            row.status = OrderStatusDto::Canceled;
        }
        inner.items.retain(|_k, row| row.order != oid);
        Ok(())
    }

    async fn confirm_order(&self, cart_id: u64) -> DefaultResult<CartModel, AppError> {
        let mut inner = self.guard();
        let owner = {
            let row = inner.orders.get_mut(&cart_id).ok_or(AppError {
                code: AppErrorCode::CartNotCreated,
                detail: Some(format!("order-not-exist: {cart_id}")),
            })?;
            row.status = OrderStatusDto::Confirmed;
            row.owner.clone()
        };
        Ok(Self::cart_snapshot(&inner, cart_id, owner.as_str()))
    }

    async fn fetch_order_history(
        &self,
        owner: &str,
    ) -> DefaultResult<Vec<OrderHistoryModel>, AppError> {
        let inner = self.guard();
        let out = inner
            .orders
            .iter()
            .filter(|(_k, row)| row.owner == owner)
            .map(|(k, row)| {
                let snapshot = Self::cart_snapshot(&inner, *k, owner);
                OrderHistoryModel {
                    id_: *k,
                    status: OrderStatus::from(row.status),
                    total_cost: snapshot.total_cost,
                    num_items: snapshot.lines.len(),
                    created_at: None,
                }
            })
            .collect::<Vec<_>>();
        Ok(out)
    }
} // end of impl AbsCartGateway for CartInMemGateway
