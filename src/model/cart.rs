use rust_decimal::Decimal;
use uuid::Uuid;

use crate::api::dto::{OrderDto, OrderLineDto, ProductDto};

/// identity of one cart line, the tagged variants keep a locally
/// generated provisional id distinguishable from a backend-assigned id,
/// a provisional id must never reach the backend
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CartItemId {
    Provisional(Uuid),
    Confirmed(u64),
}

impl CartItemId {
    pub fn new_provisional() -> Self {
        Self::Provisional(Uuid::new_v4())
    }
    pub fn is_provisional(&self) -> bool {
        matches!(self, Self::Provisional(_))
    }
    pub fn confirmed(&self) -> Option<u64> {
        match self {
            Self::Confirmed(v) => Some(*v),
            Self::Provisional(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartLineModel {
    pub id_: CartItemId,
    pub product_id: u64,
    // effective price captured at the moment of optimistic insertion,
    // overwritten by backend-computed price on resynchronization
    pub unit_price: Decimal,
    pub qty: u32,
}

impl CartLineModel {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.qty)
    }
}

impl From<OrderLineDto> for CartLineModel {
    fn from(value: OrderLineDto) -> Self {
        Self {
            id_: CartItemId::Confirmed(value.id),
            product_id: value.product.id,
            unit_price: value.product.effective_price(),
            qty: value.quantity,
        }
    }
}

/// outcome of applying an add intent locally, tells the engine which
/// remote call has to follow
#[derive(Debug, Clone, PartialEq)]
pub enum CartMergeOutcome {
    Appended(CartItemId),
    Merged { id_: CartItemId, new_qty: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartModel {
    pub id_: Option<u64>,
    pub owner: String,
    pub lines: Vec<CartLineModel>,
    pub total_cost: Decimal,
}

impl CartModel {
    pub fn empty(owner: String) -> Self {
        Self {
            id_: None,
            owner,
            lines: Vec::new(),
            total_cost: Decimal::ZERO,
        }
    }

    /// `total_cost` is derived state, recomputed wholesale after every
    /// local mutation so it cannot drift from `lines`
    pub fn recalc_total(&mut self) {
        self.total_cost = self.lines.iter().map(CartLineModel::line_total).sum();
    }

    pub fn find_line(&self, id_: &CartItemId) -> Option<&CartLineModel> {
        self.lines.iter().find(|obj| &obj.id_ == id_)
    }

    pub fn find_line_by_product(&self, product_id: u64) -> Option<&CartLineModel> {
        self.lines.iter().find(|obj| obj.product_id == product_id)
    }

    /// quantity merge is additive, a product already present gets its
    /// line incremented instead of a duplicate line appended
    pub fn add_product(&mut self, product: &ProductDto, qty: u32) -> CartMergeOutcome {
        let found = self.lines.iter_mut().find(|obj| obj.product_id == product.id);
        let outcome = if let Some(line) = found {
            line.qty += qty;
            CartMergeOutcome::Merged {
                id_: line.id_.clone(),
                new_qty: line.qty,
            }
        } else {
            let line = CartLineModel {
                id_: CartItemId::new_provisional(),
                product_id: product.id,
                unit_price: product.effective_price(),
                qty,
            };
            let tmp_id = line.id_.clone();
            self.lines.push(line);
            CartMergeOutcome::Appended(tmp_id)
        };
        self.recalc_total();
        outcome
    }

    pub fn set_line_qty(&mut self, id_: &CartItemId, qty: u32) -> bool {
        let found = self.lines.iter_mut().find(|obj| &obj.id_ == id_);
        if let Some(line) = found {
            line.qty = qty;
            self.recalc_total();
            true
        } else {
            false
        }
    }

    pub fn remove_line(&mut self, id_: &CartItemId) -> Option<CartLineModel> {
        let found = self.lines.iter().position(|obj| &obj.id_ == id_);
        found.map(|idx| {
            let line = self.lines.remove(idx);
            self.recalc_total();
            line
        })
    }

    pub fn clear_lines(&mut self) {
        self.lines.clear();
        self.total_cost = Decimal::ZERO;
    }

    /// swap a provisional line for its backend-acknowledged counterpart,
    /// same position in display order, new identity
    pub fn replace_provisional(&mut self, tmp_id: &CartItemId, confirmed: CartLineModel) -> bool {
        let found = self.lines.iter().position(|obj| &obj.id_ == tmp_id);
        if let Some(idx) = found {
            self.lines[idx] = confirmed;
            self.recalc_total();
            true
        } else {
            false
        }
    }
}

// defensive normalization of whatever shape the backend returns, a
// missing item list becomes empty and a missing total is recomputed
impl From<(String, OrderDto)> for CartModel {
    fn from(value: (String, OrderDto)) -> Self {
        let (owner, data) = value;
        let lines = data
            .items
            .into_iter()
            .map(CartLineModel::from)
            .collect::<Vec<_>>();
        let mut obj = Self {
            id_: data.id,
            owner,
            lines,
            total_cost: Decimal::ZERO,
        };
        match data.total_cost {
            Some(v) => obj.total_cost = v,
            None => obj.recalc_total(),
        }
        obj
    }
}
