use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;

use crate::api::dto::{OrderDto, OrderStatusDto};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Draft,
    Confirmed,
    Canceled,
}

impl From<OrderStatusDto> for OrderStatus {
    fn from(value: OrderStatusDto) -> Self {
        match value {
            OrderStatusDto::Draft => Self::Draft,
            OrderStatusDto::Confirmed => Self::Confirmed,
            OrderStatusDto::Canceled => Self::Canceled,
        }
    }
}

/// read-only snapshot of a past order, shown on the history screen,
/// never fed back into the reconciliation engine
#[derive(Debug, Clone)]
pub struct OrderHistoryModel {
    pub id_: u64,
    pub status: OrderStatus,
    pub total_cost: Decimal,
    pub num_items: usize,
    pub created_at: Option<DateTime<FixedOffset>>,
}

impl TryFrom<OrderDto> for OrderHistoryModel {
    type Error = OrderDto;
    fn try_from(value: OrderDto) -> Result<Self, Self::Error> {
        let Some(oid) = value.id else {
            return Err(value);
        };
        let total_cost = value.total_cost.unwrap_or(Decimal::ZERO);
        Ok(Self {
            id_: oid,
            status: value.status.map(OrderStatus::from).unwrap_or(OrderStatus::Draft),
            total_cost,
            num_items: value.items.len(),
            created_at: value.created_at,
        })
    }
}
