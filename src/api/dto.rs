use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ProductDto {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub final_price: Option<Decimal>,
}

impl ProductDto {
    /// the price to charge, post-discount final price when the backend
    /// provides one, base price otherwise
    pub fn effective_price(&self) -> Decimal {
        self.final_price.unwrap_or(self.price)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OrderLineDto {
    pub id: u64,
    pub product: ProductDto,
    pub quantity: u32,
    #[serde(default)]
    pub total_price: Option<Decimal>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatusDto {
    Draft,
    Confirmed,
    Canceled,
}

#[derive(Deserialize, Debug, Clone)]
pub struct OrderDto {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub telegram_id: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderLineDto>,
    #[serde(default)]
    pub total_cost: Option<Decimal>,
    #[serde(default)]
    pub status: Option<OrderStatusDto>,
    #[serde(default)]
    pub created_at: Option<DateTime<FixedOffset>>,
}

/// list endpoints of the backend may respond with either a bare array
/// or a paginated envelope, accept both
#[derive(Deserialize)]
#[serde(untagged)]
pub enum ListRespDto<T> {
    Plain(Vec<T>),
    Paginated { results: Vec<T> },
}

impl<T> ListRespDto<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Plain(v) => v,
            Self::Paginated { results } => results,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OwnerProfileDto {
    pub username: String,
    pub phone_number: String,
    pub customer_name: String,
}

#[derive(Serialize)]
pub struct OrderCreateReqDto {
    pub telegram_id: String,
    pub username: String,
    pub phone_number: String,
    pub customer_name: String,
    pub status: OrderStatusDto,
    pub total_cost: Decimal,
}

#[derive(Serialize)]
pub struct OrderLineCreateReqDto {
    pub order: u64,
    pub product: u64,
    pub quantity: u32,
}

#[derive(Serialize)]
pub struct OrderLineQtyPatchDto {
    pub quantity: u32,
}

#[derive(Serialize)]
pub struct OrderStatusPatchDto {
    pub status: OrderStatusDto,
}
