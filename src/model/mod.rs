mod cart;
mod order;

pub use cart::{CartItemId, CartLineModel, CartMergeOutcome, CartModel};
pub use order::{OrderHistoryModel, OrderStatus};
