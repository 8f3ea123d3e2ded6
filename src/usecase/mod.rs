mod manage_cart;

pub use manage_cart::{
    AddCartItemUseCase, CartModifyUcResult, CheckoutUcResult, CheckoutUseCase,
    DiscardCartUseCase, LoadOrCreateCartUseCase, RemoveCartItemUseCase,
    RetrieveOrderHistoryUseCase, UpdateCartItemUseCase,
};
