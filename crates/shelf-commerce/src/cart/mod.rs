//! Shopping cart module.
//!
//! Contains the cart reducer, the store that owns a session's cart, and
//! pricing.

#[allow(clippy::module_inception)]
mod cart;
mod pricing;
mod store;

pub use cart::{BookSnapshot, CartCommand, CartLine, CartState};
pub use pricing::{CartSummary, LinePricing};
pub use store::CartStore;
