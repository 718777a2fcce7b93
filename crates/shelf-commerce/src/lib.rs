//! Storefront domain types and logic for the Shelf bookstore client.
//!
//! - **Catalog**: books, genres, the new-book form
//! - **Cart**: the session cart, its reducer and pricing
//! - **Checkout**: transaction requests, the gateway trait, the reconciler
//! - **Search**: book and transaction listing queries, pagination
//!
//! # Example
//!
//! ```rust,ignore
//! use shelf_commerce::prelude::*;
//!
//! let mut cart = CartStore::new(Currency::IDR);
//! cart.add_item(&book);
//! cart.add_item(&book);
//!
//! let mut checkout = CheckoutReconciler::new();
//! println!("Total: {}", checkout.summary(&cart).total.display());
//!
//! match checkout.submit(&mut cart, &client).await {
//!     Ok(tx) => println!("Transaction {} created", tx.id),
//!     Err(e) => eprintln!("{}", e.user_message()),
//! }
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod validation;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod search;

pub use catalog::{Book, BookCondition, Genre};
pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::validation::FieldErrors;

    // Catalog
    pub use crate::catalog::{Book, BookCondition, Genre, NewBook};

    // Cart
    pub use crate::cart::{
        BookSnapshot, CartCommand, CartLine, CartState, CartStore, CartSummary, LinePricing,
    };

    // Checkout
    pub use crate::checkout::{
        CheckoutReconciler, CheckoutStatus, Transaction, TransactionGateway, TransactionItem,
        TransactionRequest,
    };

    // Search
    pub use crate::search::{BookQuery, BookSort, Page, SortOrder, TransactionQuery};
}
