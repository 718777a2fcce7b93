//! Checkout module.
//!
//! Contains the transaction types, the gateway trait the API client
//! implements, and the reconciler that drives a checkout attempt.

mod gateway;
mod reconciler;
mod transaction;

pub use gateway::TransactionGateway;
#[cfg(test)]
pub use gateway::MockTransactionGateway;
pub use reconciler::{CheckoutReconciler, CheckoutStatus};
pub use transaction::{
    Transaction, TransactionBook, TransactionItem, TransactionItemRequest, TransactionRequest,
};
