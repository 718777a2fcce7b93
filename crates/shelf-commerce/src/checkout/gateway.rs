//! The remote side of checkout.

use crate::checkout::{Transaction, TransactionRequest};
use crate::CommerceError;
use async_trait::async_trait;

/// Something that can turn a transaction request into a stored transaction.
///
/// Implementations report a stock conflict as
/// [`CommerceError::InsufficientStock`]; the reconciler does no stock
/// checks of its own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionGateway: Send + Sync {
    async fn create_transaction(
        &self,
        request: &TransactionRequest,
    ) -> Result<Transaction, CommerceError>;
}
