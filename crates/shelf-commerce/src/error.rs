//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// The first five variants are the user-facing taxonomy: every failure the
/// API client or the checkout reconciler reports ends up as one of them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Input was rejected before or by the server.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// The server refused a checkout because stock ran out.
    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    /// A referenced book or transaction does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Credential missing, expired or rejected.
    #[error("Unauthorized")]
    Unauthorized,

    /// Transport failure or unexpected server response.
    #[error("Network or server error: {0}")]
    NetworkOrServer(String),

    /// Checkout attempted with no items in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Checkout attempted while another submission is in flight.
    #[error("Checkout already in progress")]
    CheckoutInProgress,

    /// A checkout outcome arrived with no attempt outstanding.
    #[error("No checkout in progress")]
    NoCheckoutPending,

    /// Response body could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CommerceError {
    /// The message shown to the user for this error.
    pub fn user_message(&self) -> String {
        match self {
            CommerceError::ValidationFailed(detail) => format!("Invalid input: {}", detail),
            CommerceError::InsufficientStock(_) => {
                "Checkout failed. Book stock may be insufficient.".to_string()
            }
            CommerceError::NotFound(what) => format!("{} was not found.", what),
            CommerceError::Unauthorized => {
                "Your session has expired. Please log in again.".to_string()
            }
            CommerceError::NetworkOrServer(_) | CommerceError::Serialization(_) => {
                "Could not reach the bookstore. Please try again.".to_string()
            }
            CommerceError::EmptyCart => "Your cart is empty.".to_string(),
            CommerceError::CheckoutInProgress => "Checkout is already being processed.".to_string(),
            CommerceError::NoCheckoutPending => "There is no checkout to finish.".to_string(),
        }
    }

    /// Check if this error means the session must be discarded.
    pub fn requires_login(&self) -> bool {
        matches!(self, CommerceError::Unauthorized)
    }

    /// Check if this is a server-reported stock conflict.
    pub fn is_stock_conflict(&self) -> bool {
        matches!(self, CommerceError::InsufficientStock(_))
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_conflict_message() {
        let err = CommerceError::InsufficientStock("book 1".to_string());
        assert!(err.is_stock_conflict());
        assert!(err.user_message().contains("stock"));
    }

    #[test]
    fn test_unauthorized_requires_login() {
        assert!(CommerceError::Unauthorized.requires_login());
        assert!(!CommerceError::EmptyCart.requires_login());
    }

    #[test]
    fn test_not_found_message_names_resource() {
        let err = CommerceError::NotFound("Book 42".to_string());
        assert_eq!(err.user_message(), "Book 42 was not found.");
    }
}
