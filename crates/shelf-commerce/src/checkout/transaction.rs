//! Transaction request and the transactions the server returns.

use crate::cart::CartState;
use crate::ids::{BookId, TransactionId, TransactionItemId};
use crate::money::{deserialize_amount, Currency, Money};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /transactions`.
///
/// Built from the cart at checkout time. Later cart edits do not touch an
/// already-built request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub items: Vec<TransactionItemRequest>,
}

/// One `{ bookId, quantity }` entry of a transaction request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionItemRequest {
    pub book_id: BookId,
    pub quantity: u32,
}

impl TransactionRequest {
    /// One item per cart line, in cart order.
    pub fn from_cart(cart: &CartState) -> Self {
        Self {
            items: cart
                .lines()
                .iter()
                .map(|line| TransactionItemRequest {
                    book_id: line.book.id.clone(),
                    quantity: line.quantity,
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total copies requested.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }
}

/// A completed purchase as stored by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(deserialize_with = "deserialize_amount")]
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub transaction_items: Vec<TransactionItem>,
}

impl Transaction {
    pub fn total_in(&self, currency: Currency) -> Money {
        Money::new(self.total_amount, currency)
    }

    /// Σ item subtotals, for cross-checking `total_amount`.
    pub fn items_total(&self) -> i64 {
        self.transaction_items
            .iter()
            .fold(0i64, |acc, item| acc.saturating_add(item.subtotal()))
    }
}

/// A purchased line with the price paid at the time of purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionItem {
    pub id: TransactionItemId,
    pub book: TransactionBook,
    pub quantity: u32,
    #[serde(deserialize_with = "deserialize_amount")]
    pub price_at_buy: i64,
}

impl TransactionItem {
    /// quantity × price_at_buy
    pub fn subtotal(&self) -> i64 {
        self.price_at_buy.saturating_mul(i64::from(self.quantity))
    }
}

/// Book reference embedded in a transaction item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionBook {
    pub id: BookId,
    pub title: String,
}
