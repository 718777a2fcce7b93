//! Cart pricing breakdown.

use crate::cart::CartState;
use crate::ids::BookId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Totals shown on the cart page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartSummary {
    /// Per-line breakdown, in cart order.
    pub lines: Vec<LinePricing>,
    /// Σ line totals.
    pub subtotal: Money,
    /// Shipping cost.
    pub shipping: Money,
    /// subtotal + shipping.
    pub total: Money,
    /// Total copies across all lines.
    pub item_count: u64,
}

impl CartSummary {
    /// Price a cart with a flat shipping charge.
    pub fn of(state: &CartState, shipping: Money) -> Self {
        let lines: Vec<LinePricing> = state
            .lines()
            .iter()
            .map(|line| LinePricing {
                book_id: line.book.id.clone(),
                title: line.book.title.clone(),
                unit_price: line.book.unit_price,
                quantity: line.quantity,
                line_total: line.line_total(),
            })
            .collect();
        let subtotal = state.subtotal();

        Self {
            lines,
            subtotal,
            shipping,
            total: subtotal.saturating_add(&shipping),
            item_count: state.item_count(),
        }
    }

    pub fn has_shipping(&self) -> bool {
        !self.shipping.is_zero()
    }
}

/// Pricing for a single cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinePricing {
    pub book_id: BookId,
    pub title: String,
    pub unit_price: Money,
    pub quantity: u32,
    /// unit_price × quantity.
    pub line_total: Money,
}
