//! The session-scoped cart owner.

use crate::cart::{BookSnapshot, CartCommand, CartState, CartSummary};
use crate::catalog::Book;
use crate::ids::BookId;
use crate::money::{Currency, Money};
use tracing::debug;

/// Holds the cart for one shopping session.
///
/// Every mutation goes through [`CartStore::dispatch`], which runs the
/// reducer and bumps `revision` whenever the lines actually change.
/// Nothing is persisted; the cart lives as long as the store.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    state: CartState,
    revision: u64,
}

impl CartStore {
    pub fn new(currency: Currency) -> Self {
        Self {
            state: CartState::new(currency),
            revision: 0,
        }
    }

    /// Run a command through the reducer. Returns `true` if the cart changed.
    pub fn dispatch(&mut self, command: CartCommand) -> bool {
        debug!(?command, "cart command");
        let changed = self.state.apply(command);
        if changed {
            self.revision += 1;
        }
        changed
    }

    /// Add one copy of a catalog book.
    pub fn add_item(&mut self, book: &Book) -> bool {
        let snapshot = BookSnapshot::of(book, self.state.currency());
        self.dispatch(CartCommand::AddItem(snapshot))
    }

    pub fn remove_item(&mut self, id: &BookId) -> bool {
        self.dispatch(CartCommand::RemoveItem(id.clone()))
    }

    pub fn increase_item(&mut self, id: &BookId) -> bool {
        self.dispatch(CartCommand::IncreaseItem(id.clone()))
    }

    pub fn decrease_item(&mut self, id: &BookId) -> bool {
        self.dispatch(CartCommand::DecreaseItem(id.clone()))
    }

    pub fn clear_cart(&mut self) -> bool {
        self.dispatch(CartCommand::Clear)
    }

    /// Current cart contents.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Counter of applied changes; used to tell whether the cart was
    /// edited since some earlier point.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    pub fn subtotal(&self) -> Money {
        self.state.subtotal()
    }

    pub fn summary(&self, shipping: Money) -> CartSummary {
        CartSummary::of(&self.state, shipping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: &str, price: i64) -> Book {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": format!("Book {}", id),
            "writer": "Writer",
            "price": price,
            "stockQuantity": 5
        }))
        .unwrap()
    }

    #[test]
    fn test_add_item_snapshots_book() {
        let mut store = CartStore::new(Currency::IDR);
        assert!(store.add_item(&book("1", 50_000)));
        let line = store.state().line(&BookId::new("1")).unwrap();
        assert_eq!(line.book.title, "Book 1");
        assert_eq!(line.book.unit_price, Money::new(50_000, Currency::IDR));
    }

    #[test]
    fn test_revision_counts_real_changes_only() {
        let mut store = CartStore::new(Currency::IDR);
        assert_eq!(store.revision(), 0);

        store.add_item(&book("1", 10));
        store.increase_item(&BookId::new("1"));
        assert_eq!(store.revision(), 2);

        assert!(!store.increase_item(&BookId::new("missing")));
        assert!(!store.remove_item(&BookId::new("missing")));
        assert_eq!(store.revision(), 2);

        store.clear_cart();
        assert_eq!(store.revision(), 3);
        assert!(!store.clear_cart());
        assert_eq!(store.revision(), 3);
    }

    #[test]
    fn test_decrease_then_remove() {
        let mut store = CartStore::new(Currency::IDR);
        store.add_item(&book("1", 10));
        store.add_item(&book("1", 10));
        store.decrease_item(&BookId::new("1"));
        assert_eq!(store.state().quantity_of(&BookId::new("1")), 1);
        store.decrease_item(&BookId::new("1"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_summary_uses_current_lines() {
        let mut store = CartStore::new(Currency::IDR);
        store.add_item(&book("1", 50_000));
        store.add_item(&book("2", 30_000));
        let summary = store.summary(Money::zero(Currency::IDR));
        assert_eq!(summary.total.amount, 80_000);
        assert_eq!(store.subtotal().amount, 80_000);
    }
}
