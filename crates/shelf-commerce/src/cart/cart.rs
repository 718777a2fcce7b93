//! Cart state, line items and the reducer that mutates them.

use crate::catalog::Book;
use crate::ids::BookId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// The parts of a book a cart line remembers.
///
/// Taken when the book is added and never refreshed, so the price a
/// shopper sees in the cart is the price they saw when adding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub id: BookId,
    pub title: String,
    pub writer: String,
    pub unit_price: Money,
}

impl BookSnapshot {
    /// Snapshot a catalog book, pricing it in the store currency.
    pub fn of(book: &Book, currency: Currency) -> Self {
        Self {
            id: book.id.clone(),
            title: book.title.clone(),
            writer: book.writer.clone(),
            unit_price: book.price_in(currency),
        }
    }
}

/// One (book, quantity) pair in the cart.
///
/// `quantity` is at least 1 for every line held by a [`CartState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub book: BookSnapshot,
    pub quantity: u32,
}

impl CartLine {
    /// `unit_price × quantity`.
    pub fn line_total(&self) -> Money {
        self.book.unit_price.saturating_multiply(self.quantity)
    }
}

/// A user action on the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCommand {
    /// Add one copy; merges into an existing line for the same book.
    AddItem(BookSnapshot),
    /// Drop the line for a book.
    RemoveItem(BookId),
    /// One more copy of a book already in the cart.
    IncreaseItem(BookId),
    /// One fewer copy; the line disappears when it reaches zero.
    DecreaseItem(BookId),
    /// Empty the cart.
    Clear,
}

/// Ordered cart lines, at most one per book id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartState {
    lines: Vec<CartLine>,
    currency: Currency,
}

impl CartState {
    /// Create an empty cart priced in `currency`.
    pub fn new(currency: Currency) -> Self {
        Self {
            lines: Vec::new(),
            currency,
        }
    }

    /// Apply a command and return the resulting state.
    pub fn reduce(mut self, command: CartCommand) -> CartState {
        self.apply(command);
        self
    }

    /// Apply a command in place. Returns `true` if the lines changed.
    pub(crate) fn apply(&mut self, command: CartCommand) -> bool {
        match command {
            CartCommand::AddItem(book) => {
                match self.lines.iter_mut().find(|l| l.book.id == book.id) {
                    Some(line) => line.quantity = line.quantity.saturating_add(1),
                    None => self.lines.push(CartLine { book, quantity: 1 }),
                }
                true
            }
            CartCommand::RemoveItem(id) => {
                let before = self.lines.len();
                self.lines.retain(|l| l.book.id != id);
                self.lines.len() != before
            }
            CartCommand::IncreaseItem(id) => match self.line_mut(&id) {
                Some(line) => {
                    line.quantity = line.quantity.saturating_add(1);
                    true
                }
                None => false,
            },
            CartCommand::DecreaseItem(id) => match self.line_mut(&id) {
                Some(line) => {
                    line.quantity -= 1;
                    if line.quantity == 0 {
                        self.lines.retain(|l| l.book.id != id);
                    }
                    true
                }
                None => false,
            },
            CartCommand::Clear => {
                let changed = !self.lines.is_empty();
                self.lines.clear();
                changed
            }
        }
    }

    fn line_mut(&mut self, id: &BookId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| &l.book.id == id)
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for a book, if present.
    pub fn line(&self, id: &BookId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.book.id == id)
    }

    /// Quantity of a book in the cart (0 if absent).
    pub fn quantity_of(&self, id: &BookId) -> u32 {
        self.line(id).map_or(0, |l| l.quantity)
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct books.
    pub fn unique_item_count(&self) -> usize {
        self.lines.len()
    }

    /// Total copies across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Σ `line_total` over all lines, computed on every call.
    pub fn subtotal(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(self.currency), |acc, line| {
                acc.saturating_add(&line.line_total())
            })
    }
}
