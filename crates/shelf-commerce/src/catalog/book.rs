//! Book and genre types.

use crate::ids::{BookId, GenreId};
use crate::money::{deserialize_amount, Currency, Money};
use serde::{Deserialize, Serialize};

/// Physical condition of a listed copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BookCondition {
    #[default]
    New,
    Used,
}

impl BookCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookCondition::New => "New",
            BookCondition::Used => "Used",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "new" => Some(BookCondition::New),
            "used" => Some(BookCondition::Used),
            _ => None,
        }
    }
}

/// A genre a book is filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

/// A book as returned by the catalog endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique book identifier.
    pub id: BookId,
    /// Title.
    pub title: String,
    /// Author.
    pub writer: String,
    /// Unit price in minor units of the store currency.
    #[serde(deserialize_with = "deserialize_amount")]
    pub price: i64,
    /// Copies in stock, as last reported by the server.
    #[serde(default, alias = "stock")]
    pub stock_quantity: i64,
    #[serde(default)]
    pub genre: Option<Genre>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default, alias = "publication_year")]
    pub publication_year: Option<i32>,
    #[serde(default)]
    pub condition: Option<BookCondition>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Cover image URL.
    #[serde(default, rename = "image_url", alias = "imageUrl")]
    pub image_url: Option<String>,
}

impl Book {
    /// Price as money in the given store currency.
    pub fn price_in(&self, currency: Currency) -> Money {
        Money::new(self.price, currency)
    }

    /// Check if the server last reported copies available.
    pub fn is_in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    /// Genre name, or "-" when the book has none.
    pub fn genre_name(&self) -> &str {
        self.genre.as_ref().map(|g| g.name.as_str()).unwrap_or("-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_from_list_payload() {
        let json = r#"{
            "id": 3,
            "title": "The Rust Programming Language",
            "writer": "Steve Klabnik",
            "price": 50000,
            "stock": 4,
            "genre": {"id": 1, "name": "Programming"},
            "publication_year": 2019,
            "condition": "New"
        }"#;

        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.id.as_str(), "3");
        assert_eq!(book.stock_quantity, 4);
        assert_eq!(book.publication_year, Some(2019));
        assert_eq!(book.condition, Some(BookCondition::New));
        assert_eq!(book.genre_name(), "Programming");
        assert!(book.is_in_stock());
    }

    #[test]
    fn test_book_from_detail_payload() {
        let json = r#"{
            "id": "b-9",
            "title": "Clean Code",
            "writer": "Robert C. Martin",
            "price": "30000.00",
            "stockQuantity": 0,
            "publicationYear": 2008,
            "image_url": "https://example.com/cover.jpg"
        }"#;

        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.price, 30_000);
        assert_eq!(book.publication_year, Some(2008));
        assert_eq!(book.image_url.as_deref(), Some("https://example.com/cover.jpg"));
        assert!(book.genre.is_none());
        assert_eq!(book.genre_name(), "-");
        assert!(!book.is_in_stock());
    }

    #[test]
    fn test_price_in_currency() {
        let book: Book = serde_json::from_str(
            r#"{"id": 1, "title": "T", "writer": "W", "price": 45000}"#,
        )
        .unwrap();
        assert_eq!(book.price_in(Currency::IDR).display(), "Rp 45.000");
    }

    #[test]
    fn test_condition_parse() {
        assert_eq!(BookCondition::parse("used"), Some(BookCondition::Used));
        assert_eq!(BookCondition::parse("NEW"), Some(BookCondition::New));
        assert_eq!(BookCondition::parse("mint"), None);
    }
}
