//! Input for creating a catalog entry.

use crate::catalog::BookCondition;
use crate::ids::GenreId;
use crate::validation::FieldErrors;
use chrono::Datelike;
use serde::Serialize;

/// Earliest publication year accepted.
pub const MIN_PUBLICATION_YEAR: i32 = 1000;

/// Body of `POST /books`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub writer: String,
    pub publisher: String,
    pub publication_year: i32,
    pub genre_id: Option<GenreId>,
    pub price: i64,
    pub stock_quantity: i64,
    pub condition: BookCondition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "image_url", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl NewBook {
    /// Check every field, collecting one message per failing field.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        self.validate_for_year(chrono::Utc::now().year())
    }

    /// Same as [`NewBook::validate`] with an explicit "current" year.
    pub fn validate_for_year(&self, current_year: i32) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        errors.check(self.title.trim().is_empty(), "title", "Title is required");
        errors.check(self.writer.trim().is_empty(), "writer", "Writer is required");
        errors.check(
            self.publisher.trim().is_empty(),
            "publisher",
            "Publisher is required",
        );
        errors.check(
            !(MIN_PUBLICATION_YEAR..=current_year).contains(&self.publication_year),
            "publicationYear",
            "Publication year is out of range",
        );
        errors.check(
            self.genre_id.as_ref().map_or(true, |g| g.as_str().trim().is_empty()),
            "genreId",
            "Genre is required",
        );
        errors.check(self.price <= 0, "price", "Price must be greater than zero");
        errors.check(
            self.stock_quantity < 0,
            "stockQuantity",
            "Stock cannot be negative",
        );
        if let Some(url) = self.image_url.as_deref() {
            errors.check(
                !(url.starts_with("http://") || url.starts_with("https://")),
                "image_url",
                "Image URL must start with http:// or https://",
            );
        }

        errors.into_result()
    }

    /// Drop optional fields that were left blank.
    pub fn normalized(mut self) -> Self {
        fn blank_to_none(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }
        self.isbn = blank_to_none(self.isbn);
        self.description = blank_to_none(self.description);
        self.image_url = blank_to_none(self.image_url);
        self
    }
}
