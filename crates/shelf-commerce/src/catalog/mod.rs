//! Book catalog module.
//!
//! Contains the book and genre types read from the API and the form used
//! to add a book.

mod book;
mod form;

pub use book::{Book, BookCondition, Genre};
pub use form::{NewBook, MIN_PUBLICATION_YEAR};
