//! REST client for the bookstore API.
//!
//! Wraps [`shelf_data::FetchClient`] with typed calls for auth, catalog
//! and transactions, and maps HTTP failures onto
//! [`CommerceError`](shelf_commerce::CommerceError). The client is also the
//! [`TransactionGateway`](shelf_commerce::checkout::TransactionGateway) the
//! checkout reconciler submits through.
//!
//! # Example
//!
//! ```rust,ignore
//! use shelf_client::BookstoreClient;
//! use shelf_auth::AuthSession;
//! use shelf_data::FetchClient;
//!
//! let http = FetchClient::with_timeout(Duration::from_secs(30))?
//!     .with_base_url("http://localhost:8000/api");
//! let session = Arc::new(AuthSession::with_token_file(token_path)?);
//! let client = BookstoreClient::new(http, session);
//!
//! let page = client.list_books(&BookQuery::new().with_search("rust")).await?;
//! ```

mod client;
mod envelope;
mod error;

pub use client::BookstoreClient;
