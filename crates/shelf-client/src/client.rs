//! The bookstore API client.

use crate::envelope::{BookList, MetaList, Single};
use crate::error::{error_for_fetch, error_for_response, Endpoint};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use shelf_auth::{AuthSession, LoginForm, LoginResponse, RegisterForm, User};
use shelf_commerce::catalog::{Book, Genre, NewBook};
use shelf_commerce::checkout::{Transaction, TransactionGateway, TransactionRequest};
use shelf_commerce::ids::{BookId, TransactionId};
use shelf_commerce::search::{BookQuery, Page, TransactionQuery};
use shelf_commerce::CommerceError;
use shelf_data::{ClientRequestBuilder, FetchClient, FetchError, Response};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Typed access to the bookstore REST API.
///
/// Attaches the session's bearer token to every request. A 401 from any
/// endpoint clears the stored token and surfaces as
/// [`CommerceError::Unauthorized`].
#[derive(Debug, Clone)]
pub struct BookstoreClient {
    http: FetchClient,
    session: Arc<AuthSession>,
}

impl BookstoreClient {
    pub fn new(http: FetchClient, session: Arc<AuthSession>) -> Self {
        Self { http, session }
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    // === Auth ===

    /// Log in and store the returned token.
    pub async fn login(&self, form: &LoginForm) -> Result<(), CommerceError> {
        form.validate()?;
        let request = self
            .http
            .post("/auth/login")
            .json(form)
            .map_err(fetch(Endpoint::Login, "Account"))?;
        let response: LoginResponse = self.execute(request, Endpoint::Login, "Account").await?;
        self.session.set_token(response.token)?;
        info!(email = %form.email, "logged in");
        Ok(())
    }

    /// Create an account. Does not log in.
    pub async fn register(&self, form: &RegisterForm) -> Result<(), CommerceError> {
        form.validate()?;
        let request = self
            .http
            .post("/auth/register")
            .json(form)
            .map_err(fetch(Endpoint::Other, "Account"))?;
        self.execute_empty(request, Endpoint::Other, "Account").await?;
        info!(email = %form.email, "registered");
        Ok(())
    }

    /// The signed-in user.
    pub async fn me(&self) -> Result<User, CommerceError> {
        self.require_session()?;
        let single: Single<User> = self
            .execute(self.http.get("/auth/me"), Endpoint::Other, "User")
            .await?;
        Ok(single.into_inner())
    }

    /// Forget the stored token. Purely local.
    pub fn logout(&self) -> Result<(), CommerceError> {
        self.session.clear()?;
        info!("logged out");
        Ok(())
    }

    // === Catalog ===

    pub async fn list_books(&self, query: &BookQuery) -> Result<Page<Book>, CommerceError> {
        let request = self.http.get("/books").query_pairs(query.to_params());
        let list: BookList<Book> = self.execute(request, Endpoint::Other, "Books").await?;
        Ok(list.into_page(query.page))
    }

    pub async fn get_book(&self, id: &BookId) -> Result<Book, CommerceError> {
        let what = format!("Book {}", id);
        let single: Single<Book> = self
            .execute(self.http.get(format!("/books/{}", id)), Endpoint::Other, &what)
            .await?;
        Ok(single.into_inner())
    }

    /// Validate and create a book.
    pub async fn add_book(&self, book: &NewBook) -> Result<Book, CommerceError> {
        self.require_session()?;
        let book = book.clone().normalized();
        book.validate()?;
        let request = self
            .http
            .post("/books")
            .json(&book)
            .map_err(fetch(Endpoint::Other, "Book"))?;
        let single: Single<Book> = self.execute(request, Endpoint::Other, "Book").await?;
        let created = single.into_inner();
        info!(book_id = %created.id, title = %created.title, "book created");
        Ok(created)
    }

    pub async fn delete_book(&self, id: &BookId) -> Result<(), CommerceError> {
        self.require_session()?;
        let what = format!("Book {}", id);
        self.execute_empty(self.http.delete(format!("/books/{}", id)), Endpoint::Other, &what)
            .await?;
        info!(book_id = %id, "book deleted");
        Ok(())
    }

    pub async fn list_genres(&self) -> Result<Vec<Genre>, CommerceError> {
        let single: Single<Vec<Genre>> = self
            .execute(self.http.get("/genres"), Endpoint::Other, "Genres")
            .await?;
        Ok(single.into_inner())
    }

    // === Transactions ===

    /// `POST /transactions`. A 400 or 409 means the server refused the
    /// stock reservation.
    pub async fn create_transaction(
        &self,
        request: &TransactionRequest,
    ) -> Result<Transaction, CommerceError> {
        self.require_session()?;
        let builder = self
            .http
            .post("/transactions")
            .json(request)
            .map_err(fetch(Endpoint::Checkout, "Transaction"))?;
        let single: Single<Transaction> = self
            .execute(builder, Endpoint::Checkout, "Transaction")
            .await?;
        Ok(single.into_inner())
    }

    pub async fn list_transactions(
        &self,
        query: &TransactionQuery,
    ) -> Result<Page<Transaction>, CommerceError> {
        self.require_session()?;
        let request = self.http.get("/transactions").query_pairs(query.to_params());
        let list: MetaList<Transaction> = self
            .execute(request, Endpoint::Other, "Transactions")
            .await?;
        Ok(list.into_page(query.page))
    }

    pub async fn get_transaction(&self, id: &TransactionId) -> Result<Transaction, CommerceError> {
        self.require_session()?;
        let what = format!("Transaction {}", id);
        let single: Single<Transaction> = self
            .execute(
                self.http.get(format!("/transactions/{}", id)),
                Endpoint::Other,
                &what,
            )
            .await?;
        Ok(single.into_inner())
    }

    // === Plumbing ===

    fn require_session(&self) -> Result<(), CommerceError> {
        self.session.require_token()?;
        Ok(())
    }

    async fn send(
        &self,
        request: ClientRequestBuilder,
        endpoint: Endpoint,
        what: &str,
    ) -> Result<Response, CommerceError> {
        let response = request
            .maybe_bearer_auth(self.session.current_token())
            .send()
            .await
            .map_err(fetch(endpoint, what))?;

        if response.is_success() {
            return Ok(response);
        }

        let error = error_for_response(&response, endpoint, what);
        if error == CommerceError::Unauthorized {
            warn!(status = response.status, "credential rejected, clearing session");
            if let Err(e) = self.session.clear() {
                warn!(error = %e, "could not clear session");
            }
        } else {
            debug!(status = response.status, %error, "request failed");
        }
        Err(error)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: ClientRequestBuilder,
        endpoint: Endpoint,
        what: &str,
    ) -> Result<T, CommerceError> {
        let response = self.send(request, endpoint, what).await?;
        response.json().map_err(fetch(endpoint, what))
    }

    async fn execute_empty(
        &self,
        request: ClientRequestBuilder,
        endpoint: Endpoint,
        what: &str,
    ) -> Result<(), CommerceError> {
        self.send(request, endpoint, what).await.map(|_| ())
    }
}

fn fetch(endpoint: Endpoint, what: &str) -> impl FnOnce(FetchError) -> CommerceError + '_ {
    move |error| error_for_fetch(error, endpoint, what)
}

#[async_trait]
impl TransactionGateway for BookstoreClient {
    async fn create_transaction(
        &self,
        request: &TransactionRequest,
    ) -> Result<Transaction, CommerceError> {
        BookstoreClient::create_transaction(self, request).await
    }
}
