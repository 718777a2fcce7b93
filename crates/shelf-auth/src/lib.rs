//! Authentication module for shelf.
//!
//! Holds the bearer credential for the signed-in user, the user profile,
//! and the login and registration forms.

mod credentials;
mod error;
mod session;
mod user;

pub use credentials::{LoginForm, LoginResponse, RegisterForm, MIN_PASSWORD_LEN};
pub use error::AuthError;
pub use session::AuthSession;
pub use user::User;
