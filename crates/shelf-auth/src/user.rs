//! User types.

use serde::{Deserialize, Serialize};
use shelf_commerce::ids::UserId;

/// The signed-in user as reported by `GET /auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl User {
    /// Name to greet the user with, falling back to the e-mail address.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.username.as_deref())
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(self.email.as_str())
    }
}
