//! Login and registration forms.

use serde::{Deserialize, Serialize};
use shelf_commerce::validation::{is_valid_email, FieldErrors};
use std::fmt;

/// Shortest password accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Body of `POST /auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(!is_valid_email(&self.email), "email", "Invalid email format");
        errors.check(self.password.is_empty(), "password", "Password is required");
        errors.into_result()
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /auth/register`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into().trim().to_string(),
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(self.name.is_empty(), "name", "Name is required");
        errors.check(!is_valid_email(&self.email), "email", "Invalid email format");
        errors.check(
            self.password.chars().count() < MIN_PASSWORD_LEN,
            "password",
            "Password must be at least 6 characters",
        );
        errors.into_result()
    }
}

impl fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Reply to a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_validation() {
        assert!(LoginForm::new("ana@example.com", "x").validate().is_ok());

        let errors = LoginForm::new("ana", "").validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("Invalid email format"));
        assert_eq!(errors.get("password"), Some("Password is required"));
    }

    #[test]
    fn test_login_trims_email() {
        let form = LoginForm::new("  ana@example.com ", "pw");
        assert_eq!(form.email, "ana@example.com");
    }

    #[test]
    fn test_register_validation() {
        assert!(RegisterForm::new("Ana", "ana@example.com", "secret")
            .validate()
            .is_ok());

        let errors = RegisterForm::new(" ", "ana@example", "12345")
            .validate()
            .unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 6 characters")
        );
    }

    #[test]
    fn test_debug_redacts_password() {
        let form = LoginForm::new("ana@example.com", "hunter22");
        let debug = format!("{:?}", form);
        assert!(!debug.contains("hunter22"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_register_body() {
        let json = serde_json::to_value(RegisterForm::new("Ana", "ana@example.com", "secret"))
            .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Ana", "email": "ana@example.com", "password": "secret"})
        );
    }
}
