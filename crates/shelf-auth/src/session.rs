//! Session credential storage.

use crate::AuthError;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, info};

/// Holds the bearer token for the current user.
///
/// Optionally backed by a token file so a login survives between runs.
/// The file is read at construction and again on [`reload`](AuthSession::reload),
/// which picks up a login or logout made by another process.
#[derive(Default)]
pub struct AuthSession {
    token: RwLock<Option<String>>,
    token_path: Option<PathBuf>,
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("authenticated", &self.is_authenticated())
            .field("token_path", &self.token_path)
            .finish()
    }
}

impl AuthSession {
    /// A session that is never persisted.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// A session persisted at `path`, loading any token already there.
    pub fn with_token_file(path: impl Into<PathBuf>) -> Result<Self, AuthError> {
        let path = path.into();
        let token = read_token(&path)?;
        debug!(path = %path.display(), present = token.is_some(), "loaded session token");
        Ok(Self {
            token: RwLock::new(token),
            token_path: Some(path),
        })
    }

    pub fn token_path(&self) -> Option<&Path> {
        self.token_path.as_deref()
    }

    /// The stored bearer token, if any.
    pub fn current_token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// The stored token, or `NotLoggedIn`.
    pub fn require_token(&self) -> Result<String, AuthError> {
        self.current_token().ok_or(AuthError::NotLoggedIn)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_token().is_some()
    }

    /// Store a new token, replacing any previous one.
    pub fn set_token(&self, token: impl Into<String>) -> Result<(), AuthError> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(AuthError::InvalidToken);
        }
        if let Some(path) = &self.token_path {
            write_token(path, &token)?;
        }
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token);
        info!("session token stored");
        Ok(())
    }

    /// Re-read the token file, replacing the in-memory token.
    ///
    /// In-memory sessions are left as they are. Returns whether a token is
    /// held afterwards.
    pub fn reload(&self) -> Result<bool, AuthError> {
        let Some(path) = &self.token_path else {
            return Ok(self.is_authenticated());
        };
        let token = read_token(path)?;
        let present = token.is_some();
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = token;
        debug!(path = %path.display(), present, "reloaded session token");
        Ok(present)
    }

    /// Forget the token. Clearing an empty session is not an error.
    pub fn clear(&self) -> Result<(), AuthError> {
        let had_token = self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
            .is_some();
        if let Some(path) = &self.token_path {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        if had_token {
            info!("session token cleared");
        }
        Ok(())
    }
}

fn read_token(path: &Path) -> Result<Option<String>, AuthError> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            let token = contents.trim();
            Ok((!token.is_empty()).then(|| token.to_string()))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn write_token(path: &Path, token: &str) -> Result<(), AuthError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, token)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_session() {
        let session = AuthSession::in_memory();
        assert!(!session.is_authenticated());
        assert!(matches!(session.require_token(), Err(AuthError::NotLoggedIn)));

        session.set_token("abc").unwrap();
        assert_eq!(session.current_token().as_deref(), Some("abc"));

        session.clear().unwrap();
        assert!(session.current_token().is_none());
        session.clear().unwrap();
    }

    #[test]
    fn test_blank_token_rejected() {
        let session = AuthSession::in_memory();
        assert!(matches!(session.set_token("   "), Err(AuthError::InvalidToken)));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_token_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("token");

        let session = AuthSession::with_token_file(&path).unwrap();
        assert!(!session.is_authenticated());
        session.set_token("persisted-token").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "persisted-token");

        let reloaded = AuthSession::with_token_file(&path).unwrap();
        assert_eq!(reloaded.current_token().as_deref(), Some("persisted-token"));

        reloaded.clear().unwrap();
        assert!(!path.exists());
        assert!(!AuthSession::with_token_file(&path).unwrap().is_authenticated());
    }

    #[test]
    fn test_reload_sees_login_from_another_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");

        let shop = AuthSession::with_token_file(&path).unwrap();
        let login = AuthSession::with_token_file(&path).unwrap();
        login.set_token("fresh").unwrap();
        assert!(shop.current_token().is_none());

        assert!(shop.reload().unwrap());
        assert_eq!(shop.current_token().as_deref(), Some("fresh"));

        login.clear().unwrap();
        assert!(!shop.reload().unwrap());
        assert!(!shop.is_authenticated());
    }

    #[test]
    fn test_reload_keeps_in_memory_token() {
        let session = AuthSession::in_memory();
        session.set_token("abc").unwrap();
        assert!(session.reload().unwrap());
        assert_eq!(session.current_token().as_deref(), Some("abc"));
    }

    #[test]
    fn test_empty_token_file_means_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        fs::write(&path, "\n").unwrap();
        let session = AuthSession::with_token_file(&path).unwrap();
        assert!(!session.is_authenticated());
    }

    #[cfg(unix)]
    #[test]
    fn test_token_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        let session = AuthSession::with_token_file(&path).unwrap();
        session.set_token("secret").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
