//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use shelf_auth::AuthSession;
use shelf_client::BookstoreClient;
use shelf_data::FetchClient;

use crate::config::ShelfConfig;
use crate::output::Output;

const CONFIG_NAMES: [&str; 3] = ["shelf.toml", ".shelf.toml", "shelf.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Loaded configuration, with command-line overrides applied.
    pub config: ShelfConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load the config named on the command line, or the nearest one found
    /// walking up from the working directory.
    pub fn load(config_path: Option<&Path>, api_url: Option<String>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(path.to_path_buf()),
            None => find_config(&cwd),
        };
        let mut config = match &config_path {
            Some(path) => ShelfConfig::load(path)?,
            None => ShelfConfig::default(),
        };

        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            config.api.base_url = url;
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Build an API client bound to the persisted session.
    pub fn client(&self) -> Result<BookstoreClient> {
        let http = FetchClient::with_timeout(Duration::from_secs(self.config.api.timeout_secs))
            .context("Failed to build HTTP client")?
            .with_base_url(self.config.api.base_url.clone());

        self.output
            .debug(&format!("API: {}", self.config.api.base_url));
        let token_path = self.config.token_path();
        let session = AuthSession::with_token_file(&token_path)
            .with_context(|| format!("Failed to read session file: {}", token_path.display()))?;

        Ok(BookstoreClient::new(http, Arc::new(session)))
    }
}

/// Find a config file in `start` or any of its parents.
pub(crate) fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

/// Per-user data directory.
pub(crate) fn data_dir() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        std::env::temp_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("shelf.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(dir.path().join("shelf.toml")));
    }

    #[test]
    fn test_find_config_prefers_nearest() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("shop");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("shelf.toml"), "").unwrap();
        std::fs::write(nested.join("shelf.json"), "{}").unwrap();

        assert_eq!(find_config(&nested), Some(nested.join("shelf.json")));
    }

    #[test]
    fn test_load_explicit_path_with_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[store]\nshipping = 9000\n").unwrap();

        let ctx = Context::load(
            Some(path.as_path()),
            Some("https://api.example.com".to_string()),
            Output::new(false, true),
        )
        .unwrap();
        assert_eq!(ctx.config.store.shipping, 9000);
        assert_eq!(ctx.config.api.base_url, "https://api.example.com");
        assert_eq!(ctx.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_client_uses_token_file() {
        let dir = tempfile::tempdir().unwrap();
        let token = dir.path().join("token");
        std::fs::write(&token, "saved-token\n").unwrap();

        let path = dir.path().join("shelf.toml");
        std::fs::write(
            &path,
            format!("[session]\ntoken_path = {:?}\n", token.display().to_string()),
        )
        .unwrap();

        let ctx = Context::load(Some(path.as_path()), None, Output::new(false, true)).unwrap();
        let client = ctx.client().unwrap();
        assert_eq!(
            client.session().current_token().as_deref(),
            Some("saved-token")
        );
    }
}
