//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shelf_commerce::{Currency, Money};
use tracing_subscriber::EnvFilter;

/// Contents of `shelf.toml` / `shelf.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ShelfConfig {
    /// Where the bookstore API lives.
    #[serde(default)]
    pub api: ApiConfig,

    /// Storefront pricing.
    #[serde(default)]
    pub store: StoreConfig,

    /// Session persistence.
    #[serde(default)]
    pub session: SessionConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ShelfConfig {
    /// Load config from a file. `.json` files are parsed as JSON, anything
    /// else as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Flat shipping charge added at checkout.
    pub fn shipping(&self) -> Money {
        Money::new(self.store.shipping, self.store.currency)
    }

    /// Token file location, falling back to the per-user data directory.
    pub fn token_path(&self) -> PathBuf {
        self.session
            .token_path
            .clone()
            .unwrap_or_else(default_token_path)
    }

    /// Check the loaded values for mistakes.
    pub fn check(&self) -> ConfigReport {
        let mut report = ConfigReport::default();

        let url = self.api.base_url.trim();
        if url.is_empty() {
            report.errors.push("api.base_url is required".to_string());
        } else if !(url.starts_with("http://") || url.starts_with("https://")) {
            report
                .errors
                .push(format!("api.base_url '{}' must be an http(s) URL", url));
        } else if url.starts_with("http://") && !is_local(url) {
            report
                .warnings
                .push(format!("api.base_url '{}' is not using HTTPS", url));
        }

        if self.api.timeout_secs == 0 {
            report.errors.push("api.timeout_secs must be greater than 0".to_string());
        }

        if self.store.shipping < 0 {
            report.errors.push("store.shipping cannot be negative".to_string());
        }

        if EnvFilter::try_new(&self.logging.level).is_err() {
            report.errors.push(format!(
                "logging.level '{}' is not a valid filter",
                self.logging.level
            ));
        }

        if let Some(path) = &self.session.token_path {
            if path.is_dir() {
                report.errors.push(format!(
                    "session.token_path '{}' is a directory",
                    path.display()
                ));
            }
        }

        report
    }
}

/// Problems found by [`ShelfConfig::check`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ConfigReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// `[api]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL every endpoint path is joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// `[store]`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    /// Currency the catalog is priced in.
    #[serde(default)]
    pub currency: Currency,

    /// Flat shipping charge in the currency's smallest unit.
    #[serde(default)]
    pub shipping: i64,
}

/// `[session]`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_path: Option<PathBuf>,
}

/// `[logging]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

fn is_local(url: &str) -> bool {
    let rest = url.trim_start_matches("http://");
    rest.starts_with("localhost") || rest.starts_with("127.0.0.1") || rest.starts_with("[::1]")
}

fn default_token_path() -> PathBuf {
    crate::context::data_dir().join("shelf").join("token")
}

/// Template written by `shelf config init`.
pub fn generate_default_config() -> String {
    r#"# shelf configuration

[api]
base_url = "http://localhost:8000/api"
timeout_secs = 30

[store]
# IDR, USD, EUR or JPY
currency = "IDR"
# Flat shipping charge in the currency's smallest unit
shipping = 0

[session]
# token_path = "/path/to/token"

[logging]
# Any tracing filter directive; RUST_LOG takes precedence
level = "warn"
# compact or json
format = "compact"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ShelfConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.store.currency, Currency::IDR);
        assert!(config.shipping().is_zero());
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert!(config.token_path().ends_with("shelf/token"));
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_template_parses_to_defaults() {
        let config: ShelfConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, ShelfConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config: ShelfConfig = toml::from_str(
            r#"
            [store]
            shipping = 15000

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.api, ApiConfig::default());
        assert_eq!(config.shipping(), Money::new(15_000, Currency::IDR));
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shelf.json");

        let mut config = ShelfConfig::default();
        config.api.base_url = "https://books.example.com/api".to_string();
        config.session.token_path = Some(dir.path().join("token"));
        config.save(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.trim_start().starts_with('{'));
        assert_eq!(ShelfConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_reports_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shelf.toml");
        std::fs::write(&path, "[api\nbase_url = 1").unwrap();
        let err = ShelfConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML config"));
    }

    #[test]
    fn test_check_errors() {
        let mut config = ShelfConfig::default();
        config.api.base_url = "ftp://books".to_string();
        config.api.timeout_secs = 0;
        config.store.shipping = -1;
        config.logging.level = "loud=[".to_string();

        let report = config.check();
        assert!(!report.is_ok());
        assert_eq!(report.errors.len(), 4);
    }

    #[test]
    fn test_check_warns_on_plain_http() {
        let mut config = ShelfConfig::default();
        config.api.base_url = "http://books.example.com/api".to_string();
        let report = config.check();
        assert!(report.is_ok());
        assert_eq!(report.warnings.len(), 1);
    }
}
