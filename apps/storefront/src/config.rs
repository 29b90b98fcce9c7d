//! # Storefront Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BOOKSTORE_USERS_URL=http://users.internal:8001                     │
//! │     BOOKSTORE_DATA_DIR=/tmp/storefront                                 │
//! │     BOOKSTORE_TIMEOUT_SECS=10                                          │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │     ~/Library/Application Support/com.bookstore.storefront/... (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:8001 .. 8005, 30 s timeout, platform data dir     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [services]
//! users = "http://localhost:8001"
//! books = "http://localhost:8002"
//! orders = "http://localhost:8003"
//! payments = "http://localhost:8004"
//! reviews = "http://localhost:8005"
//!
//! [http]
//! timeout_secs = 30
//!
//! [storage]
//! data_dir = "/home/ada/.local/share/storefront"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use bookstore_client::{parse_base_url, ApiConfig, Service};
use bookstore_storage::StorageConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "storefront.toml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to save config: {0}")]
    Save(String),

    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Invalid {service} service URL: {reason}")]
    InvalidUrl { service: Service, reason: String },
}

// =============================================================================
// Sections
// =============================================================================

/// Base URL per service, without the `/api` suffix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceUrls {
    #[serde(default = "default_users_url")]
    pub users: String,
    #[serde(default = "default_books_url")]
    pub books: String,
    #[serde(default = "default_orders_url")]
    pub orders: String,
    #[serde(default = "default_payments_url")]
    pub payments: String,
    #[serde(default = "default_reviews_url")]
    pub reviews: String,
}

fn default_url(service: Service) -> String {
    format!("http://localhost:{}", service.default_port())
}

fn default_users_url() -> String {
    default_url(Service::Users)
}

fn default_books_url() -> String {
    default_url(Service::Books)
}

fn default_orders_url() -> String {
    default_url(Service::Orders)
}

fn default_payments_url() -> String {
    default_url(Service::Payments)
}

fn default_reviews_url() -> String {
    default_url(Service::Reviews)
}

impl Default for ServiceUrls {
    fn default() -> Self {
        ServiceUrls {
            users: default_users_url(),
            books: default_books_url(),
            orders: default_orders_url(),
            payments: default_payments_url(),
            reviews: default_reviews_url(),
        }
    }
}

impl ServiceUrls {
    pub fn get(&self, service: Service) -> &str {
        match service {
            Service::Users => &self.users,
            Service::Books => &self.books,
            Service::Orders => &self.orders,
            Service::Payments => &self.payments,
            Service::Reviews => &self.reviews,
        }
    }

    fn get_mut(&mut self, service: Service) -> &mut String {
        match service {
            Service::Users => &mut self.users,
            Service::Books => &mut self.books,
            Service::Orders => &mut self.orders,
            Service::Payments => &mut self.payments,
            Service::Reviews => &mut self.reviews,
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Per-request timeout (seconds). Default: 30
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for HttpSettings {
    fn default() -> Self {
        HttpSettings {
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Local state settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Where the session and cart are kept. Default: platform data dir.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

// =============================================================================
// Storefront Configuration
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub services: ServiceUrls,

    #[serde(default)]
    pub http: HttpSettings,

    #[serde(default)]
    pub storage: StorageSettings,
}

impl StorefrontConfig {
    /// Loads configuration: defaults, then the TOML file, then environment
    /// overrides, then validation.
    ///
    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Writes the configuration as TOML, creating parent directories.
    pub fn save(&self, config_path: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ConfigError::Save("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Save(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self).map_err(|e| ConfigError::Save(e.to_string()))?;
        std::fs::write(&path, contents).map_err(|e| ConfigError::Save(e.to_string()))?;

        info!(?path, "Storefront config saved");
        Ok(path)
    }

    /// Checks every service URL is http(s) and the timeout is non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for service in Service::ALL {
            parse_base_url(self.services.get(service)).map_err(|e| ConfigError::InvalidUrl {
                service,
                reason: e.message,
            })?;
        }

        if self.http.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies `BOOKSTORE_*` overrides from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        for service in Service::ALL {
            let key = format!("BOOKSTORE_{}_URL", service.as_str().to_uppercase());
            if let Some(url) = lookup(&key) {
                debug!(%service, url = %url, "Overriding service URL from environment");
                *self.services.get_mut(service) = url;
            }
        }

        if let Some(dir) = lookup("BOOKSTORE_DATA_DIR") {
            debug!(dir = %dir, "Overriding data directory from environment");
            self.storage.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(secs) = lookup("BOOKSTORE_TIMEOUT_SECS") {
            self.http.timeout_secs = secs
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BOOKSTORE_TIMEOUT_SECS".to_string()))?;
        }

        Ok(())
    }

    /// Returns the default config file path for this platform.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "bookstore", "storefront")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Conversions
    // =========================================================================

    /// Client configuration for the five services.
    pub fn api_config(&self) -> Result<ApiConfig, ConfigError> {
        let mut api = ApiConfig::default().with_timeout(Duration::from_secs(self.http.timeout_secs));
        for service in Service::ALL {
            api = api
                .with_base_url(service, self.services.get(service))
                .map_err(|e| ConfigError::InvalidUrl {
                    service,
                    reason: e.message,
                })?;
        }
        Ok(api)
    }

    /// Where local state lives; `None` means the platform default.
    pub fn storage_config(&self) -> Option<StorageConfig> {
        self.storage.data_dir.clone().map(StorageConfig::new)
    }
}
