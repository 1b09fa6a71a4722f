//! Configuration types for artwork-table

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::Path, time::Duration};
use utoipa::ToSchema;

/// Upstream artwork API settings
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SourceConfig {
    /// API base URL; `/artworks` is appended (default: "https://api.artic.edu/api/v1")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds (default: 30)
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    #[schema(value_type = u64)]
    pub request_timeout: Duration,

    /// User-Agent header sent upstream
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Paged view settings
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct TableConfig {
    /// Rows per page before the user picks another size (default: 12)
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Largest page size accepted from clients (default: 100, the upstream cap)
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,

    /// Sizes offered by the rows-per-page control (default: [12, 24, 48])
    #[serde(default = "default_rows_per_page_options")]
    pub rows_per_page_options: Vec<u32>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            rows_per_page_options: default_rows_per_page_options(),
        }
    }
}

/// Cross-page selection settings
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SelectionConfig {
    /// Maximum pages a single "select first N" run may fetch (default: 100)
    #[serde(default = "default_max_scan_pages")]
    pub max_scan_pages: u32,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            max_scan_pages: default_max_scan_pages(),
        }
    }
}

/// API and external server integration
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ServerIntegrationConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub api: ApiConfig,
}

/// HTTP server configuration
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiConfig {
    /// Address to bind to (default: 127.0.0.1:6789)
    #[serde(default = "default_bind_address")]
    #[schema(value_type = String)]
    pub bind_address: SocketAddr,

    /// Enable CORS for browser access (default: true)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins (default: ["*"])
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Enable Swagger UI at /swagger-ui (default: true)
    #[serde(default = "default_true")]
    pub swagger_ui: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            cors_enabled: true,
            cors_origins: default_cors_origins(),
            swagger_ui: true,
        }
    }
}

/// Main configuration for artwork-table
///
/// Every section and field has a default, so an empty JSON object is a
/// valid configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct Config {
    /// Upstream artwork API
    #[serde(default)]
    pub source: SourceConfig,

    /// Paged view
    #[serde(default)]
    pub table: TableConfig,

    /// Cross-page selection
    #[serde(default)]
    pub selection: SelectionConfig,

    /// HTTP server
    #[serde(default)]
    pub server: ServerIntegrationConfig,
}

impl Config {
    /// Load configuration from a JSON file and validate it
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents).map_err(|e| Error::Config {
            message: format!("failed to parse {}: {}", path.display(), e),
            key: None,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints that serde defaults cannot express
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.source.base_url)
            .map_err(|e| Error::config("source.base_url", format!("invalid URL: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(
                "source.base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if self.table.max_page_size == 0 {
            return Err(Error::config(
                "table.max_page_size",
                "must be greater than zero",
            ));
        }
        if self.table.default_page_size == 0 || self.table.default_page_size > self.table.max_page_size
        {
            return Err(Error::config(
                "table.default_page_size",
                format!("must be between 1 and {}", self.table.max_page_size),
            ));
        }
        if let Some(bad) = self
            .table
            .rows_per_page_options
            .iter()
            .find(|&&n| n == 0 || n > self.table.max_page_size)
        {
            return Err(Error::config(
                "table.rows_per_page_options",
                format!("option {bad} is outside 1..={}", self.table.max_page_size),
            ));
        }

        if self.selection.max_scan_pages == 0 {
            return Err(Error::config(
                "selection.max_scan_pages",
                "must be greater than zero",
            ));
        }

        Ok(())
    }

    /// Rows-per-page options including the default size, sorted and deduplicated
    pub fn page_size_options(&self) -> Vec<u32> {
        let mut options = self.table.rows_per_page_options.clone();
        options.push(self.table.default_page_size);
        options.sort_unstable();
        options.dedup();
        options
    }
}

fn default_base_url() -> String {
    "https://api.artic.edu/api/v1".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    format!("artwork-table/{}", env!("CARGO_PKG_VERSION"))
}

fn default_page_size() -> u32 {
    12
}

fn default_max_page_size() -> u32 {
    100
}

fn default_rows_per_page_options() -> Vec<u32> {
    vec![12, 24, 48]
}

fn default_max_scan_pages() -> u32 {
    100
}

fn default_true() -> bool {
    true
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 6789))
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
