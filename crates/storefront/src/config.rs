//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (default: <http://localhost:3000>).
//!   An `https://` URL turns on secure session cookies.
//! - `STOREFRONT_CURRENCY` - ISO 4217 store currency (default: BRL)
//! - `STOREFRONT_CATALOG_PATH` - Product catalog JSON file
//!   (default: `crates/storefront/content/products.json`)
//! - `STOREFRONT_CART_IDLE_MINUTES` - Minutes of inactivity before a cart and
//!   its session expire (default: 10080, one week)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use rocketshoes_core::CurrencyCode;
use thiserror::Error;

const DEFAULT_CATALOG_PATH: &str = "crates/storefront/content/products.json";
const DEFAULT_CART_IDLE_MINUTES: u64 = 7 * 24 * 60;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Currency every price is displayed in
    pub currency: CurrencyCode,
    /// Product catalog file
    pub catalog_path: PathBuf,
    /// Inactivity window after which carts and sessions expire
    pub cart_idle_timeout: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "production")
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = parse_var("STOREFRONT_HOST", &get_or("STOREFRONT_HOST", "127.0.0.1"))?;
        let port = parse_var("STOREFRONT_PORT", &get_or("STOREFRONT_PORT", "3000"))?;
        let base_url = get_or("STOREFRONT_BASE_URL", "http://localhost:3000");
        let currency = parse_var("STOREFRONT_CURRENCY", &get_or("STOREFRONT_CURRENCY", "BRL"))?;
        let catalog_path = PathBuf::from(get_or("STOREFRONT_CATALOG_PATH", DEFAULT_CATALOG_PATH));

        let idle_minutes: u64 = match lookup("STOREFRONT_CART_IDLE_MINUTES") {
            Some(value) => parse_var("STOREFRONT_CART_IDLE_MINUTES", &value)?,
            None => DEFAULT_CART_IDLE_MINUTES,
        };
        if idle_minutes == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_CART_IDLE_MINUTES".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        let sentry_sample_rate = parse_rate("SENTRY_SAMPLE_RATE", lookup("SENTRY_SAMPLE_RATE"), 1.0)?;
        let sentry_traces_sample_rate = parse_rate(
            "SENTRY_TRACES_SAMPLE_RATE",
            lookup("SENTRY_TRACES_SAMPLE_RATE"),
            0.0,
        )?;

        Ok(Self {
            host,
            port,
            base_url,
            currency,
            catalog_path,
            cart_idle_timeout: Duration::from_secs(idle_minutes.saturating_mul(60)),
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable value, naming the variable in the error.
fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a sample rate in `[0.0, 1.0]`.
fn parse_rate(key: &str, value: Option<String>, default: f32) -> Result<f32, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };
    let rate: f32 = parse_var(key, &value)?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ))
    }
}
