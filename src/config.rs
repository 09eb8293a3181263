//! Application configuration loading from environment variables.
//!
//! All configuration is loaded from the environment at startup via standard `std::env::var`.
//! Every variable is optional so the service can boot unconfigured; a missing provider
//! credential surfaces as an auth failure on the first call that needs it, and the
//! `/health` endpoint reports which keys are absent.
//!
//! # Environment Variables
//!
//! - `ROBOFLOW_API_URL`: Cloud-detection provider base URL (default: "https://serverless.roboflow.com")
//! - `ROBOFLOW_API_KEY`: Cloud-detection provider credential
//! - `ROBOFLOW_MODEL_ID`: Hosted model identifier (default: "cloud-types2-vljyy/1")
//! - `OPENWEATHER_API_KEY`: Weather provider credential (legacy alias `weatherLOC` is read first)
//! - `OPENWEATHER_BASE_URL`: Weather provider base URL (default: "https://api.openweathermap.org/data/2.5")
//! - `HOST`: Server bind address (default: "0.0.0.0")
//! - `PORT`: Server port (default: 8000)
//! - `FRONTEND_URL`: Allowed CORS origin; absent means permissive CORS
//! - `DETECT_CONCURRENCY`: Concurrent detection requests admitted (default: 4)
//! - `DETECTION_TIMEOUT_SECONDS`: Detection transport timeout (default: 15)
//! - `WEATHER_TIMEOUT_SECONDS`: Weather transport timeout (default: 10)
//! - `SPOOL_DIR`: Directory for transient upload files (default: OS temp dir)
//! - `MAX_UPLOAD_BYTES`: Request body limit for uploads (default: 10 MiB)
//! - `RUST_LOG`: Logging level (default: "info,skywatch=debug,tower_http=debug")

use std::path::PathBuf;

/// Complete server configuration loaded from environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cloud-detection provider base URL
    pub roboflow_api_url: String,

    /// Cloud-detection provider API key; `None` means unconfigured
    pub roboflow_api_key: Option<String>,

    /// Hosted model identifier, e.g. `cloud-types2-vljyy/1`
    pub roboflow_model_id: String,

    /// Weather provider API key; `None` means unconfigured
    pub openweather_api_key: Option<String>,

    /// Weather provider base URL
    pub openweather_base_url: String,

    /// Server bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Allowed CORS origin for the frontend
    pub frontend_url: Option<String>,

    /// Maximum concurrently admitted detection requests
    pub detect_concurrency: usize,

    /// Transport timeout for detection provider calls, in seconds
    pub detection_timeout_seconds: u64,

    /// Transport timeout for weather provider calls, in seconds
    pub weather_timeout_seconds: u64,

    /// Directory where uploaded images are spooled for the duration of a request
    pub spool_dir: PathBuf,

    /// Maximum accepted upload body size in bytes
    pub max_upload_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed to the
    /// expected type. Missing variables fall back to defaults; missing
    /// credentials are reported lazily, not here.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            roboflow_api_url: env_or(
                "ROBOFLOW_API_URL",
                "https://serverless.roboflow.com".to_string(),
            )?,
            roboflow_api_key: env_optional("ROBOFLOW_API_KEY"),
            roboflow_model_id: env_or("ROBOFLOW_MODEL_ID", "cloud-types2-vljyy/1".to_string())?,
            // Legacy deployments set this key as `weatherLOC`; honor the
            // alias before the canonical name.
            openweather_api_key: env_optional("weatherLOC")
                .or_else(|| env_optional("OPENWEATHER_API_KEY")),
            openweather_base_url: env_or(
                "OPENWEATHER_BASE_URL",
                "https://api.openweathermap.org/data/2.5".to_string(),
            )?,
            host: env_or("HOST", "0.0.0.0".to_string())?,
            port: env_or("PORT", 8000)?,
            frontend_url: env_optional("FRONTEND_URL"),
            detect_concurrency: env_or("DETECT_CONCURRENCY", 4)?,
            detection_timeout_seconds: env_or("DETECTION_TIMEOUT_SECONDS", 15)?,
            weather_timeout_seconds: env_or("WEATHER_TIMEOUT_SECONDS", 10)?,
            spool_dir: env_optional("SPOOL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(std::env::temp_dir),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
        })
    }

    /// Names of provider configuration keys that are currently unset.
    ///
    /// Exposed through `/health` so a frontend can detect misconfiguration
    /// before attempting live inference.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.roboflow_api_key.is_none() {
            missing.push("ROBOFLOW_API_KEY");
        }
        if self.roboflow_model_id.is_empty() {
            missing.push("ROBOFLOW_MODEL_ID");
        }
        if self.openweather_api_key.is_none() {
            missing.push("OPENWEATHER_API_KEY");
        }
        missing
    }
}

/// Load an environment variable, treating empty values as unset.
fn env_optional(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Load an environment variable with a default value.
///
/// Returns the parsed environment variable if set, otherwise returns the default.
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed.
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}
