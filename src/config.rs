use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_SIGNER_BASE_URL: &str = "https://nb-dramabox-gentoken.vercel.app";
pub const DEFAULT_VENDOR_BASE_URL: &str = "https://sapi.dramaboxdb.com/drama-box";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} is not a valid URL: {reason}")]
    InvalidUrl { name: &'static str, reason: String },

    #[error("{name} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { name: &'static str, value: String },
}

/// Runtime settings, read once from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub signer_base_url: String,
    pub vendor_base_url: String,
    pub output_dir: PathBuf,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            signer_base_url: DEFAULT_SIGNER_BASE_URL.to_string(),
            vendor_base_url: DEFAULT_VENDOR_BASE_URL.to_string(),
            output_dir: PathBuf::from("."),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// Build the configuration from `SIGNER_BASE_URL`, `VENDOR_BASE_URL`,
    /// `OUTPUT_DIR` and `REQUEST_TIMEOUT_SECS`, falling back to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();

        let signer_base_url = base_url(
            "SIGNER_BASE_URL",
            lookup("SIGNER_BASE_URL").unwrap_or(defaults.signer_base_url),
        )?;
        let vendor_base_url = base_url(
            "VENDOR_BASE_URL",
            lookup("VENDOR_BASE_URL").unwrap_or(defaults.vendor_base_url),
        )?;
        let output_dir = lookup("OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.output_dir);

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        name: "REQUEST_TIMEOUT_SECS",
                        value: raw,
                    })
                }
            },
            None => defaults.request_timeout,
        };

        Ok(AppConfig {
            signer_base_url,
            vendor_base_url,
            output_dir,
            request_timeout,
        })
    }
}

// Endpoints are appended as `{base}/{path}`, so the base keeps its own path
// segment and loses any trailing slash.
fn base_url(name: &'static str, raw: String) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/').to_string();
    Url::parse(&trimmed).map_err(|e| ConfigError::InvalidUrl {
        name,
        reason: e.to_string(),
    })?;
    Ok(trimmed)
}
