//! Application configuration.
//!
//! All configuration comes from environment variables — the daemon's
//! historical deployment contract. Values may arrive wrapped in single
//! or double quotes (common in `.env`-style setups) and are unquoted on
//! load. Missing required values abort startup before the listen port is
//! bound.

use crate::error::{AppError, AppResult};

/// Environment-sourced application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// BBB API base URL, e.g. `https://bbb.example.com/bigbluebutton/api`.
    pub api_url: String,
    /// Shared secret used to sign every API call. Never transmitted.
    pub api_secret: String,
    /// Port the dashboard listens on.
    pub server_port: u16,
    /// Poll cadence, also surfaced to the client-side refresh script.
    pub refresh_interval_secs: u64,
    /// Dashboard basic-auth username.
    pub username: String,
    /// Dashboard basic-auth password.
    pub password: String,
}

const DEFAULT_SERVER_PORT: u16 = 8000;
const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 15;

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary lookup. The seam tests
    /// use instead of mutating the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        Ok(Self {
            api_url: required(&lookup, "API_URL")?,
            api_secret: required(&lookup, "API_SECRET")?,
            server_port: parsed(&lookup, "SERVER_PORT", DEFAULT_SERVER_PORT)?,
            refresh_interval_secs: parsed(
                &lookup,
                "REFRESH_INTERVAL_SECONDS",
                DEFAULT_REFRESH_INTERVAL_SECS,
            )?,
            username: required(&lookup, "USERNAME")?,
            password: required(&lookup, "PASSWORD")?,
        })
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> AppResult<String> {
    lookup(name)
        .map(|raw| unquote(&raw))
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::Config(format!("Missing required environment variable: {name}")))
}

fn parsed<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> AppResult<T> {
    match lookup(name) {
        None => Ok(default),
        Some(raw) => {
            let value = unquote(&raw);
            if value.is_empty() {
                return Ok(default);
            }
            value
                .parse()
                .map_err(|_| AppError::Config(format!("Invalid value for {name}: {value:?}")))
        }
    }
}

/// Trim whitespace, then strip one matching pair of surrounding quotes.
fn unquote(raw: &str) -> String {
    let trimmed = raw.trim();
    let bytes = trimmed.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return trimmed[1..trimmed.len() - 1].to_string();
        }
    }
    trimmed.to_string()
}
