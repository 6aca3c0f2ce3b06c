//! Dashboard server configuration.

use serde::{Deserialize, Serialize};

/// HTTP gateway configuration.
///
/// Credentials are required: the dashboard exposes meeting passcodes and
/// is never served unauthenticated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Basic auth username.
    pub username: String,
    /// Basic auth password.
    pub password: String,
}

fn default_port() -> u16 {
    8000
}
