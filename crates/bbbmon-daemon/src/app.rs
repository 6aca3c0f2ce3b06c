//! Application wiring.
//!
//! Builds the signer, client and store from configuration, spawns the
//! refresh loop, and runs the gateway until ctrl-c. The loop and the
//! gateway share only the `RenderingStore`; both observe the same
//! cancellation token during orderly shutdown.

use std::sync::Arc;
use std::time::Duration;

use bbbmon_api::{ApiClient, UrlSigner};
use bbbmon_dashboard::{run_refresh_loop, run_server, DashboardConfig, Rendering, RenderingStore};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

/// Main application.
pub struct Application {
    config: AppConfig,
}

impl Application {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Run until ctrl-c.
    pub async fn run(self) -> AppResult<()> {
        let signer = UrlSigner::new(&self.config.api_url, &self.config.api_secret);
        let client = ApiClient::new(signer.clone())?;

        // Seeded before the loop starts so `get` never comes up empty.
        let store = Arc::new(RenderingStore::new(Rendering::initializing()));
        let interval = Duration::from_secs(self.config.refresh_interval_secs);
        let cancel = CancellationToken::new();

        let refresh_handle = tokio::spawn(run_refresh_loop(
            client,
            signer,
            Arc::clone(&store),
            interval,
            cancel.clone(),
        ));

        let shutdown = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Received ctrl-c, shutting down");
            }
            shutdown.cancel();
        });

        let dashboard_config = DashboardConfig {
            port: self.config.server_port,
            username: self.config.username.clone(),
            password: self.config.password.clone(),
        };

        let result = run_server(store, dashboard_config, cancel.clone()).await;
        cancel.cancel();

        if let Err(e) = refresh_handle.await {
            error!(error = %e, "Refresh loop task failed");
        }

        result.map_err(|e| AppError::Server(e.to_string()))
    }
}
