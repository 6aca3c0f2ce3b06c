//! Background refresh loop.
//!
//! One task running fetch -> render -> publish on a fixed cadence for the
//! lifetime of the process. Fetch failures are already encoded as
//! `Snapshot` variants, and a panic inside rendering is downgraded to the
//! processing-error placeholder, so the loop cannot die from a bad cycle.
//!
//! # Graceful Shutdown
//!
//! The loop exits cleanly when the cancellation token is triggered. Tests
//! use the same token to run a bounded number of cycles deterministically.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use bbbmon_api::{FetchSnapshot, UrlSigner};
use bbbmon_core::Snapshot;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::render::render;
use crate::store::RenderingStore;

/// Run the refresh loop until the token is cancelled.
///
/// The first poll happens immediately; subsequent polls follow
/// `interval`. The same interval is embedded into each rendering for the
/// client-side poll.
pub async fn run_refresh_loop<F: FetchSnapshot>(
    fetcher: F,
    signer: UrlSigner,
    store: Arc<RenderingStore>,
    interval: Duration,
    cancel_token: CancellationToken,
) {
    info!(interval_secs = interval.as_secs(), "Starting refresh loop");

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let snapshot = fetcher.fetch_meetings().await;
                debug!(?snapshot, "Poll cycle completed");

                let rendering = match catch_unwind(AssertUnwindSafe(|| {
                    render(&snapshot, &signer, interval)
                })) {
                    Ok(rendering) => rendering,
                    Err(_) => {
                        error!("Renderer panicked, publishing processing-error placeholder");
                        render(&Snapshot::ParseError, &signer, interval)
                    }
                };

                store.publish(rendering);
            }
            _ = cancel_token.cancelled() => {
                info!("Refresh loop received shutdown signal, exiting");
                break;
            }
        }
    }
}
