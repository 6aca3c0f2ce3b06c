//! HTTP client for the BBB administrative API.
//!
//! One call per poll cycle, no retries: retry cadence belongs to the
//! refresh loop. Every failure mode is folded into a `Snapshot` variant
//! so the caller never has to handle an `Err` mid-cycle.

use std::future::Future;
use std::time::Duration;

use bbbmon_core::Snapshot;
use reqwest::Client;
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};
use crate::parser;
use crate::signing::UrlSigner;

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetch seam for the refresh loop.
///
/// Production uses [`ApiClient`]; tests drive the loop with a stub.
pub trait FetchSnapshot: Send + Sync {
    /// Perform one `getMeetings` poll and classify the outcome.
    fn fetch_meetings(&self) -> impl Future<Output = Snapshot> + Send;
}

/// Client for the `getMeetings` administrative call.
pub struct ApiClient {
    client: Client,
    signer: UrlSigner,
}

impl ApiClient {
    /// Create a client with the default 10s timeout.
    pub fn new(signer: UrlSigner) -> ApiResult<Self> {
        Self::with_timeout(signer, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit timeout.
    pub fn with_timeout(signer: UrlSigner, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::HttpClient(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, signer })
    }
}

impl FetchSnapshot for ApiClient {
    fn fetch_meetings(&self) -> impl Future<Output = Snapshot> + Send {
        async move {
            let url = self.signer.build("getMeetings", &[]);
            debug!("Polling getMeetings");

            let response = match self.client.get(&url).send().await {
                Ok(response) => response,
                Err(e) => {
                    warn!(error = %e, "getMeetings request failed");
                    return Snapshot::TransportError;
                }
            };

            let status = response.status();
            if !status.is_success() {
                warn!(%status, "getMeetings returned non-success status");
                return Snapshot::TransportError;
            }

            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(error = %e, "Failed to read getMeetings response body");
                    return Snapshot::TransportError;
                }
            };

            parser::classify_response(&body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpListener;

    async fn client_for(addr: std::net::SocketAddr, timeout: Duration) -> ApiClient {
        let signer = UrlSigner::new(format!("http://{addr}"), "secret");
        ApiClient::with_timeout(signer, timeout).unwrap()
    }

    /// Serve exactly one connection with a fixed raw HTTP response.
    async fn spawn_one_shot_server(response: &'static str) -> std::net::SocketAddr {
        use tokio::io::AsyncReadExt;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                // Drain the request head before answering.
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf).await;
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });
        addr
    }

    fn http_ok(body: &str) -> String {
        format!(
            "HTTP/1.1 200 OK\r\ncontent-type: text/xml\r\ncontent-length: {}\r\n\r\n{}",
            body.len(),
            body
        )
    }

    #[tokio::test]
    async fn test_timeout_yields_transport_error() {
        // Accept the connection but never answer; the client timeout must
        // bound the call rather than hanging the cycle.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _held = listener.accept().await;
            tokio::time::sleep(Duration::from_secs(60)).await;
        });

        let client = client_for(addr, Duration::from_millis(200)).await;
        assert_eq!(client.fetch_meetings().await, Snapshot::TransportError);
    }

    #[tokio::test]
    async fn test_connection_refused_yields_transport_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(addr, Duration::from_millis(500)).await;
        assert_eq!(client.fetch_meetings().await, Snapshot::TransportError);
    }

    #[tokio::test]
    async fn test_non_2xx_yields_transport_error() {
        let addr = spawn_one_shot_server(
            "HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\n\r\n",
        )
        .await;

        let client = client_for(addr, Duration::from_secs(2)).await;
        assert_eq!(client.fetch_meetings().await, Snapshot::TransportError);
    }

    #[tokio::test]
    async fn test_successful_fetch_classifies_body() {
        let response = Box::leak(
            http_ok("<response><returncode>SUCCESS</returncode><meetings/></response>")
                .into_boxed_str(),
        );
        let addr = spawn_one_shot_server(response).await;

        let client = client_for(addr, Duration::from_secs(2)).await;
        assert_eq!(client.fetch_meetings().await, Snapshot::Empty);
    }

    #[tokio::test]
    async fn test_garbage_body_yields_parse_error() {
        let response = Box::leak(http_ok("this is not xml").into_boxed_str());
        let addr = spawn_one_shot_server(response).await;

        let client = client_for(addr, Duration::from_secs(2)).await;
        assert_eq!(client.fetch_meetings().await, Snapshot::ParseError);
    }
}
