//! HTTP gateway.
//!
//! Serves the current rendering behind a single shared basic-auth
//! credential. Every route is authenticated; a failed or malformed
//! Authorization header is always answered with a 401 challenge, never a
//! server error, and never reveals which of the two fields mismatched.
//!
//! Routes: `/` serves the full page, `/update` serves the table-body
//! fragment for the client-side poll. Any other path falls back to the
//! full page, mirroring the daemon's historical serve-the-dashboard
//! behavior for unknown paths.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::DashboardConfig;
use crate::store::RenderingStore;

/// Realm announced in the 401 challenge.
const REALM: &str = "BBB Monitoring";

/// Shared application state for axum handlers.
#[derive(Clone)]
pub struct AppState {
    store: Arc<RenderingStore>,
    username: String,
    password: String,
}

impl AppState {
    pub fn new(store: Arc<RenderingStore>, config: &DashboardConfig) -> Self {
        Self {
            store,
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }
}

/// Create the axum router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/update", get(serve_update))
        .fallback(serve_index)
        .with_state(state)
}

/// Serve the full dashboard page.
async fn serve_index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if !check_basic_auth(&headers, &state) {
        return unauthorized_response();
    }
    Html(state.store.get().full_page.clone()).into_response()
}

/// Serve the table-body fragment consumed by the client-side poll.
async fn serve_update(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if !check_basic_auth(&headers, &state) {
        return unauthorized_response();
    }
    Html(state.store.get().table_body.clone()).into_response()
}

/// Check basic authentication.
///
/// Any decoding failure (missing header, wrong scheme, bad base64,
/// missing separator, non-UTF-8) is treated as "not authenticated".
fn check_basic_auth(headers: &HeaderMap, state: &AppState) -> bool {
    let auth_str = match headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        Some(s) => s,
        None => return false,
    };

    let encoded = match auth_str.strip_prefix("Basic ") {
        Some(rest) => rest,
        None => return false,
    };

    let decoded = match STANDARD.decode(encoded).ok().and_then(|b| String::from_utf8(b).ok()) {
        Some(d) => d,
        None => return false,
    };

    let (username, password) = match decoded.split_once(':') {
        Some(parts) => parts,
        None => return false,
    };

    // Compare both fields unconditionally so a username mismatch is not
    // distinguishable by timing.
    constant_time_eq(username.as_bytes(), state.username.as_bytes())
        & constant_time_eq(password.as_bytes(), state.password.as_bytes())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// 401 challenge prompting the browser's credential dialog.
fn unauthorized_response() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(
            header::WWW_AUTHENTICATE,
            format!("Basic realm=\"{REALM}\""),
        )],
        Html("<h1>Authentication required.</h1>"),
    )
        .into_response()
}

/// Run the gateway until the shutdown token is triggered.
pub async fn run_server(
    store: Arc<RenderingStore>,
    config: DashboardConfig,
    shutdown: CancellationToken,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let state = AppState::new(store, &config);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(port = config.port, "Starting dashboard server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Rendering;
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    fn test_router() -> Router {
        let store = Arc::new(RenderingStore::new(Rendering {
            full_page: "<html>FULL</html>".to_string(),
            table_body: "<tr><td>BODY</td></tr>".to_string(),
        }));
        let config = DashboardConfig {
            port: 0,
            username: "admin".to_string(),
            password: "secret".to_string(),
        };
        create_router(AppState::new(store, &config))
    }

    fn basic_header(credentials: &str) -> String {
        format!("Basic {}", STANDARD.encode(credentials))
    }

    async fn send(router: Router, uri: &str, auth: Option<&str>) -> (StatusCode, String) {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = auth {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let response = router
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_index_with_valid_credentials() {
        let (status, body) =
            send(test_router(), "/", Some(&basic_header("admin:secret"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<html>FULL</html>");
    }

    #[tokio::test]
    async fn test_update_with_valid_credentials() {
        let (status, body) =
            send(test_router(), "/update", Some(&basic_header("admin:secret"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<tr><td>BODY</td></tr>");
    }

    #[tokio::test]
    async fn test_unknown_path_serves_full_page() {
        let (status, body) =
            send(test_router(), "/anything", Some(&basic_header("admin:secret"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<html>FULL</html>");
    }

    #[tokio::test]
    async fn test_missing_header_is_challenged() {
        let router = test_router();
        let response = router
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response
                .headers()
                .get(header::WWW_AUTHENTICATE)
                .and_then(|v| v.to_str().ok()),
            Some("Basic realm=\"BBB Monitoring\"")
        );
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let (status, _) = send(test_router(), "/", Some(&basic_header("admin:secreT"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_wrong_username_is_rejected() {
        let (status, _) = send(test_router(), "/", Some(&basic_header("admiN:secret"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_wrong_scheme_is_rejected() {
        let (status, _) = send(test_router(), "/", Some("Bearer admin:secret")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_base64_is_rejected_without_error() {
        let (status, _) = send(test_router(), "/", Some("Basic !!!not-base64!!!")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_missing_separator_is_rejected() {
        let (status, _) = send(test_router(), "/", Some(&basic_header("adminsecret"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_update_requires_auth_too() {
        let (status, _) = send(test_router(), "/update", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
