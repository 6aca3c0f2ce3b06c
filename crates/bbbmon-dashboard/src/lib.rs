//! bbbmon-dashboard - Poll/render/serve loop for the BBB monitor.
//!
//! This crate owns everything between a classified
//! [`Snapshot`](bbbmon_core::Snapshot) and the browser:
//!
//! - `render` turns a Snapshot into an immutable [`Rendering`]
//!   (full page + table body fragment)
//! - `RenderingStore` holds the single current Rendering, swapped
//!   atomically each cycle
//! - `run_refresh_loop` drives fetch -> render -> publish on a fixed
//!   interval until cancelled
//! - `run_server` serves the current Rendering over HTTP behind basic
//!   auth
//!
//! ```text
//!  refresh task                         axum tasks
//!  ────────────                         ──────────
//!  fetch_meetings()                     GET /        -> full page
//!       │                              GET /update  -> table body
//!       ▼                                   ▲
//!  render() ──publish──► RenderingStore ────┘
//! ```
//!
//! The two sides share only the store; `publish` swaps a whole
//! `Arc<Rendering>` so readers never observe a torn page/fragment pair.

pub mod config;
pub mod refresh;
pub mod render;
pub mod server;
pub mod store;

pub use config::DashboardConfig;
pub use refresh::run_refresh_loop;
pub use render::{render, Rendering};
pub use server::run_server;
pub use store::RenderingStore;
