//! bbbmon-api - Signed request builder and snapshot fetcher.
//!
//! This crate talks to the BigBlueButton administrative API:
//!
//! - `UrlSigner` builds checksum-authenticated API URLs
//! - `ApiClient` performs the `getMeetings` call and classifies the
//!   outcome into a [`Snapshot`](bbbmon_core::Snapshot)
//! - `FetchSnapshot` is the seam the refresh loop is driven through,
//!   so tests can substitute a stub fetcher

pub mod client;
pub mod error;
pub mod parser;
pub mod signing;

pub use client::{ApiClient, FetchSnapshot, DEFAULT_TIMEOUT};
pub use error::{ApiError, ApiResult};
pub use signing::UrlSigner;
