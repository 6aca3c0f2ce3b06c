//! bbbmon-daemon - Entry point for the BBB monitoring daemon.
//!
//! Loads environment configuration, initializes logging, and wires the
//! refresh loop and the HTTP gateway together around one shared
//! rendering store.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;

pub use app::Application;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
