//! Core domain types for the BBB monitoring daemon.
//!
//! This crate provides the types shared between the API client and the
//! dashboard:
//! - `Meeting`, `Attendee`, `Role`: one active session as reported by the
//!   BBB server
//! - `Snapshot`: the classified outcome of one poll cycle

pub mod types;

pub use types::{Attendee, Meeting, Role, Snapshot};
