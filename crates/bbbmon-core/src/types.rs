//! Meeting data and poll classification types.
//!
//! All of these are transient: a fresh set is built on every poll and the
//! previous one is thrown away. No identity persists across polls.

use serde::{Deserialize, Serialize};

/// Attendee role within a meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Moderator,
    Viewer,
}

impl Role {
    /// Map the BBB wire value. Anything other than `MODERATOR` is a viewer.
    pub fn from_api(value: &str) -> Self {
        if value == "MODERATOR" {
            Self::Moderator
        } else {
            Self::Viewer
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Moderator => write!(f, "MODERATOR"),
            Self::Viewer => write!(f, "VIEWER"),
        }
    }
}

/// One attendee of a meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    pub full_name: String,
    pub role: Role,
}

/// One active meeting as reported by `getMeetings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    /// Stable identifier used for `join`/`end` calls.
    pub meeting_id: String,
    /// Display name shown on the dashboard.
    pub meeting_name: String,
    /// Creation timestamp, passed through verbatim from the server.
    pub create_date: String,
    /// Course/context label from `metadata/bbb-context-name`, if present.
    pub context_name: Option<String>,
    /// Passcode required to end the meeting.
    pub moderator_pw: String,
    /// Passcode required to join as a viewer.
    pub attendee_pw: String,
    /// Attendees in server order.
    pub attendees: Vec<Attendee>,
}

impl Meeting {
    /// Attendee names with the moderator role, in source order.
    pub fn moderators(&self) -> impl Iterator<Item = &str> {
        self.attendees
            .iter()
            .filter(|a| a.role == Role::Moderator)
            .map(|a| a.full_name.as_str())
    }

    /// Attendee names with the viewer role, in source order.
    pub fn viewers(&self) -> impl Iterator<Item = &str> {
        self.attendees
            .iter()
            .filter(|a| a.role == Role::Viewer)
            .map(|a| a.full_name.as_str())
    }
}

/// Classified outcome of one poll cycle.
///
/// `Ok` never carries an empty list: zero meetings on a successful
/// response always classifies as `Empty`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Snapshot {
    /// Successful poll with at least one active meeting.
    Ok(Vec<Meeting>),
    /// Successful poll, no active meetings.
    Empty,
    /// The server reported an explicit failure status.
    ApiError(String),
    /// Network failure, timeout, or non-2xx status.
    TransportError,
    /// The response body could not be parsed.
    ParseError,
}
