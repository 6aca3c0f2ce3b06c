//! `getMeetings` response parsing and classification.
//!
//! The server answers with an XML document carrying a top-level
//! `<returncode>` and, on success, a `<meetings>` list with nested
//! `<attendees>`. Classification order:
//!
//! 1. unparseable body       -> `Snapshot::ParseError`
//! 2. returncode != SUCCESS  -> `Snapshot::ApiError(message)`
//! 3. zero meetings          -> `Snapshot::Empty`
//! 4. otherwise              -> `Snapshot::Ok(meetings)`
//!
//! `Ok` with an empty list is impossible by construction.

use bbbmon_core::{Attendee, Meeting, Role, Snapshot};
use roxmltree::{Document, Node};
use tracing::warn;

/// Fallback message when a failed response carries no `<message>`.
const DEFAULT_API_ERROR: &str = "An unknown error occurred.";

/// Classify one `getMeetings` response body.
pub fn classify_response(xml: &str) -> Snapshot {
    let doc = match Document::parse(xml) {
        Ok(doc) => doc,
        Err(e) => {
            warn!(error = %e, "Failed to parse getMeetings response");
            return Snapshot::ParseError;
        }
    };
    let root = doc.root_element();

    let return_code = child_text(root, "returncode").unwrap_or("FAILED");
    if return_code != "SUCCESS" {
        let message = child_text(root, "message")
            .unwrap_or(DEFAULT_API_ERROR)
            .to_string();
        return Snapshot::ApiError(message);
    }

    let meetings: Vec<Meeting> = child_element(root, "meetings")
        .map(|meetings| {
            meetings
                .children()
                .filter(|n| n.has_tag_name("meeting"))
                .map(parse_meeting)
                .collect()
        })
        .unwrap_or_default();

    if meetings.is_empty() {
        Snapshot::Empty
    } else {
        Snapshot::Ok(meetings)
    }
}

/// Extract one `<meeting>` element, defaulting any missing field.
fn parse_meeting(node: Node<'_, '_>) -> Meeting {
    let context_name = child_element(node, "metadata")
        .and_then(|metadata| child_text(metadata, "bbb-context-name"))
        .map(str::to_string);

    let attendees = child_element(node, "attendees")
        .map(|attendees| {
            attendees
                .children()
                .filter(|n| n.has_tag_name("attendee"))
                .map(parse_attendee)
                .collect()
        })
        .unwrap_or_default();

    Meeting {
        meeting_id: child_text(node, "meetingID").unwrap_or("").to_string(),
        meeting_name: child_text(node, "meetingName").unwrap_or("N/A").to_string(),
        create_date: child_text(node, "createDate").unwrap_or("N/A").to_string(),
        context_name,
        moderator_pw: child_text(node, "moderatorPW").unwrap_or("").to_string(),
        attendee_pw: child_text(node, "attendeePW").unwrap_or("").to_string(),
        attendees,
    }
}

fn parse_attendee(node: Node<'_, '_>) -> Attendee {
    Attendee {
        full_name: child_text(node, "fullName").unwrap_or("").to_string(),
        role: Role::from_api(child_text(node, "role").unwrap_or("")),
    }
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(tag))
}

fn child_text<'a>(node: Node<'a, '_>, tag: &str) -> Option<&'a str> {
    child_element(node, tag).and_then(|n| n.text())
}
