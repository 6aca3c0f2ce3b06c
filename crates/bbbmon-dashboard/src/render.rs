//! Snapshot rendering.
//!
//! Pure functions from a classified [`Snapshot`](bbbmon_core::Snapshot)
//! to the pair of HTML strings the gateway serves. Every error variant
//! collapses to a single placeholder row spanning all five columns, so
//! the dashboard always has something sensible to show.
//!
//! User-influenced fields (meeting names, attendee names, context labels,
//! surfaced API messages) go through [`escape_html`] at the templating
//! boundary; structural markup and signed URLs are emitted as-is.

use std::time::Duration;

use bbbmon_api::UrlSigner;
use bbbmon_core::{Meeting, Snapshot};

/// Display name used when joining a meeting as a silent observer.
pub const OBSERVER_NAME: &str = "Class Observer";

/// Placeholder row message: the BBB server could not be reached.
pub const MSG_CONNECT_ERROR: &str = "خطا در اتصال به سرور BigBlueButton.";
/// Placeholder row message: the response could not be processed.
pub const MSG_PARSE_ERROR: &str = "خطا در پردازش پاسخ سرور.";
/// Placeholder row message: no meetings are currently running.
pub const MSG_NO_MEETINGS: &str = "در حال حاضر کلاسی فعال نیست.";
/// Prefix for a failure status surfaced by the server.
pub const MSG_API_ERROR_PREFIX: &str = "خطای API: ";

/// Placeholder for an absent context label or an empty attendee list.
const EMPTY_CELL: &str = "--";

const MODERATOR_HEADING: &str = "استاد:";
const VIEWER_HEADING: &str = "دانشجویان:";
const END_CONFIRM: &str = "آیا از بستن این کلاس اطمینان دارید؟";

const PAGE_STYLE: &str = "body{font-family:-apple-system,BlinkMacSystemFont,'Segoe UI','Vazirmatn',Roboto,Oxygen,Ubuntu,Cantarell,'Open Sans','Helvetica Neue',sans-serif;background-color:#f4f4f4;line-height:1.6}h1{text-align:center;color:#333}table{width:100%;border-collapse:collapse;margin:20px 0;font-size:.9em;box-shadow:0 2px 15px rgba(0,0,0,.1);background-color:#fff}th,td{border:1px solid #ddd;padding:12px 15px;text-align:center;vertical-align:middle}th{background-color:#007bff;color:#fff;font-weight:700}tr:nth-child(even){background-color:#f2f2f2}tr:hover{background-color:#e9ecef}.attendees-cell{text-align:right}.moderator-list{color:#0056b3;margin-bottom:10px}.viewer-list{color:#444}.actions-cell{min-width:150px}.button{display:block;padding:8px 12px;margin:4px auto;border-radius:5px;color:#fff;text-decoration:none;font-weight:700;text-align:center;transition:background-color .2s}.join-button{background-color:#28a745}.join-button:hover{background-color:#218838}.end-button{background-color:#dc3545}.end-button:hover{background-color:#c82333}";

const UPDATE_SCRIPT: &str = "async function updateTable() { try { const response = await fetch('/update'); if (response.ok) { const newBodyHtml = await response.text(); document.getElementById('meetings-tbody').innerHTML = newBodyHtml; } else { console.error('Authentication failed or server error during update.'); } } catch (error) { console.error('Failed to update table:', error); } }";

/// Immutable pair of HTML strings derived from one Snapshot.
///
/// The full page embeds the table body; both are published together so
/// `/` and `/update` can never disagree within one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendering {
    pub full_page: String,
    pub table_body: String,
}

impl Rendering {
    /// Placeholder shown between process start and the first completed
    /// poll cycle.
    pub fn initializing() -> Self {
        Self {
            full_page: "<html><body>Initializing...</body></html>".to_string(),
            table_body: String::new(),
        }
    }
}

/// Render one Snapshot.
///
/// `refresh_interval` is the same value that drives the server-side
/// refresh loop; it is surfaced to the client-side polling script in
/// milliseconds.
pub fn render(snapshot: &Snapshot, signer: &UrlSigner, refresh_interval: Duration) -> Rendering {
    let table_body = render_table_body(snapshot, signer);
    let full_page = render_full_page(&table_body, refresh_interval);
    Rendering {
        full_page,
        table_body,
    }
}

fn render_table_body(snapshot: &Snapshot, signer: &UrlSigner) -> String {
    match snapshot {
        Snapshot::TransportError => placeholder_row(MSG_CONNECT_ERROR),
        Snapshot::ParseError => placeholder_row(MSG_PARSE_ERROR),
        Snapshot::Empty => placeholder_row(MSG_NO_MEETINGS),
        Snapshot::ApiError(message) => {
            placeholder_row(&format!("{MSG_API_ERROR_PREFIX}{}", escape_html(message)))
        }
        Snapshot::Ok(meetings) => meetings
            .iter()
            .map(|meeting| render_meeting_row(meeting, signer))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn placeholder_row(message: &str) -> String {
    format!("<tr><td colspan=\"5\">{message}</td></tr>")
}

fn render_meeting_row(meeting: &Meeting, signer: &UrlSigner) -> String {
    let join_url = signer.build(
        "join",
        &[
            ("fullName", OBSERVER_NAME),
            ("meetingID", &meeting.meeting_id),
            ("password", &meeting.attendee_pw),
            ("redirect", "true"),
            ("listenOnly", "true"),
        ],
    );
    let end_url = signer.build(
        "end",
        &[
            ("meetingID", &meeting.meeting_id),
            ("password", &meeting.moderator_pw),
        ],
    );

    let name = escape_html(&meeting.meeting_name);
    let create_date = escape_html(&meeting.create_date);
    let context = meeting
        .context_name
        .as_deref()
        .map(escape_html)
        .unwrap_or_else(|| EMPTY_CELL.to_string());
    let attendees = render_attendees(meeting);

    format!(
        "<tr>\
         <td>{name}</td>\
         <td>{create_date}</td>\
         <td>{context}</td>\
         <td class=\"attendees-cell\">{attendees}</td>\
         <td class=\"actions-cell\">\
         <a href=\"{join_url}\" target=\"_blank\" class=\"button join-button\">ورود</a>\
         <a href=\"{end_url}\" onclick=\"return confirm('{END_CONFIRM}');\" \
         target=\"_blank\" class=\"button end-button\">بستن کلاس</a>\
         </td>\
         </tr>"
    )
}

/// Moderator section above viewer section, each `<br/>`-joined. An empty
/// section is omitted entirely; both empty renders the explicit
/// placeholder, never a blank cell.
fn render_attendees(meeting: &Meeting) -> String {
    let moderators: Vec<String> = meeting.moderators().map(escape_html).collect();
    let viewers: Vec<String> = meeting.viewers().map(escape_html).collect();

    let mut formatted = String::new();
    if !moderators.is_empty() {
        formatted.push_str(&format!(
            "<div class='moderator-list'><b>{MODERATOR_HEADING}</b><br/>{}</div>",
            moderators.join("<br/>")
        ));
    }
    if !viewers.is_empty() {
        formatted.push_str(&format!(
            "<div class='viewer-list'><b>{VIEWER_HEADING}</b><br/>{}</div>",
            viewers.join("<br/>")
        ));
    }

    if formatted.is_empty() {
        EMPTY_CELL.to_string()
    } else {
        formatted
    }
}

fn render_full_page(table_body: &str, refresh_interval: Duration) -> String {
    let interval_ms = refresh_interval.as_millis();
    format!(
        "<!DOCTYPE html><html lang=\"fa\" dir=\"rtl\"><head><meta charset=\"utf-8\"/>\
         <title>کلاسهای فعال</title><style>{PAGE_STYLE}</style></head>\
         <body><h1>لیست کلاسهای در حال برگزاری</h1>\
         <table><thead><tr><th>نام اتاق</th><th>زمان شروع</th><th>نام دوره</th>\
         <th>شرکت‌کنندگان</th><th>عملیات</th></tr></thead>\n\
         <tbody id=\"meetings-tbody\">{table_body}</tbody></table>\n\
         <script>\n{UPDATE_SCRIPT}\nsetInterval(updateTable, {interval_ms});\n\
         </script></body></html>"
    )
}

/// Escape the five HTML metacharacters.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
