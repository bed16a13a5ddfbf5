//! JSON codec for host events.
//!
//! Wire format: one JSON object per line (see [`crate::protocol::events`]).
//! The codec works on a single line at a time; framing (splitting a stream
//! into lines) is the caller's job.

use thiserror::Error;

use crate::protocol::events::HostEvent;

/// Errors that can occur while decoding or encoding a host event.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The line held only whitespace.
    #[error("empty event line")]
    Empty,

    /// The line was not a valid event object.
    #[error("malformed event: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Decodes one line of host output into a [`HostEvent`].
///
/// Leading and trailing whitespace (including the `\r` of CRLF line endings)
/// is ignored.
///
/// # Errors
///
/// Returns [`ProtocolError::Empty`] for a blank line and
/// [`ProtocolError::Malformed`] when the JSON is invalid, the `"type"` tag is
/// unknown, or a required field is missing.
///
/// # Examples
///
/// ```rust
/// use focus_core::{decode_event, HostEvent, TabId};
///
/// let event = decode_event(r#"{"type":"tabClosed","tabId":4}"#).unwrap();
/// assert_eq!(event, HostEvent::TabClosed { tab_id: TabId(4) });
/// ```
pub fn decode_event(line: &str) -> Result<HostEvent, ProtocolError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(ProtocolError::Empty);
    }
    let event = serde_json::from_str(trimmed)?;
    tracing::trace!(?event, "decoded host event");
    Ok(event)
}

/// Encodes a [`HostEvent`] as a single JSON line without the trailing newline.
///
/// # Errors
///
/// Returns [`ProtocolError::Malformed`] if serialization fails, which cannot
/// happen for the current event types but keeps the signature honest.
pub fn encode_event(event: &HostEvent) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(event)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
