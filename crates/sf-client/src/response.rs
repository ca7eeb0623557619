//! Raw HTTP responses.
//!
//! The transport hands back whatever the server sent. Deciding whether a
//! status code is an error is left to the caller.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Status code and body of a completed round trip.
///
/// Serializable so that cache layers can store it and hand back a value
/// that compares equal field for field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body, decoded as UTF-8 text.
    ///
    /// The decode is lossy: invalid byte sequences become U+FFFD, so a
    /// non-UTF-8 body does not pass through byte for byte.
    pub body: String,
}

impl RawResponse {
    /// Create a response from its parts.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(Into::into)
    }

    /// Returns true if the body is empty (e.g. `204 No Content`).
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Sanitize an error message before surfacing it.
///
/// This function:
/// - Truncates messages longer than 500 characters
/// - Removes anything shaped like a session token (`00D...!...`)
/// - Removes `sid=` session ids
pub fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;

    let mut sanitized = message.to_string();

    // Salesforce session ids start with the 15-char org id, then '!'
    if let Ok(token_pattern) = regex_lite::Regex::new(r"00[A-Za-z0-9]{13,}[!][A-Za-z0-9_.]+") {
        sanitized = token_pattern
            .replace_all(&sanitized, "[REDACTED_TOKEN]")
            .to_string();
    }

    if let Ok(session_pattern) = regex_lite::Regex::new(r"sid=[A-Za-z0-9]{20,}") {
        sanitized = session_pattern
            .replace_all(&sanitized, "sid=[REDACTED]")
            .to_string();
    }

    if sanitized.len() > MAX_LENGTH {
        let mut cut = MAX_LENGTH;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}
