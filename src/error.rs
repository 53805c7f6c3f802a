// Error types for the Goodreads binding.
//
// Every failure a field accessor can hit is one of four kinds: the client
// was misconfigured (or asked for an entity that has no lookup endpoint),
// the HTTP exchange failed, the payload was not the XML we expect, or the
// requested field exists neither in the inline data nor in the payload.

use thiserror::Error;

/// Result type alias using `GoodreadsError`.
pub type Result<T> = std::result::Result<T, GoodreadsError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GoodreadsError {
    /// Missing credential, bad setting, or no endpoint for a lookup.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network failure or a non-200 response.
    #[error("Request to {url} failed: {message}")]
    Transport {
        /// Request URL with the credential redacted
        url: String,
        /// HTTP status code if a response was received
        status: Option<u16>,
        message: String,
    },

    /// The response body was not well-formed XML or lacked the payload element.
    #[error("Malformed response: {0}")]
    Parse(String),

    #[error("Field '{field}' not found for {kind} {id}")]
    FieldNotFound {
        kind: &'static str,
        id: String,
        field: String,
    },
}

impl GoodreadsError {
    pub(crate) fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        GoodreadsError::Transport {
            url: url.into(),
            status: None,
            message: message.into(),
        }
    }

    /// HTTP status carried by a transport error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            GoodreadsError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<quick_xml::Error> for GoodreadsError {
    fn from(err: quick_xml::Error) -> Self {
        GoodreadsError::Parse(err.to_string())
    }
}
