use lattice_core::ResponseEnvelope;

/// Errors raised by the Lattice client.
///
/// The set is closed: every failure a caller can observe is one of these four.
#[derive(Debug, thiserror::Error)]
pub enum LatticeError {
    /// The server could not be reached, or the request timed out
    #[error("failed to connect to {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered but reported the request as unsuccessful
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Arguments were rejected before any request was sent
    #[error("validation failed: {message}")]
    Validation {
        field: Option<String>,
        message: String,
    },

    #[error("request failed: {0}")]
    Generic(String),
}

pub type Result<T> = std::result::Result<T, LatticeError>;

impl LatticeError {
    pub(crate) fn from_envelope(envelope: &ResponseEnvelope) -> Self {
        LatticeError::Api {
            status: envelope.status_code,
            message: envelope.failure_message(),
        }
    }

    pub(crate) fn validation(field: &str, message: impl Into<String>) -> Self {
        LatticeError::Validation {
            field: Some(field.to_string()),
            message: message.into(),
        }
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, LatticeError::Connection { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, LatticeError::Connection { source, .. } if source.is_timeout())
    }

    /// HTTP status reported by the server, when one was received
    pub fn status_code(&self) -> Option<u16> {
        match self {
            LatticeError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Offending argument of a validation failure
    pub fn field(&self) -> Option<&str> {
        match self {
            LatticeError::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for LatticeError {
    fn from(err: serde_json::Error) -> Self {
        LatticeError::Generic(format!("serialization error: {err}"))
    }
}

/// Reject empty identifiers and names before they reach a request path.
pub(crate) fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LatticeError::validation(field, format!("{field} is required")));
    }
    Ok(())
}

/// Check an identifier that is placed in a request path.
///
/// Ids are opaque server tokens; anything that would change the route once
/// joined into the URL (separators, query or fragment markers, escapes, dot
/// segments) is rejected rather than sent.
pub(crate) fn require_id(field: &str, value: &str) -> Result<()> {
    require(field, value)?;
    if value == "." || value == ".." {
        return Err(LatticeError::validation(field, format!("{field} is not a valid id")));
    }
    if let Some(c) = value
        .chars()
        .find(|c| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_whitespace() || c.is_control())
    {
        return Err(LatticeError::validation(
            field,
            format!("{field} contains invalid character {c:?}"),
        ));
    }
    Ok(())
}
