//! Error types for the snoo-rs client library.

use std::fmt;

/// Result type used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur when materializing entities or walking listings.
///
/// Two conditions are deliberately *not* errors:
///
/// - an envelope with an unknown `kind` dispatches to `Ok(None)` so callers
///   can skip unrecognized items in a feed without aborting the listing;
/// - a continuation stub whose `parent_id` no longer matches the thread being
///   expanded is a normal termination condition for that branch.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed envelope or payload: missing `data`, missing identity
    /// fields, a listing wrapper of the wrong shape, or a field that
    /// cannot be decoded into its declared type.
    Decoding(String),

    /// Non-success HTTP status surfaced by a [`WebAgent`](crate::WebAgent).
    Http {
        /// HTTP status code returned by the service
        status: u16,
        /// Status or body text accompanying the failure
        message: String,
    },

    /// Any other transport failure, surfaced verbatim from the agent.
    ///
    /// The listing assembler never retries or masks these; the current step
    /// of the walk simply fails.
    Transport(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Decoding(msg) => write!(f, "Decoding error: {msg}"),
            Error::Http { status, message } => write!(f, "HTTP error {status}: {message}"),
            Error::Transport(msg) => write!(f, "Transport error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decoding(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_decoding() {
        let err = Error::Decoding("missing field `name`".to_string());
        assert_eq!(err.to_string(), "Decoding error: missing field `name`");
    }

    #[test]
    fn test_display_http() {
        let err = Error::Http {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error 404: Not Found");
    }

    #[test]
    fn test_from_serde_json() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Decoding(_)));
    }
}
