//! Error types for stream ID decoding.

use std::fmt;

use crate::reject::RejectReason;

/// Errors returned by [`decode`](crate::decode).
///
/// Every variant is terminal: a malformed stream ID cannot become valid by
/// decoding it again, so callers should reject the handshake.
///
/// - **Structure**: [`MissingField`](Self::MissingField),
///   [`MalformedAttribute`](Self::MalformedAttribute).
/// - **Mode**: [`UnknownMode`](Self::UnknownMode).
/// - **Query**: [`InvalidEscape`](Self::InvalidEscape).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// A required field (mode or path) is absent or empty.
    #[error("missing {field}")]
    MissingField { field: Field },

    /// The mode token is neither `read` nor `publish`.
    #[error("unknown mode '{0}'")]
    UnknownMode(String),

    /// A `#!::` attribute is not of the form `key=value`.
    #[error("malformed attribute '{0}'")]
    MalformedAttribute(String),

    /// Percent-decoding of the query failed.
    #[error("invalid escape in query: {kind}")]
    InvalidEscape { kind: EscapeErrorKind },
}

impl DecodeError {
    /// Rejection reason to send back in the SRT handshake.
    ///
    /// Any decode failure is a malformed request from the peer's side.
    pub fn reject_reason(&self) -> RejectReason {
        RejectReason::BadRequest
    }
}

/// Required stream ID field, named in [`DecodeError::MissingField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Mode,
    Path,
    /// A native stream ID with no `:` separator at all.
    ModeOrPath,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mode => write!(f, "mode"),
            Self::Path => write!(f, "path"),
            Self::ModeOrPath => write!(f, "mode or path"),
        }
    }
}

/// Specific kind of percent-decoding failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeErrorKind {
    /// `%` was followed by fewer than two characters.
    Truncated,
    /// `%` was followed by something other than two hex digits.
    InvalidHex,
    /// The decoded bytes are not valid UTF-8.
    InvalidUtf8,
}

impl fmt::Display for EscapeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => write!(f, "truncated percent sequence"),
            Self::InvalidHex => write!(f, "invalid hex digits"),
            Self::InvalidUtf8 => write!(f, "decoded bytes are not UTF-8"),
        }
    }
}

/// Convenience alias for `Result<T, DecodeError>`.
pub type Result<T> = std::result::Result<T, DecodeError>;
