//! SRT handshake rejection reasons.
//!
//! SRT lets an application reject a connection attempt with a numeric
//! reason carried back in the handshake. Codes from 1000
//! (`SRT_REJC_PREDEFINED`) upward mirror HTTP status codes, so a malformed
//! stream ID is `1000 + 400`.

use std::fmt;

/// Offset added to an HTTP-like status to form a predefined rejection code.
pub const REJC_PREDEFINED: i32 = 1000;

/// Predefined rejection reasons used by the stream ID and routing layers.
///
/// This crate only produces [`BadRequest`](Self::BadRequest), through
/// [`DecodeError::reject_reason`](crate::DecodeError::reject_reason). The
/// other variants are for the path-routing layer that authorizes a decoded
/// [`StreamId`](crate::StreamId), so both sides reject from one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// The stream ID could not be decoded.
    BadRequest,
    /// Credentials missing or wrong.
    Unauthorized,
    /// Credentials valid but not allowed on this path.
    Forbidden,
    /// The requested path does not exist.
    NotFound,
    /// The requested mode is not supported on this path.
    BadMode,
    /// The path already has a publisher.
    Conflict,
}

impl RejectReason {
    const ALL: [RejectReason; 6] = [
        Self::BadRequest,
        Self::Unauthorized,
        Self::Forbidden,
        Self::NotFound,
        Self::BadMode,
        Self::Conflict,
    ];

    fn status(self) -> i32 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::BadMode => 405,
            Self::Conflict => 409,
        }
    }

    /// Numeric rejection code as sent on the wire.
    pub fn code(self) -> i32 {
        REJC_PREDEFINED + self.status()
    }

    /// Inverse of [`code`](Self::code). Unknown codes yield `None`.
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.code() == code)
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BadRequest => "bad request",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not found",
            Self::BadMode => "bad mode",
            Self::Conflict => "conflict",
        };
        write!(f, "{name} ({})", self.code())
    }
}
