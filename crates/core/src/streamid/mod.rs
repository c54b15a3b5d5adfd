//! SRT stream ID decoding.
//!
//! The stream ID is a free-form string (up to 512 bytes on the wire) that a
//! caller sends in the SRT handshake. This server reads it as a routing and
//! credential token and accepts two syntaxes:
//!
//! ## Native syntax
//!
//! ```text
//! mode:path
//! mode:path:query
//! mode:path:user:pass
//! mode:path:user:pass:query
//! ```
//!
//! `path` may carry a `?query` suffix. Fields past the fifth are ignored.
//!
//! ## Standard syntax
//!
//! ```text
//! #!::m=publish,r=results.csv,u=johnny,s=mypass,t=file,h=myhost.com
//! ```
//!
//! The Haivision access-control convention. Recognized keys:
//!
//! | Key | Field | Notes |
//! |-----|-------|-------|
//! | `m` | mode  | `publish` or `read` |
//! | `r` | path  | may carry a `?query` suffix |
//! | `u` | user  | |
//! | `s` | pass  | |
//!
//! Any other key (`t`, `h`, vendor keys) is ignored.
//!
//! In both syntaxes the query is percent-decoded before it is stored.

mod native;
mod standard;

use std::fmt;
use std::str::FromStr;

use crate::error::{DecodeError, Result};

/// Prefix that selects the standard `#!::key=value,...` syntax.
pub const STANDARD_PREFIX: &str = "#!::";

/// Whether the peer intends to push or pull media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mode {
    Publish,
    Read,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Publish => "publish",
            Self::Read => "read",
        }
    }
}

impl FromStr for Mode {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "publish" => Ok(Self::Publish),
            "read" => Ok(Self::Read),
            other => Err(DecodeError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which syntax a stream ID was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Syntax {
    /// `mode:path[:user:pass][:query]`
    Native,
    /// `#!::key=value,...`
    Standard,
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::Standard => write!(f, "standard"),
        }
    }
}

/// A decoded stream ID.
///
/// `path` is never empty. `user`, `pass` and `query` are empty strings when
/// the stream ID does not carry them. `query` is already percent-decoded.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StreamId {
    mode: Mode,
    path: String,
    user: String,
    pass: String,
    query: String,
    syntax: Syntax,
}

impl StreamId {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Target path, without any `?query` suffix.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn pass(&self) -> &str {
        &self.pass
    }

    /// Percent-decoded query string.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn syntax(&self) -> Syntax {
        self.syntax
    }

    pub fn is_publish(&self) -> bool {
        self.mode == Mode::Publish
    }

    pub fn is_read(&self) -> bool {
        self.mode == Mode::Read
    }

    /// `(user, pass)` when a user was supplied.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        if self.user.is_empty() {
            None
        } else {
            Some((&self.user, &self.pass))
        }
    }
}

// Hand-written so the secret never ends up in logs.
impl fmt::Debug for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pass = if self.pass.is_empty() { "" } else { "***" };
        f.debug_struct("StreamId")
            .field("mode", &self.mode)
            .field("path", &self.path)
            .field("user", &self.user)
            .field("pass", &pass)
            .field("query", &self.query)
            .field("syntax", &self.syntax)
            .finish()
    }
}

impl FromStr for StreamId {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self> {
        decode(s)
    }
}

/// Decode a raw stream ID exactly as received in the handshake.
///
/// Input starting with [`STANDARD_PREFIX`] is parsed as the standard syntax,
/// anything else as the native syntax. The input is not trimmed.
pub fn decode(raw: &str) -> Result<StreamId> {
    let sid = match raw.strip_prefix(STANDARD_PREFIX) {
        Some(attrs) => standard::parse(attrs)?,
        None => native::parse(raw)?,
    };

    tracing::debug!(
        syntax = %sid.syntax,
        mode = %sid.mode,
        path = %sid.path,
        has_credentials = !sid.user.is_empty(),
        "stream id decoded"
    );

    Ok(sid)
}

/// Split `value` at the first `?` into `(path, raw_query)`.
fn split_path_query(value: &str) -> (&str, Option<&str>) {
    match value.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (value, None),
    }
}
