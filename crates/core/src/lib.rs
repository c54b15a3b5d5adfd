//! Decoder for SRT handshake stream IDs.
//!
//! ```
//! use streamid::{Mode, decode};
//!
//! let sid = decode("publish:cam1:alice:secret:token=abc%26x").unwrap();
//! assert_eq!(sid.mode(), Mode::Publish);
//! assert_eq!(sid.path(), "cam1");
//! assert_eq!(sid.credentials(), Some(("alice", "secret")));
//! assert_eq!(sid.query(), "token=abc&x");
//! ```

pub mod error;
pub mod escape;
pub mod reject;
pub mod streamid;

pub use error::{DecodeError, EscapeErrorKind, Field, Result};
pub use reject::RejectReason;
pub use streamid::{Mode, STANDARD_PREFIX, StreamId, Syntax, decode};
