use super::{Mode, StreamId, Syntax, split_path_query};
use crate::error::{DecodeError, Field, Result};
use crate::escape::unescape;

/// Parse the comma-separated `key=value` list that follows `#!::`.
///
/// Unrecognized keys are skipped. A repeated recognized key overrides the
/// earlier value.
pub(super) fn parse(attrs: &str) -> Result<StreamId> {
    let mut mode = None;
    let mut resource = "";
    let mut user = "";
    let mut pass = "";

    for pair in attrs.split(',') {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| DecodeError::MalformedAttribute(pair.to_string()))?;

        match key {
            "m" => mode = Some(value.parse::<Mode>()?),
            "r" => resource = value,
            "u" => user = value,
            "s" => pass = value,
            _ => tracing::trace!(key, "ignoring stream id attribute"),
        }
    }

    let mode = mode.ok_or(DecodeError::MissingField { field: Field::Mode })?;

    let (path, raw_query) = split_path_query(resource);
    if path.is_empty() {
        return Err(DecodeError::MissingField { field: Field::Path });
    }

    let query = match raw_query {
        Some(raw_query) => unescape(raw_query)?,
        None => String::new(),
    };

    Ok(StreamId {
        mode,
        path: path.to_string(),
        user: user.to_string(),
        pass: pass.to_string(),
        query,
        syntax: Syntax::Standard,
    })
}
