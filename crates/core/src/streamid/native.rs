use super::{Mode, StreamId, Syntax, split_path_query};
use crate::error::{DecodeError, Field, Result};
use crate::escape::unescape;

/// Parse `mode:path[:user:pass][:query]`.
///
/// With both a `?query` on the path and a separate query field, the separate
/// field wins.
pub(super) fn parse(raw: &str) -> Result<StreamId> {
    let fields: Vec<&str> = raw.split(':').collect();

    if fields.len() < 2 {
        return Err(DecodeError::MissingField {
            field: Field::ModeOrPath,
        });
    }

    let mode: Mode = fields[0].parse()?;
    let (path, path_query) = split_path_query(fields[1]);

    let (user, pass, field_query) = match fields.len() {
        2 => ("", "", None),
        3 => ("", "", Some(fields[2])),
        4 => (fields[2], fields[3], None),
        n => {
            if n > 5 {
                tracing::debug!(ignored = n - 5, "ignoring extra stream id fields");
            }
            (fields[2], fields[3], Some(fields[4]))
        }
    };

    if path.is_empty() {
        return Err(DecodeError::MissingField { field: Field::Path });
    }

    let query = match field_query.or(path_query) {
        Some(raw_query) => unescape(raw_query)?,
        None => String::new(),
    };

    Ok(StreamId {
        mode,
        path: path.to_string(),
        user: user.to_string(),
        pass: pass.to_string(),
        query,
        syntax: Syntax::Native,
    })
}
