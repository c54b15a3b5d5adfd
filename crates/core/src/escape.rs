use crate::error::{DecodeError, EscapeErrorKind, Result};

/// Percent-decode a raw query segment.
///
/// `%XX` becomes the byte `0xXX`; everything else, `+` included, is copied
/// as-is. Fails on truncated or non-hex sequences and on output that is not
/// UTF-8.
pub fn unescape(raw: &str) -> Result<String> {
    if !raw.contains('%') {
        return Ok(raw.to_string());
    }

    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }

        if i + 2 >= bytes.len() {
            return Err(escape_error(EscapeErrorKind::Truncated));
        }

        let hi = hex_value(bytes[i + 1]);
        let lo = hex_value(bytes[i + 2]);
        match (hi, lo) {
            (Some(hi), Some(lo)) => out.push((hi << 4) | lo),
            _ => return Err(escape_error(EscapeErrorKind::InvalidHex)),
        }
        i += 3;
    }

    String::from_utf8(out).map_err(|_| escape_error(EscapeErrorKind::InvalidUtf8))
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

fn escape_error(kind: EscapeErrorKind) -> DecodeError {
    DecodeError::InvalidEscape { kind }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_unchanged() {
        assert_eq!(unescape("param=value").unwrap(), "param=value");
        assert_eq!(unescape("").unwrap(), "");
    }

    #[test]
    fn decodes_reserved_characters() {
        assert_eq!(
            unescape("param1=value1%26param2=value2").unwrap(),
            "param1=value1&param2=value2"
        );
        assert_eq!(unescape("a%3Db%3ac").unwrap(), "a=b:c");
    }

    #[test]
    fn plus_is_literal() {
        assert_eq!(unescape("a+b%20c").unwrap(), "a+b c");
    }

    #[test]
    fn decodes_multibyte_utf8() {
        assert_eq!(unescape("caf%C3%A9").unwrap(), "café");
    }

    #[test]
    fn truncated_sequence() {
        for raw in ["abc%", "abc%2", "%"] {
            assert_eq!(
                unescape(raw),
                Err(DecodeError::InvalidEscape {
                    kind: EscapeErrorKind::Truncated
                }),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn invalid_hex() {
        assert_eq!(
            unescape("a%zzb"),
            Err(DecodeError::InvalidEscape {
                kind: EscapeErrorKind::InvalidHex
            })
        );
        assert_eq!(
            unescape("a%2gb"),
            Err(DecodeError::InvalidEscape {
                kind: EscapeErrorKind::InvalidHex
            })
        );
    }

    #[test]
    fn invalid_utf8() {
        assert_eq!(
            unescape("%FF%FE"),
            Err(DecodeError::InvalidEscape {
                kind: EscapeErrorKind::InvalidUtf8
            })
        );
    }
}
