//! Compact-serialization primitives: base64url without padding and the
//! strict dot-segment split.
//!
//! Tokens may arrive wrapped across lines; lines are trimmed and joined
//! before matching. The segment patterns only admit the base64url
//! alphabet: anything else is malformed, not a best-effort parse.

use std::sync::LazyLock;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use regex::Regex;

use crate::error::{JoseError, JoseResult};

/// Three-segment compact form (JWT/JWS). The signature segment may be
/// empty for unsigned tokens.
static THREE_SEGMENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z0-9_=-]+)\.([a-zA-Z0-9_=-]+)\.([a-zA-Z0-9_=-]*)$")
        .expect("static pattern")
});

/// Five-segment compact form (JWE).
static FIVE_SEGMENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([a-zA-Z0-9_=-]+)\.([a-zA-Z0-9_=-]+)\.([a-zA-Z0-9_=-]+)\.([a-zA-Z0-9_=-]+)\.([a-zA-Z0-9_=-]+)$",
    )
    .expect("static pattern")
});

/// Encodes bytes as base64url without padding.
#[must_use]
pub fn base64url_encode(data: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

/// Decodes padding-free base64url bytes.
pub fn base64url_decode(encoded: &str) -> JoseResult<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|_| JoseError::malformed(format!("'{encoded}' is not valid base64url")))
}

/// Decodes a base64url segment into a UTF-8 string.
pub fn base64url_decode_string(encoded: &str) -> JoseResult<String> {
    String::from_utf8(base64url_decode(encoded)?)
        .map_err(|_| JoseError::malformed("segment is not valid UTF-8"))
}

/// Joins a possibly line-wrapped token back into one line.
fn unwrap_lines(input: &str) -> String {
    input.lines().map(str::trim).collect()
}

/// Splits a compact JWT/JWS into (header, payload, signature) segments,
/// all still base64url-encoded.
pub fn read_three_segments(input: &str) -> JoseResult<(String, String, String)> {
    if input.is_empty() {
        return Err(JoseError::malformed(
            "impossible to obtain a Token from an empty string",
        ));
    }
    let joined = unwrap_lines(input);
    let captures = THREE_SEGMENTS.captures(&joined).ok_or_else(|| {
        JoseError::malformed(format!(
            "'{input}' does not match the three-segment compact pattern"
        ))
    })?;
    Ok((
        captures[1].to_owned(),
        captures[2].to_owned(),
        captures[3].to_owned(),
    ))
}

/// Splits a compact JWE into its five segments, all still
/// base64url-encoded.
pub fn read_five_segments(input: &str) -> JoseResult<(String, String, String, String, String)> {
    if input.is_empty() {
        return Err(JoseError::malformed(
            "impossible to obtain a Token from an empty string",
        ));
    }
    let joined = unwrap_lines(input);
    let captures = FIVE_SEGMENTS.captures(&joined).ok_or_else(|| {
        JoseError::malformed(format!(
            "'{input}' does not match the five-segment compact pattern"
        ))
    })?;
    Ok((
        captures[1].to_owned(),
        captures[2].to_owned(),
        captures[3].to_owned(),
        captures[4].to_owned(),
        captures[5].to_owned(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64url_round_trip() {
        let data = b"{\"alg\":\"HS256\"}";
        let encoded = base64url_encode(data);
        assert!(!encoded.contains('='));
        assert_eq!(base64url_decode(&encoded).expect("decodes"), data);
    }

    #[test]
    fn test_three_segments() {
        let (header, payload, signature) =
            read_three_segments("aGVhZGVy.cGF5bG9hZA.c2ln").expect("three segments");
        assert_eq!(header, "aGVhZGVy");
        assert_eq!(payload, "cGF5bG9hZA");
        assert_eq!(signature, "c2ln");
    }

    #[test]
    fn test_empty_signature_segment_is_accepted() {
        let (_, _, signature) = read_three_segments("aGVhZGVy.cGF5bG9hZA.").expect("unsigned form");
        assert_eq!(signature, "");
    }

    #[test]
    fn test_wrong_segment_count_is_malformed() {
        assert!(matches!(
            read_three_segments("aGVhZGVy.cGF5bG9hZA"),
            Err(JoseError::MalformedToken { .. })
        ));
        assert!(matches!(
            read_five_segments("a.b.c"),
            Err(JoseError::MalformedToken { .. })
        ));
    }

    #[test]
    fn test_invalid_alphabet_is_malformed() {
        assert!(matches!(
            read_three_segments("head!er.pay.sig"),
            Err(JoseError::MalformedToken { .. })
        ));
    }

    #[test]
    fn test_line_wrapped_token() {
        let (header, payload, signature) =
            read_three_segments("aGVhZGVy.\n  cGF5bG9hZA.\n  c2ln").expect("wrapped form");
        assert_eq!(header, "aGVhZGVy");
        assert_eq!(payload, "cGF5bG9hZA");
        assert_eq!(signature, "c2ln");
    }

    #[test]
    fn test_five_segments() {
        let segments = read_five_segments("a.b.c.d.e").expect("five segments");
        assert_eq!(segments, ("a".into(), "b".into(), "c".into(), "d".into(), "e".into()));
    }
}
