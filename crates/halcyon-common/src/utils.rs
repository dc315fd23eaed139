//! Shared encoding and header-grammar helpers.
//!
//! Percent-encoding follows `application/x-www-form-urlencoded` rules
//! (UTF-8, space as `+`). The `Authorization`/`WWW-Authenticate` grammar
//! helpers implement the subset of RFC 6750 the validators need.

use std::collections::HashSet;
use std::sync::LazyLock;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use indexmap::IndexMap;
use regex::Regex;

use crate::error::{OAuthProblem, codes};
use crate::parameters::{ParamValue, ParameterBag};
use crate::request::TransportRequest;
use crate::types::{content_type, header};

/// `<scheme> <rest>` shape of an authorization-style header.
static AUTH_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\w*)\s+(.*)$").expect("static pattern"));

/// `name="value"` pairs inside a challenge header.
static NAME_VALUE_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(\S*)\s*=\s*"([^"]*)"$"#).expect("static pattern"));

// =============================================================================
// Form encoding
// =============================================================================

/// Renders parameters as an `application/x-www-form-urlencoded` string,
/// skipping empty names and empty values.
#[must_use]
pub fn format_urlencoded<'a>(entries: impl Iterator<Item = (&'a str, &'a ParamValue)>) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (name, value) in entries {
        if name.is_empty() || value.is_empty() {
            continue;
        }
        serializer.append_pair(name, &value.render());
    }
    serializer.finish()
}

/// Parses a form-urlencoded document into a parameter bag. Repeated names
/// keep the last value, matching the merged single-value view requests
/// expose.
#[must_use]
pub fn decode_form(form: &str) -> ParameterBag {
    let mut bag = ParameterBag::new();
    for (name, value) in url::form_urlencoded::parse(form.as_bytes()) {
        bag.set(name.into_owned(), value.into_owned());
    }
    bag
}

/// Percent-decodes a single form-encoded value (`+` becomes a space).
#[must_use]
pub fn decode_percent(value: &str) -> String {
    url::form_urlencoded::parse(format!("k={value}").as_bytes())
        .next()
        .map(|(_, decoded)| decoded.into_owned())
        .unwrap_or_default()
}

/// `true` when the content type (ignoring attributes after `;`) is
/// `application/x-www-form-urlencoded`.
#[must_use]
pub fn is_form_encoded(content_type: Option<&str>) -> bool {
    let Some(content_type) = content_type else {
        return false;
    };
    let essence = content_type.split(';').next().unwrap_or("").trim();
    essence.eq_ignore_ascii_case(content_type::URL_ENCODED)
}

/// `true` when any `;`-separated token of the request content type equals
/// the required one exactly.
#[must_use]
pub fn has_content_type(request_content_type: Option<&str>, required: &str) -> bool {
    let Some(request_content_type) = request_content_type else {
        return false;
    };
    if required.is_empty() {
        return false;
    }
    request_content_type
        .split(';')
        .any(|token| token.trim() == required)
}

/// `true` for POST requests carrying any `multipart/*` content type.
#[must_use]
pub fn is_multipart(request: &dyn TransportRequest) -> bool {
    if request.method() != http::Method::POST {
        return false;
    }
    request
        .content_type()
        .is_some_and(|ct| ct.to_ascii_lowercase().starts_with(content_type::MULTIPART_PREFIX))
}

// =============================================================================
// Authorization / WWW-Authenticate headers
// =============================================================================

/// Scheme token of an authorization-style header (`Bearer`, `Basic`, ...).
#[must_use]
pub fn get_authz_method(auth_header: &str) -> Option<String> {
    AUTH_HEADER
        .captures(auth_header)
        .map(|captures| captures[1].to_owned())
}

/// Everything after the scheme token, when the scheme is `Bearer`.
#[must_use]
pub fn get_auth_header_field(auth_header: &str) -> Option<String> {
    let captures = AUTH_HEADER.captures(auth_header)?;
    if captures[1].eq_ignore_ascii_case(header::OAUTH_SCHEME) {
        Some(captures[2].to_owned())
    } else {
        None
    }
}

/// Parses a `Bearer name="value", ...` challenge into its pairs. Names and
/// values are percent-decoded. A non-Bearer scheme yields an empty map.
#[must_use]
pub fn decode_oauth_header(auth_header: &str) -> IndexMap<String, String> {
    let mut values = IndexMap::new();
    let Some(captures) = AUTH_HEADER.captures(auth_header) else {
        return values;
    };
    if !captures[1].eq_ignore_ascii_case(header::OAUTH_SCHEME) {
        return values;
    }
    for pair in captures[2].split(',') {
        if let Some(nvp) = NAME_VALUE_PAIR.captures(pair.trim()) {
            values.insert(decode_percent(&nvp[1]), decode_percent(&nvp[2]));
        }
    }
    values
}

/// Builds a `WWW-Authenticate`-style challenge: `Bearer k1="v1",k2="v2"`,
/// skipping empty names and values. With no renderable entries the bare
/// scheme token is returned.
#[must_use]
pub fn encode_oauth_header(entries: &ParameterBag) -> String {
    let pairs: Vec<String> = entries
        .iter()
        .filter(|(name, value)| !name.is_empty() && !value.is_empty())
        .map(|(name, value)| format!("{name}=\"{}\"", value.render()))
        .collect();
    if pairs.is_empty() {
        header::OAUTH_SCHEME.to_owned()
    } else {
        format!("{} {}", header::OAUTH_SCHEME, pairs.join(","))
    }
}

/// Builds an `Authorization: Bearer <token>` value from the non-empty
/// entry values, concatenated without separators.
#[must_use]
pub fn encode_authorization_bearer_header(entries: &ParameterBag) -> String {
    let mut header_value = format!("{} ", header::OAUTH_SCHEME);
    for (_, value) in entries.iter() {
        if !value.is_empty() {
            header_value.push_str(&value.render());
        }
    }
    header_value
}

// =============================================================================
// HTTP Basic credentials
// =============================================================================

/// Encodes HTTP Basic credentials for an `Authorization` header.
#[must_use]
pub fn encode_basic_auth_header(username: &str, password: &str) -> String {
    let credentials = STANDARD.encode(format!("{username}:{password}"));
    format!("Basic {credentials}")
}

/// Decodes HTTP Basic client credentials.
///
/// Returns `None` ("no credentials supplied") for a non-Basic scheme,
/// undecodable base64, a missing colon, or an empty id or secret. Colons
/// inside the secret are preserved: `clientId:sec:re:t` decodes to
/// `("clientId", "sec:re:t")`.
#[must_use]
pub fn decode_client_authentication_header(auth_header: &str) -> Option<(String, String)> {
    let captures = AUTH_HEADER.captures(auth_header)?;
    if !captures[1].eq_ignore_ascii_case("Basic") {
        return None;
    }
    let decoded = STANDARD.decode(captures[2].trim()).ok()?;
    let credentials = String::from_utf8(decoded).ok()?;
    let (client_id, client_secret) = credentials.split_once(':')?;
    if client_id.is_empty() || client_secret.is_empty() {
        return None;
    }
    Some((client_id.to_owned(), client_secret.to_owned()))
}

// =============================================================================
// Scopes
// =============================================================================

/// Splits a space-separated scope string into a set.
#[must_use]
pub fn decode_scopes(scope: &str) -> HashSet<String> {
    scope.split_whitespace().map(str::to_owned).collect()
}

/// Joins scopes with single spaces.
#[must_use]
pub fn encode_scopes<'a>(scopes: impl IntoIterator<Item = &'a str>) -> String {
    scopes.into_iter().collect::<Vec<_>>().join(" ")
}

// =============================================================================
// Problem helpers
// =============================================================================

/// `invalid_request` problem with the given description.
#[must_use]
pub fn invalid_request(description: impl Into<String>) -> OAuthProblem {
    OAuthProblem::error(codes::token::INVALID_REQUEST).with_description(description)
}

/// Aggregated `invalid_request` listing every missing parameter.
#[must_use]
pub fn handle_missing_parameters<'a>(missing: impl IntoIterator<Item = &'a str>) -> OAuthProblem {
    let joined = missing.into_iter().collect::<Vec<_>>().join(" ");
    invalid_request(format!("Missing parameters: {joined}").trim_end().to_owned())
}

/// Aggregated `invalid_request` listing every forbidden parameter found.
#[must_use]
pub fn handle_not_allowed_parameters<'a>(
    not_allowed: impl IntoIterator<Item = &'a str>,
) -> OAuthProblem {
    let joined = not_allowed.into_iter().collect::<Vec<_>>().join(" ");
    invalid_request(format!("Not allowed parameters: {joined}").trim_end().to_owned())
}

/// `invalid_request` for a wrong content type.
#[must_use]
pub fn handle_bad_content_type(expected: &str) -> OAuthProblem {
    invalid_request(format!("Bad request content type. Expecting: {expected}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RecordedRequest;

    #[test]
    fn test_format_skips_empty_values() {
        let mut bag = ParameterBag::new();
        bag.set("code", "abc");
        bag.set("empty_param", "");
        bag.set("scope", "read write");

        let formatted = format_urlencoded(bag.iter());
        assert_eq!(formatted, "code=abc&scope=read+write");
    }

    #[test]
    fn test_decode_form_round_trip() {
        let bag = decode_form("a=1&b=two+words&c=%26encoded");
        assert_eq!(bag.get_rendered("a").as_deref(), Some("1"));
        assert_eq!(bag.get_rendered("b").as_deref(), Some("two words"));
        assert_eq!(bag.get_rendered("c").as_deref(), Some("&encoded"));
    }

    #[test]
    fn test_encode_oauth_header_realm_only() {
        let mut bag = ParameterBag::new();
        bag.set("realm", "example");
        assert_eq!(encode_oauth_header(&bag), "Bearer realm=\"example\"");
    }

    #[test]
    fn test_encode_oauth_header_skips_empty() {
        let mut bag = ParameterBag::new();
        bag.set("realm", "example");
        bag.set("error", "");
        bag.set("error_description", "missing token");
        assert_eq!(
            encode_oauth_header(&bag),
            "Bearer realm=\"example\",error_description=\"missing token\""
        );
    }

    #[test]
    fn test_encode_authorization_bearer_header() {
        let mut bag = ParameterBag::new();
        bag.set("access_token", "mF_9.B5f-4.1JqM");
        assert_eq!(encode_authorization_bearer_header(&bag), "Bearer mF_9.B5f-4.1JqM");
    }

    #[test]
    fn test_decode_oauth_header() {
        let values = decode_oauth_header("Bearer realm=\"example\",error=\"invalid_token\"");
        assert_eq!(values.get("realm").map(String::as_str), Some("example"));
        assert_eq!(values.get("error").map(String::as_str), Some("invalid_token"));

        assert!(decode_oauth_header("Basic abc").is_empty());
    }

    #[test]
    fn test_decode_client_authentication_header() {
        let header_value = encode_basic_auth_header("clientId", "secret");
        assert_eq!(
            decode_client_authentication_header(&header_value),
            Some(("clientId".to_owned(), "secret".to_owned()))
        );

        // colons inside the secret stay intact
        let header_value = encode_basic_auth_header("clientId", "sec:re:t");
        assert_eq!(
            decode_client_authentication_header(&header_value),
            Some(("clientId".to_owned(), "sec:re:t".to_owned()))
        );
    }

    #[test]
    fn test_decode_client_authentication_header_rejections() {
        for credentials in ["clientId:", ":secret", ":", "no-colon"] {
            let encoded = STANDARD.encode(credentials);
            assert_eq!(
                decode_client_authentication_header(&format!("Basic {encoded}")),
                None,
                "credentials {credentials:?} must not decode"
            );
        }
        assert_eq!(decode_client_authentication_header("Bearer abc"), None);
        assert_eq!(decode_client_authentication_header("Basic !!!"), None);
    }

    #[test]
    fn test_authz_header_grammar() {
        assert_eq!(get_authz_method("Bearer token").as_deref(), Some("Bearer"));
        assert_eq!(get_authz_method("Basic abc").as_deref(), Some("Basic"));
        assert_eq!(get_auth_header_field("Bearer token").as_deref(), Some("token"));
        assert_eq!(get_auth_header_field("bearer token").as_deref(), Some("token"));
        assert_eq!(get_auth_header_field("Basic abc"), None);
    }

    #[test]
    fn test_content_type_checks() {
        assert!(is_form_encoded(Some("application/x-www-form-urlencoded")));
        assert!(is_form_encoded(Some("application/x-www-form-urlencoded; charset=utf-8")));
        assert!(!is_form_encoded(Some("application/json")));
        assert!(!is_form_encoded(None));

        assert!(has_content_type(
            Some("application/x-www-form-urlencoded;charset=utf-8"),
            "application/x-www-form-urlencoded"
        ));
        assert!(!has_content_type(Some("application/json"), "application/xml"));
    }

    #[test]
    fn test_is_multipart() {
        let request = RecordedRequest::post().with_content_type("multipart/form-data; boundary=x");
        assert!(is_multipart(&request));

        let request = RecordedRequest::get().with_content_type("multipart/form-data");
        assert!(!is_multipart(&request));

        let request = RecordedRequest::post().with_content_type("application/json");
        assert!(!is_multipart(&request));
    }

    #[test]
    fn test_missing_parameter_aggregation() {
        let problem = handle_missing_parameters(["client_id", "redirect_uri"]);
        assert_eq!(problem.error_code(), Some("invalid_request"));
        assert_eq!(
            problem.description.as_deref(),
            Some("Missing parameters: client_id redirect_uri")
        );
    }

    #[test]
    fn test_scopes() {
        let scopes = decode_scopes("read write  read");
        assert_eq!(scopes.len(), 2);
        assert!(scopes.contains("read"));

        assert_eq!(encode_scopes(["a", "b"]), "a b");
    }
}
