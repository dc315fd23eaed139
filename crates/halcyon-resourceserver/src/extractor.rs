//! Bearer-token extractors, one per parameter style.
//!
//! Extraction runs only after the matching validator accepted the
//! request, so extractors stay oblivious to error handling. The query
//! extractor parses the raw query string by hand: going through a merged
//! parameter view could force an integration to read (and consume) a
//! request body just to look at the URL.

use halcyon_common::request::TransportRequest;
use halcyon_common::types::{header, param};
use halcyon_common::utils;

/// Pulls the bearer token out of an inbound request.
pub trait TokenExtractor {
    /// The access token carried by the request, if any.
    fn access_token(&self, request: &dyn TransportRequest) -> Option<String>;

    /// Token lookup under a caller-chosen parameter name.
    fn access_token_named(&self, request: &dyn TransportRequest, name: &str) -> Option<String>;
}

// =============================================================================
// Header
// =============================================================================

/// Reads `Authorization: Bearer <token>`; the scheme match is
/// case-insensitive.
pub struct BearerHeaderTokenExtractor;

impl TokenExtractor for BearerHeaderTokenExtractor {
    fn access_token(&self, request: &dyn TransportRequest) -> Option<String> {
        let authorization = request.header(header::AUTHORIZATION)?;
        utils::get_auth_header_field(authorization).filter(|token| !token.is_empty())
    }

    fn access_token_named(&self, request: &dyn TransportRequest, _name: &str) -> Option<String> {
        self.access_token(request)
    }
}

// =============================================================================
// Body
// =============================================================================

/// Reads the `access_token` form parameter, falling back to the legacy
/// `oauth_token` name.
pub struct BearerBodyTokenExtractor;

impl TokenExtractor for BearerBodyTokenExtractor {
    fn access_token(&self, request: &dyn TransportRequest) -> Option<String> {
        self.access_token_named(request, param::ACCESS_TOKEN)
            .or_else(|| self.access_token_named(request, param::OAUTH_TOKEN))
    }

    fn access_token_named(&self, request: &dyn TransportRequest, name: &str) -> Option<String> {
        request
            .param(name)
            .filter(|token| !token.is_empty())
            .map(str::to_owned)
    }
}

// =============================================================================
// Query
// =============================================================================

/// Reads the `access_token` query parameter (legacy `oauth_token`
/// fallback) straight from the raw query string.
pub struct BearerQueryTokenExtractor;

impl TokenExtractor for BearerQueryTokenExtractor {
    fn access_token(&self, request: &dyn TransportRequest) -> Option<String> {
        self.access_token_named(request, param::ACCESS_TOKEN)
            .or_else(|| self.access_token_named(request, param::OAUTH_TOKEN))
    }

    fn access_token_named(&self, request: &dyn TransportRequest, name: &str) -> Option<String> {
        let query = request.query_string()?;
        query_parameter_values(query, name)
            .into_iter()
            .find(|token| !token.is_empty())
    }
}

/// All values of a query parameter, parsed from the raw query string.
#[must_use]
pub fn query_parameter_values(query: &str, name: &str) -> Vec<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use halcyon_common::request::RecordedRequest;

    #[test]
    fn test_header_extraction() {
        let request = RecordedRequest::get().with_header("Authorization", "Bearer mF_9.B5f-4.1JqM");
        assert_eq!(
            BearerHeaderTokenExtractor.access_token(&request).as_deref(),
            Some("mF_9.B5f-4.1JqM")
        );

        // scheme match is case-insensitive
        let request = RecordedRequest::get().with_header("Authorization", "bearer tok");
        assert_eq!(
            BearerHeaderTokenExtractor.access_token(&request).as_deref(),
            Some("tok")
        );

        let request = RecordedRequest::get().with_header("Authorization", "Basic abc");
        assert_eq!(BearerHeaderTokenExtractor.access_token(&request), None);
    }

    #[test]
    fn test_body_extraction_with_legacy_fallback() {
        let request = RecordedRequest::post().with_form_body("access_token=abc");
        assert_eq!(
            BearerBodyTokenExtractor.access_token(&request).as_deref(),
            Some("abc")
        );

        let request = RecordedRequest::post().with_form_body("oauth_token=legacy");
        assert_eq!(
            BearerBodyTokenExtractor.access_token(&request).as_deref(),
            Some("legacy")
        );
    }

    #[test]
    fn test_query_extraction_reads_raw_query_only() {
        let request = RecordedRequest::get().with_query_string("access_token=abc&x=1");
        assert_eq!(
            BearerQueryTokenExtractor.access_token(&request).as_deref(),
            Some("abc")
        );

        // a token that only lives in the body is invisible to the query style
        let request = RecordedRequest::post().with_form_body("access_token=abc");
        assert_eq!(BearerQueryTokenExtractor.access_token(&request), None);
    }
}
