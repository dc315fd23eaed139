//! Protected-resource request validation and token extraction.

use halcyon_common::error::{OAuthProblem, codes};
use halcyon_common::request::TransportRequest;
use halcyon_common::types::ParameterStyle;
use halcyon_common::validators::{OAuthResult, OAuthValidator};

use crate::extractor::{
    BearerBodyTokenExtractor, BearerHeaderTokenExtractor, BearerQueryTokenExtractor,
    TokenExtractor,
};
use crate::validator::{BearerBodyValidator, BearerHeaderValidator, BearerQueryValidator};

/// A validated protected-resource request with a located bearer token.
///
/// Every configured parameter style is tried against the request. The
/// decision policy:
///
/// - more than one style carries a valid token → `invalid_request`
///   (ambiguous token placement is a hard error, not a preference),
/// - no style succeeded and some style failed concretely → that error,
/// - no style was used at all → a problem without an error code, so the
///   caller can answer with a bare 401,
/// - exactly one style succeeded → the token is extractable.
pub struct OAuthAccessResourceRequest<'a> {
    request: &'a dyn TransportRequest,
    used_style: ParameterStyle,
    extractor: Box<dyn TokenExtractor>,
}

impl std::fmt::Debug for OAuthAccessResourceRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthAccessResourceRequest")
            .field("used_style", &self.used_style)
            .finish_non_exhaustive()
    }
}

impl<'a> OAuthAccessResourceRequest<'a> {
    /// Validates with the default style: `Authorization` header only.
    pub fn from_request(request: &'a dyn TransportRequest) -> OAuthResult<Self> {
        Self::new(request, &[ParameterStyle::Header])
    }

    /// Validates against the given parameter styles.
    pub fn new(request: &'a dyn TransportRequest, styles: &[ParameterStyle]) -> OAuthResult<Self> {
        let mut found_valid_styles = 0;
        let mut used_style = None;
        let mut lacking_styles = 0;
        let mut lack_auth_reason = None;
        let mut concrete_error: Option<OAuthProblem> = None;

        for style in styles {
            let validator = validator_for(*style);

            // a style whose method/content-type constraints don't fit the
            // request cannot have been used at all
            if validator.validate_content_type(request).is_err()
                || validator.validate_method(request).is_err()
            {
                continue;
            }

            match validator.validate_required_parameters(request) {
                Ok(()) => {
                    used_style = Some(*style);
                    found_valid_styles += 1;
                }
                Err(problem) if problem.is_unauthenticated() => {
                    // this style simply wasn't used
                    lacking_styles += 1;
                    lack_auth_reason = problem.description.clone();
                }
                Err(problem) => {
                    if concrete_error.is_none() {
                        concrete_error = Some(problem);
                    }
                }
            }
        }

        if found_valid_styles > 1 {
            tracing::debug!("bearer token delivered through more than one mechanism");
            return Err(OAuthProblem::error(codes::resource::INVALID_REQUEST)
                .with_description("Found more than one mechanism for authenticating client"));
        }

        if let Some(style) = used_style {
            tracing::debug!(style = %style, "bearer token located");
            return Ok(Self {
                request,
                used_style: style,
                extractor: extractor_for(style),
            });
        }

        if let Some(problem) = concrete_error {
            return Err(problem);
        }

        if lacking_styles > 0 {
            // a single configured style reports its own reason; with
            // several candidates no one style can speak for the request
            let reason = if lacking_styles == 1 {
                lack_auth_reason.unwrap_or_else(|| "OAuth parameters were not found".to_owned())
            } else {
                "OAuth parameters were not found".to_owned()
            };
            return Err(OAuthProblem::unauthenticated(reason));
        }

        Err(OAuthProblem::error(codes::resource::INVALID_REQUEST)
            .with_description("OAuth parameters were not found"))
    }

    /// The bearer token, extracted through the style that validated.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.extractor.access_token(self.request)
    }

    /// The parameter style the token arrived through.
    #[must_use]
    pub fn used_parameter_style(&self) -> ParameterStyle {
        self.used_style
    }
}

fn validator_for(style: ParameterStyle) -> Box<dyn OAuthValidator> {
    match style {
        ParameterStyle::Header => Box::new(BearerHeaderValidator::new()),
        ParameterStyle::Body => Box::new(BearerBodyValidator::new()),
        ParameterStyle::Query => Box::new(BearerQueryValidator::new()),
    }
}

fn extractor_for(style: ParameterStyle) -> Box<dyn TokenExtractor> {
    match style {
        ParameterStyle::Header => Box::new(BearerHeaderTokenExtractor),
        ParameterStyle::Body => Box::new(BearerBodyTokenExtractor),
        ParameterStyle::Query => Box::new(BearerQueryTokenExtractor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use halcyon_common::request::RecordedRequest;

    const ALL_STYLES: [ParameterStyle; 3] = [
        ParameterStyle::Header,
        ParameterStyle::Body,
        ParameterStyle::Query,
    ];

    #[test]
    fn test_single_header_style_extracts() {
        let request = RecordedRequest::get().with_header("Authorization", "Bearer mF_9.B5f-4.1JqM");
        let resource_request =
            OAuthAccessResourceRequest::new(&request, &ALL_STYLES).expect("header style valid");
        assert_eq!(resource_request.access_token().as_deref(), Some("mF_9.B5f-4.1JqM"));
        assert_eq!(resource_request.used_parameter_style(), ParameterStyle::Header);
    }

    #[test]
    fn test_two_styles_is_ambiguous() {
        let request = RecordedRequest::get()
            .with_header("Authorization", "Bearer one")
            .with_query_string("access_token=two");
        let problem = OAuthAccessResourceRequest::new(&request, &ALL_STYLES)
            .expect_err("two delivery mechanisms");
        assert_eq!(problem.error_code(), Some("invalid_request"));
        assert_eq!(
            problem.description.as_deref(),
            Some("Found more than one mechanism for authenticating client")
        );
    }

    #[test]
    fn test_nothing_supplied_is_unauthenticated() {
        let request = RecordedRequest::get();
        let problem = OAuthAccessResourceRequest::new(
            &request,
            &[ParameterStyle::Header, ParameterStyle::Query],
        )
        .expect_err("nothing supplied");
        assert!(problem.is_unauthenticated());
        assert_eq!(problem.http_status(), 401);
        assert_eq!(
            problem.description.as_deref(),
            Some("OAuth parameters were not found")
        );
    }

    #[test]
    fn test_single_style_reports_its_own_reason() {
        let request = RecordedRequest::get();
        let problem = OAuthAccessResourceRequest::from_request(&request)
            .expect_err("nothing supplied");
        assert!(problem.is_unauthenticated());
        assert_eq!(
            problem.description.as_deref(),
            Some("Missing authorization header.")
        );
    }

    #[test]
    fn test_inapplicable_style_does_not_mask_success() {
        // the body style cannot apply to a GET without a form body, but
        // the header token must still be found
        let request = RecordedRequest::get().with_header("Authorization", "Bearer tok");
        let resource_request = OAuthAccessResourceRequest::new(
            &request,
            &[ParameterStyle::Body, ParameterStyle::Header],
        )
        .expect("header style wins");
        assert_eq!(resource_request.used_parameter_style(), ParameterStyle::Header);
    }

    #[test]
    fn test_concrete_failure_is_rethrown() {
        // query style used, but malformed: two tokens
        let request = RecordedRequest::get().with_query_string("access_token=a&access_token=b");
        let problem = OAuthAccessResourceRequest::new(
            &request,
            &[ParameterStyle::Header, ParameterStyle::Query],
        )
        .expect_err("malformed query use");
        assert_eq!(problem.error_code(), Some("invalid_request"));
        assert_eq!(problem.description.as_deref(), Some("Multiple tokens attached."));
    }

    #[test]
    fn test_query_style_only() {
        let request = RecordedRequest::get().with_query_string("access_token=q-token");
        let resource_request =
            OAuthAccessResourceRequest::new(&request, &[ParameterStyle::Query])
                .expect("query style valid");
        assert_eq!(resource_request.access_token().as_deref(), Some("q-token"));
        assert_eq!(resource_request.used_parameter_style(), ParameterStyle::Query);
    }

    #[test]
    fn test_body_style_only() {
        let request = RecordedRequest::post().with_form_body("access_token=b-token");
        let resource_request =
            OAuthAccessResourceRequest::new(&request, &[ParameterStyle::Body])
                .expect("body style valid");
        assert_eq!(resource_request.access_token().as_deref(), Some("b-token"));
    }
}
