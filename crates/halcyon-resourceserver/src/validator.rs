//! Per-parameter-style bearer request validators.
//!
//! Each validator answers one question: does this request carry a
//! well-formed bearer token in my style? "The style simply wasn't used"
//! surfaces as an unauthenticated problem (no error code), while a
//! malformed use of the style (multiple tokens, OAuth 1.0 leftovers)
//! raises a concrete `invalid_request`. The resource request relies on
//! that distinction to tell silence from misuse.

use http::Method;

use halcyon_common::error::OAuthProblem;
use halcyon_common::request::TransportRequest;
use halcyon_common::types::{header, param};
use halcyon_common::utils;
use halcyon_common::validators::{OAuthResult, OAuthValidator, ValidatorCore};

use crate::extractor::query_parameter_values;

// =============================================================================
// Header style
// =============================================================================

/// Validates bearer delivery through the `Authorization` header.
#[derive(Debug, Clone)]
pub struct BearerHeaderValidator {
    core: ValidatorCore,
}

impl BearerHeaderValidator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            core: ValidatorCore::new()
                .with_allowed_methods([])
                .with_any_content_type(),
        }
    }
}

impl Default for BearerHeaderValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl OAuthValidator for BearerHeaderValidator {
    fn core(&self) -> &ValidatorCore {
        &self.core
    }

    fn validate_required_parameters(&self, request: &dyn TransportRequest) -> OAuthResult<()> {
        let authorization = request
            .header(header::AUTHORIZATION)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| OAuthProblem::unauthenticated("Missing authorization header."))?;

        let scheme = utils::get_authz_method(authorization);
        if !scheme.is_some_and(|s| s.eq_ignore_ascii_case(header::OAUTH_SCHEME)) {
            return Err(OAuthProblem::unauthenticated("Incorrect authorization method."));
        }

        if utils::get_auth_header_field(authorization).is_none_or(|field| field.is_empty()) {
            return Err(utils::invalid_request("Missing required parameter."));
        }

        // leftovers of an OAuth 1.0 signed request mean the wrong protocol
        let challenge_values = utils::decode_oauth_header(authorization);
        if challenge_values
            .get(param::VERSION_DIFFER)
            .is_some_and(|value| !value.is_empty())
        {
            return Err(utils::invalid_request("Incorrect OAuth version. Found OAuth V1.0."));
        }

        Ok(())
    }
}

// =============================================================================
// Body style
// =============================================================================

/// Validates bearer delivery through an url-encoded form body.
#[derive(Debug, Clone)]
pub struct BearerBodyValidator {
    core: ValidatorCore,
}

impl BearerBodyValidator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            core: ValidatorCore::new()
                .with_allowed_methods([Method::POST, Method::PUT, Method::DELETE])
                .with_multipart_rejected(),
        }
    }
}

impl Default for BearerBodyValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl OAuthValidator for BearerBodyValidator {
    fn core(&self) -> &ValidatorCore {
        &self.core
    }

    fn validate_method(&self, request: &dyn TransportRequest) -> OAuthResult<()> {
        self.core.validate_method(request).map_err(|problem| {
            problem.with_description("Incorrect method. POST, PUT, DELETE are supported.")
        })
    }

    fn validate_required_parameters(&self, request: &dyn TransportRequest) -> OAuthResult<()> {
        if utils::is_multipart(request) {
            return Err(utils::invalid_request("Request is not single part."));
        }

        let tokens = non_empty_values(request.param_values(param::ACCESS_TOKEN))
            .or_else(|| non_empty_values(request.param_values(param::OAUTH_TOKEN)))
            .ok_or_else(|| OAuthProblem::unauthenticated("Missing OAuth token."))?;

        if tokens.len() > 1 {
            return Err(utils::invalid_request("Multiple tokens attached."));
        }

        if request
            .param(param::VERSION_DIFFER)
            .is_some_and(|value| !value.is_empty())
        {
            return Err(utils::invalid_request("Incorrect OAuth version. Found OAuth V1.0."));
        }

        Ok(())
    }
}

// =============================================================================
// Query style
// =============================================================================

/// Validates bearer delivery through the query string.
#[derive(Debug, Clone)]
pub struct BearerQueryValidator {
    core: ValidatorCore,
}

impl BearerQueryValidator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            core: ValidatorCore::new()
                .with_allowed_methods([])
                .with_any_content_type(),
        }
    }
}

impl Default for BearerQueryValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl OAuthValidator for BearerQueryValidator {
    fn core(&self) -> &ValidatorCore {
        &self.core
    }

    fn validate_required_parameters(&self, request: &dyn TransportRequest) -> OAuthResult<()> {
        let query = request.query_string().unwrap_or_default();

        let tokens = non_empty_owned(query_parameter_values(query, param::ACCESS_TOKEN))
            .or_else(|| non_empty_owned(query_parameter_values(query, param::OAUTH_TOKEN)))
            .ok_or_else(|| OAuthProblem::unauthenticated("Missing OAuth token."))?;

        if tokens.len() > 1 {
            return Err(utils::invalid_request("Multiple tokens attached."));
        }

        let version_differ = query_parameter_values(query, param::VERSION_DIFFER);
        if version_differ.iter().any(|value| !value.is_empty()) {
            return Err(utils::invalid_request("Incorrect OAuth version. Found OAuth V1.0."));
        }

        Ok(())
    }
}

/// The values, provided there is at least one and none is empty.
fn non_empty_values(values: &[String]) -> Option<Vec<String>> {
    non_empty_owned(values.to_vec())
}

fn non_empty_owned(values: Vec<String>) -> Option<Vec<String>> {
    if values.is_empty() || values.iter().any(String::is_empty) {
        None
    } else {
        Some(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use halcyon_common::request::RecordedRequest;
    use halcyon_common::types::content_type;

    #[test]
    fn test_header_missing_is_unauthenticated() {
        let problem = BearerHeaderValidator::new()
            .validate_required_parameters(&RecordedRequest::get())
            .expect_err("no header");
        assert!(problem.is_unauthenticated());
        assert_eq!(problem.description.as_deref(), Some("Missing authorization header."));
    }

    #[test]
    fn test_header_wrong_scheme_is_unauthenticated() {
        let request = RecordedRequest::get().with_header("Authorization", "Basic abc");
        let problem = BearerHeaderValidator::new()
            .validate_required_parameters(&request)
            .expect_err("wrong scheme");
        assert!(problem.is_unauthenticated());
        assert_eq!(problem.description.as_deref(), Some("Incorrect authorization method."));
    }

    #[test]
    fn test_header_oauth_v1_is_concrete_error() {
        let request = RecordedRequest::get().with_header(
            "Authorization",
            "Bearer realm=\"x\",oauth_signature_method=\"HMAC-SHA1\"",
        );
        let problem = BearerHeaderValidator::new()
            .validate_required_parameters(&request)
            .expect_err("v1 leftovers");
        assert_eq!(problem.error_code(), Some("invalid_request"));
        assert_eq!(
            problem.description.as_deref(),
            Some("Incorrect OAuth version. Found OAuth V1.0.")
        );
    }

    #[test]
    fn test_header_valid() {
        let request = RecordedRequest::get().with_header("Authorization", "Bearer mF_9.B5f-4.1JqM");
        assert!(BearerHeaderValidator::new().perform_all_validations(&request).is_ok());
    }

    #[test]
    fn test_body_method_restriction() {
        let request = RecordedRequest::get()
            .with_content_type(content_type::URL_ENCODED)
            .with_param(param::ACCESS_TOKEN, "t");
        let problem = BearerBodyValidator::new()
            .validate_method(&request)
            .expect_err("GET rejected for body style");
        assert_eq!(
            problem.description.as_deref(),
            Some("Incorrect method. POST, PUT, DELETE are supported.")
        );
    }

    #[test]
    fn test_body_multiple_tokens() {
        let request = RecordedRequest::post().with_form_body("access_token=a&access_token=b");
        let problem = BearerBodyValidator::new()
            .validate_required_parameters(&request)
            .expect_err("two tokens");
        assert_eq!(problem.description.as_deref(), Some("Multiple tokens attached."));
    }

    #[test]
    fn test_body_missing_token_is_unauthenticated() {
        let request = RecordedRequest::post().with_form_body("other=1");
        let problem = BearerBodyValidator::new()
            .validate_required_parameters(&request)
            .expect_err("no token");
        assert!(problem.is_unauthenticated());
        assert_eq!(problem.description.as_deref(), Some("Missing OAuth token."));
    }

    #[test]
    fn test_query_token_and_version_check() {
        let request = RecordedRequest::get().with_query_string("access_token=t");
        assert!(BearerQueryValidator::new().perform_all_validations(&request).is_ok());

        let request = RecordedRequest::get()
            .with_query_string("access_token=t&oauth_signature_method=HMAC-SHA1");
        let problem = BearerQueryValidator::new()
            .validate_required_parameters(&request)
            .expect_err("v1 leftovers");
        assert_eq!(
            problem.description.as_deref(),
            Some("Incorrect OAuth version. Found OAuth V1.0.")
        );
    }
}
