//! End-user authorization request validators, one per response type.
//!
//! Authorization requests arrive by redirect, so GET and POST are both
//! accepted and no content type is enforced.

use http::Method;

use halcyon_common::types::param;
use halcyon_common::validators::{OAuthValidator, ValidatorCore};

fn authz_core() -> ValidatorCore {
    ValidatorCore::new()
        .with_allowed_methods([Method::GET, Method::POST])
        .with_any_content_type()
        .with_required_param(param::RESPONSE_TYPE)
        .with_required_param(param::CLIENT_ID)
        .with_required_param(param::REDIRECT_URI)
}

/// `response_type=code` validator.
#[derive(Debug, Clone)]
pub struct CodeValidator {
    core: ValidatorCore,
}

impl CodeValidator {
    #[must_use]
    pub fn new() -> Self {
        Self { core: authz_core() }
    }
}

impl Default for CodeValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl OAuthValidator for CodeValidator {
    fn core(&self) -> &ValidatorCore {
        &self.core
    }
}

/// `response_type=token` (implicit) validator.
#[derive(Debug, Clone)]
pub struct TokenValidator {
    core: ValidatorCore,
}

impl TokenValidator {
    #[must_use]
    pub fn new() -> Self {
        Self { core: authz_core() }
    }
}

impl Default for TokenValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl OAuthValidator for TokenValidator {
    fn core(&self) -> &ValidatorCore {
        &self.core
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use halcyon_common::request::RecordedRequest;

    #[test]
    fn test_get_is_accepted() {
        let request = RecordedRequest::get()
            .with_param(param::RESPONSE_TYPE, "code")
            .with_param(param::CLIENT_ID, "c1")
            .with_param(param::REDIRECT_URI, "https://client.example.com/cb");
        assert!(CodeValidator::new().perform_all_validations(&request).is_ok());
    }

    #[test]
    fn test_put_is_rejected() {
        let request = RecordedRequest::new(Method::PUT)
            .with_param(param::RESPONSE_TYPE, "code")
            .with_param(param::CLIENT_ID, "c1")
            .with_param(param::REDIRECT_URI, "https://client.example.com/cb");
        let problem = CodeValidator::new()
            .perform_all_validations(&request)
            .expect_err("PUT not allowed");
        assert_eq!(problem.description.as_deref(), Some("Method not correct."));
    }

    #[test]
    fn test_implicit_missing_parameters() {
        let request = RecordedRequest::get().with_param(param::RESPONSE_TYPE, "token");
        let problem = TokenValidator::new()
            .perform_all_validations(&request)
            .expect_err("client_id and redirect_uri missing");
        assert_eq!(
            problem.description.as_deref(),
            Some("Missing parameters: client_id redirect_uri")
        );
    }
}
