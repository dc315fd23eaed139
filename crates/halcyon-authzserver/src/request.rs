//! Validated inbound request wrappers for the authorization server.
//!
//! Construction is validation: a wrapper only exists once the dispatcher
//! has selected a validator for the request's discriminator and every
//! check has passed. Accessors then read parameters without re-checking.

use std::collections::HashSet;

use halcyon_common::request::TransportRequest;
use halcyon_common::types::{header, param};
use halcyon_common::utils;
use halcyon_common::validators::{OAuthResult, OAuthValidator, ValidatorMixer};

use crate::dispatch::ValidatorRegistry;

// =============================================================================
// Token requests
// =============================================================================

/// A validated token-endpoint request.
pub struct OAuthTokenRequest<'a> {
    request: &'a dyn TransportRequest,
}

impl std::fmt::Debug for OAuthTokenRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthTokenRequest").finish_non_exhaustive()
    }
}

impl<'a> OAuthTokenRequest<'a> {
    /// Validates a token request with the standard authenticated grant
    /// validators.
    pub fn from_request(request: &'a dyn TransportRequest) -> OAuthResult<Self> {
        Self::with_registry(request, &ValidatorRegistry::token_defaults())
    }

    /// Validates a public-client token request: grants identify the client
    /// by `client_id` without demanding a secret.
    pub fn unauthenticated(request: &'a dyn TransportRequest) -> OAuthResult<Self> {
        Self::with_registry(request, &ValidatorRegistry::unauthenticated_token_defaults())
    }

    /// Validates a token request against a caller-supplied registry.
    pub fn with_registry(
        request: &'a dyn TransportRequest,
        registry: &ValidatorRegistry,
    ) -> OAuthResult<Self> {
        let grant_type = request.param(param::GRANT_TYPE).unwrap_or_default();
        if grant_type.is_empty() {
            return Err(utils::invalid_request("Missing grant_type parameter value"));
        }
        let Some(validator) = registry.validator_for(grant_type) else {
            tracing::warn!(grant_type, "unsupported grant type");
            return Err(utils::invalid_request("Invalid grant_type parameter value"));
        };
        tracing::debug!(grant_type, "validating token request");
        validator.perform_all_validations(request)?;
        Ok(Self { request })
    }

    /// Raw parameter access on the validated request.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.request.param(name)
    }

    #[must_use]
    pub fn grant_type(&self) -> Option<&str> {
        self.param(param::GRANT_TYPE)
    }

    /// Client id, preferring HTTP Basic credentials over body parameters.
    #[must_use]
    pub fn client_id(&self) -> Option<String> {
        self.basic_credentials()
            .map(|(client_id, _)| client_id)
            .or_else(|| self.param(param::CLIENT_ID).map(str::to_owned))
    }

    /// Client secret, preferring HTTP Basic credentials over body
    /// parameters.
    #[must_use]
    pub fn client_secret(&self) -> Option<String> {
        self.basic_credentials()
            .map(|(_, client_secret)| client_secret)
            .or_else(|| self.param(param::CLIENT_SECRET).map(str::to_owned))
    }

    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.param(param::CODE)
    }

    #[must_use]
    pub fn redirect_uri(&self) -> Option<&str> {
        self.param(param::REDIRECT_URI)
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.param(param::USERNAME)
    }

    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.param(param::PASSWORD)
    }

    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.param(param::REFRESH_TOKEN)
    }

    /// Requested scopes as a set.
    #[must_use]
    pub fn scopes(&self) -> HashSet<String> {
        self.param(param::SCOPE).map(utils::decode_scopes).unwrap_or_default()
    }

    fn basic_credentials(&self) -> Option<(String, String)> {
        self.request
            .header(header::AUTHORIZATION)
            .and_then(utils::decode_client_authentication_header)
    }
}

// =============================================================================
// Authorization requests
// =============================================================================

/// A validated authorization-endpoint request.
///
/// Composite response types ("code token") are validated by mixing the
/// component validators; the failures of all components are reported
/// together.
pub struct OAuthAuthzRequest<'a> {
    request: &'a dyn TransportRequest,
}

impl std::fmt::Debug for OAuthAuthzRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthAuthzRequest").finish_non_exhaustive()
    }
}

impl<'a> OAuthAuthzRequest<'a> {
    /// Validates an authorization request with the standard `code` and
    /// `token` validators.
    pub fn from_request(request: &'a dyn TransportRequest) -> OAuthResult<Self> {
        Self::with_registry(request, &ValidatorRegistry::authz_defaults())
    }

    /// Validates an authorization request against a caller-supplied
    /// registry.
    pub fn with_registry(
        request: &'a dyn TransportRequest,
        registry: &ValidatorRegistry,
    ) -> OAuthResult<Self> {
        let response_type = request.param(param::RESPONSE_TYPE).unwrap_or_default();
        if response_type.is_empty() {
            return Err(utils::invalid_request("Missing response_type parameter value"));
        }

        let components: Vec<&str> = response_type.split_whitespace().collect();
        let mut validators = Vec::with_capacity(components.len());
        for component in &components {
            let Some(validator) = registry.validator_for(component) else {
                tracing::warn!(response_type, "unsupported response type");
                return Err(utils::invalid_request("Invalid response_type parameter value"));
            };
            validators.push(validator);
        }

        tracing::debug!(response_type, "validating authorization request");
        if validators.len() == 1 {
            validators.remove(0).perform_all_validations(request)?;
        } else {
            ValidatorMixer::new(validators).perform_all_validations(request)?;
        }
        Ok(Self { request })
    }

    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.request.param(name)
    }

    #[must_use]
    pub fn response_type(&self) -> Option<&str> {
        self.param(param::RESPONSE_TYPE)
    }

    #[must_use]
    pub fn client_id(&self) -> Option<&str> {
        self.param(param::CLIENT_ID)
    }

    #[must_use]
    pub fn redirect_uri(&self) -> Option<&str> {
        self.param(param::REDIRECT_URI)
    }

    #[must_use]
    pub fn state(&self) -> Option<&str> {
        self.param(param::STATE)
    }

    #[must_use]
    pub fn scopes(&self) -> HashSet<String> {
        self.param(param::SCOPE).map(utils::decode_scopes).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use halcyon_common::request::RecordedRequest;
    use halcyon_common::types::content_type;

    fn token_post() -> RecordedRequest {
        RecordedRequest::post().with_content_type(content_type::URL_ENCODED)
    }

    #[test]
    fn test_missing_grant_type() {
        let request = token_post();
        let problem = OAuthTokenRequest::from_request(&request).expect_err("no grant_type");
        assert_eq!(
            problem.description.as_deref(),
            Some("Missing grant_type parameter value")
        );
    }

    #[test]
    fn test_unknown_grant_type() {
        let request = token_post().with_param(param::GRANT_TYPE, "implicit");
        let problem = OAuthTokenRequest::from_request(&request).expect_err("unknown grant_type");
        assert_eq!(
            problem.description.as_deref(),
            Some("Invalid grant_type parameter value")
        );
    }

    #[test]
    fn test_password_grant_accessors() {
        let request = token_post()
            .with_param(param::GRANT_TYPE, "password")
            .with_param(param::USERNAME, "johndoe")
            .with_param(param::PASSWORD, "A3ddj3w")
            .with_param(param::SCOPE, "read write")
            .with_basic_auth("s6BhdRkqt3", "gX1fBat3bV");

        let token_request =
            OAuthTokenRequest::from_request(&request).expect("valid password grant");
        assert_eq!(token_request.username(), Some("johndoe"));
        assert_eq!(token_request.client_id().as_deref(), Some("s6BhdRkqt3"));
        assert_eq!(token_request.client_secret().as_deref(), Some("gX1fBat3bV"));
        assert!(token_request.scopes().contains("write"));
    }

    #[test]
    fn test_basic_credentials_take_precedence() {
        let request = token_post()
            .with_param(param::GRANT_TYPE, "client_credentials")
            .with_param(param::CLIENT_ID, "body-id")
            .with_param(param::CLIENT_SECRET, "body-secret")
            .with_basic_auth("header-id", "header-secret");

        let token_request = OAuthTokenRequest::from_request(&request).expect("valid request");
        assert_eq!(token_request.client_id().as_deref(), Some("header-id"));
        assert_eq!(token_request.client_secret().as_deref(), Some("header-secret"));
    }

    #[test]
    fn test_authz_request_single_response_type() {
        let request = RecordedRequest::get()
            .with_param(param::RESPONSE_TYPE, "code")
            .with_param(param::CLIENT_ID, "c1")
            .with_param(param::REDIRECT_URI, "https://client.example.com/cb")
            .with_param(param::STATE, "s");

        let authz = OAuthAuthzRequest::from_request(&request).expect("valid code request");
        assert_eq!(authz.response_type(), Some("code"));
        assert_eq!(authz.state(), Some("s"));
    }

    #[test]
    fn test_authz_request_composite_unions_failures() {
        let request = RecordedRequest::get()
            .with_param(param::RESPONSE_TYPE, "code token")
            .with_param(param::CLIENT_ID, "c1");

        let problem = OAuthAuthzRequest::from_request(&request).expect_err("missing redirect_uri");
        assert_eq!(
            problem.description.as_deref(),
            Some("Missing parameters: redirect_uri")
        );
    }

    #[test]
    fn test_authz_request_unknown_component() {
        let request = RecordedRequest::get()
            .with_param(param::RESPONSE_TYPE, "code id_token")
            .with_param(param::CLIENT_ID, "c1")
            .with_param(param::REDIRECT_URI, "https://cb");

        let problem = OAuthAuthzRequest::from_request(&request).expect_err("unknown component");
        assert_eq!(
            problem.description.as_deref(),
            Some("Invalid response_type parameter value")
        );
    }
}
