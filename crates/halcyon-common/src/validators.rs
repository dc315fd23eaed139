//! Declarative request validation engine.
//!
//! A validator is configuration plus three checks run in order: HTTP
//! method, content type, then parameters. Parameter failures are
//! aggregated: one pass reports every missing name and every forbidden
//! name, not just the first. [`ValidatorMixer`] composes validators for
//! composite discriminators ("code token") and unions their failures so
//! that no sub-validator short-circuits the others.

use http::Method;
use indexmap::{IndexMap, IndexSet};

use crate::error::{OAuthProblem, codes};
use crate::request::TransportRequest;
use crate::types::{content_type, header, param};
use crate::utils;

/// Result alias for validation outcomes.
pub type OAuthResult<T> = Result<T, OAuthProblem>;

// =============================================================================
// ValidatorCore
// =============================================================================

/// Declarative validator configuration, fixed at construction.
#[derive(Debug, Clone)]
pub struct ValidatorCore {
    /// Required parameter → parameters that become required once it is
    /// present.
    pub required_params: IndexMap<String, Vec<String>>,

    /// Parameters that must not appear at all.
    pub not_allowed_params: Vec<String>,

    /// Accepted HTTP methods; empty means any.
    pub allowed_methods: Vec<Method>,

    /// Exact content type to enforce, if any.
    pub required_content_type: Option<String>,

    /// Whether multipart requests are rejected outright.
    pub reject_multipart: bool,

    /// Whether client credentials (Basic header or body params) must be
    /// present.
    pub enforce_client_authentication: bool,
}

impl Default for ValidatorCore {
    fn default() -> Self {
        Self {
            required_params: IndexMap::new(),
            not_allowed_params: Vec::new(),
            allowed_methods: vec![Method::POST],
            required_content_type: Some(content_type::URL_ENCODED.to_owned()),
            reject_multipart: false,
            enforce_client_authentication: false,
        }
    }
}

impl ValidatorCore {
    /// Creates the default core: POST only, url-encoded content type, no
    /// parameter rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a required parameter without dependents.
    #[must_use]
    pub fn with_required_param(mut self, name: impl Into<String>) -> Self {
        self.required_params.insert(name.into(), Vec::new());
        self
    }

    /// Adds a required parameter whose presence makes further parameters
    /// required.
    #[must_use]
    pub fn with_required_param_dependents(
        mut self,
        name: impl Into<String>,
        dependents: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.required_params
            .insert(name.into(), dependents.into_iter().map(Into::into).collect());
        self
    }

    /// Adds a forbidden parameter.
    #[must_use]
    pub fn with_not_allowed_param(mut self, name: impl Into<String>) -> Self {
        self.not_allowed_params.push(name.into());
        self
    }

    /// Replaces the accepted HTTP methods.
    #[must_use]
    pub fn with_allowed_methods(mut self, methods: impl IntoIterator<Item = Method>) -> Self {
        self.allowed_methods = methods.into_iter().collect();
        self
    }

    /// Accepts any content type.
    #[must_use]
    pub fn with_any_content_type(mut self) -> Self {
        self.required_content_type = None;
        self
    }

    /// Rejects multipart requests.
    #[must_use]
    pub fn with_multipart_rejected(mut self) -> Self {
        self.reject_multipart = true;
        self
    }

    /// Requires client authentication credentials on the request.
    #[must_use]
    pub fn with_client_authentication_enforced(mut self) -> Self {
        self.enforce_client_authentication = true;
        self
    }

    /// Checks the HTTP method against the allowed set.
    pub fn validate_method(&self, request: &dyn TransportRequest) -> OAuthResult<()> {
        if self.allowed_methods.is_empty() || self.allowed_methods.contains(request.method()) {
            Ok(())
        } else {
            Err(utils::invalid_request("Method not correct."))
        }
    }

    /// Checks multipart rejection and the enforced content type.
    pub fn validate_content_type(&self, request: &dyn TransportRequest) -> OAuthResult<()> {
        if self.reject_multipart && utils::is_multipart(request) {
            return Err(utils::invalid_request("Request is not single part."));
        }
        if let Some(required) = &self.required_content_type
            && !utils::has_content_type(request.content_type(), required)
        {
            return Err(utils::handle_bad_content_type(required));
        }
        Ok(())
    }

    /// Collects every missing required (or dependent) parameter name.
    #[must_use]
    pub fn collect_missing(&self, request: &dyn TransportRequest) -> IndexSet<String> {
        let mut missing = IndexSet::new();
        for (name, dependents) in &self.required_params {
            if is_absent(request, name) {
                missing.insert(name.clone());
            } else {
                for dependent in dependents {
                    if is_absent(request, dependent) {
                        missing.insert(dependent.clone());
                    }
                }
            }
        }
        missing
    }

    /// Collects every forbidden parameter present on the request.
    #[must_use]
    pub fn collect_not_allowed(&self, request: &dyn TransportRequest) -> IndexSet<String> {
        self.not_allowed_params
            .iter()
            .filter(|name| !is_absent(request, name))
            .cloned()
            .collect()
    }

    /// Checks client credentials: HTTP Basic header or `client_id` +
    /// `client_secret` body parameters.
    pub fn validate_client_authentication(
        &self,
        request: &dyn TransportRequest,
    ) -> OAuthResult<()> {
        if !self.enforce_client_authentication {
            return Ok(());
        }
        if let Some(authorization) = request.header(header::AUTHORIZATION)
            && utils::decode_client_authentication_header(authorization).is_some()
        {
            return Ok(());
        }
        if !is_absent(request, param::CLIENT_ID) && !is_absent(request, param::CLIENT_SECRET) {
            return Ok(());
        }
        Err(OAuthProblem::error(codes::token::INVALID_CLIENT)
            .with_description("Client authentication failed.")
            .with_status(401))
    }
}

fn is_absent(request: &dyn TransportRequest, name: &str) -> bool {
    request.param(name).is_none_or(str::is_empty)
}

// =============================================================================
// OAuthValidator
// =============================================================================

/// Request validator: configuration-driven checks with aggregation.
///
/// Implementors supply a [`ValidatorCore`]; the default method bodies run
/// the checks against it. Resource-server validators override the
/// parameter check entirely (token extraction has its own rules).
pub trait OAuthValidator {
    /// The declarative configuration this validator runs with.
    fn core(&self) -> &ValidatorCore;

    fn validate_method(&self, request: &dyn TransportRequest) -> OAuthResult<()> {
        self.core().validate_method(request)
    }

    fn validate_content_type(&self, request: &dyn TransportRequest) -> OAuthResult<()> {
        self.core().validate_content_type(request)
    }

    /// Missing-parameter collection, exposed separately so mixers can
    /// union across validators before reporting.
    fn collect_missing_parameters(&self, request: &dyn TransportRequest) -> IndexSet<String> {
        self.core().collect_missing(request)
    }

    /// Forbidden-parameter collection, unioned by mixers like
    /// [`OAuthValidator::collect_missing_parameters`].
    fn collect_not_allowed_parameters(&self, request: &dyn TransportRequest) -> IndexSet<String> {
        self.core().collect_not_allowed(request)
    }

    fn validate_required_parameters(&self, request: &dyn TransportRequest) -> OAuthResult<()> {
        let missing = self.collect_missing_parameters(request);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(utils::handle_missing_parameters(
                missing.iter().map(String::as_str),
            ))
        }
    }

    fn validate_not_allowed_parameters(&self, request: &dyn TransportRequest) -> OAuthResult<()> {
        let not_allowed = self.collect_not_allowed_parameters(request);
        if not_allowed.is_empty() {
            Ok(())
        } else {
            Err(utils::handle_not_allowed_parameters(
                not_allowed.iter().map(String::as_str),
            ))
        }
    }

    fn validate_client_authentication_credentials(
        &self,
        request: &dyn TransportRequest,
    ) -> OAuthResult<()> {
        self.core().validate_client_authentication(request)
    }

    /// Runs every check in order: method, content type, required
    /// parameters, forbidden parameters, client authentication.
    fn perform_all_validations(&self, request: &dyn TransportRequest) -> OAuthResult<()> {
        self.validate_method(request)?;
        self.validate_content_type(request)?;
        self.validate_required_parameters(request)?;
        self.validate_not_allowed_parameters(request)?;
        self.validate_client_authentication_credentials(request)
    }
}

/// Plain validator that is nothing but its configuration.
#[derive(Debug, Clone, Default)]
pub struct CoreValidator {
    core: ValidatorCore,
}

impl CoreValidator {
    #[must_use]
    pub fn new(core: ValidatorCore) -> Self {
        Self { core }
    }
}

impl OAuthValidator for CoreValidator {
    fn core(&self) -> &ValidatorCore {
        &self.core
    }
}

// =============================================================================
// ValidatorMixer
// =============================================================================

/// Composes validators for composite discriminators.
///
/// Method/content-type checks run on every component; parameter failures
/// are unioned across components before a single aggregated problem is
/// raised.
pub struct ValidatorMixer {
    validators: Vec<Box<dyn OAuthValidator>>,
    core: ValidatorCore,
}

impl ValidatorMixer {
    #[must_use]
    pub fn new(validators: Vec<Box<dyn OAuthValidator>>) -> Self {
        Self {
            validators,
            // never consulted: every check below fans out to components
            core: ValidatorCore::new().with_any_content_type().with_allowed_methods([]),
        }
    }
}

impl OAuthValidator for ValidatorMixer {
    fn core(&self) -> &ValidatorCore {
        &self.core
    }

    fn validate_method(&self, request: &dyn TransportRequest) -> OAuthResult<()> {
        for validator in &self.validators {
            validator.validate_method(request)?;
        }
        Ok(())
    }

    fn validate_content_type(&self, request: &dyn TransportRequest) -> OAuthResult<()> {
        for validator in &self.validators {
            validator.validate_content_type(request)?;
        }
        Ok(())
    }

    fn collect_missing_parameters(&self, request: &dyn TransportRequest) -> IndexSet<String> {
        let mut missing = IndexSet::new();
        for validator in &self.validators {
            missing.extend(validator.collect_missing_parameters(request));
        }
        missing
    }

    fn collect_not_allowed_parameters(&self, request: &dyn TransportRequest) -> IndexSet<String> {
        let mut not_allowed = IndexSet::new();
        for validator in &self.validators {
            not_allowed.extend(validator.collect_not_allowed_parameters(request));
        }
        not_allowed
    }

    fn validate_client_authentication_credentials(
        &self,
        request: &dyn TransportRequest,
    ) -> OAuthResult<()> {
        for validator in &self.validators {
            validator.validate_client_authentication_credentials(request)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RecordedRequest;

    fn urlencoded_post() -> RecordedRequest {
        RecordedRequest::post().with_content_type(content_type::URL_ENCODED)
    }

    #[test]
    fn test_missing_parameters_are_aggregated() {
        let validator = CoreValidator::new(
            ValidatorCore::new()
                .with_required_param(param::GRANT_TYPE)
                .with_required_param(param::CODE)
                .with_required_param(param::REDIRECT_URI),
        );
        let request = urlencoded_post().with_param(param::GRANT_TYPE, "authorization_code");

        let problem = validator
            .validate_required_parameters(&request)
            .expect_err("two parameters missing");
        assert_eq!(problem.error_code(), Some("invalid_request"));
        assert_eq!(
            problem.description.as_deref(),
            Some("Missing parameters: code redirect_uri")
        );
    }

    #[test]
    fn test_dependent_parameters_only_required_when_primary_present() {
        let core = ValidatorCore::new()
            .with_required_param_dependents(param::CODE, [param::REDIRECT_URI]);
        let validator = CoreValidator::new(core);

        // primary absent: no dependent requirement
        let request = urlencoded_post();
        assert!(validator.validate_required_parameters(&request).is_err());

        // primary present: dependent becomes required
        let request = urlencoded_post().with_param(param::CODE, "abc");
        let problem = validator
            .validate_required_parameters(&request)
            .expect_err("dependent missing");
        assert_eq!(
            problem.description.as_deref(),
            Some("Missing parameters: redirect_uri")
        );

        let request = urlencoded_post()
            .with_param(param::CODE, "abc")
            .with_param(param::REDIRECT_URI, "https://cb");
        assert!(validator.validate_required_parameters(&request).is_ok());
    }

    #[test]
    fn test_not_allowed_parameters_are_aggregated() {
        let validator = CoreValidator::new(
            ValidatorCore::new()
                .with_not_allowed_param(param::ACCESS_TOKEN)
                .with_not_allowed_param(param::REFRESH_TOKEN),
        );
        let request = urlencoded_post()
            .with_param(param::ACCESS_TOKEN, "a")
            .with_param(param::REFRESH_TOKEN, "r");

        let problem = validator
            .validate_not_allowed_parameters(&request)
            .expect_err("both forbidden");
        assert_eq!(
            problem.description.as_deref(),
            Some("Not allowed parameters: access_token refresh_token")
        );
    }

    #[test]
    fn test_method_check() {
        let validator = CoreValidator::new(ValidatorCore::new());
        let request = RecordedRequest::get().with_content_type(content_type::URL_ENCODED);
        let problem = validator.validate_method(&request).expect_err("GET rejected");
        assert_eq!(problem.description.as_deref(), Some("Method not correct."));

        assert!(validator.validate_method(&urlencoded_post()).is_ok());
    }

    #[test]
    fn test_content_type_check() {
        let validator = CoreValidator::new(ValidatorCore::new());
        let request = RecordedRequest::post().with_content_type(content_type::JSON);
        let problem = validator
            .validate_content_type(&request)
            .expect_err("JSON rejected");
        assert_eq!(
            problem.description.as_deref(),
            Some("Bad request content type. Expecting: application/x-www-form-urlencoded")
        );

        // attributes after `;` are tolerated
        let request =
            RecordedRequest::post().with_content_type("application/x-www-form-urlencoded;utf-8");
        assert!(validator.validate_content_type(&request).is_ok());
    }

    #[test]
    fn test_multipart_rejection() {
        let validator = CoreValidator::new(
            ValidatorCore::new().with_any_content_type().with_multipart_rejected(),
        );
        let request =
            RecordedRequest::post().with_content_type("multipart/form-data; boundary=b");
        let problem = validator
            .validate_content_type(&request)
            .expect_err("multipart rejected");
        assert_eq!(problem.description.as_deref(), Some("Request is not single part."));
    }

    #[test]
    fn test_client_authentication_paths() {
        let validator = CoreValidator::new(
            ValidatorCore::new().with_client_authentication_enforced(),
        );

        let request = urlencoded_post().with_basic_auth("client", "secret");
        assert!(validator.validate_client_authentication_credentials(&request).is_ok());

        let request = urlencoded_post()
            .with_param(param::CLIENT_ID, "client")
            .with_param(param::CLIENT_SECRET, "secret");
        assert!(validator.validate_client_authentication_credentials(&request).is_ok());

        let request = urlencoded_post().with_param(param::CLIENT_ID, "client");
        let problem = validator
            .validate_client_authentication_credentials(&request)
            .expect_err("no secret");
        assert_eq!(problem.error_code(), Some("invalid_client"));
        assert_eq!(problem.http_status(), 401);
    }

    #[test]
    fn test_mixer_unions_failures() {
        let code_like = CoreValidator::new(
            ValidatorCore::new()
                .with_required_param(param::RESPONSE_TYPE)
                .with_required_param(param::CLIENT_ID),
        );
        let token_like = CoreValidator::new(
            ValidatorCore::new()
                .with_required_param(param::RESPONSE_TYPE)
                .with_required_param(param::REDIRECT_URI),
        );
        let mixer = ValidatorMixer::new(vec![Box::new(code_like), Box::new(token_like)]);

        let request = urlencoded_post().with_param(param::RESPONSE_TYPE, "code token");
        let problem = mixer
            .validate_required_parameters(&request)
            .expect_err("union of both validators");
        assert_eq!(
            problem.description.as_deref(),
            Some("Missing parameters: client_id redirect_uri")
        );
    }
}
