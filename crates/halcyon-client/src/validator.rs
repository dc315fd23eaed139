//! Client-side validation of parsed server responses.
//!
//! Mirrors the server-side engine over a parsed [`ParameterBag`]: error
//! responses short-circuit first, then required parameters (with
//! dependents) and forbidden parameters are checked with aggregated
//! reporting.

use indexmap::IndexMap;

use halcyon_common::error::{OAuthProblem, codes};
use halcyon_common::parameters::ParameterBag;
use halcyon_common::types::param;
use halcyon_common::utils;
use halcyon_common::validators::OAuthResult;

/// Declarative validator over response parameters.
#[derive(Debug, Clone, Default)]
pub struct ClientResponseValidator {
    required_params: IndexMap<String, Vec<String>>,
    not_allowed_params: Vec<String>,
}

impl ClientResponseValidator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a required response parameter.
    #[must_use]
    pub fn with_required_param(mut self, name: impl Into<String>) -> Self {
        self.required_params.insert(name.into(), Vec::new());
        self
    }

    /// Adds a required parameter with dependents that become required once
    /// it is present.
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

    /// Adds a parameter that must not appear in the response.
    #[must_use]
    pub fn with_not_allowed_param(mut self, name: impl Into<String>) -> Self {
        self.not_allowed_params.push(name.into());
        self
    }

    /// Runs all checks: error response first, then parameters.
    pub fn validate(&self, parameters: &ParameterBag) -> OAuthResult<()> {
        self.validate_error_response(parameters)?;
        self.validate_required_parameters(parameters)?;
        self.validate_not_allowed_parameters(parameters)
    }

    /// Raises the server-reported error, when the response carries one.
    pub fn validate_error_response(&self, parameters: &ParameterBag) -> OAuthResult<()> {
        let Some(error) = parameters.get_rendered(codes::ERROR).filter(|e| !e.is_empty()) else {
            return Ok(());
        };
        let mut problem = OAuthProblem::error(error);
        if let Some(description) = parameters.get_rendered(codes::ERROR_DESCRIPTION) {
            problem = problem.with_description(description);
        }
        if let Some(uri) = parameters.get_rendered(codes::ERROR_URI) {
            problem = problem.with_uri(uri);
        }
        if let Some(state) = parameters.get_rendered(param::STATE) {
            problem = problem.with_state(state);
        }
        Err(problem)
    }

    /// Aggregated required-parameter check.
    pub fn validate_required_parameters(&self, parameters: &ParameterBag) -> OAuthResult<()> {
        let mut missing = Vec::new();
        for (name, dependents) in &self.required_params {
            if is_absent(parameters, name) {
                missing.push(name.as_str());
            } else {
                for dependent in dependents {
                    if is_absent(parameters, dependent) {
                        missing.push(dependent.as_str());
                    }
                }
            }
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(utils::handle_missing_parameters(missing))
        }
    }

    /// Aggregated forbidden-parameter check.
    pub fn validate_not_allowed_parameters(&self, parameters: &ParameterBag) -> OAuthResult<()> {
        let not_allowed: Vec<&str> = self
            .not_allowed_params
            .iter()
            .filter(|name| !is_absent(parameters, name))
            .map(String::as_str)
            .collect();
        if not_allowed.is_empty() {
            Ok(())
        } else {
            Err(utils::handle_not_allowed_parameters(not_allowed))
        }
    }
}

fn is_absent(parameters: &ParameterBag, name: &str) -> bool {
    parameters.get(name).is_none_or(|value| value.is_empty())
}

/// Validator for code-flow redirect responses: `code` must be present.
#[must_use]
pub fn code_response_validator() -> ClientResponseValidator {
    ClientResponseValidator::new().with_required_param(param::CODE)
}

/// Validator for implicit-flow redirect responses: `access_token` must be
/// present and `code` must not appear.
#[must_use]
pub fn implicit_response_validator() -> ClientResponseValidator {
    ClientResponseValidator::new()
        .with_required_param(param::ACCESS_TOKEN)
        .with_not_allowed_param(param::CODE)
}

/// Validator for token-endpoint responses: `access_token` must be present.
#[must_use]
pub fn token_response_validator() -> ClientResponseValidator {
    ClientResponseValidator::new().with_required_param(param::ACCESS_TOKEN)
}
