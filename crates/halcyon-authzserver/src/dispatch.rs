//! Discriminator → validator dispatch.
//!
//! A [`ValidatorRegistry`] maps a discriminator string (`grant_type` or
//! `response_type` value) to a constructor returning a fresh validator.
//! Registration is open: embedders add custom grant types by inserting
//! entries, no reflection involved. Each lookup constructs a new
//! validator, so registries are safely shared across requests.

use indexmap::IndexMap;

use halcyon_common::types::{GrantType, ResponseType};
use halcyon_common::validators::OAuthValidator;

use crate::validator::{
    AuthorizationCodeValidator, ClientCredentialValidator, CodeValidator, PasswordValidator,
    RefreshTokenValidator, TokenValidator, UnauthenticatedAuthorizationCodeValidator,
    UnauthenticatedPasswordValidator, UnauthenticatedRefreshTokenValidator,
};

/// Constructor of a validator instance.
pub type ValidatorFactory = fn() -> Box<dyn OAuthValidator>;

/// Open registry of discriminator values to validator constructors.
pub struct ValidatorRegistry {
    validators: IndexMap<String, ValidatorFactory>,
}

impl ValidatorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            validators: IndexMap::new(),
        }
    }

    /// Registry for authenticated token requests: the four standard grant
    /// types with client authentication enforced.
    #[must_use]
    pub fn token_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(GrantType::AuthorizationCode.as_str(), || {
            Box::new(AuthorizationCodeValidator::new())
        });
        registry.register(GrantType::Password.as_str(), || {
            Box::new(PasswordValidator::new())
        });
        registry.register(GrantType::ClientCredentials.as_str(), || {
            Box::new(ClientCredentialValidator::new())
        });
        registry.register(GrantType::RefreshToken.as_str(), || {
            Box::new(RefreshTokenValidator::new())
        });
        registry
    }

    /// Registry for public-client token requests: client identification by
    /// bare `client_id`, no secret demanded.
    #[must_use]
    pub fn unauthenticated_token_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(GrantType::AuthorizationCode.as_str(), || {
            Box::new(UnauthenticatedAuthorizationCodeValidator::new())
        });
        registry.register(GrantType::Password.as_str(), || {
            Box::new(UnauthenticatedPasswordValidator::new())
        });
        registry.register(GrantType::RefreshToken.as_str(), || {
            Box::new(UnauthenticatedRefreshTokenValidator::new())
        });
        registry
    }

    /// Registry for end-user authorization requests: `code` and `token`
    /// response types.
    #[must_use]
    pub fn authz_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ResponseType::Code.as_str(), || Box::new(CodeValidator::new()));
        registry.register(ResponseType::Token.as_str(), || Box::new(TokenValidator::new()));
        registry
    }

    /// Registers (or replaces) a validator constructor for a discriminator
    /// value.
    pub fn register(&mut self, discriminator: impl Into<String>, factory: ValidatorFactory) {
        self.validators.insert(discriminator.into(), factory);
    }

    /// Constructs the validator registered for the discriminator, if any.
    #[must_use]
    pub fn validator_for(&self, discriminator: &str) -> Option<Box<dyn OAuthValidator>> {
        self.validators.get(discriminator).map(|factory| factory())
    }

    /// Registered discriminator values, in registration order.
    pub fn discriminators(&self) -> impl Iterator<Item = &str> {
        self.validators.keys().map(String::as_str)
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use halcyon_common::request::RecordedRequest;
    use halcyon_common::types::{content_type, param};
    use halcyon_common::validators::{CoreValidator, ValidatorCore};

    #[test]
    fn test_defaults_cover_standard_grants() {
        let registry = ValidatorRegistry::token_defaults();
        for grant in ["authorization_code", "password", "client_credentials", "refresh_token"] {
            assert!(registry.validator_for(grant).is_some(), "missing {grant}");
        }
        assert!(registry.validator_for("implicit").is_none());
    }

    #[test]
    fn test_custom_registration_dispatches() {
        let mut registry = ValidatorRegistry::token_defaults();
        registry.register("urn:custom:saml2-bearer", || {
            Box::new(CoreValidator::new(
                ValidatorCore::new()
                    .with_required_param(param::GRANT_TYPE)
                    .with_required_param(param::ASSERTION),
            ))
        });

        let validator = registry
            .validator_for("urn:custom:saml2-bearer")
            .expect("custom grant registered");
        let request = RecordedRequest::post()
            .with_content_type(content_type::URL_ENCODED)
            .with_param(param::GRANT_TYPE, "urn:custom:saml2-bearer")
            .with_param(param::ASSERTION, "a");
        assert!(validator.perform_all_validations(&request).is_ok());
    }
}
