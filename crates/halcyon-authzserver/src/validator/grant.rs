//! Token-request validators, one per grant type.
//!
//! Token requests are POSTed url-encoded forms; each validator requires
//! `grant_type` plus the parameters its grant needs. The authenticated
//! variants demand client credentials (Basic header or body parameters),
//! the unauthenticated variants demand a bare `client_id` instead and are
//! meant for public clients.

use halcyon_common::types::param;
use halcyon_common::validators::{OAuthValidator, ValidatorCore};

macro_rules! grant_validator {
    ($(#[$doc:meta])* $name:ident, $core:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            core: ValidatorCore,
        }

        impl $name {
            #[must_use]
            pub fn new() -> Self {
                Self { core: $core }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl OAuthValidator for $name {
            fn core(&self) -> &ValidatorCore {
                &self.core
            }
        }
    };
}

grant_validator!(
    /// `grant_type=authorization_code`: requires the code and the redirect
    /// URI it was issued against, plus client authentication.
    AuthorizationCodeValidator,
    ValidatorCore::new()
        .with_required_param(param::GRANT_TYPE)
        .with_required_param(param::CODE)
        .with_required_param(param::REDIRECT_URI)
        .with_client_authentication_enforced()
);

grant_validator!(
    /// `grant_type=password`: resource-owner credentials plus client
    /// authentication.
    PasswordValidator,
    ValidatorCore::new()
        .with_required_param(param::GRANT_TYPE)
        .with_required_param(param::USERNAME)
        .with_required_param(param::PASSWORD)
        .with_client_authentication_enforced()
);

grant_validator!(
    /// `grant_type=client_credentials`: the client IS the resource owner;
    /// only authentication is required.
    ClientCredentialValidator,
    ValidatorCore::new()
        .with_required_param(param::GRANT_TYPE)
        .with_client_authentication_enforced()
);

grant_validator!(
    /// `grant_type=refresh_token`: requires the refresh token plus client
    /// authentication.
    RefreshTokenValidator,
    ValidatorCore::new()
        .with_required_param(param::GRANT_TYPE)
        .with_required_param(param::REFRESH_TOKEN)
        .with_client_authentication_enforced()
);

grant_validator!(
    /// Public-client variant of [`AuthorizationCodeValidator`]: identifies
    /// the client by `client_id` without demanding a secret.
    UnauthenticatedAuthorizationCodeValidator,
    ValidatorCore::new()
        .with_required_param(param::GRANT_TYPE)
        .with_required_param(param::CODE)
        .with_required_param(param::REDIRECT_URI)
        .with_required_param(param::CLIENT_ID)
);

grant_validator!(
    /// Public-client variant of [`PasswordValidator`].
    UnauthenticatedPasswordValidator,
    ValidatorCore::new()
        .with_required_param(param::GRANT_TYPE)
        .with_required_param(param::USERNAME)
        .with_required_param(param::PASSWORD)
        .with_required_param(param::CLIENT_ID)
);

grant_validator!(
    /// Public-client variant of [`RefreshTokenValidator`].
    UnauthenticatedRefreshTokenValidator,
    ValidatorCore::new()
        .with_required_param(param::GRANT_TYPE)
        .with_required_param(param::REFRESH_TOKEN)
        .with_required_param(param::CLIENT_ID)
);
