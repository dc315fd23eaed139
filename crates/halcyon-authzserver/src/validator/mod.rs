//! Built-in validators for token and authorization requests.

mod authorization;
mod grant;

pub use authorization::{CodeValidator, TokenValidator};
pub use grant::{
    AuthorizationCodeValidator, ClientCredentialValidator, PasswordValidator,
    RefreshTokenValidator, UnauthenticatedAuthorizationCodeValidator,
    UnauthenticatedPasswordValidator, UnauthenticatedRefreshTokenValidator,
};
