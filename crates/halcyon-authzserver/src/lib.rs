//! # halcyon-authzserver
//!
//! Authorization-server side of the Halcyon OAuth 2.0 workspace.
//!
//! Inbound requests are wrapped by [`request::OAuthTokenRequest`] and
//! [`request::OAuthAuthzRequest`]; construction dispatches on the
//! `grant_type` / `response_type` discriminator through a
//! [`dispatch::ValidatorRegistry`] and runs the selected validator.
//! Outbound responses are assembled with [`response::OAuthASResponse`].
//!
//! ## Modules
//!
//! - [`dispatch`] - open discriminator → validator registry
//! - [`validator`] - built-in grant and response-type validators
//! - [`request`] - validated request wrappers
//! - [`response`] - authorization and token response builders

pub mod dispatch;
pub mod request;
pub mod response;
pub mod validator;

pub use dispatch::{ValidatorFactory, ValidatorRegistry};
pub use request::{OAuthAuthzRequest, OAuthTokenRequest};
pub use response::{
    OAuthASResponse, OAuthAuthorizationResponseBuilder, OAuthTokenResponseBuilder,
};
