//! # halcyon-common
//!
//! Shared OAuth 2.0 protocol machinery for the Halcyon workspace.
//!
//! This crate carries everything the authorization-server, client, and
//! resource-server roles have in common:
//!
//! - [`parameters`] - the ordered parameter bag behind every message
//! - [`serializer`] - the four wire formats (query/fragment, url-encoded
//!   body, JSON body, `WWW-Authenticate` header)
//! - [`message`] - outbound messages and the response builder
//! - [`validators`] - the declarative required/forbidden parameter engine
//! - [`request`] - the transport-neutral inbound request abstraction
//! - [`error`] - the structured [`OAuthProblem`] error model
//! - [`types`] - protocol constants and discriminator enums
//! - [`utils`] - encoding and header-grammar helpers
//!
//! No HTTP is executed here; integrations implement
//! [`request::TransportRequest`] over their own stack and render
//! [`message::OAuthResponse`] values however they see fit.

pub mod error;
pub mod message;
pub mod parameters;
pub mod request;
pub mod serializer;
pub mod token;
pub mod types;
pub mod utils;
pub mod validators;

pub use error::{OAuthProblem, OAuthSystemError, codes};
pub use message::{OAuthMessage, OAuthResponse, OAuthResponseBuilder};
pub use parameters::{ParamValue, ParameterBag};
pub use request::{RecordedRequest, TransportRequest};
pub use serializer::{
    BodyUrlEncodedParametersApplier, JsonBodyParametersApplier, ParametersApplier,
    QueryParameterApplier, WwwAuthHeaderParametersApplier,
};
pub use token::OAuthToken;
pub use types::{GrantType, ParameterStyle, ProviderType, ResponseType};
pub use validators::{CoreValidator, OAuthResult, OAuthValidator, ValidatorCore, ValidatorMixer};
