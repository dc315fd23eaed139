//! # halcyon-resourceserver
//!
//! Resource-server side of the Halcyon OAuth 2.0 workspace: locating and
//! validating bearer tokens on protected-resource requests.
//!
//! [`request::OAuthAccessResourceRequest`] tries each configured
//! parameter style (header, body, query) and applies the disambiguation
//! policy: a token delivered through several mechanisms at once is a hard
//! `invalid_request`, a request that used no mechanism at all yields a
//! problem with no error code so callers can answer a bare 401.
//!
//! ## Modules
//!
//! - [`validator`] - per-style bearer request validators
//! - [`extractor`] - per-style token extractors
//! - [`request`] - the multi-style resource request
//! - [`response`] - `WWW-Authenticate` challenge responses

pub mod extractor;
pub mod request;
pub mod response;
pub mod validator;

pub use extractor::{
    BearerBodyTokenExtractor, BearerHeaderTokenExtractor, BearerQueryTokenExtractor,
    TokenExtractor,
};
pub use request::OAuthAccessResourceRequest;
pub use response::{OAuthRSErrorResponseBuilder, OAuthRSResponse};
pub use validator::{BearerBodyValidator, BearerHeaderValidator, BearerQueryValidator};
