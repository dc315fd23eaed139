//! # halcyon-client
//!
//! Client side of the Halcyon OAuth 2.0 workspace: building requests in
//! the three wire placements (query, body, header) and parsing server
//! responses back into typed values.
//!
//! HTTP execution is injected through [`client::HttpClient`]; this crate
//! only assembles and interprets messages.
//!
//! ## Modules
//!
//! - [`request`] - authorization/token/bearer request builders
//! - [`response`] - token, authorization, and resource response parsing
//! - [`validator`] - client-side response validation
//! - [`client`] - the transport-agnostic [`client::OAuthClient`]

pub mod client;
pub mod request;
pub mod response;
pub mod validator;

pub use client::{HttpClient, OAuthClient, OAuthClientError, RawHttpResponse};
pub use request::{
    AuthenticationRequestBuilder, OAuthBearerClientRequest, OAuthClientRequest,
    TokenRequestBuilder,
};
pub use response::{
    AccessTokenResponse, GitHubTokenResponse, OAuthAuthzResponse, OAuthClientResponseFactory,
    OAuthJsonAccessTokenResponse, OAuthResourceResponse, ParseTokenResponse,
};
pub use validator::ClientResponseValidator;
