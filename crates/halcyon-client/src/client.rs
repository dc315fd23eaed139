//! Transport-agnostic OAuth client.
//!
//! The core never opens connections: an [`HttpClient`] implementation is
//! injected and handed fully built requests. The client drives the
//! request/response cycle and parses bodies into typed responses.

use indexmap::IndexMap;

use halcyon_common::error::{OAuthProblem, OAuthSystemError};
use halcyon_common::types::{content_type, header};

use crate::request::OAuthClientRequest;
use crate::response::{OAuthJsonAccessTokenResponse, OAuthResourceResponse, ParseTokenResponse};

// =============================================================================
// Transport interface
// =============================================================================

/// Raw result handed back by the transport.
#[derive(Debug, Clone)]
pub struct RawHttpResponse {
    pub status: u16,
    pub body: String,
    pub content_type: Option<String>,
    pub headers: IndexMap<String, String>,
}

/// The injected HTTP executor.
///
/// Implementations send the already-serialized request (URL, body,
/// headers) with the given method and return the raw response. Connection
/// management, timeouts, and TLS live entirely on this side of the
/// boundary.
pub trait HttpClient {
    fn execute(
        &self,
        request: &OAuthClientRequest,
        extra_headers: &IndexMap<String, String>,
        method: &http::Method,
    ) -> Result<RawHttpResponse, OAuthSystemError>;
}

// =============================================================================
// Errors
// =============================================================================

/// Client-side failure: either a protocol problem (the server answered
/// with an OAuth error, or the response failed validation) or a system
/// failure underneath.
#[derive(Debug, thiserror::Error)]
pub enum OAuthClientError {
    #[error(transparent)]
    Problem(#[from] OAuthProblem),

    #[error(transparent)]
    System(#[from] OAuthSystemError),
}

// =============================================================================
// OAuthClient
// =============================================================================

/// Drives OAuth request/response exchanges over an injected transport.
pub struct OAuthClient<H> {
    http_client: H,
}

impl<H: HttpClient> OAuthClient<H> {
    #[must_use]
    pub fn new(http_client: H) -> Self {
        Self { http_client }
    }

    /// POSTs a token request and parses the standard JSON response.
    pub fn access_token(
        &self,
        request: &OAuthClientRequest,
    ) -> Result<OAuthJsonAccessTokenResponse, OAuthClientError> {
        self.access_token_as::<OAuthJsonAccessTokenResponse>(request, &http::Method::POST)
    }

    /// Sends a token request and parses the response with a chosen
    /// response type (e.g. a form-encoded provider response).
    pub fn access_token_as<R: ParseTokenResponse>(
        &self,
        request: &OAuthClientRequest,
        method: &http::Method,
    ) -> Result<R, OAuthClientError> {
        let mut headers = IndexMap::new();
        headers.insert(
            header::CONTENT_TYPE.to_owned(),
            content_type::URL_ENCODED.to_owned(),
        );

        tracing::debug!(url = request.location_uri(), "executing token request");
        let raw = self.http_client.execute(request, &headers, method)?;
        let response = R::parse(&raw.body, raw.content_type.as_deref(), raw.status)?;
        Ok(response)
    }

    /// Sends a protected-resource request and returns the opaque result.
    pub fn resource(
        &self,
        request: &OAuthClientRequest,
        method: &http::Method,
    ) -> Result<OAuthResourceResponse, OAuthClientError> {
        tracing::debug!(url = request.location_uri(), "executing resource request");
        let raw = self.http_client.execute(request, &IndexMap::new(), method)?;
        Ok(OAuthResourceResponse::new(raw.body, raw.content_type, raw.status))
    }

    /// The injected transport, for embedders that need it back.
    pub fn http_client(&self) -> &H {
        &self.http_client
    }
}
