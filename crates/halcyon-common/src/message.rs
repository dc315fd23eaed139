//! Outbound protocol messages and the response builder.
//!
//! [`OAuthMessage`] is the wire-facing value: an optional location URI, an
//! optional body, and headers. [`OAuthResponse`] wraps a finished message
//! with an HTTP status and is produced by [`OAuthResponseBuilder`], which
//! pushes an ordered parameter set through one of the serializers in a
//! single pass.

use indexmap::IndexMap;

use crate::error::{OAuthProblem, OAuthSystemError, codes};
use crate::parameters::{ParamValue, ParameterBag};
use crate::serializer::{
    BodyUrlEncodedParametersApplier, JsonBodyParametersApplier, ParametersApplier,
    QueryParameterApplier, WwwAuthHeaderParametersApplier,
};
use crate::types::param;

// =============================================================================
// OAuthMessage
// =============================================================================

/// A wire message under construction: redirect location, body, headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OAuthMessage {
    /// Redirect/location URI, present for query-serialized messages.
    pub location_uri: Option<String>,

    /// Message body, present for body/JSON-serialized messages.
    pub body: Option<String>,

    /// Headers added during serialization.
    pub headers: IndexMap<String, String>,
}

impl OAuthMessage {
    /// Creates an empty message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a message carrying a location URI.
    #[must_use]
    pub fn with_location(location_uri: impl Into<String>) -> Self {
        Self {
            location_uri: Some(location_uri.into()),
            ..Self::default()
        }
    }

    /// Adds a header to the message.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    /// Header lookup by exact name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

// =============================================================================
// OAuthResponse
// =============================================================================

/// A finished response: serialized message plus HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthResponse {
    message: OAuthMessage,
    status: u16,
}

impl OAuthResponse {
    /// Starts building a success response with the given HTTP status.
    #[must_use]
    pub fn status(status: u16) -> OAuthResponseBuilder {
        OAuthResponseBuilder::new(status)
    }

    /// Starts building an error response with the given HTTP status; seed
    /// it from a problem via [`OAuthResponseBuilder::error`].
    #[must_use]
    pub fn error_response(status: u16) -> OAuthResponseBuilder {
        OAuthResponseBuilder::new(status)
    }

    #[must_use]
    pub fn location_uri(&self) -> Option<&str> {
        self.message.location_uri.as_deref()
    }

    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.message.body.as_deref()
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.message.header(name)
    }

    #[must_use]
    pub fn response_status(&self) -> u16 {
        self.status
    }

    /// The underlying message.
    #[must_use]
    pub fn message(&self) -> &OAuthMessage {
        &self.message
    }
}

// =============================================================================
// OAuthResponseBuilder
// =============================================================================

/// Accumulates parameters, then serializes them through a chosen wire
/// format in one step.
#[derive(Debug, Clone)]
pub struct OAuthResponseBuilder {
    parameters: ParameterBag,
    location: Option<String>,
    status: u16,
}

impl OAuthResponseBuilder {
    fn new(status: u16) -> Self {
        Self {
            parameters: ParameterBag::new(),
            location: None,
            status,
        }
    }

    /// Sets the redirect location for query-serialized responses.
    #[must_use]
    pub fn location(mut self, uri: impl Into<String>) -> Self {
        self.location = Some(uri.into());
        self
    }

    /// Sets a response parameter.
    #[must_use]
    pub fn set_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.parameters.set(name, value);
        self
    }

    /// Copies the error code, description, URI, state, scope and extra
    /// parameters out of a problem.
    #[must_use]
    pub fn error(mut self, problem: &OAuthProblem) -> Self {
        if let Some(code) = problem.error_code() {
            self.parameters.set(codes::ERROR, code);
        }
        self.parameters
            .set_opt(codes::ERROR_DESCRIPTION, problem.description.clone());
        self.parameters.set_opt(codes::ERROR_URI, problem.uri.clone());
        self.parameters.set_opt(param::STATE, problem.state.clone());
        self.parameters.set_opt(param::SCOPE, problem.scope.clone());
        for (name, value) in &problem.parameters {
            self.parameters.set(name.clone(), value.clone());
        }
        self
    }

    /// Serializes into the location URI (query/fragment form).
    pub fn build_query_message(self) -> Result<OAuthResponse, OAuthSystemError> {
        self.build(&QueryParameterApplier)
    }

    /// Serializes into an url-encoded body.
    pub fn build_body_message(self) -> Result<OAuthResponse, OAuthSystemError> {
        self.build(&BodyUrlEncodedParametersApplier)
    }

    /// Serializes into a flat JSON body.
    pub fn build_json_message(self) -> Result<OAuthResponse, OAuthSystemError> {
        self.build(&JsonBodyParametersApplier)
    }

    /// Serializes into a `WWW-Authenticate` header.
    pub fn build_header_message(self) -> Result<OAuthResponse, OAuthSystemError> {
        self.build(&WwwAuthHeaderParametersApplier)
    }

    fn build(self, applier: &dyn ParametersApplier) -> Result<OAuthResponse, OAuthSystemError> {
        let mut message = OAuthMessage::new();
        message.location_uri = self.location;
        let message = applier.apply(message, &self.parameters)?;
        Ok(OAuthResponse {
            message,
            status: self.status,
        })
    }
}
