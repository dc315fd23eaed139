//! OAuth 2.0 error model.
//!
//! [`OAuthProblem`] is the structured protocol error that travels through
//! every layer: validators raise it, dispatchers enrich it, and response
//! builders render it through a wire serializer. A problem whose error code
//! is `None` means "no authentication information was supplied at all";
//! callers use that distinction to answer with a bare 401 instead of a
//! detailed 400.
//!
//! [`OAuthSystemError`] is the separate kind for infrastructure failures
//! (serialization, transport, crypto providers). It is never rendered as a
//! protocol error.

use std::fmt;

use indexmap::IndexMap;

// =============================================================================
// Error codes
// =============================================================================

/// OAuth 2.0 error-code strings, grouped per endpoint as in RFC 6749.
pub mod codes {
    /// Error response parameter names.
    pub const ERROR: &str = "error";
    pub const ERROR_DESCRIPTION: &str = "error_description";
    pub const ERROR_URI: &str = "error_uri";

    /// Codes an authorization endpoint may return.
    pub mod authz {
        pub const INVALID_REQUEST: &str = "invalid_request";
        pub const UNAUTHORIZED_CLIENT: &str = "unauthorized_client";
        pub const ACCESS_DENIED: &str = "access_denied";
        pub const UNSUPPORTED_RESPONSE_TYPE: &str = "unsupported_response_type";
        pub const INVALID_SCOPE: &str = "invalid_scope";
        pub const SERVER_ERROR: &str = "server_error";
        pub const TEMPORARILY_UNAVAILABLE: &str = "temporarily_unavailable";
    }

    /// Codes a token endpoint may return.
    pub mod token {
        pub const INVALID_REQUEST: &str = "invalid_request";
        pub const INVALID_CLIENT: &str = "invalid_client";
        pub const INVALID_GRANT: &str = "invalid_grant";
        pub const UNAUTHORIZED_CLIENT: &str = "unauthorized_client";
        pub const UNSUPPORTED_GRANT_TYPE: &str = "unsupported_grant_type";
        pub const INVALID_SCOPE: &str = "invalid_scope";
    }

    /// Codes a protected resource may return.
    pub mod resource {
        pub const INVALID_REQUEST: &str = "invalid_request";
        pub const EXPIRED_TOKEN: &str = "expired_token";
        pub const INVALID_TOKEN: &str = "invalid_token";
        pub const INSUFFICIENT_SCOPE: &str = "insufficient_scope";
    }
}

// =============================================================================
// OAuthProblem
// =============================================================================

/// Structured OAuth 2.0 protocol error.
///
/// Built through chainable setters and carried as the `Err` side of
/// [`OAuthResult`](crate::OAuthResult) throughout the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthProblem {
    /// OAuth error code. `None` means no authentication info was supplied,
    /// which is distinct from any concrete violation.
    pub error: Option<String>,

    /// Human-readable description.
    pub description: Option<String>,

    /// URI pointing at documentation for the error.
    pub uri: Option<String>,

    /// Opaque client state echoed back on authorization errors.
    pub state: Option<String>,

    /// Scope attached to resource-endpoint errors.
    pub scope: Option<String>,

    /// Redirect URI the error response should be delivered to, when known.
    pub redirect_uri: Option<String>,

    /// Suggested HTTP response status.
    pub response_status: u16,

    /// Additional parameters to render with the error.
    pub parameters: IndexMap<String, String>,
}

impl OAuthProblem {
    /// Creates a problem with a concrete error code.
    #[must_use]
    pub fn error(code: impl Into<String>) -> Self {
        Self {
            error: Some(code.into()),
            description: None,
            uri: None,
            state: None,
            scope: None,
            redirect_uri: None,
            response_status: 400,
            parameters: IndexMap::new(),
        }
    }

    /// Creates a problem signalling that no authentication information was
    /// found on the request. `error` stays `None`.
    #[must_use]
    pub fn unauthenticated(description: impl Into<String>) -> Self {
        Self {
            error: None,
            description: Some(description.into()),
            uri: None,
            state: None,
            scope: None,
            redirect_uri: None,
            response_status: 401,
            parameters: IndexMap::new(),
        }
    }

    /// Sets the human-readable description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the error documentation URI.
    #[must_use]
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Sets the client state to echo back.
    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Sets the scope for resource-endpoint errors.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Sets the redirect URI the error should be delivered to.
    #[must_use]
    pub fn with_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(uri.into());
        self
    }

    /// Overrides the suggested HTTP status.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.response_status = status;
        self
    }

    /// Attaches an extra parameter to render with the error.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Error code as a borrowed string, if one is set.
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// `true` when the problem carries no concrete error code, i.e. the
    /// request simply lacked authentication information.
    #[must_use]
    pub fn is_unauthenticated(&self) -> bool {
        // an empty code counts the same as an absent one
        self.error.as_deref().is_none_or(str::is_empty)
    }

    /// Maps the problem onto an HTTP status: 401 without an error code,
    /// 403 for `insufficient_scope`, otherwise the stored status.
    #[must_use]
    pub fn http_status(&self) -> u16 {
        if self.is_unauthenticated() {
            return 401;
        }
        if self.error_code() == Some(codes::resource::INSUFFICIENT_SCOPE) {
            return 403;
        }
        self.response_status
    }
}

impl fmt::Display for OAuthProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.error_code(), self.description.as_deref()) {
            (Some(code), Some(description)) => write!(f, "{code}: {description}"),
            (Some(code), None) => write!(f, "{code}"),
            (None, Some(description)) => write!(f, "{description}"),
            (None, None) => write!(f, "OAuth problem"),
        }
    }
}

impl std::error::Error for OAuthProblem {}

// =============================================================================
// OAuthSystemError
// =============================================================================

/// Infrastructure failure underneath the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum OAuthSystemError {
    /// JSON encoding or decoding failed.
    #[error("JSON processing failed")]
    Json(#[from] serde_json::Error),

    /// Anything else: transport failures, misconfigured appliers, missing
    /// crypto providers.
    #[error("{0}")]
    Message(String),
}

impl OAuthSystemError {
    /// Creates a system error from a plain message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chainable_construction() {
        let problem = OAuthProblem::error(codes::token::INVALID_GRANT)
            .with_description("authorization code expired")
            .with_state("xyz")
            .with_uri("https://errors.example.com/invalid_grant");

        assert_eq!(problem.error_code(), Some("invalid_grant"));
        assert_eq!(problem.state.as_deref(), Some("xyz"));
        assert_eq!(problem.to_string(), "invalid_grant: authorization code expired");
        assert_eq!(problem.http_status(), 400);
    }

    #[test]
    fn test_unauthenticated_is_distinct() {
        let problem = OAuthProblem::unauthenticated("OAuth parameters were not found");
        assert!(problem.is_unauthenticated());
        assert_eq!(problem.error_code(), None);
        assert_eq!(problem.http_status(), 401);

        let concrete = OAuthProblem::error(codes::resource::INVALID_TOKEN);
        assert!(!concrete.is_unauthenticated());
    }

    #[test]
    fn test_insufficient_scope_maps_to_403() {
        let problem = OAuthProblem::error(codes::resource::INSUFFICIENT_SCOPE);
        assert_eq!(problem.http_status(), 403);
    }

    #[test]
    fn test_extra_parameters_preserve_order() {
        let problem = OAuthProblem::error(codes::authz::ACCESS_DENIED)
            .with_parameter("first", "1")
            .with_parameter("second", "2");
        let keys: Vec<_> = problem.parameters.keys().cloned().collect();
        assert_eq!(keys, ["first", "second"]);
    }
}
