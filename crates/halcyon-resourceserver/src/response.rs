//! Resource-server error responses.
//!
//! Protected resources answer failed bearer authentication with a
//! `WWW-Authenticate` challenge. The realm, when configured, leads the
//! challenge; error details follow.

use halcyon_common::error::{OAuthProblem, OAuthSystemError};
use halcyon_common::message::{OAuthResponse, OAuthResponseBuilder};
use halcyon_common::types::param;

/// Entry point for building resource-server responses.
pub struct OAuthRSResponse;

impl OAuthRSResponse {
    /// Starts an error response with the given HTTP status.
    #[must_use]
    pub fn error_response(status: u16) -> OAuthRSErrorResponseBuilder {
        OAuthRSErrorResponseBuilder {
            status,
            realm: None,
            problem: None,
        }
    }
}

/// Builder for challenge-style error responses.
pub struct OAuthRSErrorResponseBuilder {
    status: u16,
    realm: Option<String>,
    problem: Option<OAuthProblem>,
}

impl OAuthRSErrorResponseBuilder {
    /// Sets the protection realm; it leads the challenge.
    #[must_use]
    pub fn realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = Some(realm.into());
        self
    }

    /// Attaches the problem whose code/description/uri/state/scope are
    /// rendered.
    #[must_use]
    pub fn error(mut self, problem: OAuthProblem) -> Self {
        self.problem = Some(problem);
        self
    }

    /// Renders a `WWW-Authenticate` header response.
    pub fn build_header_message(self) -> Result<OAuthResponse, OAuthSystemError> {
        self.assemble().build_header_message()
    }

    /// Renders a JSON body response instead.
    pub fn build_json_message(self) -> Result<OAuthResponse, OAuthSystemError> {
        self.assemble().build_json_message()
    }

    fn assemble(self) -> OAuthResponseBuilder {
        let mut builder = OAuthResponse::error_response(self.status);
        if let Some(realm) = self.realm {
            builder = builder.set_param(param::REALM, realm);
        }
        if let Some(problem) = &self.problem {
            builder = builder.error(problem);
        }
        builder
    }
}
