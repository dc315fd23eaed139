//! Authorization-server response builders.
//!
//! Thin typed layers over the common [`OAuthResponseBuilder`]: an
//! authorization response redirects through the query serializer (so
//! implicit grants fragment correctly), a token response renders a JSON
//! body.

use halcyon_common::error::OAuthSystemError;
use halcyon_common::message::{OAuthResponse, OAuthResponseBuilder};
use halcyon_common::parameters::ParamValue;
use halcyon_common::request::TransportRequest;
use halcyon_common::types::param;

/// Entry points for building authorization-server responses.
pub struct OAuthASResponse;

impl OAuthASResponse {
    /// Starts an authorization response. The request's `state` parameter,
    /// when present, is copied onto the response automatically.
    #[must_use]
    pub fn authorization_response(
        request: &dyn TransportRequest,
        status: u16,
    ) -> OAuthAuthorizationResponseBuilder {
        let mut inner = OAuthResponse::status(status);
        if let Some(state) = request.param(param::STATE).filter(|s| !s.is_empty()) {
            inner = inner.set_param(param::STATE, state);
        }
        OAuthAuthorizationResponseBuilder { inner }
    }

    /// Starts a token response with the given HTTP status.
    #[must_use]
    pub fn token_response(status: u16) -> OAuthTokenResponseBuilder {
        OAuthTokenResponseBuilder {
            inner: OAuthResponse::status(status),
        }
    }
}

/// Builder for authorization-endpoint redirect responses.
pub struct OAuthAuthorizationResponseBuilder {
    inner: OAuthResponseBuilder,
}

impl OAuthAuthorizationResponseBuilder {
    /// Sets the redirect location.
    #[must_use]
    pub fn location(mut self, uri: impl Into<String>) -> Self {
        self.inner = self.inner.location(uri);
        self
    }

    /// Sets the authorization code.
    #[must_use]
    pub fn set_code(mut self, code: impl Into<String>) -> Self {
        self.inner = self.inner.set_param(param::CODE, code.into());
        self
    }

    /// Sets the access token (implicit grant).
    #[must_use]
    pub fn set_access_token(mut self, token: impl Into<String>) -> Self {
        self.inner = self.inner.set_param(param::ACCESS_TOKEN, token.into());
        self
    }

    /// Sets the token lifetime in seconds.
    #[must_use]
    pub fn set_expires_in(mut self, expires_in: i64) -> Self {
        self.inner = self.inner.set_param(param::EXPIRES_IN, expires_in);
        self
    }

    /// Sets the token type.
    #[must_use]
    pub fn set_token_type(mut self, token_type: impl Into<String>) -> Self {
        self.inner = self.inner.set_param(param::TOKEN_TYPE, token_type.into());
        self
    }

    /// Overrides the echoed state.
    #[must_use]
    pub fn set_state(mut self, state: impl Into<String>) -> Self {
        self.inner = self.inner.set_param(param::STATE, state.into());
        self
    }

    /// Sets the granted scope.
    #[must_use]
    pub fn set_scope(mut self, scope: impl Into<String>) -> Self {
        self.inner = self.inner.set_param(param::SCOPE, scope.into());
        self
    }

    /// Sets an arbitrary response parameter.
    #[must_use]
    pub fn set_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.inner = self.inner.set_param(name, value);
        self
    }

    /// Renders the redirect URL (query/fragment form).
    pub fn build_query_message(self) -> Result<OAuthResponse, OAuthSystemError> {
        self.inner.build_query_message()
    }

    /// Renders a JSON body instead of a redirect.
    pub fn build_json_message(self) -> Result<OAuthResponse, OAuthSystemError> {
        self.inner.build_json_message()
    }
}

/// Builder for token-endpoint responses.
pub struct OAuthTokenResponseBuilder {
    inner: OAuthResponseBuilder,
}

impl OAuthTokenResponseBuilder {
    /// Sets the access token.
    #[must_use]
    pub fn set_access_token(mut self, token: impl Into<String>) -> Self {
        self.inner = self.inner.set_param(param::ACCESS_TOKEN, token.into());
        self
    }

    /// Sets the token type.
    #[must_use]
    pub fn set_token_type(mut self, token_type: impl Into<String>) -> Self {
        self.inner = self.inner.set_param(param::TOKEN_TYPE, token_type.into());
        self
    }

    /// Sets the token lifetime in seconds.
    #[must_use]
    pub fn set_expires_in(mut self, expires_in: i64) -> Self {
        self.inner = self.inner.set_param(param::EXPIRES_IN, expires_in);
        self
    }

    /// Sets the refresh token.
    #[must_use]
    pub fn set_refresh_token(mut self, token: impl Into<String>) -> Self {
        self.inner = self.inner.set_param(param::REFRESH_TOKEN, token.into());
        self
    }

    /// Sets the granted scope.
    #[must_use]
    pub fn set_scope(mut self, scope: impl Into<String>) -> Self {
        self.inner = self.inner.set_param(param::SCOPE, scope.into());
        self
    }

    /// Sets an arbitrary response parameter.
    #[must_use]
    pub fn set_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.inner = self.inner.set_param(name, value);
        self
    }

    /// Renders a JSON body.
    pub fn build_json_message(self) -> Result<OAuthResponse, OAuthSystemError> {
        self.inner.build_json_message()
    }

    /// Renders an url-encoded body.
    pub fn build_body_message(self) -> Result<OAuthResponse, OAuthSystemError> {
        self.inner.build_body_message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use halcyon_common::request::RecordedRequest;

    #[test]
    fn test_code_redirect_echoes_state() {
        let request = RecordedRequest::get()
            .with_param(param::RESPONSE_TYPE, "code")
            .with_param(param::STATE, "xyz");

        let response = OAuthASResponse::authorization_response(&request, 302)
            .location("https://client.example.com/cb")
            .set_code("SplxlOBeZQQYbYS6WxSbIA")
            .build_query_message()
            .expect("serializes");

        assert_eq!(
            response.location_uri(),
            Some("https://client.example.com/cb?state=xyz&code=SplxlOBeZQQYbYS6WxSbIA")
        );
        assert_eq!(response.response_status(), 302);
    }

    #[test]
    fn test_implicit_redirect_goes_to_fragment() {
        let request = RecordedRequest::get().with_param(param::STATE, "ok");

        let response = OAuthASResponse::authorization_response(&request, 302)
            .location("https://client.example.com/cb")
            .set_access_token("2YotnFZFEjr1zCsicMWpAA")
            .set_expires_in(3600)
            .build_query_message()
            .expect("serializes");

        assert_eq!(
            response.location_uri(),
            Some(
                "https://client.example.com/cb#access_token=2YotnFZFEjr1zCsicMWpAA\
                 &state=ok&expires_in=3600"
            )
        );
    }

    #[test]
    fn test_token_response_json() {
        let response = OAuthASResponse::token_response(200)
            .set_access_token("2YotnFZFEjr1zCsicMWpAA")
            .set_token_type("Bearer")
            .set_expires_in(3600)
            .set_refresh_token("tGzv3JOkF0XG5Qx2TlKWIA")
            .build_json_message()
            .expect("serializes");

        let parsed: serde_json::Value =
            serde_json::from_str(response.body().expect("body set")).expect("valid JSON");
        assert_eq!(parsed["access_token"], "2YotnFZFEjr1zCsicMWpAA");
        assert_eq!(parsed["expires_in"], 3600);
        assert_eq!(parsed["refresh_token"], "tGzv3JOkF0XG5Qx2TlKWIA");
    }
}
