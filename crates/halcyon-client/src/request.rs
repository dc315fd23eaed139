//! Outbound client request builders.
//!
//! A request is assembled by choosing the endpoint
//! ([`OAuthClientRequest::authorization_location`] /
//! [`OAuthClientRequest::token_location`]), chaining parameter setters,
//! and picking one of three build modes: parameters in the URL query,
//! in an url-encoded body, or (for bearer requests) in the
//! `Authorization` header.

use indexmap::IndexMap;

use halcyon_common::error::OAuthSystemError;
use halcyon_common::message::OAuthMessage;
use halcyon_common::parameters::{ParamValue, ParameterBag};
use halcyon_common::serializer::{
    BodyUrlEncodedParametersApplier, ParametersApplier, QueryParameterApplier,
};
use halcyon_common::types::{GrantType, ResponseType, header, param};
use halcyon_common::utils;

// =============================================================================
// OAuthClientRequest
// =============================================================================

/// A fully built outbound request: URL, optional body, headers.
#[derive(Debug, Clone)]
pub struct OAuthClientRequest {
    message: OAuthMessage,
}

impl OAuthClientRequest {
    /// Starts an end-user authorization request against the given
    /// endpoint.
    #[must_use]
    pub fn authorization_location(url: impl Into<String>) -> AuthenticationRequestBuilder {
        AuthenticationRequestBuilder {
            inner: OAuthRequestBuilder::new(url),
        }
    }

    /// Starts a token request against the given endpoint.
    #[must_use]
    pub fn token_location(url: impl Into<String>) -> TokenRequestBuilder {
        TokenRequestBuilder {
            inner: OAuthRequestBuilder::new(url),
        }
    }

    /// Request URL (with query parameters when built in query mode).
    #[must_use]
    pub fn location_uri(&self) -> &str {
        self.message.location_uri.as_deref().unwrap_or_default()
    }

    /// Request body, when built in body mode.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.message.body.as_deref()
    }

    /// Headers set on the request.
    #[must_use]
    pub fn headers(&self) -> &IndexMap<String, String> {
        &self.message.headers
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.message.header(name)
    }

    /// Adds a header after building (e.g. content negotiation).
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.message.add_header(name, value);
    }
}

// =============================================================================
// Builder machinery
// =============================================================================

/// Shared parameter accumulation and build modes.
#[derive(Debug, Clone)]
struct OAuthRequestBuilder {
    parameters: ParameterBag,
    url: String,
}

impl OAuthRequestBuilder {
    fn new(url: impl Into<String>) -> Self {
        Self {
            parameters: ParameterBag::new(),
            url: url.into(),
        }
    }

    fn set(&mut self, name: &str, value: impl Into<ParamValue>) {
        self.parameters.set(name, value);
    }

    fn build_query_message(self) -> Result<OAuthClientRequest, OAuthSystemError> {
        let message = OAuthMessage::with_location(self.url);
        let message = QueryParameterApplier.apply(message, &self.parameters)?;
        Ok(OAuthClientRequest { message })
    }

    fn build_body_message(self) -> Result<OAuthClientRequest, OAuthSystemError> {
        let message = OAuthMessage::with_location(self.url);
        let message = BodyUrlEncodedParametersApplier.apply(message, &self.parameters)?;
        Ok(OAuthClientRequest { message })
    }

    fn build_header_message(self) -> Result<OAuthClientRequest, OAuthSystemError> {
        let mut message = OAuthMessage::with_location(self.url);
        message.add_header(
            header::AUTHORIZATION,
            utils::encode_authorization_bearer_header(&self.parameters),
        );
        Ok(OAuthClientRequest { message })
    }
}

macro_rules! builder_setters {
    ($builder:ident) => {
        impl $builder {
            /// Sets an arbitrary request parameter.
            #[must_use]
            pub fn set_parameter(
                mut self,
                name: impl Into<String>,
                value: impl Into<ParamValue>,
            ) -> Self {
                self.inner.parameters.set(name, value);
                self
            }

            /// Builds with parameters appended to the URL query.
            pub fn build_query_message(self) -> Result<OAuthClientRequest, OAuthSystemError> {
                self.inner.build_query_message()
            }

            /// Builds with parameters in an url-encoded body.
            pub fn build_body_message(self) -> Result<OAuthClientRequest, OAuthSystemError> {
                self.inner.build_body_message()
            }
        }
    };
}

// =============================================================================
// Authorization requests
// =============================================================================

/// Builder for end-user authorization requests.
#[derive(Debug, Clone)]
pub struct AuthenticationRequestBuilder {
    inner: OAuthRequestBuilder,
}

impl AuthenticationRequestBuilder {
    #[must_use]
    pub fn set_response_type(mut self, response_type: ResponseType) -> Self {
        self.inner.set(param::RESPONSE_TYPE, response_type.as_str());
        self
    }

    #[must_use]
    pub fn set_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.inner.set(param::CLIENT_ID, client_id.into());
        self
    }

    #[must_use]
    pub fn set_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.inner.set(param::REDIRECT_URI, uri.into());
        self
    }

    #[must_use]
    pub fn set_state(mut self, state: impl Into<String>) -> Self {
        self.inner.set(param::STATE, state.into());
        self
    }

    #[must_use]
    pub fn set_scope(mut self, scope: impl Into<String>) -> Self {
        self.inner.set(param::SCOPE, scope.into());
        self
    }
}

builder_setters!(AuthenticationRequestBuilder);

// =============================================================================
// Token requests
// =============================================================================

/// Builder for token-endpoint requests.
#[derive(Debug, Clone)]
pub struct TokenRequestBuilder {
    inner: OAuthRequestBuilder,
}

impl TokenRequestBuilder {
    #[must_use]
    pub fn set_grant_type(mut self, grant_type: GrantType) -> Self {
        self.inner.set(param::GRANT_TYPE, grant_type.as_str());
        self
    }

    #[must_use]
    pub fn set_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.inner.set(param::CLIENT_ID, client_id.into());
        self
    }

    #[must_use]
    pub fn set_client_secret(mut self, secret: impl Into<String>) -> Self {
        self.inner.set(param::CLIENT_SECRET, secret.into());
        self
    }

    #[must_use]
    pub fn set_username(mut self, username: impl Into<String>) -> Self {
        self.inner.set(param::USERNAME, username.into());
        self
    }

    #[must_use]
    pub fn set_password(mut self, password: impl Into<String>) -> Self {
        self.inner.set(param::PASSWORD, password.into());
        self
    }

    #[must_use]
    pub fn set_scope(mut self, scope: impl Into<String>) -> Self {
        self.inner.set(param::SCOPE, scope.into());
        self
    }

    #[must_use]
    pub fn set_code(mut self, code: impl Into<String>) -> Self {
        self.inner.set(param::CODE, code.into());
        self
    }

    #[must_use]
    pub fn set_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.inner.set(param::REDIRECT_URI, uri.into());
        self
    }

    #[must_use]
    pub fn set_assertion(mut self, assertion: impl Into<String>) -> Self {
        self.inner.set(param::ASSERTION, assertion.into());
        self
    }

    #[must_use]
    pub fn set_assertion_type(mut self, assertion_type: impl Into<String>) -> Self {
        self.inner.set(param::ASSERTION_TYPE, assertion_type.into());
        self
    }

    #[must_use]
    pub fn set_refresh_token(mut self, token: impl Into<String>) -> Self {
        self.inner.set(param::REFRESH_TOKEN, token.into());
        self
    }
}

builder_setters!(TokenRequestBuilder);

// =============================================================================
// Bearer resource requests
// =============================================================================

/// Builder placing a bearer token on a protected-resource request, in the
/// header, query, or body position.
#[derive(Debug, Clone)]
pub struct OAuthBearerClientRequest {
    inner: OAuthRequestBuilder,
}

impl OAuthBearerClientRequest {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            inner: OAuthRequestBuilder::new(url),
        }
    }

    #[must_use]
    pub fn set_access_token(mut self, token: impl Into<String>) -> Self {
        self.inner.set(param::ACCESS_TOKEN, token.into());
        self
    }

    /// Token as an `Authorization: Bearer <token>` header.
    pub fn build_header_message(self) -> Result<OAuthClientRequest, OAuthSystemError> {
        self.inner.build_header_message()
    }

    /// Token as a query parameter.
    pub fn build_query_message(self) -> Result<OAuthClientRequest, OAuthSystemError> {
        self.inner.build_query_message()
    }

    /// Token as a form-body parameter.
    pub fn build_body_message(self) -> Result<OAuthClientRequest, OAuthSystemError> {
        self.inner.build_body_message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_request_query() {
        let request = OAuthClientRequest::authorization_location("https://as.example.com/authz")
            .set_response_type(ResponseType::Code)
            .set_client_id("s6BhdRkqt3")
            .set_redirect_uri("https://client.example.com/cb")
            .set_state("xyz")
            .build_query_message()
            .expect("builds");

        assert_eq!(
            request.location_uri(),
            "https://as.example.com/authz?response_type=code&client_id=s6BhdRkqt3\
             &redirect_uri=https%3A%2F%2Fclient.example.com%2Fcb&state=xyz"
        );
        assert_eq!(request.body(), None);
    }

    #[test]
    fn test_token_request_body() {
        let request = OAuthClientRequest::token_location("https://as.example.com/token")
            .set_grant_type(GrantType::AuthorizationCode)
            .set_code("SplxlOBeZQQYbYS6WxSbIA")
            .set_redirect_uri("https://client.example.com/cb")
            .set_client_id("s6BhdRkqt3")
            .set_client_secret("secret")
            .build_body_message()
            .expect("builds");

        assert_eq!(request.location_uri(), "https://as.example.com/token");
        assert_eq!(
            request.body(),
            Some(
                "grant_type=authorization_code&code=SplxlOBeZQQYbYS6WxSbIA\
                 &redirect_uri=https%3A%2F%2Fclient.example.com%2Fcb\
                 &client_id=s6BhdRkqt3&client_secret=secret"
            )
        );
    }

    #[test]
    fn test_bearer_request_header() {
        let request = OAuthBearerClientRequest::new("https://rs.example.com/resource")
            .set_access_token("mF_9.B5f-4.1JqM")
            .build_header_message()
            .expect("builds");

        assert_eq!(
            request.header(header::AUTHORIZATION),
            Some("Bearer mF_9.B5f-4.1JqM")
        );
    }

    #[test]
    fn test_bearer_request_query() {
        let request = OAuthBearerClientRequest::new("https://rs.example.com/resource")
            .set_access_token("tok")
            .build_query_message()
            .expect("builds");

        assert_eq!(request.location_uri(), "https://rs.example.com/resource?access_token=tok");
    }

    #[test]
    fn test_custom_parameter() {
        let request = OAuthClientRequest::token_location("https://as.example.com/token")
            .set_grant_type(GrantType::ClientCredentials)
            .set_parameter("audience", "https://api.example.com")
            .build_body_message()
            .expect("builds");

        assert!(request.body().expect("body").contains("audience=https%3A%2F%2Fapi.example.com"));
    }
}
