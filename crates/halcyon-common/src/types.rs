//! OAuth 2.0 protocol vocabulary: parameter names, header names, content
//! types, and the discriminator enums used for grant and response routing.

use std::fmt;
use std::str::FromStr;

// =============================================================================
// Parameter names
// =============================================================================

/// OAuth 2.0 request/response parameter names.
pub mod param {
    pub const RESPONSE_TYPE: &str = "response_type";
    pub const CLIENT_ID: &str = "client_id";
    pub const CLIENT_SECRET: &str = "client_secret";
    pub const REDIRECT_URI: &str = "redirect_uri";
    pub const USERNAME: &str = "username";
    pub const PASSWORD: &str = "password";
    pub const ASSERTION_TYPE: &str = "assertion_type";
    pub const ASSERTION: &str = "assertion";
    pub const SCOPE: &str = "scope";
    pub const STATE: &str = "state";
    pub const GRANT_TYPE: &str = "grant_type";
    pub const CODE: &str = "code";
    pub const ACCESS_TOKEN: &str = "access_token";
    pub const TOKEN_TYPE: &str = "token_type";
    pub const EXPIRES_IN: &str = "expires_in";
    pub const REFRESH_TOKEN: &str = "refresh_token";
    pub const REALM: &str = "realm";

    /// Legacy bearer-token parameter name, still accepted on extraction.
    pub const OAUTH_TOKEN: &str = "oauth_token";

    /// Parameter that only OAuth 1.0 requests carry. Its presence on an
    /// inbound resource request means the caller speaks the wrong protocol
    /// version.
    pub const VERSION_DIFFER: &str = "oauth_signature_method";
}

/// Header names and auth-scheme tokens.
pub mod header {
    pub const AUTHORIZATION: &str = "Authorization";
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const WWW_AUTHENTICATE: &str = "WWW-Authenticate";

    /// Scheme token used for bearer tokens in `Authorization` and
    /// `WWW-Authenticate` headers.
    pub const OAUTH_SCHEME: &str = "Bearer";
}

/// Content-type values the validators care about.
pub mod content_type {
    pub const URL_ENCODED: &str = "application/x-www-form-urlencoded";
    pub const JSON: &str = "application/json";

    /// Prefix shared by every multipart content type.
    pub const MULTIPART_PREFIX: &str = "multipart/";
}

// =============================================================================
// Grant type
// =============================================================================

/// OAuth 2.0 grant types, the discriminator of token requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrantType {
    /// Authorization Code flow.
    AuthorizationCode,
    /// Resource Owner Password Credentials flow.
    Password,
    /// Client Credentials flow.
    ClientCredentials,
    /// Refresh Token flow.
    RefreshToken,
}

impl GrantType {
    /// Returns the OAuth 2.0 `grant_type` parameter value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthorizationCode => "authorization_code",
            Self::Password => "password",
            Self::ClientCredentials => "client_credentials",
            Self::RefreshToken => "refresh_token",
        }
    }
}

impl fmt::Display for GrantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GrantType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "authorization_code" => Ok(Self::AuthorizationCode),
            "password" => Ok(Self::Password),
            "client_credentials" => Ok(Self::ClientCredentials),
            "refresh_token" => Ok(Self::RefreshToken),
            _ => Err(()),
        }
    }
}

// =============================================================================
// Response type
// =============================================================================

/// OAuth 2.0 response types, the discriminator of authorization requests.
///
/// Composite response types ("code token") are space-separated lists of
/// these values and are resolved per component by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseType {
    /// Authorization code response.
    Code,
    /// Implicit access-token response.
    Token,
}

impl ResponseType {
    /// Returns the OAuth 2.0 `response_type` parameter value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Token => "token",
        }
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResponseType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "code" => Ok(Self::Code),
            "token" => Ok(Self::Token),
            _ => Err(()),
        }
    }
}

// =============================================================================
// Parameter style
// =============================================================================

/// How a bearer token is carried on a protected-resource request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterStyle {
    /// `Authorization: Bearer <token>` header.
    Header,
    /// `access_token` form parameter in an url-encoded body.
    Body,
    /// `access_token` query-string parameter.
    Query,
}

impl ParameterStyle {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Body => "body",
            Self::Query => "query",
        }
    }
}

impl fmt::Display for ParameterStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Well-known providers
// =============================================================================

/// Endpoint locations for a handful of well-known OAuth 2.0 providers.
///
/// Purely a convenience for client code; the protocol engine never reads
/// these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderType {
    Facebook,
    Foursquare,
    GitHub,
    Google,
    Instagram,
    LinkedIn,
    Microsoft,
    PayPal,
    Reddit,
    Salesforce,
}

impl ProviderType {
    /// Authorization endpoint of the provider.
    #[must_use]
    pub fn authz_endpoint(&self) -> &'static str {
        match self {
            Self::Facebook => "https://www.facebook.com/dialog/oauth",
            Self::Foursquare => "https://foursquare.com/oauth2/authenticate",
            Self::GitHub => "https://github.com/login/oauth/authorize",
            Self::Google => "https://accounts.google.com/o/oauth2/auth",
            Self::Instagram => "https://api.instagram.com/oauth/authorize",
            Self::LinkedIn => "https://www.linkedin.com/uas/oauth2/authorization",
            Self::Microsoft => "https://login.live.com/oauth20_authorize.srf",
            Self::PayPal => "https://identity.x.com/xidentity/resources/authorize",
            Self::Reddit => "https://ssl.reddit.com/api/v1/authorize",
            Self::Salesforce => "https://login.salesforce.com/services/oauth2/authorize",
        }
    }

    /// Token endpoint of the provider.
    #[must_use]
    pub fn token_endpoint(&self) -> &'static str {
        match self {
            Self::Facebook => "https://graph.facebook.com/oauth/access_token",
            Self::Foursquare => "https://foursquare.com/oauth2/access_token",
            Self::GitHub => "https://github.com/login/oauth/access_token",
            Self::Google => "https://accounts.google.com/o/oauth2/token",
            Self::Instagram => "https://api.instagram.com/oauth/access_token",
            Self::LinkedIn => "https://www.linkedin.com/uas/oauth2/accessToken",
            Self::Microsoft => "https://login.live.com/oauth20_token.srf",
            Self::PayPal => "https://identity.x.com/xidentity/oauthtokenservice",
            Self::Reddit => "https://ssl.reddit.com/api/v1/access_token",
            Self::Salesforce => "https://login.salesforce.com/services/oauth2/token",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_type_round_trip() {
        for grant in [
            GrantType::AuthorizationCode,
            GrantType::Password,
            GrantType::ClientCredentials,
            GrantType::RefreshToken,
        ] {
            assert_eq!(grant.as_str().parse::<GrantType>(), Ok(grant));
        }
        assert!("implicit".parse::<GrantType>().is_err());
    }

    #[test]
    fn test_response_type_round_trip() {
        assert_eq!("code".parse::<ResponseType>(), Ok(ResponseType::Code));
        assert_eq!("token".parse::<ResponseType>(), Ok(ResponseType::Token));
        assert!("code token".parse::<ResponseType>().is_err());
    }

    #[test]
    fn test_display_matches_wire_values() {
        assert_eq!(GrantType::RefreshToken.to_string(), "refresh_token");
        assert_eq!(ResponseType::Token.to_string(), "token");
        assert_eq!(ParameterStyle::Query.to_string(), "query");
    }
}
