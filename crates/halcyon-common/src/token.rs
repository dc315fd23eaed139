//! Access-token value object shared by client and server roles.

/// An issued access token with its companion fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OAuthToken {
    /// The access token itself.
    pub access_token: String,

    /// Lifetime in seconds, when the server stated one.
    pub expires_in: Option<i64>,

    /// Refresh token, when one was issued.
    pub refresh_token: Option<String>,

    /// Granted scope, when the server stated one.
    pub scope: Option<String>,
}

impl OAuthToken {
    /// Creates a token carrying only the access token value.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_expires_in(mut self, expires_in: i64) -> Self {
        self.expires_in = Some(expires_in);
        self
    }

    #[must_use]
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let token = OAuthToken::new("abc")
            .with_expires_in(3600)
            .with_refresh_token("r1")
            .with_scope("read");
        assert_eq!(token.access_token, "abc");
        assert_eq!(token.expires_in, Some(3600));
        assert_eq!(token.refresh_token.as_deref(), Some("r1"));
        assert_eq!(token.scope.as_deref(), Some("read"));
    }
}
