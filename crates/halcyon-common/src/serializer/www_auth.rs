//! `WWW-Authenticate` challenge-header serializer.

use crate::error::OAuthSystemError;
use crate::message::OAuthMessage;
use crate::parameters::ParameterBag;
use crate::serializer::ParametersApplier;
use crate::types::header;
use crate::utils;

/// Renders the parameters as a `WWW-Authenticate: Bearer k="v",...`
/// header on the message. Insertion order is kept, so a `realm` inserted
/// first leads the challenge.
pub struct WwwAuthHeaderParametersApplier;

impl ParametersApplier for WwwAuthHeaderParametersApplier {
    fn apply(
        &self,
        mut message: OAuthMessage,
        params: &ParameterBag,
    ) -> Result<OAuthMessage, OAuthSystemError> {
        let header_value = utils::encode_oauth_header(params);
        message.add_header(header::WWW_AUTHENTICATE, header_value);
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_challenge_header() {
        let mut params = ParameterBag::new();
        params.set("realm", "example");
        params.set("error", "invalid_token");
        params.set("error_description", "The access token expired");

        let message = WwwAuthHeaderParametersApplier
            .apply(OAuthMessage::new(), &params)
            .expect("header serialization is infallible");
        assert_eq!(
            message.header(header::WWW_AUTHENTICATE),
            Some(
                "Bearer realm=\"example\",error=\"invalid_token\",\
                 error_description=\"The access token expired\""
            )
        );
    }

    #[test]
    fn test_empty_parameters_render_bare_scheme() {
        let message = WwwAuthHeaderParametersApplier
            .apply(OAuthMessage::new(), &ParameterBag::new())
            .expect("header serialization is infallible");
        assert_eq!(message.header(header::WWW_AUTHENTICATE), Some("Bearer"));
    }
}
