//! `application/x-www-form-urlencoded` body serializer.

use crate::error::OAuthSystemError;
use crate::message::OAuthMessage;
use crate::parameters::ParameterBag;
use crate::serializer::ParametersApplier;
use crate::utils;

/// Renders the parameters as an url-encoded body, skipping empty values.
pub struct BodyUrlEncodedParametersApplier;

impl ParametersApplier for BodyUrlEncodedParametersApplier {
    fn apply(
        &self,
        mut message: OAuthMessage,
        params: &ParameterBag,
    ) -> Result<OAuthMessage, OAuthSystemError> {
        message.body = Some(utils::format_urlencoded(params.iter()));
        Ok(message)
    }
}
