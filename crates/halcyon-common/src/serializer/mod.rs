//! Wire-format serializers.
//!
//! A [`ParametersApplier`] renders a [`ParameterBag`] into one of the four
//! OAuth 2.0 wire shapes: a redirect URL query/fragment, an url-encoded
//! body, a flat JSON body, or a `WWW-Authenticate` challenge header. The
//! applier consumes and returns the message so a response is assembled in
//! a single pass.

mod body;
mod json;
mod query;
mod www_auth;

pub use body::BodyUrlEncodedParametersApplier;
pub use json::JsonBodyParametersApplier;
pub use query::QueryParameterApplier;
pub use www_auth::WwwAuthHeaderParametersApplier;

use crate::error::OAuthSystemError;
use crate::message::OAuthMessage;
use crate::parameters::ParameterBag;

/// Strategy turning a parameter set into wire format on a message.
pub trait ParametersApplier {
    /// Applies the parameters to the message, returning the updated
    /// message.
    fn apply(
        &self,
        message: OAuthMessage,
        params: &ParameterBag,
    ) -> Result<OAuthMessage, OAuthSystemError>;
}
