//! Flat-JSON body serializer.

use serde_json::{Map, Value};

use crate::error::OAuthSystemError;
use crate::message::OAuthMessage;
use crate::parameters::{ParamValue, ParameterBag};
use crate::serializer::ParametersApplier;

/// Renders the parameters as a single flat JSON object. Numbers stay
/// numbers and list values become arrays; empty values are skipped.
pub struct JsonBodyParametersApplier;

impl ParametersApplier for JsonBodyParametersApplier {
    fn apply(
        &self,
        mut message: OAuthMessage,
        params: &ParameterBag,
    ) -> Result<OAuthMessage, OAuthSystemError> {
        let mut object = Map::new();
        for (name, value) in params.iter() {
            if name.is_empty() || value.is_empty() {
                continue;
            }
            let json_value = match value {
                ParamValue::Str(s) => Value::String(s.clone()),
                ParamValue::Num(n) => Value::from(*n),
                ParamValue::List(items) => {
                    Value::Array(items.iter().cloned().map(Value::String).collect())
                }
            };
            object.insert(name.to_owned(), json_value);
        }
        message.body = Some(serde_json::to_string(&Value::Object(object))?);
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_body_shape() {
        let mut params = ParameterBag::new();
        params.set("access_token", "abc");
        params.set("token_type", "Bearer");
        params.set("expires_in", 3600i64);
        params.set("empty", "");

        let message = JsonBodyParametersApplier
            .apply(OAuthMessage::new(), &params)
            .expect("valid parameters serialize");
        assert_eq!(
            message.body.as_deref(),
            Some(r#"{"access_token":"abc","token_type":"Bearer","expires_in":3600}"#)
        );
    }

    #[test]
    fn test_json_round_trip() {
        let mut params = ParameterBag::new();
        params.set("scope", vec!["read".to_owned(), "write".to_owned()]);
        params.set("state", "s");

        let message = JsonBodyParametersApplier
            .apply(OAuthMessage::new(), &params)
            .expect("valid parameters serialize");
        let parsed: serde_json::Value =
            serde_json::from_str(message.body.as_deref().expect("body set")).expect("valid JSON");
        assert_eq!(parsed["scope"], serde_json::json!(["read", "write"]));
        assert_eq!(parsed["state"], "s");
    }
}
