//! Redirect-URL serializer with the token-response fragment rule.

use crate::error::{OAuthSystemError, codes};
use crate::message::OAuthMessage;
use crate::parameters::ParameterBag;
use crate::serializer::ParametersApplier;
use crate::types::param;
use crate::utils;

/// Parameters that move to the URI fragment when an access token is
/// delivered on a redirect, in the order they are emitted.
const FRAGMENT_GROUP: [&str; 8] = [
    param::ACCESS_TOKEN,
    param::STATE,
    param::EXPIRES_IN,
    param::TOKEN_TYPE,
    param::SCOPE,
    codes::ERROR,
    codes::ERROR_DESCRIPTION,
    codes::ERROR_URI,
];

/// Appends parameters to the message location URI.
///
/// When `access_token` is present the token-response group splits off into
/// the `#fragment`; every other parameter stays in the query string. A
/// fragment group that ends up holding only `access_token` itself is
/// appended to the query side instead; delivering a lone token in the
/// query is the historical behaviour this serializer pins (see the tests).
pub struct QueryParameterApplier;

impl ParametersApplier for QueryParameterApplier {
    fn apply(
        &self,
        mut message: OAuthMessage,
        params: &ParameterBag,
    ) -> Result<OAuthMessage, OAuthSystemError> {
        let Some(location) = message.location_uri.clone() else {
            return Ok(message);
        };

        let mut query_params = ParameterBag::new();
        let mut fragment_params = ParameterBag::new();

        if params.contains(param::ACCESS_TOKEN) {
            for name in FRAGMENT_GROUP {
                if let Some(value) = params.get(name) {
                    fragment_params.set(name, value.clone());
                }
            }
            for (name, value) in params.iter() {
                if !FRAGMENT_GROUP.contains(&name) {
                    query_params.set(name, value.clone());
                }
            }
        } else {
            query_params = params.clone();
        }

        let query = utils::format_urlencoded(query_params.iter());
        let fragment = utils::format_urlencoded(fragment_params.iter());

        let mut url = location;
        if !query.is_empty() {
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&query);
        }
        if !fragment.is_empty() {
            if fragment_params.len() > 1 {
                url.push('#');
                url.push_str(&fragment);
            } else {
                url.push(if url.contains('?') { '&' } else { '?' });
                url.push_str(&fragment);
            }
        }

        message.location_uri = Some(url);
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(location: &str, params: &ParameterBag) -> String {
        let message = OAuthMessage::with_location(location);
        QueryParameterApplier
            .apply(message, params)
            .expect("query serialization is infallible")
            .location_uri
            .expect("location survives")
    }

    #[test]
    fn test_plain_query_append() {
        let mut params = ParameterBag::new();
        params.set("code", "abc");
        params.set("state", "ok");
        assert_eq!(
            apply("http://localhost/redirect", &params),
            "http://localhost/redirect?code=abc&state=ok"
        );
    }

    #[test]
    fn test_existing_query_appends_with_ampersand() {
        let mut params = ParameterBag::new();
        params.set("code", "abc");
        assert_eq!(
            apply("http://localhost/redirect?p=1", &params),
            "http://localhost/redirect?p=1&code=abc"
        );
    }

    #[test]
    fn test_access_token_with_state_goes_to_fragment() {
        let mut params = ParameterBag::new();
        params.set("access_token", "a");
        params.set("state", "ok");
        assert_eq!(apply("http://x", &params), "http://x#access_token=a&state=ok");
    }

    #[test]
    fn test_code_stays_in_query_while_token_group_fragments() {
        let mut params = ParameterBag::new();
        params.set("access_token", "token_authz");
        params.set("code", "code_");
        params.set("state", "state");
        params.set("expires_in", 3600i64);

        assert_eq!(
            apply("http://www.example.com/rd", &params),
            "http://www.example.com/rd?code=code_#access_token=token_authz&state=state&expires_in=3600"
        );
    }

    #[test]
    fn test_lone_access_token_appends_to_query_side() {
        let mut params = ParameterBag::new();
        params.set("access_token", "only");
        assert_eq!(apply("http://x", &params), "http://x?access_token=only");

        let mut params = ParameterBag::new();
        params.set("code", "c");
        params.set("access_token", "only");
        assert_eq!(apply("http://x", &params), "http://x?code=c&access_token=only");
    }

    #[test]
    fn test_empty_and_null_like_values_are_dropped() {
        let mut params = ParameterBag::new();
        params.set("code", "abc");
        params.set("empty_param", "");
        let url = apply("http://x", &params);
        assert!(!url.contains("empty_param"));
    }

    #[test]
    fn test_no_location_is_a_no_op() {
        let mut params = ParameterBag::new();
        params.set("code", "abc");
        let message = QueryParameterApplier
            .apply(OAuthMessage::new(), &params)
            .expect("no-op");
        assert_eq!(message.location_uri, None);
    }
}
