//! Transport-neutral view of an inbound HTTP request.
//!
//! The protocol engine never talks to a real server stack; everything it
//! needs from a request goes through [`TransportRequest`]. Framework
//! integrations implement the trait over their own request types;
//! [`RecordedRequest`] is a plain owned implementation used in tests and
//! for embedding.

use http::Method;
use indexmap::IndexMap;

use crate::types::header;
use crate::utils;

// =============================================================================
// TransportRequest
// =============================================================================

/// Read-only request surface consumed by validators and extractors.
///
/// `param` mirrors the servlet-style merged view of query-string and form
/// parameters. `query_string` exposes the raw query untouched: the
/// query-style token extractor parses it by hand so that reading a token
/// never forces the integration to consume a request body.
pub trait TransportRequest {
    /// HTTP method of the request.
    fn method(&self) -> &Method;

    /// `Content-Type` header value, if any.
    fn content_type(&self) -> Option<&str> {
        self.header(header::CONTENT_TYPE)
    }

    /// Single header lookup, case-insensitive.
    fn header(&self, name: &str) -> Option<&str>;

    /// First value of a request parameter (query or form body).
    fn param(&self, name: &str) -> Option<&str>;

    /// All values of a request parameter, in arrival order.
    fn param_values(&self, name: &str) -> &[String];

    /// Raw query string, without the leading `?`.
    fn query_string(&self) -> Option<&str>;

    /// Raw request body, when one was captured.
    fn body(&self) -> Option<&str>;
}

// =============================================================================
// RecordedRequest
// =============================================================================

/// Owned [`TransportRequest`] built through chainable setters.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    method: Method,
    headers: http::HeaderMap,
    params: IndexMap<String, Vec<String>>,
    query_string: Option<String>,
    body: Option<String>,
}

impl RecordedRequest {
    /// Creates a request with the given method and nothing else.
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self {
            method,
            headers: http::HeaderMap::new(),
            params: IndexMap::new(),
            query_string: None,
            body: None,
        }
    }

    /// Convenience constructor for a GET request.
    #[must_use]
    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    /// Convenience constructor for a POST request.
    #[must_use]
    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    /// Adds a header. Invalid names or values are ignored rather than
    /// panicking; recorded requests are test/embedding inputs.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            http::header::HeaderName::try_from(name),
            http::header::HeaderValue::try_from(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Sets the `Content-Type` header.
    #[must_use]
    pub fn with_content_type(self, content_type: &str) -> Self {
        self.with_header(header::CONTENT_TYPE, content_type)
    }

    /// Adds a request parameter value.
    #[must_use]
    pub fn with_param(mut self, name: &str, value: &str) -> Self {
        self.params
            .entry(name.to_owned())
            .or_default()
            .push(value.to_owned());
        self
    }

    /// Records the raw query string and merges its pairs into the
    /// parameter view, like a server stack would.
    #[must_use]
    pub fn with_query_string(mut self, query: &str) -> Self {
        self.query_string = Some(query.to_owned());
        for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
            self.params
                .entry(name.into_owned())
                .or_default()
                .push(value.into_owned());
        }
        self
    }

    /// Records an url-encoded form body: sets the body and content type and
    /// merges the pairs into the parameter view.
    #[must_use]
    pub fn with_form_body(mut self, body: &str) -> Self {
        for (name, value) in url::form_urlencoded::parse(body.as_bytes()) {
            self.params
                .entry(name.into_owned())
                .or_default()
                .push(value.into_owned());
        }
        self.body = Some(body.to_owned());
        self.with_content_type(crate::types::content_type::URL_ENCODED)
    }

    /// Records an opaque body without touching the parameter view.
    #[must_use]
    pub fn with_body(mut self, body: &str) -> Self {
        self.body = Some(body.to_owned());
        self
    }

    /// Adds HTTP Basic credentials on the `Authorization` header.
    #[must_use]
    pub fn with_basic_auth(self, username: &str, password: &str) -> Self {
        let header_value = utils::encode_basic_auth_header(username, password);
        self.with_header(header::AUTHORIZATION, &header_value)
    }
}

impl TransportRequest for RecordedRequest {
    fn method(&self) -> &Method {
        &self.method
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    fn param(&self, name: &str) -> Option<&str> {
        self.params
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    fn param_values(&self, name: &str) -> &[String] {
        self.params.get(name).map_or(&[], Vec::as_slice)
    }

    fn query_string(&self) -> Option<&str> {
        self.query_string.as_deref()
    }

    fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}
