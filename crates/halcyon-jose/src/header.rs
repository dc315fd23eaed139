//! The shared JOSE header value.
//!
//! One header type serves JWS, JWE, and JWT: signature tokens leave the
//! encryption fields unset. Key material references (`jwk`, `x5c`, ...)
//! are carried opaquely; nothing here validates certificates or key
//! sets.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::{JoseError, JoseResult};

/// JSON member names of the registered header parameters.
pub mod keys {
    pub const ALGORITHM: &str = "alg";
    pub const ENCRYPTION_ALGORITHM: &str = "enc";
    pub const COMPRESSION_ALGORITHM: &str = "zip";
    pub const JWK_SET_URL: &str = "jku";
    pub const JSON_WEB_KEY: &str = "jwk";
    pub const X509_URL: &str = "x5u";
    pub const X509_THUMBPRINT: &str = "x5t";
    pub const X509_CHAIN: &str = "x5c";
    pub const KEY_ID: &str = "kid";
    pub const TYPE: &str = "typ";
    pub const CONTENT_TYPE: &str = "cty";
    pub const CRITICAL: &str = "crit";
}

/// Immutable JOSE header. Build one with [`JoseHeaderBuilder`] or parse
/// it from a decoded header segment with [`JoseHeader::from_json`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoseHeader {
    /// `alg`: signature or key-management algorithm.
    pub algorithm: Option<String>,
    /// `enc`: content-encryption algorithm (JWE only).
    pub encryption_algorithm: Option<String>,
    /// `zip`: payload compression algorithm (JWE only).
    pub compression_algorithm: Option<String>,
    /// `jku`: JWK Set URL, carried opaquely.
    pub jwk_set_url: Option<String>,
    /// `jwk`: inline JSON Web Key, carried opaquely.
    pub json_web_key: Option<String>,
    /// `x5u`: X.509 URL, carried opaquely.
    pub x509_url: Option<String>,
    /// `x5t`: X.509 certificate thumbprint, carried opaquely.
    pub x509_thumbprint: Option<String>,
    /// `x5c`: X.509 certificate chain, carried opaquely.
    pub x509_chain: Option<String>,
    /// `kid`: key identifier.
    pub key_id: Option<String>,
    /// `typ`: token type.
    pub typ: Option<String>,
    /// `cty`: payload content type.
    pub content_type: Option<String>,
    /// `crit`: extension members that must be understood.
    pub critical: Vec<String>,
    /// Unregistered members, in arrival/insertion order.
    pub custom_fields: IndexMap<String, Value>,
}

impl JoseHeader {
    /// Looks up a custom field.
    #[must_use]
    pub fn custom_field(&self, name: &str) -> Option<&Value> {
        self.custom_fields.get(name)
    }

    /// Parses a decoded header segment. Registered member names map onto
    /// the typed fields; everything else lands in `custom_fields`.
    pub fn from_json(json: &str) -> JoseResult<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|_| JoseError::malformed("header segment is not valid JSON"))?;
        let Value::Object(object) = value else {
            return Err(JoseError::malformed("header segment is not a JSON object"));
        };

        let mut header = Self::default();
        for (name, value) in object {
            match name.as_str() {
                keys::ALGORITHM => header.algorithm = value_to_string(value),
                keys::ENCRYPTION_ALGORITHM => header.encryption_algorithm = value_to_string(value),
                keys::COMPRESSION_ALGORITHM => {
                    header.compression_algorithm = value_to_string(value);
                }
                keys::JWK_SET_URL => header.jwk_set_url = value_to_string(value),
                keys::JSON_WEB_KEY => header.json_web_key = value_to_string(value),
                keys::X509_URL => header.x509_url = value_to_string(value),
                keys::X509_THUMBPRINT => header.x509_thumbprint = value_to_string(value),
                keys::X509_CHAIN => header.x509_chain = value_to_string(value),
                keys::KEY_ID => header.key_id = value_to_string(value),
                keys::TYPE => header.typ = value_to_string(value),
                keys::CONTENT_TYPE => header.content_type = value_to_string(value),
                keys::CRITICAL => {
                    if let Value::Array(items) = value {
                        header.critical = items
                            .into_iter()
                            .filter_map(value_to_string)
                            .collect();
                    }
                }
                _ => {
                    header.custom_fields.insert(name, value);
                }
            }
        }
        Ok(header)
    }

    /// Serializes the header to JSON: registered fields first, in fixed
    /// emission order, then custom fields in insertion order. Unset and
    /// empty fields are not emitted.
    #[must_use]
    pub fn to_json(&self) -> String {
        let mut object = Map::new();
        set_string(&mut object, keys::ALGORITHM, self.algorithm.as_deref());
        set_string(
            &mut object,
            keys::ENCRYPTION_ALGORITHM,
            self.encryption_algorithm.as_deref(),
        );
        set_string(
            &mut object,
            keys::COMPRESSION_ALGORITHM,
            self.compression_algorithm.as_deref(),
        );
        set_string(&mut object, keys::JWK_SET_URL, self.jwk_set_url.as_deref());
        set_string(&mut object, keys::JSON_WEB_KEY, self.json_web_key.as_deref());
        set_string(&mut object, keys::X509_URL, self.x509_url.as_deref());
        set_string(&mut object, keys::X509_THUMBPRINT, self.x509_thumbprint.as_deref());
        set_string(&mut object, keys::X509_CHAIN, self.x509_chain.as_deref());
        set_string(&mut object, keys::KEY_ID, self.key_id.as_deref());
        set_string(&mut object, keys::CONTENT_TYPE, self.content_type.as_deref());
        set_string(&mut object, keys::TYPE, self.typ.as_deref());
        if !self.critical.is_empty() {
            object.insert(
                keys::CRITICAL.to_owned(),
                Value::Array(self.critical.iter().cloned().map(Value::String).collect()),
            );
        }
        for (name, value) in &self.custom_fields {
            object.insert(name.clone(), value.clone());
        }
        Value::Object(object).to_string()
    }
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn set_string(object: &mut Map<String, Value>, key: &str, value: Option<&str>) {
    if let Some(value) = value
        && !value.is_empty()
    {
        object.insert(key.to_owned(), Value::String(value.to_owned()));
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Accumulates header fields, then produces a frozen [`JoseHeader`].
#[derive(Debug, Clone, Default)]
pub struct JoseHeaderBuilder {
    header: JoseHeader,
}

impl JoseHeaderBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.header.algorithm = Some(algorithm.into());
        self
    }

    #[must_use]
    pub fn encryption_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.header.encryption_algorithm = Some(algorithm.into());
        self
    }

    #[must_use]
    pub fn compression_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.header.compression_algorithm = Some(algorithm.into());
        self
    }

    #[must_use]
    pub fn jwk_set_url(mut self, url: impl Into<String>) -> Self {
        self.header.jwk_set_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn json_web_key(mut self, jwk: impl Into<String>) -> Self {
        self.header.json_web_key = Some(jwk.into());
        self
    }

    #[must_use]
    pub fn x509_url(mut self, url: impl Into<String>) -> Self {
        self.header.x509_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn x509_thumbprint(mut self, thumbprint: impl Into<String>) -> Self {
        self.header.x509_thumbprint = Some(thumbprint.into());
        self
    }

    #[must_use]
    pub fn x509_chain(mut self, chain: impl Into<String>) -> Self {
        self.header.x509_chain = Some(chain.into());
        self
    }

    #[must_use]
    pub fn key_id(mut self, key_id: impl Into<String>) -> Self {
        self.header.key_id = Some(key_id.into());
        self
    }

    #[must_use]
    pub fn typ(mut self, typ: impl Into<String>) -> Self {
        self.header.typ = Some(typ.into());
        self
    }

    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.header.content_type = Some(content_type.into());
        self
    }

    #[must_use]
    pub fn critical(mut self, critical: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.header.critical = critical.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn custom_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.header.custom_fields.insert(name.into(), value.into());
        self
    }

    /// Produces the immutable header.
    #[must_use]
    pub fn build(self) -> JoseHeader {
        self.header
    }
}
