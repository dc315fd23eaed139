//! JSON Web Tokens: the structured claims payload and its compact
//! reader/writer.
//!
//! The payload models the registered claims plus ordered custom fields.
//! The audience claim is deliberately two-shaped: a claims set built with
//! a single audience renders `aud` as a bare JSON string, one built with
//! an audience list renders a JSON array even for one element, and each
//! shape parses back to the same variant.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::codec::{base64url_decode_string, base64url_encode, read_three_segments};
use crate::error::{JoseError, JoseResult};
use crate::header::{JoseHeader, JoseHeaderBuilder};

/// JSON member names of the registered claims.
pub mod claims {
    pub const ISSUER: &str = "iss";
    pub const SUBJECT: &str = "sub";
    pub const AUDIENCE: &str = "aud";
    pub const EXPIRATION_TIME: &str = "exp";
    pub const NOT_BEFORE: &str = "nbf";
    pub const ISSUED_AT: &str = "iat";
    pub const JWT_ID: &str = "jti";
    pub const TYPE: &str = "typ";
}

// =============================================================================
// Audience
// =============================================================================

/// The `aud` claim, preserving whether it was a bare string or a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    /// A single audience; serializes as a JSON string.
    Single(String),
    /// An audience list; serializes as a JSON array, even with one
    /// element.
    List(Vec<String>),
}

impl Audience {
    /// First (or only) audience value.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::Single(audience) => Some(audience),
            Self::List(audiences) => audiences.first().map(String::as_str),
        }
    }

    /// All audience values.
    #[must_use]
    pub fn all(&self) -> Vec<&str> {
        match self {
            Self::Single(audience) => vec![audience],
            Self::List(audiences) => audiences.iter().map(String::as_str).collect(),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Self::Single(audience) => Value::String(audience.clone()),
            Self::List(audiences) => {
                Value::Array(audiences.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

// =============================================================================
// ClaimsSet
// =============================================================================

/// The registered claims plus ordered custom fields.
///
/// Zero-valued numeric claims are treated as unset and never emitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimsSet {
    pub issuer: Option<String>,
    pub subject: Option<String>,
    pub audience: Option<Audience>,
    pub expiration_time: Option<i64>,
    pub not_before: Option<i64>,
    pub issued_at: Option<i64>,
    pub jwt_id: Option<String>,
    pub typ: Option<String>,
    pub custom_fields: IndexMap<String, Value>,
}

impl ClaimsSet {
    /// Looks up a custom claim.
    #[must_use]
    pub fn custom_field(&self, name: &str) -> Option<&Value> {
        self.custom_fields.get(name)
    }

    /// Serializes the claims set: registered claims in fixed emission
    /// order (`aud`, `iss`, `jti`, `nbf`, `sub`, `typ`, `exp`, `iat`),
    /// then custom claims in insertion order.
    #[must_use]
    pub fn to_json(&self) -> String {
        let mut object = Map::new();
        if let Some(audience) = &self.audience {
            object.insert(claims::AUDIENCE.to_owned(), audience.to_value());
        }
        set_string(&mut object, claims::ISSUER, self.issuer.as_deref());
        set_string(&mut object, claims::JWT_ID, self.jwt_id.as_deref());
        set_long(&mut object, claims::NOT_BEFORE, self.not_before);
        set_string(&mut object, claims::SUBJECT, self.subject.as_deref());
        set_string(&mut object, claims::TYPE, self.typ.as_deref());
        set_long(&mut object, claims::EXPIRATION_TIME, self.expiration_time);
        set_long(&mut object, claims::ISSUED_AT, self.issued_at);
        for (name, value) in &self.custom_fields {
            object.insert(name.clone(), value.clone());
        }
        Value::Object(object).to_string()
    }

    /// Parses a decoded claims segment; unknown members land in
    /// `custom_fields`.
    pub fn from_json(json: &str) -> JoseResult<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|_| JoseError::malformed("claims segment is not valid JSON"))?;
        let Value::Object(object) = value else {
            return Err(JoseError::malformed("claims segment is not a JSON object"));
        };

        let mut claims_set = Self::default();
        for (name, value) in object {
            match name.as_str() {
                claims::AUDIENCE => {
                    claims_set.audience = match value {
                        Value::String(audience) => Some(Audience::Single(audience)),
                        Value::Array(items) => Some(Audience::List(
                            items
                                .into_iter()
                                .map(|item| match item {
                                    Value::String(s) => s,
                                    other => other.to_string(),
                                })
                                .collect(),
                        )),
                        _ => None,
                    };
                }
                claims::ISSUER => claims_set.issuer = value_to_string(value),
                claims::SUBJECT => claims_set.subject = value_to_string(value),
                claims::EXPIRATION_TIME => claims_set.expiration_time = value.as_i64(),
                claims::NOT_BEFORE => claims_set.not_before = value.as_i64(),
                claims::ISSUED_AT => claims_set.issued_at = value.as_i64(),
                claims::JWT_ID => claims_set.jwt_id = value_to_string(value),
                claims::TYPE => claims_set.typ = value_to_string(value),
                _ => {
                    claims_set.custom_fields.insert(name, value);
                }
            }
        }
        Ok(claims_set)
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

fn set_long(object: &mut Map<String, Value>, key: &str, value: Option<i64>) {
    if let Some(value) = value
        && value != 0
    {
        object.insert(key.to_owned(), Value::from(value));
    }
}

// =============================================================================
// Jwt
// =============================================================================

/// A JSON Web Token: header, structured claims, optional signature.
#[derive(Debug, Clone, PartialEq)]
pub struct Jwt {
    pub header: JoseHeader,
    pub claims_set: ClaimsSet,
    /// Signature segment, still base64url-encoded; empty for unsigned
    /// tokens.
    pub signature: String,
}

impl Jwt {
    /// Starts building a token.
    #[must_use]
    pub fn builder() -> JwtBuilder {
        JwtBuilder::default()
    }
}

/// Builder accumulating header fields, claims, and the signature.
#[derive(Debug, Clone, Default)]
pub struct JwtBuilder {
    header: JoseHeaderBuilder,
    claims_set: ClaimsSet,
    signature: String,
}

impl JwtBuilder {
    #[must_use]
    pub fn set_header_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.header = self.header.algorithm(algorithm);
        self
    }

    #[must_use]
    pub fn set_header_type(mut self, typ: impl Into<String>) -> Self {
        self.header = self.header.typ(typ);
        self
    }

    #[must_use]
    pub fn set_header_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.header = self.header.content_type(content_type);
        self
    }

    #[must_use]
    pub fn set_header_custom_field(
        mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.header = self.header.custom_field(name, value);
        self
    }

    #[must_use]
    pub fn set_claims_set_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.claims_set.issuer = Some(issuer.into());
        self
    }

    #[must_use]
    pub fn set_claims_set_subject(mut self, subject: impl Into<String>) -> Self {
        self.claims_set.subject = Some(subject.into());
        self
    }

    /// Single audience: `aud` renders as a bare string.
    #[must_use]
    pub fn set_claims_set_audience(mut self, audience: impl Into<String>) -> Self {
        self.claims_set.audience = Some(Audience::Single(audience.into()));
        self
    }

    /// Audience list: `aud` renders as a JSON array, one element or not.
    #[must_use]
    pub fn set_claims_set_audiences(
        mut self,
        audiences: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.claims_set.audience =
            Some(Audience::List(audiences.into_iter().map(Into::into).collect()));
        self
    }

    #[must_use]
    pub fn set_claims_set_expiration_time(mut self, expiration_time: i64) -> Self {
        self.claims_set.expiration_time = Some(expiration_time);
        self
    }

    #[must_use]
    pub fn set_claims_set_not_before(mut self, not_before: i64) -> Self {
        self.claims_set.not_before = Some(not_before);
        self
    }

    #[must_use]
    pub fn set_claims_set_issued_at(mut self, issued_at: i64) -> Self {
        self.claims_set.issued_at = Some(issued_at);
        self
    }

    #[must_use]
    pub fn set_claims_set_jwt_id(mut self, jwt_id: impl Into<String>) -> Self {
        self.claims_set.jwt_id = Some(jwt_id.into());
        self
    }

    #[must_use]
    pub fn set_claims_set_type(mut self, typ: impl Into<String>) -> Self {
        self.claims_set.typ = Some(typ.into());
        self
    }

    #[must_use]
    pub fn set_claims_set_custom_field(
        mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.claims_set.custom_fields.insert(name.into(), value.into());
        self
    }

    /// Sets the (already encoded) signature segment.
    #[must_use]
    pub fn set_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = signature.into();
        self
    }

    /// Produces the immutable token.
    #[must_use]
    pub fn build(self) -> Jwt {
        Jwt {
            header: self.header.build(),
            claims_set: self.claims_set,
            signature: self.signature,
        }
    }
}

// =============================================================================
// Reader / writer
// =============================================================================

/// Parses compact JWTs.
pub struct JwtReader;

impl JwtReader {
    /// Reads a compact token into a [`Jwt`]. The signature segment is
    /// kept encoded; cryptographic verification belongs to the JWS layer.
    pub fn read(&self, compact: &str) -> JoseResult<Jwt> {
        let (header_b64, claims_b64, signature) = read_three_segments(compact)?;
        let header = JoseHeader::from_json(&base64url_decode_string(&header_b64)?)?;
        let claims_set = ClaimsSet::from_json(&base64url_decode_string(&claims_b64)?)?;
        Ok(Jwt {
            header,
            claims_set,
            signature,
        })
    }
}

/// Writes compact JWTs.
pub struct JwtWriter;

impl JwtWriter {
    /// Renders the token in compact form; an unsigned token ends with a
    /// dot and an empty signature segment.
    #[must_use]
    pub fn write(&self, jwt: &Jwt) -> String {
        let header = base64url_encode(jwt.header.to_json());
        let claims = base64url_encode(jwt.claims_set.to_json());
        format!("{header}.{claims}.{}", jwt.signature)
    }
}
