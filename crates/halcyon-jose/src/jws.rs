//! JSON Web Signatures.
//!
//! [`Jws`] carries a header, an opaque payload string, and an encoded
//! signature. Signing and verification delegate to a pluggable
//! [`SignatureMethod`]; the token's declared `alg` must match the
//! method's algorithm (case-insensitive) before any cryptography runs,
//! and a mismatch fails closed with [`JoseError::AlgorithmMismatch`].

use serde_json::Value;

use crate::codec::{base64url_decode_string, base64url_encode, read_three_segments};
use crate::error::{JoseError, JoseResult};
use crate::header::{JoseHeader, JoseHeaderBuilder};

// =============================================================================
// SignatureMethod
// =============================================================================

/// Signature algorithm strategy.
///
/// `calculate` and `verify` operate on the already-encoded header and
/// payload segments, i.e. the exact `<b64 header>.<b64 payload>` signing
/// input of the compact serialization.
pub trait SignatureMethod {
    /// Key type used for signing.
    type SigningKey;
    /// Key type used for verification.
    type VerifyingKey;

    /// JWA algorithm name (`HS256`, `RS256`, ...).
    fn algorithm(&self) -> &str;

    /// Computes the base64url-encoded signature over
    /// `header_b64.payload_b64`.
    fn calculate(
        &self,
        header_b64: &str,
        payload_b64: &str,
        key: &Self::SigningKey,
    ) -> JoseResult<String>;

    /// Verifies an encoded signature over `header_b64.payload_b64`.
    fn verify(
        &self,
        signature_b64: &str,
        header_b64: &str,
        payload_b64: &str,
        key: &Self::VerifyingKey,
    ) -> JoseResult<bool>;
}

// =============================================================================
// Jws
// =============================================================================

/// A JSON Web Signature token.
#[derive(Debug, Clone, PartialEq)]
pub struct Jws {
    pub header: JoseHeader,
    /// The payload, as a decoded string; its structure is the caller's
    /// business (a JWT claims set, plain text, ...).
    pub payload: String,
    /// The signature segment, base64url-encoded.
    pub signature: String,
    /// Original compact form, kept by the reader so verification runs
    /// over the exact bytes that were signed.
    raw: Option<String>,
}

impl Jws {
    /// Starts building a token.
    #[must_use]
    pub fn builder() -> JwsBuilder {
        JwsBuilder::default()
    }

    /// `true` when the method's algorithm matches the token's declared
    /// `alg` (case-insensitive).
    pub fn accept_algorithm<M: SignatureMethod>(&self, method: &M) -> JoseResult<bool> {
        let declared = self
            .header
            .algorithm
            .as_deref()
            .ok_or_else(|| JoseError::illegal_state("JWS header declares no algorithm"))?;
        Ok(declared.eq_ignore_ascii_case(method.algorithm()))
    }

    /// Verifies the signature with the supplied method and key.
    ///
    /// Fails with [`JoseError::AlgorithmMismatch`], before any
    /// cryptographic work, when the declared and supplied algorithms
    /// disagree.
    pub fn validate<M: SignatureMethod>(
        &self,
        method: &M,
        key: &M::VerifyingKey,
    ) -> JoseResult<bool> {
        if !self.accept_algorithm(method)? {
            return Err(JoseError::AlgorithmMismatch {
                declared: self.header.algorithm.clone().unwrap_or_default(),
                supplied: method.algorithm().to_owned(),
            });
        }
        if self.signature.is_empty() {
            return Err(JoseError::illegal_state("JWS token carries no signature"));
        }

        // a parsed token verifies over its original segments; a built one
        // re-encodes deterministically
        let (header_b64, payload_b64) = match &self.raw {
            Some(raw) => {
                let (header_b64, payload_b64, _) = read_three_segments(raw)?;
                (header_b64, payload_b64)
            }
            None => (
                base64url_encode(self.header.to_json()),
                base64url_encode(&self.payload),
            ),
        };
        method.verify(&self.signature, &header_b64, &payload_b64, key)
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Accumulates header fields and the payload, then signs or builds.
#[derive(Debug, Clone, Default)]
pub struct JwsBuilder {
    header: JoseHeaderBuilder,
    payload: Option<String>,
    signature: String,
}

impl JwsBuilder {
    #[must_use]
    pub fn set_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.header = self.header.algorithm(algorithm);
        self
    }

    #[must_use]
    pub fn set_key_id(mut self, key_id: impl Into<String>) -> Self {
        self.header = self.header.key_id(key_id);
        self
    }

    #[must_use]
    pub fn set_type(mut self, typ: impl Into<String>) -> Self {
        self.header = self.header.typ(typ);
        self
    }

    #[must_use]
    pub fn set_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.header = self.header.content_type(content_type);
        self
    }

    #[must_use]
    pub fn set_critical(mut self, critical: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.header = self.header.critical(critical);
        self
    }

    #[must_use]
    pub fn set_jwk_set_url(mut self, url: impl Into<String>) -> Self {
        self.header = self.header.jwk_set_url(url);
        self
    }

    #[must_use]
    pub fn set_json_web_key(mut self, jwk: impl Into<String>) -> Self {
        self.header = self.header.json_web_key(jwk);
        self
    }

    #[must_use]
    pub fn set_x509_url(mut self, url: impl Into<String>) -> Self {
        self.header = self.header.x509_url(url);
        self
    }

    #[must_use]
    pub fn set_x509_thumbprint(mut self, thumbprint: impl Into<String>) -> Self {
        self.header = self.header.x509_thumbprint(thumbprint);
        self
    }

    #[must_use]
    pub fn set_x509_chain(mut self, chain: impl Into<String>) -> Self {
        self.header = self.header.x509_chain(chain);
        self
    }

    #[must_use]
    pub fn set_custom_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.header = self.header.custom_field(name, value);
        self
    }

    #[must_use]
    pub fn set_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Sets an externally computed, already-encoded signature.
    #[must_use]
    pub fn set_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = signature.into();
        self
    }

    /// Signs the accumulated header and payload: the header `alg` is set
    /// from the method, then the signature is computed over the encoded
    /// segments.
    pub fn sign<M: SignatureMethod>(
        mut self,
        method: &M,
        key: &M::SigningKey,
    ) -> JoseResult<Self> {
        let payload = self
            .payload
            .clone()
            .ok_or_else(|| JoseError::illegal_state("payload must be set before signing"))?;

        self = self.set_algorithm(method.algorithm());
        let header_b64 = base64url_encode(self.header.clone().build().to_json());
        let payload_b64 = base64url_encode(&payload);
        let signature = method.calculate(&header_b64, &payload_b64, key)?;
        Ok(self.set_signature(signature))
    }

    /// Produces the immutable token.
    #[must_use]
    pub fn build(self) -> Jws {
        Jws {
            header: self.header.build(),
            payload: self.payload.unwrap_or_default(),
            signature: self.signature,
            raw: None,
        }
    }
}

// =============================================================================
// Reader / writer
// =============================================================================

/// Parses compact JWS tokens.
pub struct JwsReader;

impl JwsReader {
    pub fn read(&self, compact: &str) -> JoseResult<Jws> {
        let (header_b64, payload_b64, signature) = read_three_segments(compact)?;
        let header = JoseHeader::from_json(&base64url_decode_string(&header_b64)?)?;
        let payload = base64url_decode_string(&payload_b64)?;
        Ok(Jws {
            header,
            payload,
            signature,
            raw: Some(compact.to_owned()),
        })
    }
}

/// Writes compact JWS tokens.
pub struct JwsWriter;

impl JwsWriter {
    #[must_use]
    pub fn write(&self, jws: &Jws) -> String {
        match &jws.raw {
            Some(raw) => raw.clone(),
            None => format!(
                "{}.{}.{}",
                base64url_encode(jws.header.to_json()),
                base64url_encode(&jws.payload),
                jws.signature
            ),
        }
    }
}
