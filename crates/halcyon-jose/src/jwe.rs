//! JSON Web Encryption.
//!
//! A JWE is the five-segment compact form: protected header, wrapped
//! content-encryption key, initialization vector, ciphertext, and
//! authentication tag. Encryption is two-stage: a [`KeyEncryptMethod`]
//! wraps the per-message CEK for the recipient, then a
//! [`ContentEncryptMethod`] encrypts the payload under the CEK with the
//! encoded protected header as associated data. Decryption demands that
//! both algorithms declared in the header match the supplied methods and
//! fails closed otherwise.

use serde_json::Value;

use crate::codec::{base64url_decode_string, base64url_encode, read_five_segments};
use crate::error::{JoseError, JoseResult};
use crate::header::{JoseHeader, JoseHeaderBuilder};

// =============================================================================
// Strategy traits
// =============================================================================

/// Key-management strategy wrapping and unwrapping the CEK.
pub trait KeyEncryptMethod {
    /// Key type used to wrap the CEK.
    type EncryptionKey;
    /// Key type used to unwrap the CEK.
    type DecryptionKey;

    /// JWA key-management algorithm name (`A256KW`, `RSA-OAEP`, ...).
    fn algorithm(&self) -> &str;

    /// Wraps the CEK, returning the base64url-encoded encrypted key
    /// segment.
    fn encrypt(&self, cek: &[u8], key: &Self::EncryptionKey) -> JoseResult<String>;

    /// Unwraps the encrypted-key segment back into the CEK.
    fn decrypt(&self, encrypted_key_b64: &str, key: &Self::DecryptionKey) -> JoseResult<Vec<u8>>;
}

/// Content-encryption strategy for the payload.
pub trait ContentEncryptMethod {
    /// JWA content-encryption algorithm name (`A256GCM`, ...).
    fn algorithm(&self) -> &str;

    /// Encrypts the plaintext under the CEK, authenticating `aad`.
    fn encrypt(&self, plaintext: &[u8], cek: &[u8], aad: &[u8]) -> JoseResult<ContentEncryption>;

    /// Decrypts and authenticates; any mismatch is a failure, never a
    /// partial result.
    fn decrypt(
        &self,
        content: &ContentEncryption,
        cek: &[u8],
        aad: &[u8],
    ) -> JoseResult<Vec<u8>>;
}

/// The three content segments of a JWE, base64url-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEncryption {
    pub iv: String,
    pub ciphertext: String,
    pub tag: String,
}

// =============================================================================
// Jwe
// =============================================================================

/// A JSON Web Encryption token.
#[derive(Debug, Clone, PartialEq)]
pub struct Jwe {
    pub header: JoseHeader,
    /// The exact encoded protected-header segment; it doubles as the
    /// associated data, so it is carried verbatim rather than
    /// re-serialized.
    protected_b64: String,
    /// The wrapped CEK, base64url-encoded.
    pub encrypted_key: String,
    /// IV, ciphertext, and tag segments.
    pub content_encryption: ContentEncryption,
}

impl Jwe {
    /// Starts building a token.
    #[must_use]
    pub fn builder() -> JweBuilder {
        JweBuilder::default()
    }

    /// The encoded protected-header segment.
    #[must_use]
    pub fn protected_b64(&self) -> &str {
        &self.protected_b64
    }

    /// Decrypts the payload.
    ///
    /// Both the key-management (`alg`) and content-encryption (`enc`)
    /// algorithms declared in the header must match the supplied
    /// methods; a mismatch fails with [`JoseError::AlgorithmMismatch`]
    /// before any key material is touched.
    pub fn decrypt<KM: KeyEncryptMethod, CM: ContentEncryptMethod>(
        &self,
        key_method: &KM,
        content_method: &CM,
        key: &KM::DecryptionKey,
    ) -> JoseResult<String> {
        check_algorithm(self.header.algorithm.as_deref(), key_method.algorithm())?;
        check_algorithm(
            self.header.encryption_algorithm.as_deref(),
            content_method.algorithm(),
        )?;

        let cek = key_method.decrypt(&self.encrypted_key, key)?;
        let plaintext = content_method.decrypt(
            &self.content_encryption,
            &cek,
            self.protected_b64.as_bytes(),
        )?;
        String::from_utf8(plaintext)
            .map_err(|_| JoseError::crypto("decrypted payload is not valid UTF-8"))
    }
}

fn check_algorithm(declared: Option<&str>, supplied: &str) -> JoseResult<()> {
    let declared = declared
        .ok_or_else(|| JoseError::illegal_state("JWE header declares no algorithm"))?;
    if declared.eq_ignore_ascii_case(supplied) {
        Ok(())
    } else {
        Err(JoseError::AlgorithmMismatch {
            declared: declared.to_owned(),
            supplied: supplied.to_owned(),
        })
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Accumulates header fields and the payload, then encrypts.
#[derive(Debug, Clone, Default)]
pub struct JweBuilder {
    header: JoseHeaderBuilder,
    payload: Option<String>,
}

impl JweBuilder {
    #[must_use]
    pub fn set_compression_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.header = self.header.compression_algorithm(algorithm);
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
    pub fn set_custom_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.header = self.header.custom_field(name, value);
        self
    }

    #[must_use]
    pub fn set_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Encrypts the payload: the header's `alg`/`enc` are set from the
    /// methods, the CEK is wrapped for the recipient, and the payload is
    /// sealed with the encoded header as associated data.
    pub fn encrypt<KM: KeyEncryptMethod, CM: ContentEncryptMethod>(
        self,
        key_method: &KM,
        content_method: &CM,
        cek: &[u8],
        key: &KM::EncryptionKey,
    ) -> JoseResult<Jwe> {
        let payload = self
            .payload
            .ok_or_else(|| JoseError::illegal_state("payload must be set before encrypting"))?;

        let header = self
            .header
            .algorithm(key_method.algorithm())
            .encryption_algorithm(content_method.algorithm())
            .build();
        let protected_b64 = base64url_encode(header.to_json());

        let encrypted_key = key_method.encrypt(cek, key)?;
        let content_encryption =
            content_method.encrypt(payload.as_bytes(), cek, protected_b64.as_bytes())?;

        Ok(Jwe {
            header,
            protected_b64,
            encrypted_key,
            content_encryption,
        })
    }
}

// =============================================================================
// Reader / writer
// =============================================================================

/// Parses compact JWE tokens.
pub struct JweReader;

impl JweReader {
    pub fn read(&self, compact: &str) -> JoseResult<Jwe> {
        let (protected_b64, encrypted_key, iv, ciphertext, tag) = read_five_segments(compact)?;
        let header = JoseHeader::from_json(&base64url_decode_string(&protected_b64)?)?;
        Ok(Jwe {
            header,
            protected_b64,
            encrypted_key,
            content_encryption: ContentEncryption { iv, ciphertext, tag },
        })
    }
}

/// Writes compact JWE tokens.
pub struct JweWriter;

impl JweWriter {
    #[must_use]
    pub fn write(&self, jwe: &Jwe) -> String {
        format!(
            "{}.{}.{}.{}.{}",
            jwe.protected_b64,
            jwe.encrypted_key,
            jwe.content_encryption.iv,
            jwe.content_encryption.ciphertext,
            jwe.content_encryption.tag
        )
    }
}
