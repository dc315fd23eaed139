//! Key-wrap and content-encryption strategies (`A256KW`, `RSA-OAEP`,
//! `A256GCM`).

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce};
use aes_kw::KekAes256;
use rand::RngCore;
use rand::rngs::OsRng;
use rsa::sha2::Sha256;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};

use crate::alg::SymmetricKey;
use crate::codec::{base64url_decode, base64url_encode};
use crate::error::{JoseError, JoseResult};
use crate::jwe::{ContentEncryptMethod, ContentEncryption, KeyEncryptMethod};

/// GCM nonce length in bytes.
const GCM_IV_LEN: usize = 12;
/// GCM authentication-tag length in bytes.
const GCM_TAG_LEN: usize = 16;

// =============================================================================
// A256KW
// =============================================================================

/// AES-256 key wrap of the CEK under a shared symmetric key.
pub struct AesKeyWrapMethod;

impl AesKeyWrapMethod {
    fn kek(key: &SymmetricKey) -> JoseResult<KekAes256> {
        let key_bytes: [u8; 32] = key
            .as_bytes()
            .try_into()
            .map_err(|_| JoseError::crypto("A256KW requires a 32-byte key"))?;
        Ok(KekAes256::from(key_bytes))
    }
}

impl KeyEncryptMethod for AesKeyWrapMethod {
    type EncryptionKey = SymmetricKey;
    type DecryptionKey = SymmetricKey;

    fn algorithm(&self) -> &str {
        "A256KW"
    }

    fn encrypt(&self, cek: &[u8], key: &Self::EncryptionKey) -> JoseResult<String> {
        let wrapped = Self::kek(key)?
            .wrap_vec(cek)
            .map_err(|e| JoseError::crypto(format!("CEK wrap failed: {e}")))?;
        Ok(base64url_encode(wrapped))
    }

    fn decrypt(&self, encrypted_key_b64: &str, key: &Self::DecryptionKey) -> JoseResult<Vec<u8>> {
        let wrapped = base64url_decode(encrypted_key_b64)?;
        Self::kek(key)?
            .unwrap_vec(&wrapped)
            .map_err(|e| JoseError::crypto(format!("CEK unwrap failed: {e}")))
    }
}

// =============================================================================
// RSA-OAEP
// =============================================================================

/// RSA-OAEP (SHA-256) wrap of the CEK under the recipient's RSA key.
pub struct RsaOaepKeyEncryptMethod;

impl KeyEncryptMethod for RsaOaepKeyEncryptMethod {
    type EncryptionKey = RsaPublicKey;
    type DecryptionKey = RsaPrivateKey;

    fn algorithm(&self) -> &str {
        "RSA-OAEP"
    }

    fn encrypt(&self, cek: &[u8], key: &Self::EncryptionKey) -> JoseResult<String> {
        let wrapped = key
            .encrypt(&mut OsRng, Oaep::new::<Sha256>(), cek)
            .map_err(|e| JoseError::crypto(format!("CEK wrap failed: {e}")))?;
        Ok(base64url_encode(wrapped))
    }

    fn decrypt(&self, encrypted_key_b64: &str, key: &Self::DecryptionKey) -> JoseResult<Vec<u8>> {
        let wrapped = base64url_decode(encrypted_key_b64)?;
        key.decrypt(Oaep::new::<Sha256>(), &wrapped)
            .map_err(|e| JoseError::crypto(format!("CEK unwrap failed: {e}")))
    }
}

// =============================================================================
// A256GCM
// =============================================================================

/// AES-256-GCM content encryption, authenticating the encoded protected
/// header as associated data.
pub struct AesGcmContentEncryptMethod;

impl AesGcmContentEncryptMethod {
    fn cipher(cek: &[u8]) -> JoseResult<Aes256Gcm> {
        Aes256Gcm::new_from_slice(cek)
            .map_err(|_| JoseError::crypto("A256GCM requires a 32-byte CEK"))
    }
}

impl ContentEncryptMethod for AesGcmContentEncryptMethod {
    fn algorithm(&self) -> &str {
        "A256GCM"
    }

    fn encrypt(&self, plaintext: &[u8], cek: &[u8], aad: &[u8]) -> JoseResult<ContentEncryption> {
        let cipher = Self::cipher(cek)?;
        let mut iv = [0u8; GCM_IV_LEN];
        OsRng.fill_bytes(&mut iv);

        let mut sealed = cipher
            .encrypt(Nonce::from_slice(&iv), Payload { msg: plaintext, aad })
            .map_err(|_| JoseError::crypto("content encryption failed"))?;
        // the aead output is ciphertext || tag; the compact form keeps
        // them in separate segments
        let tag = sealed.split_off(sealed.len() - GCM_TAG_LEN);

        Ok(ContentEncryption {
            iv: base64url_encode(iv),
            ciphertext: base64url_encode(sealed),
            tag: base64url_encode(tag),
        })
    }

    fn decrypt(
        &self,
        content: &ContentEncryption,
        cek: &[u8],
        aad: &[u8],
    ) -> JoseResult<Vec<u8>> {
        let cipher = Self::cipher(cek)?;
        let iv = base64url_decode(&content.iv)?;
        if iv.len() != GCM_IV_LEN {
            return Err(JoseError::crypto("invalid initialization vector length"));
        }
        let mut sealed = base64url_decode(&content.ciphertext)?;
        sealed.extend(base64url_decode(&content.tag)?);

        cipher
            .decrypt(Nonce::from_slice(&iv), Payload { msg: &sealed, aad })
            .map_err(|_| JoseError::crypto("content decryption failed"))
    }
}
