//! Concrete algorithm strategies.
//!
//! Everything cryptographic lives behind the strategy traits
//! ([`crate::jws::SignatureMethod`], [`crate::jwe::KeyEncryptMethod`],
//! [`crate::jwe::ContentEncryptMethod`]); the codec itself never touches
//! a primitive. Implementations here cover the algorithms the workspace
//! ships with; embedders add others by implementing the traits.

pub mod aes;
pub mod hmac;
pub mod rsa;

use rand::RngCore;
use rand::rngs::OsRng;

pub use self::aes::{AesGcmContentEncryptMethod, AesKeyWrapMethod, RsaOaepKeyEncryptMethod};
pub use self::hmac::HmacSha256SignatureMethod;
pub use self::rsa::{RsaAlgorithm, RsaSignatureMethod};

/// Raw symmetric key bytes, shared by the HMAC and AES strategies.
#[derive(Clone)]
pub struct SymmetricKey {
    key: Vec<u8>,
}

impl SymmetricKey {
    #[must_use]
    pub fn new(key: Vec<u8>) -> Self {
        Self { key }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.key
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // key material stays out of logs
        f.debug_struct("SymmetricKey").finish_non_exhaustive()
    }
}

/// Generates a fresh random content-encryption key.
#[must_use]
pub fn generate_cek(len: usize) -> Vec<u8> {
    let mut cek = vec![0u8; len];
    OsRng.fill_bytes(&mut cek);
    cek
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_cek_length_and_entropy() {
        let a = generate_cek(32);
        let b = generate_cek(32);
        assert_eq!(a.len(), 32);
        assert_ne!(a, b);
    }

    #[test]
    fn test_symmetric_key_debug_hides_material() {
        let key = SymmetricKey::new(b"secret".to_vec());
        assert!(!format!("{key:?}").contains("secret"));
    }
}
