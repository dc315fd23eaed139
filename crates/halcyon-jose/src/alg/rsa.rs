//! RSA PKCS#1 v1.5 signature strategies (`RS256`, `RS384`, `RS512`).

use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::sha2::{Sha256, Sha384, Sha512};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::codec::{base64url_decode, base64url_encode};
use crate::error::{JoseError, JoseResult};
use crate::jws::SignatureMethod;

/// Digest width of an RSA signature method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsaAlgorithm {
    Rs256,
    Rs384,
    Rs512,
}

impl RsaAlgorithm {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rs256 => "RS256",
            Self::Rs384 => "RS384",
            Self::Rs512 => "RS512",
        }
    }
}

/// RSASSA-PKCS1-v1_5 signatures over the chosen SHA-2 digest.
pub struct RsaSignatureMethod {
    algorithm: RsaAlgorithm,
}

impl RsaSignatureMethod {
    #[must_use]
    pub fn new(algorithm: RsaAlgorithm) -> Self {
        Self { algorithm }
    }

    fn signing_input(header_b64: &str, payload_b64: &str) -> Vec<u8> {
        format!("{header_b64}.{payload_b64}").into_bytes()
    }
}

impl SignatureMethod for RsaSignatureMethod {
    type SigningKey = RsaPrivateKey;
    type VerifyingKey = RsaPublicKey;

    fn algorithm(&self) -> &str {
        self.algorithm.as_str()
    }

    fn calculate(
        &self,
        header_b64: &str,
        payload_b64: &str,
        key: &Self::SigningKey,
    ) -> JoseResult<String> {
        let message = Self::signing_input(header_b64, payload_b64);
        let signature = match self.algorithm {
            RsaAlgorithm::Rs256 => SigningKey::<Sha256>::new(key.clone()).sign(&message).to_vec(),
            RsaAlgorithm::Rs384 => SigningKey::<Sha384>::new(key.clone()).sign(&message).to_vec(),
            RsaAlgorithm::Rs512 => SigningKey::<Sha512>::new(key.clone()).sign(&message).to_vec(),
        };
        Ok(base64url_encode(signature))
    }

    fn verify(
        &self,
        signature_b64: &str,
        header_b64: &str,
        payload_b64: &str,
        key: &Self::VerifyingKey,
    ) -> JoseResult<bool> {
        let Ok(signature_bytes) = base64url_decode(signature_b64) else {
            return Ok(false);
        };
        let signature = match Signature::try_from(signature_bytes.as_slice()) {
            Ok(signature) => signature,
            Err(_) => return Ok(false),
        };
        let message = Self::signing_input(header_b64, payload_b64);
        let verified = match self.algorithm {
            RsaAlgorithm::Rs256 => VerifyingKey::<Sha256>::new(key.clone())
                .verify(&message, &signature)
                .is_ok(),
            RsaAlgorithm::Rs384 => VerifyingKey::<Sha384>::new(key.clone())
                .verify(&message, &signature)
                .is_ok(),
            RsaAlgorithm::Rs512 => VerifyingKey::<Sha512>::new(key.clone())
                .verify(&message, &signature)
                .is_ok(),
        };
        Ok(verified)
    }
}

impl From<rsa::Error> for JoseError {
    fn from(error: rsa::Error) -> Self {
        Self::crypto(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    fn key_pair() -> (RsaPrivateKey, RsaPublicKey) {
        let private_key = RsaPrivateKey::new(&mut OsRng, 2048).expect("key generation");
        let public_key = private_key.to_public_key();
        (private_key, public_key)
    }

    #[test]
    fn test_sign_and_verify_all_digests() {
        let (private_key, public_key) = key_pair();
        for algorithm in [RsaAlgorithm::Rs256, RsaAlgorithm::Rs384, RsaAlgorithm::Rs512] {
            let method = RsaSignatureMethod::new(algorithm);
            let signature = method
                .calculate("aGVhZGVy", "cGF5bG9hZA", &private_key)
                .expect("signs");
            assert!(
                method
                    .verify(&signature, "aGVhZGVy", "cGF5bG9hZA", &public_key)
                    .expect("runs"),
                "{} round trip",
                algorithm.as_str()
            );
            assert!(!method
                .verify(&signature, "aGVhZGVy", "dGFtcGVyZWQ", &public_key)
                .expect("runs"));
        }
    }

    #[test]
    fn test_garbage_signature_fails_clean() {
        let (_, public_key) = key_pair();
        let method = RsaSignatureMethod::new(RsaAlgorithm::Rs256);
        assert!(!method.verify("AAAA", "aA", "bB", &public_key).expect("runs"));
    }
}
