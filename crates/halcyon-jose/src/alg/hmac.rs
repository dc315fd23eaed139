//! HMAC-SHA256 signature strategy (`HS256`).

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::alg::SymmetricKey;
use crate::codec::{base64url_decode, base64url_encode};
use crate::error::{JoseError, JoseResult};
use crate::jws::SignatureMethod;

type HmacSha256 = Hmac<Sha256>;

/// `HS256`: HMAC over SHA-256 with a shared symmetric key.
pub struct HmacSha256SignatureMethod;

impl HmacSha256SignatureMethod {
    fn mac(key: &SymmetricKey) -> JoseResult<HmacSha256> {
        HmacSha256::new_from_slice(key.as_bytes())
            .map_err(|_| JoseError::crypto("invalid HMAC key length"))
    }
}

impl SignatureMethod for HmacSha256SignatureMethod {
    type SigningKey = SymmetricKey;
    type VerifyingKey = SymmetricKey;

    fn algorithm(&self) -> &str {
        "HS256"
    }

    fn calculate(
        &self,
        header_b64: &str,
        payload_b64: &str,
        key: &Self::SigningKey,
    ) -> JoseResult<String> {
        let mut mac = Self::mac(key)?;
        mac.update(format!("{header_b64}.{payload_b64}").as_bytes());
        Ok(base64url_encode(mac.finalize().into_bytes()))
    }

    fn verify(
        &self,
        signature_b64: &str,
        header_b64: &str,
        payload_b64: &str,
        key: &Self::VerifyingKey,
    ) -> JoseResult<bool> {
        let Ok(signature) = base64url_decode(signature_b64) else {
            return Ok(false);
        };
        let mut mac = Self::mac(key)?;
        mac.update(format!("{header_b64}.{payload_b64}").as_bytes());
        Ok(mac.verify_slice(&signature).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_and_verify() {
        let key = SymmetricKey::new(b"0123456789abcdef0123456789abcdef".to_vec());
        let method = HmacSha256SignatureMethod;

        let signature = method.calculate("aGVhZGVy", "cGF5bG9hZA", &key).expect("signs");
        assert!(method.verify(&signature, "aGVhZGVy", "cGF5bG9hZA", &key).expect("runs"));
        assert!(!method.verify(&signature, "aGVhZGVy", "b3RoZXI", &key).expect("runs"));
    }

    #[test]
    fn test_deterministic_signature() {
        let key = SymmetricKey::new(b"another-secret".to_vec());
        let method = HmacSha256SignatureMethod;
        let first = method.calculate("aA", "bB", &key).expect("signs");
        let second = method.calculate("aA", "bB", &key).expect("signs");
        assert_eq!(first, second);
    }

    #[test]
    fn test_undecodable_signature_fails_clean() {
        let key = SymmetricKey::new(b"secret".to_vec());
        let verified = HmacSha256SignatureMethod
            .verify("!!!not-base64url!!!", "aA", "bB", &key)
            .expect("runs");
        assert!(!verified);
    }
}
