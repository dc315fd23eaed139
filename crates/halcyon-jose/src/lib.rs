//! # halcyon-jose
//!
//! Compact JOSE codec for the Halcyon workspace: JSON Web Tokens,
//! Signatures, and Encryption in their dot-separated base64url forms.
//!
//! The codec is pure string/byte transformation. Cryptography enters
//! only through the strategy traits ([`jws::SignatureMethod`],
//! [`jwe::KeyEncryptMethod`], [`jwe::ContentEncryptMethod`]), and a
//! token's declared algorithm must match the supplied strategy before
//! any primitive is invoked.
//!
//! ## Modules
//!
//! - [`codec`] - base64url and the strict dot-segment split
//! - [`header`] - the shared JOSE header value and builder
//! - [`jwt`] - structured claims sets and the JWT reader/writer
//! - [`jws`] - signed tokens, signing, and fail-closed verification
//! - [`jwe`] - encrypted tokens and the two-stage encrypt/decrypt
//! - [`alg`] - shipped algorithm strategies (HS256, RS256/384/512,
//!   A256KW, RSA-OAEP, A256GCM)

pub mod alg;
pub mod codec;
pub mod error;
pub mod header;
pub mod jwe;
pub mod jws;
pub mod jwt;

pub use alg::{
    AesGcmContentEncryptMethod, AesKeyWrapMethod, HmacSha256SignatureMethod, RsaAlgorithm,
    RsaOaepKeyEncryptMethod, RsaSignatureMethod, SymmetricKey, generate_cek,
};
pub use error::{JoseError, JoseResult};
pub use header::{JoseHeader, JoseHeaderBuilder};
pub use jwe::{
    ContentEncryptMethod, ContentEncryption, Jwe, JweBuilder, JweReader, JweWriter,
    KeyEncryptMethod,
};
pub use jws::{Jws, JwsBuilder, JwsReader, JwsWriter, SignatureMethod};
pub use jwt::{Audience, ClaimsSet, Jwt, JwtBuilder, JwtReader, JwtWriter};
