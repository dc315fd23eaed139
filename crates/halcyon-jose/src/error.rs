//! JOSE error taxonomy.
//!
//! Malformed input and algorithm disagreements are separate failure
//! kinds: the first means the bytes never were a token, the second means
//! a well-formed token met the wrong verifier and must fail closed before
//! any cryptography runs.

/// Result alias for JOSE operations.
pub type JoseResult<T> = Result<T, JoseError>;

/// Errors raised by the compact codec and the algorithm strategies.
#[derive(Debug, thiserror::Error)]
pub enum JoseError {
    /// The input is not a valid compact token: wrong segment count,
    /// bytes outside the base64url alphabet, or undecodable JSON.
    #[error("not a valid Token: {reason}")]
    MalformedToken {
        /// What exactly failed to parse.
        reason: String,
    },

    /// The algorithm declared in the token header does not match the
    /// method supplied by the caller.
    #[error("token declares algorithm '{declared}' but method implements '{supplied}'")]
    AlgorithmMismatch {
        /// Algorithm named by the token header.
        declared: String,
        /// Algorithm of the supplied method.
        supplied: String,
    },

    /// The operation was invoked on an incomplete value (no payload to
    /// sign, no algorithm in the header, ...).
    #[error("{0}")]
    IllegalState(String),

    /// A cryptographic primitive failed (bad key length, provider
    /// error).
    #[error("cryptographic operation failed: {0}")]
    Crypto(String),
}

impl JoseError {
    /// Malformed-token error with a reason.
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedToken {
            reason: reason.into(),
        }
    }

    /// Illegal-state error with a message.
    #[must_use]
    pub fn illegal_state(message: impl Into<String>) -> Self {
        Self::IllegalState(message.into())
    }

    /// Crypto-failure error with a message.
    #[must_use]
    pub fn crypto(message: impl Into<String>) -> Self {
        Self::Crypto(message.into())
    }
}
