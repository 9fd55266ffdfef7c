//! Error types for the envelope layer.
//!
//! Two very different kinds of failure live here:
//!
//! - **Configuration** errors happen once, at startup, when the key or
//!   algorithm is unusable. They should stop the process from serving.
//! - **Decryption** errors happen per request, whenever a client presents
//!   a token we didn't issue (or issued and someone modified). They are
//!   routine and must never crash request handling.

/// Errors that can occur while building an envelope or using it.
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    /// The key or algorithm is missing or invalid.
    ///
    /// Returned only from constructors. There is no way to recover from
    /// this at request time.
    #[error("envelope configuration error: {0}")]
    Configuration(String),

    /// The token is not valid hex, or is too short to contain a nonce
    /// and an authentication tag.
    #[error("invalid token format: {0}")]
    InvalidFormat(&'static str),

    /// The authentication tag did not verify. The token was tampered
    /// with or was sealed under a different key or algorithm.
    #[error("token authentication failed")]
    AuthenticationFailed,

    /// The AEAD refused to seal the plaintext (input beyond the cipher's
    /// length limits).
    #[error("token encryption failed")]
    EncryptionFailed,
}

impl EnvelopeError {
    /// Returns `true` for the errors a forged or corrupted token produces.
    ///
    /// Callers that resolve tokens from untrusted input should treat every
    /// one of these the same way: as "no token at all".
    pub fn is_decryption_failure(&self) -> bool {
        matches!(self, Self::InvalidFormat(_) | Self::AuthenticationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_decryption_failure_groups_format_and_auth() {
        assert!(EnvelopeError::InvalidFormat("short").is_decryption_failure());
        assert!(EnvelopeError::AuthenticationFailed.is_decryption_failure());
        assert!(!EnvelopeError::Configuration("no key".into()).is_decryption_failure());
        assert!(!EnvelopeError::EncryptionFailed.is_decryption_failure());
    }

    #[test]
    fn test_display_does_not_leak_details_for_auth_failure() {
        let msg = EnvelopeError::AuthenticationFailed.to_string();
        assert_eq!(msg, "token authentication failed");
    }
}
