//! The [`TokenCipher`] trait: the seam between sessions and cryptography.
//!
//! The session layer doesn't care HOW an identifier becomes an opaque
//! token. It only needs something that can turn a string into a token and
//! back. [`Envelope`](crate::Envelope) is the implementation you want in
//! almost every case, but a host that already has its own sealing scheme
//! (a KMS, an HSM-backed service) can plug it in here instead.

use crate::EnvelopeError;

/// Seals short strings into opaque tokens and opens them again.
///
/// ## Trait bounds explained
///
/// - `Send + Sync` → one cipher is shared by every request task.
/// - `'static` → it owns its key material; nothing is borrowed.
///
/// ## Contract
///
/// - `decrypt(encrypt(s)) == s` for every `s`.
/// - Two calls to `encrypt` with the same input should produce different
///   tokens.
/// - `decrypt` must reject any token it did not produce, returning an
///   error for which [`EnvelopeError::is_decryption_failure`] is `true`.
pub trait TokenCipher: Send + Sync + 'static {
    /// Seals `plaintext` into a token.
    ///
    /// # Errors
    /// Returns [`EnvelopeError::EncryptionFailed`] if the input can't be
    /// sealed.
    fn encrypt(&self, plaintext: &str) -> Result<String, EnvelopeError>;

    /// Opens a token produced by [`encrypt`](Self::encrypt).
    ///
    /// # Errors
    /// - [`EnvelopeError::InvalidFormat`]: not a well-formed token
    /// - [`EnvelopeError::AuthenticationFailed`]: tampered or foreign
    fn decrypt(&self, token: &str) -> Result<String, EnvelopeError>;
}
