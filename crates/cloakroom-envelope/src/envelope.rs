//! The default [`TokenCipher`]: AEAD over a hex-encoded blob.
//!
//! # Token layout
//!
//! ```text
//! byte:  0          12                       len-16        len
//!        ├──nonce───┼──────ciphertext────────┼─────tag──────┤
//! ```
//!
//! The whole thing is hex-encoded so it can sit in a cookie without any
//! further escaping. The smallest possible token (empty plaintext) is
//! 28 bytes, i.e. 56 hex characters.

use std::fmt;

use aes_gcm::Aes256Gcm;
use aes_gcm::aead::{self, Aead, KeyInit};
use chacha20poly1305::ChaCha20Poly1305;
use rand::Rng;

use crate::{Algorithm, EnvelopeConfig, EnvelopeError, TokenCipher};

/// Length of the random nonce, in bytes (96 bits).
pub const NONCE_LEN: usize = 12;

/// Length of the authentication tag, in bytes (128 bits).
pub const TAG_LEN: usize = 16;

/// Length of the secret key, in bytes (256 bits).
pub const KEY_LEN: usize = 32;

/// The shortest decodable token: a nonce and a tag around nothing.
pub const MIN_TOKEN_LEN: usize = NONCE_LEN + TAG_LEN;

/// The keyed cipher instance. Built once, reused for every call.
#[derive(Clone)]
enum Sealer {
    Aes256Gcm(Box<Aes256Gcm>),
    ChaCha20Poly1305(Box<ChaCha20Poly1305>),
}

/// Turns session identifiers into opaque, tamper-evident tokens.
///
/// Holds the keyed AEAD; construct it once at startup and share it.
///
/// ## Example
///
/// ```rust
/// use cloakroom_envelope::{Envelope, EnvelopeConfig, TokenCipher};
///
/// let key = "00".repeat(32);
/// let envelope = Envelope::new(&EnvelopeConfig::new(key)).unwrap();
///
/// let token = envelope.encrypt("11111111-1111-1111-1111-111111111111").unwrap();
/// assert_eq!(
///     envelope.decrypt(&token).unwrap(),
///     "11111111-1111-1111-1111-111111111111"
/// );
/// ```
#[derive(Clone)]
pub struct Envelope {
    sealer: Sealer,
    algorithm: Algorithm,
}

impl Envelope {
    /// Builds an envelope from a config.
    ///
    /// # Errors
    /// Returns [`EnvelopeError::Configuration`] if the key is empty, not
    /// valid hex, or not exactly 32 bytes long. Treat this as fatal.
    pub fn new(config: &EnvelopeConfig) -> Result<Self, EnvelopeError> {
        Self::from_hex_key(&config.key, config.algorithm)
    }

    /// Builds an envelope from a hex key and an algorithm.
    pub fn from_hex_key(
        key_hex: &str,
        algorithm: Algorithm,
    ) -> Result<Self, EnvelopeError> {
        let key_hex = key_hex.trim();
        if key_hex.is_empty() {
            return Err(EnvelopeError::Configuration(
                "encryption key is not set".into(),
            ));
        }

        let key = hex::decode(key_hex).map_err(|e| {
            EnvelopeError::Configuration(format!("encryption key is not valid hex: {e}"))
        })?;
        if key.len() != KEY_LEN {
            return Err(EnvelopeError::Configuration(format!(
                "encryption key must be {KEY_LEN} bytes, got {}",
                key.len()
            )));
        }

        // `new_from_slice` only fails on a length mismatch, which we've
        // already ruled out, but mapping it keeps this path panic-free.
        let invalid =
            |_| EnvelopeError::Configuration("invalid key length".into());
        let sealer = match algorithm {
            Algorithm::Aes256Gcm => Sealer::Aes256Gcm(Box::new(
                Aes256Gcm::new_from_slice(&key).map_err(invalid)?,
            )),
            Algorithm::ChaCha20Poly1305 => Sealer::ChaCha20Poly1305(Box::new(
                ChaCha20Poly1305::new_from_slice(&key).map_err(invalid)?,
            )),
        };

        tracing::debug!(%algorithm, "encryption envelope initialized");
        Ok(Self { sealer, algorithm })
    }

    /// The algorithm this envelope seals with.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
}

impl TokenCipher for Envelope {
    fn encrypt(&self, plaintext: &str) -> Result<String, EnvelopeError> {
        // A fresh nonce for every call. `rand::rng()` is a CSPRNG seeded
        // from the OS, so two calls never share a nonce in practice
        // (collision odds are 2^-96 per pair).
        let nonce: [u8; NONCE_LEN] = rand::rng().random();

        // The AEAD returns `ciphertext || tag`, which is exactly the tail
        // of our layout. We only need to prepend the nonce.
        let sealed = match &self.sealer {
            Sealer::Aes256Gcm(c) => seal(c.as_ref(), &nonce, plaintext.as_bytes()),
            Sealer::ChaCha20Poly1305(c) => {
                seal(c.as_ref(), &nonce, plaintext.as_bytes())
            }
        }
        .map_err(|_| EnvelopeError::EncryptionFailed)?;

        let mut token = Vec::with_capacity(NONCE_LEN + sealed.len());
        token.extend_from_slice(&nonce);
        token.extend_from_slice(&sealed);
        Ok(hex::encode(token))
    }

    fn decrypt(&self, token: &str) -> Result<String, EnvelopeError> {
        let bytes = hex::decode(token)
            .map_err(|_| EnvelopeError::InvalidFormat("token is not valid hex"))?;
        if bytes.len() < MIN_TOKEN_LEN {
            return Err(EnvelopeError::InvalidFormat("token is too short"));
        }

        let (nonce, sealed) = bytes.split_at(NONCE_LEN);
        let plaintext = match &self.sealer {
            Sealer::Aes256Gcm(c) => open(c.as_ref(), nonce, sealed),
            Sealer::ChaCha20Poly1305(c) => open(c.as_ref(), nonce, sealed),
        }
        .map_err(|_| EnvelopeError::AuthenticationFailed)?;

        String::from_utf8(plaintext)
            .map_err(|_| EnvelopeError::InvalidFormat("plaintext is not UTF-8"))
    }
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

/// Encrypts with any AEAD whose nonce is [`NONCE_LEN`] bytes.
fn seal<A: Aead>(
    cipher: &A,
    nonce: &[u8; NONCE_LEN],
    plaintext: &[u8],
) -> Result<Vec<u8>, aead::Error> {
    cipher.encrypt(aead::Nonce::<A>::from_slice(nonce), plaintext)
}

/// Decrypts `ciphertext || tag` under the given nonce.
fn open<A: Aead>(
    cipher: &A,
    nonce: &[u8],
    sealed: &[u8],
) -> Result<Vec<u8>, aead::Error> {
    cipher.decrypt(aead::Nonce::<A>::from_slice(nonce), sealed)
}

// =========================================================================
// Tests
// =========================================================================
