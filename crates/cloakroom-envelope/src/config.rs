//! Envelope configuration: which key, which cipher.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::EnvelopeError;

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// The AEAD construction used to seal tokens.
///
/// Every supported algorithm shares the same shape: a 256-bit key, a
/// 96-bit nonce and a 128-bit tag. That is what lets the token layout
/// (`nonce || ciphertext || tag`) stay identical whichever one you pick.
///
/// The textual identifiers (`"aes-256-gcm"`, `"chacha20-poly1305"`) are
/// what you put in a config file; they're also what `Display` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Algorithm {
    /// AES-256 in Galois/Counter Mode. Hardware accelerated on most
    /// server CPUs.
    #[default]
    #[serde(rename = "aes-256-gcm")]
    Aes256Gcm,

    /// ChaCha20 stream cipher with a Poly1305 authenticator. Constant
    /// time in software, a good pick where AES-NI isn't available.
    #[serde(rename = "chacha20-poly1305")]
    ChaCha20Poly1305,
}

impl Algorithm {
    /// The textual identifier of this algorithm.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aes256Gcm => "aes-256-gcm",
            Self::ChaCha20Poly1305 => "chacha20-poly1305",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = EnvelopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aes-256-gcm" => Ok(Self::Aes256Gcm),
            "chacha20-poly1305" => Ok(Self::ChaCha20Poly1305),
            other => Err(EnvelopeError::Configuration(format!(
                "unsupported algorithm: {other:?}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// EnvelopeConfig
// ---------------------------------------------------------------------------

/// Everything an [`Envelope`](crate::Envelope) needs at construction.
///
/// The key is a hex string (64 hex characters = 32 bytes). It is passed
/// in explicitly; nothing in this crate reads it from the environment.
///
/// `Debug` is implemented by hand so the key never ends up in a log line.
#[derive(Clone, Serialize, Deserialize)]
pub struct EnvelopeConfig {
    /// Hex-encoded 256-bit secret key.
    pub key: String,

    /// Which AEAD to use. Defaults to AES-256-GCM.
    #[serde(default)]
    pub algorithm: Algorithm,
}

impl EnvelopeConfig {
    /// Creates a config for the given hex key and the default algorithm.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            algorithm: Algorithm::default(),
        }
    }

    /// Overrides the algorithm.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}

impl fmt::Debug for EnvelopeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvelopeConfig")
            .field("key", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}
