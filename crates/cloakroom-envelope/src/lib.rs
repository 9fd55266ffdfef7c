//! Authenticated-encryption envelope for Cloakroom.
//!
//! This crate turns a session identifier into an opaque token that's safe
//! to hand to a browser, and turns it back:
//!
//! - **Cipher** ([`TokenCipher`] trait): the interface the session layer
//!   consumes.
//! - **Envelope** ([`Envelope`]): the default implementation: AES-256-GCM
//!   (or ChaCha20-Poly1305) with a random nonce per token, hex-encoded.
//! - **Config** ([`EnvelopeConfig`], [`Algorithm`]): the key and cipher
//!   choice, validated once at startup.
//! - **Errors** ([`EnvelopeError`]): configuration vs. decryption
//!   failures.
//!
//! # Where it fits
//!
//! ```text
//! Session Layer (above)  ← seals identifiers into cookie values
//!     ↕
//! Envelope Layer (this crate)  ← nonce || ciphertext || tag, as hex
//! ```

mod cipher;
mod config;
mod envelope;
mod error;

pub use cipher::TokenCipher;
pub use config::{Algorithm, EnvelopeConfig};
pub use envelope::{Envelope, KEY_LEN, MIN_TOKEN_LEN, NONCE_LEN, TAG_LEN};
pub use error::EnvelopeError;
