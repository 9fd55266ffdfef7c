//! `Cloakroom` builder: config in, ready-to-use session handler out.
//!
//! This is the one place where configuration turns into live objects. A
//! bad key fails here, at startup, not on the first request.

use std::fmt;

use cloakroom_envelope::{Algorithm, Envelope, EnvelopeConfig};
use cloakroom_session::SessionHandler;
use cloakroom_store::{MemoryStore, SessionStore, StoreConfig};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::CloakroomError;

/// Everything needed to stand up Cloakroom, in one deserializable value.
///
/// Load it from whatever your application already uses for config
/// (TOML, JSON, environment-backed layers) and hand it to
/// [`CloakroomBuilder::config`].
///
/// ```rust
/// use cloakroom::CloakroomConfig;
///
/// let config: CloakroomConfig = serde_json::from_str(r#"{
///     "envelope": { "key": "0000000000000000000000000000000000000000000000000000000000000000" },
///     "store": { "ttl_secs": 3600, "cookie": { "name": "sid" } }
/// }"#).unwrap();
///
/// assert_eq!(config.store.cookie.name, "sid");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloakroomConfig {
    /// Key and algorithm.
    pub envelope: EnvelopeConfig,

    /// Cookie attributes and TTL. Only used by
    /// [`CloakroomBuilder::build_in_memory`]; a store you construct
    /// yourself carries its own.
    #[serde(default)]
    pub store: StoreConfig,
}

/// Where the key comes from.
#[derive(Clone)]
enum KeySource {
    Unset,
    Hex(String),
    Env(String),
}

/// Builder for a [`SessionHandler`].
///
/// # Example
///
/// ```rust
/// use cloakroom::prelude::*;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), CloakroomError> {
/// let sessions = Cloakroom::builder()
///     .key("00".repeat(32))
///     .build_in_memory::<String>()?;
///
/// let token = sessions.create(&"hello".to_string()).await?;
/// let active = sessions.resolve(Some(&token)).await?.unwrap();
/// assert_eq!(active.session, "hello");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CloakroomBuilder {
    key: KeySource,
    algorithm: Algorithm,
    store_config: StoreConfig,
}

impl CloakroomBuilder {
    /// Creates a builder with no key, the default algorithm and the
    /// default store config.
    pub fn new() -> Self {
        Self {
            key: KeySource::Unset,
            algorithm: Algorithm::default(),
            store_config: StoreConfig::default(),
        }
    }

    /// Sets the hex-encoded 256-bit key.
    pub fn key(mut self, key_hex: impl Into<String>) -> Self {
        self.key = KeySource::Hex(key_hex.into());
        self
    }

    /// Reads the hex key from the named environment variable at
    /// [`build`](Self::build) time.
    ///
    /// Nothing reads the environment unless you ask for it here.
    pub fn key_from_env(mut self, var: impl Into<String>) -> Self {
        self.key = KeySource::Env(var.into());
        self
    }

    /// Sets the AEAD algorithm.
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the store config used by [`build_in_memory`](Self::build_in_memory).
    pub fn store_config(mut self, config: StoreConfig) -> Self {
        self.store_config = config;
        self
    }

    /// Applies a whole [`CloakroomConfig`] at once.
    pub fn config(self, config: CloakroomConfig) -> Self {
        self.key(config.envelope.key)
            .algorithm(config.envelope.algorithm)
            .store_config(config.store)
    }

    /// Builds a handler over the given store.
    ///
    /// # Errors
    /// - [`CloakroomError::MissingEnv`]: `key_from_env` named an unset
    ///   variable
    /// - [`CloakroomError::Envelope`]: no key, or an invalid one
    pub fn build<S: SessionStore>(
        self,
        store: S,
    ) -> Result<SessionHandler<S>, CloakroomError> {
        let envelope = self.envelope()?;
        tracing::info!(
            algorithm = %envelope.algorithm(),
            cookie = store.cookie_name(),
            ttl_secs = store.ttl().as_secs(),
            "session handler ready"
        );
        Ok(SessionHandler::new(store, envelope))
    }

    /// Builds a handler over a fresh [`MemoryStore`] using the configured
    /// store config.
    pub fn build_in_memory<T>(
        self,
    ) -> Result<SessionHandler<MemoryStore<T>>, CloakroomError>
    where
        T: Serialize + DeserializeOwned + Send + Sync + 'static,
    {
        let store = MemoryStore::new(self.store_config.clone());
        self.build(store)
    }

    fn envelope(&self) -> Result<Envelope, CloakroomError> {
        let key = match &self.key {
            // An empty key is rejected by the envelope itself, with the
            // same error as any other unusable key.
            KeySource::Unset => String::new(),
            KeySource::Hex(key) => key.clone(),
            KeySource::Env(var) => std::env::var(var)
                .map_err(|_| CloakroomError::MissingEnv(var.clone()))?,
        };
        let config = EnvelopeConfig::new(key).with_algorithm(self.algorithm);
        Ok(Envelope::new(&config)?)
    }
}

impl Default for CloakroomBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CloakroomBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match &self.key {
            KeySource::Unset => "unset".to_string(),
            KeySource::Hex(_) => "<redacted>".to_string(),
            KeySource::Env(var) => format!("env:{var}"),
        };
        f.debug_struct("CloakroomBuilder")
            .field("key", &key)
            .field("algorithm", &self.algorithm)
            .field("store_config", &self.store_config)
            .finish()
    }
}

/// Entry point: `Cloakroom::builder()`.
pub struct Cloakroom;

impl Cloakroom {
    /// Creates a new builder.
    pub fn builder() -> CloakroomBuilder {
        CloakroomBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use cloakroom_envelope::{EnvelopeError, TokenCipher};

    use super::*;

    fn zero_key() -> String {
        "00".repeat(32)
    }

    #[test]
    fn test_build_without_key_fails_fast() {
        let result = Cloakroom::builder().build_in_memory::<String>();
        match result {
            Err(err) => {
                assert!(err.is_configuration());
                assert!(matches!(
                    err,
                    CloakroomError::Envelope(EnvelopeError::Configuration(_))
                ));
            }
            Ok(_) => panic!("a builder without a key must not build"),
        }
    }

    #[test]
    fn test_build_with_bad_key_fails_fast() {
        let result = Cloakroom::builder().key("xyz").build_in_memory::<String>();
        assert!(matches!(result, Err(e) if e.is_configuration()));
    }

    #[test]
    fn test_build_key_from_unset_env_returns_missing_env() {
        let result = Cloakroom::builder()
            .key_from_env("CLOAKROOM_TEST_KEY_THAT_IS_NEVER_SET")
            .build_in_memory::<String>();
        assert!(matches!(
            result,
            Err(CloakroomError::MissingEnv(var)) if var == "CLOAKROOM_TEST_KEY_THAT_IS_NEVER_SET"
        ));
    }

    #[test]
    fn test_build_key_from_env_reads_variable() {
        // Unique name, so no other test can race on it.
        unsafe {
            std::env::set_var("CLOAKROOM_BUILDER_TEST_KEY", zero_key());
        }

        let handler = Cloakroom::builder()
            .key_from_env("CLOAKROOM_BUILDER_TEST_KEY")
            .build_in_memory::<String>()
            .unwrap();

        let token = handler.encrypt("id").unwrap();
        assert_eq!(handler.cipher().decrypt(&token).unwrap(), "id");
    }

    #[test]
    fn test_build_applies_algorithm_and_store_config() {
        let handler = Cloakroom::builder()
            .key(zero_key())
            .algorithm(Algorithm::ChaCha20Poly1305)
            .store_config(StoreConfig::default().with_cookie_name("sid"))
            .build_in_memory::<String>()
            .unwrap();

        assert_eq!(handler.cipher().algorithm(), Algorithm::ChaCha20Poly1305);
        assert_eq!(handler.cookie_name(), "sid");
    }

    #[test]
    fn test_config_deserializes_and_applies() {
        let config: CloakroomConfig = serde_json::from_str(&format!(
            r#"{{"envelope": {{"key": "{}", "algorithm": "chacha20-poly1305"}},
                 "store": {{"ttl_secs": 5}}}}"#,
            zero_key()
        ))
        .unwrap();

        let handler = Cloakroom::builder()
            .config(config)
            .build_in_memory::<String>()
            .unwrap();

        assert_eq!(handler.cipher().algorithm(), Algorithm::ChaCha20Poly1305);
        assert_eq!(handler.store().ttl(), cloakroom_store::MIN_TTL);
    }

    #[test]
    fn test_debug_redacts_key() {
        let printed = format!("{:?}", Cloakroom::builder().key(zero_key()));
        assert!(printed.contains("<redacted>"));
        assert!(!printed.contains(&zero_key()));
    }
}
