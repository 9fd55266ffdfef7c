//! An in-process [`SessionStore`] backed by a `HashMap`.
//!
//! Good for tests, demos, and single-instance deployments where losing
//! every session on restart is acceptable. Payloads are stored as JSON,
//! the same way a remote key-value store would hold them, so a payload
//! that can't round-trip through serde fails here too instead of only in
//! production.
//!
//! # Expiry
//!
//! Entries carry a deadline measured on Tokio's clock. Expired entries are
//! treated as absent the moment their deadline passes, and are physically
//! removed either lazily (when touched) or by [`MemoryStore::purge_expired`].
//! Because it's Tokio's clock, tests can pause and advance time instead
//! of sleeping.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::{SessionStore, StoreConfig, StoreError};

/// One stored session.
#[derive(Debug)]
struct Entry {
    json: String,
    /// `None` when `now + ttl` doesn't fit in an `Instant`, which only
    /// happens for TTLs near the upper clamp. Such entries never expire.
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|deadline| deadline > now)
    }
}

/// A session store that keeps everything in memory.
///
/// The lock is only held for the body of a single operation and never
/// across an `.await` on anything else, so concurrent requests contend
/// only for the duration of a map lookup.
pub struct MemoryStore<T> {
    entries: Mutex<HashMap<String, Entry>>,
    config: StoreConfig,
    ttl: Duration,
    // `fn() -> T` keeps the store `Send + Sync` whatever `T` is; we never
    // hold a `T`, only its JSON.
    _session: PhantomData<fn() -> T>,
}

impl<T> MemoryStore<T> {
    /// Creates an empty store.
    ///
    /// The configured TTL is clamped here; if that changes the value, a
    /// warning is logged so the operator notices the config was ignored.
    pub fn new(config: StoreConfig) -> Self {
        let ttl = config.ttl();
        if ttl.as_secs() != config.ttl_secs {
            tracing::warn!(
                configured_secs = config.ttl_secs,
                effective_secs = ttl.as_secs(),
                "session ttl out of range, clamped"
            );
        }
        Self {
            entries: Mutex::new(HashMap::new()),
            config,
            ttl,
            _session: PhantomData,
        }
    }

    /// Returns the number of live (unexpired) sessions.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        let entries = self.entries.lock().await;
        entries.values().filter(|e| e.is_live(now)).count()
    }

    /// Returns `true` if there are no live sessions.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drops every expired entry, returning how many were removed.
    ///
    /// Not required for correctness (expired entries are already
    /// invisible), only to bound memory. Call it periodically if the store
    /// sees a lot of abandoned sessions.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        let purged = before - entries.len();
        if purged > 0 {
            tracing::debug!(purged, "expired sessions purged");
        }
        purged
    }

    fn deadline(&self, now: Instant) -> Option<Instant> {
        now.checked_add(self.ttl)
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl<T> SessionStore for MemoryStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    type Session = T;

    async fn get(&self, session_id: &str) -> Result<Option<T>, StoreError> {
        let now = Instant::now();
        let json = {
            let mut entries = self.entries.lock().await;
            match entries.get_mut(session_id) {
                Some(entry) if entry.is_live(now) => {
                    // Sliding expiration: every successful read buys the
                    // session another full TTL.
                    entry.expires_at = self.deadline(now);
                    entry.json.clone()
                }
                Some(_) => {
                    entries.remove(session_id);
                    return Ok(None);
                }
                None => return Ok(None),
            }
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    async fn set(&self, session_id: &str, session: &T) -> Result<(), StoreError> {
        // Serialize before taking the lock.
        let json = serde_json::to_string(session)?;
        let entry = Entry {
            json,
            expires_at: self.deadline(Instant::now()),
        };
        self.entries
            .lock()
            .await
            .insert(session_id.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, session_id: &str) -> Result<bool, StoreError> {
        let now = Instant::now();
        let removed = self.entries.lock().await.remove(session_id);
        Ok(removed.is_some_and(|entry| entry.is_live(now)))
    }

    fn config(&self) -> &StoreConfig {
        &self.config
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Unit tests for `MemoryStore`.
    //!
    //! Expiry tests run with Tokio's clock paused (`start_paused = true`)
    //! and move it forward with `tokio::time::advance`, so they take no
    //! wall-clock time and can't flake.

    use serde::Deserialize;

    use super::*;
    use crate::{MAX_TTL, MIN_TTL};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Cart {
        user: String,
        items: Vec<u32>,
    }

    fn cart(user: &str) -> Cart {
        Cart {
            user: user.to_string(),
            items: vec![1, 2, 3],
        }
    }

    /// A store whose sessions live for exactly one minute.
    fn one_minute_store() -> MemoryStore<Cart> {
        MemoryStore::new(StoreConfig::default().with_ttl(Duration::from_secs(60)))
    }

    // =====================================================================
    // construction
    // =====================================================================

    #[test]
    fn test_new_clamps_short_ttl_up_to_minimum() {
        let store: MemoryStore<Cart> =
            MemoryStore::new(StoreConfig::default().with_ttl(Duration::from_secs(5)));
        assert_eq!(store.ttl(), MIN_TTL);
    }

    #[test]
    fn test_new_clamps_huge_ttl_down_to_maximum() {
        let thousand_years = Duration::from_secs(1000 * 365 * 24 * 60 * 60);
        let store: MemoryStore<Cart> =
            MemoryStore::new(StoreConfig::default().with_ttl(thousand_years));
        assert_eq!(store.ttl(), MAX_TTL);
    }

    #[test]
    fn test_default_uses_default_config() {
        let store: MemoryStore<Cart> = MemoryStore::default();
        assert_eq!(store.cookie_name(), "session");
        assert_eq!(store.config(), &StoreConfig::default());
    }

    // =====================================================================
    // get() / set()
    // =====================================================================

    #[tokio::test]
    async fn test_get_unknown_id_returns_none() {
        let store = one_minute_store();
        assert_eq!(store.get("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get_returns_payload() {
        let store = one_minute_store();

        store.set("a", &cart("alice")).await.unwrap();

        assert_eq!(store.get("a").await.unwrap(), Some(cart("alice")));
    }

    #[tokio::test]
    async fn test_set_overwrites_existing_payload() {
        let store = one_minute_store();
        store.set("a", &cart("alice")).await.unwrap();

        store.set("a", &cart("bob")).await.unwrap();

        assert_eq!(store.get("a").await.unwrap(), Some(cart("bob")));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_payload_of_wrong_shape_returns_serialization_error() {
        let store = one_minute_store();
        store.entries.lock().await.insert(
            "a".to_string(),
            Entry {
                json: "\"just text\"".to_string(),
                expires_at: None,
            },
        );

        let result = store.get("a").await;

        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }

    // =====================================================================
    // expiry
    // =====================================================================

    #[tokio::test(start_paused = true)]
    async fn test_get_after_ttl_returns_none() {
        let store = one_minute_store();
        store.set("a", &cart("alice")).await.unwrap();

        tokio::time::advance(Duration::from_secs(61)).await;

        assert_eq!(store.get("a").await.unwrap(), None);
        assert!(store.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_refreshes_ttl() {
        // 40s + 40s is past the original 60s deadline, but the read in
        // between pushed the deadline out.
        let store = one_minute_store();
        store.set("a", &cart("alice")).await.unwrap();

        tokio::time::advance(Duration::from_secs(40)).await;
        assert!(store.get("a").await.unwrap().is_some());

        tokio::time::advance(Duration::from_secs(40)).await;
        assert!(
            store.get("a").await.unwrap().is_some(),
            "read should have extended the session"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_is_not_revived_by_get() {
        let store = one_minute_store();
        store.set("a", &cart("alice")).await.unwrap();
        tokio::time::advance(Duration::from_secs(61)).await;

        assert_eq!(store.get("a").await.unwrap(), None);
        assert_eq!(store.get("a").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired_removes_only_dead_entries() {
        let store = one_minute_store();
        store.set("old", &cart("alice")).await.unwrap();
        tokio::time::advance(Duration::from_secs(50)).await;
        store.set("new", &cart("bob")).await.unwrap();
        tokio::time::advance(Duration::from_secs(20)).await;

        let purged = store.purge_expired().await;

        assert_eq!(purged, 1);
        assert_eq!(store.len().await, 1);
        assert!(store.get("new").await.unwrap().is_some());
    }

    // =====================================================================
    // delete()
    // =====================================================================

    #[tokio::test]
    async fn test_delete_existing_returns_true_and_removes() {
        let store = one_minute_store();
        store.set("a", &cart("alice")).await.unwrap();

        assert!(store.delete("a").await.unwrap());
        assert_eq!(store.get("a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_an_error() {
        let store = one_minute_store();
        store.set("a", &cart("alice")).await.unwrap();

        assert!(store.delete("a").await.unwrap());
        assert!(!store.delete("a").await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_expired_entry_returns_false() {
        let store = one_minute_store();
        store.set("a", &cart("alice")).await.unwrap();
        tokio::time::advance(Duration::from_secs(61)).await;

        assert!(!store.delete("a").await.unwrap());
    }

    // =====================================================================
    // cookie helpers
    // =====================================================================

    #[test]
    fn test_cookie_strings_use_store_config() {
        let store: MemoryStore<Cart> =
            MemoryStore::new(StoreConfig::default().with_cookie_name("cart_sid"));

        assert_eq!(store.cookie_name(), "cart_sid");
        assert!(store.create_cookie_string("tok").starts_with("cart_sid=tok"));
        assert!(store.reset_cookie().starts_with("cart_sid=;"));
        assert!(store.reset_cookie().contains("Max-Age=0"));
    }
}
