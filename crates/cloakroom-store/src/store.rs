//! The [`SessionStore`] trait: what the session layer needs from storage.
//!
//! Cloakroom doesn't care where sessions live: Redis, SQLite, DynamoDB,
//! a `HashMap` in the same process. It only needs the handful of
//! operations below. Implement this trait for your backend and the
//! session layer works unchanged on top of it.

use std::future::Future;
use std::time::Duration;

use crate::{StoreConfig, StoreError, set_cookie};

/// Key-value storage for session payloads, with sliding expiration.
///
/// # Trait bounds
///
/// - `Send + Sync + 'static` → one store is shared by every request task
///   for the lifetime of the server.
/// - The futures returned by each method are `Send`, so handlers can be
///   spawned onto Tokio's multi-threaded runtime.
///
/// # Contract
///
/// - [`get`](Self::get) refreshes the entry's TTL when it finds one.
/// - [`set`](Self::set) upserts with the configured TTL. Concurrent
///   writes to the same id are last-write-wins.
/// - [`delete`](Self::delete) is idempotent.
/// - TTL is advisory expiry, not a consistency guarantee.
///
/// # Example
///
/// Implementations can use `async fn` directly:
///
/// ```rust
/// use cloakroom_store::{SessionStore, StoreConfig, StoreError};
///
/// /// A store that never remembers anything.
/// struct NullStore(StoreConfig);
///
/// impl SessionStore for NullStore {
///     type Session = String;
///
///     async fn get(&self, _id: &str) -> Result<Option<String>, StoreError> {
///         Ok(None)
///     }
///
///     async fn set(&self, _id: &str, _session: &String) -> Result<(), StoreError> {
///         Ok(())
///     }
///
///     async fn delete(&self, _id: &str) -> Result<bool, StoreError> {
///         Ok(false)
///     }
///
///     fn config(&self) -> &StoreConfig {
///         &self.0
///     }
/// }
/// ```
pub trait SessionStore: Send + Sync + 'static {
    /// The application's session payload.
    type Session: Send + Sync + 'static;

    /// Loads the payload stored under `session_id`, refreshing its TTL.
    ///
    /// # Returns
    /// - `Ok(Some(_))`: the session exists (and now lives another TTL)
    /// - `Ok(None)`: never existed, deleted, or expired
    fn get(
        &self,
        session_id: &str,
    ) -> impl Future<Output = Result<Option<Self::Session>, StoreError>> + Send;

    /// Stores `session` under `session_id`, replacing any previous value.
    fn set(
        &self,
        session_id: &str,
        session: &Self::Session,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Removes the session. Returns `true` if a live entry was removed.
    fn delete(
        &self,
        session_id: &str,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// The configuration this store was built with.
    fn config(&self) -> &StoreConfig;

    /// The effective (clamped) session lifetime.
    fn ttl(&self) -> Duration {
        self.config().ttl()
    }

    /// The name of the session cookie.
    fn cookie_name(&self) -> &str {
        &self.config().cookie.name
    }

    /// A `Set-Cookie` value that hands `token` to the client.
    fn create_cookie_string(&self, token: &str) -> String {
        set_cookie::session_cookie(self.config(), token)
    }

    /// A `Set-Cookie` value that clears the session cookie.
    fn reset_cookie(&self) -> String {
        set_cookie::removal_cookie(self.config())
    }
}
