//! The session handler: one object that owns a store and a cipher.
//!
//! Every public operation here is a short, strictly ordered composition
//! of store calls and cipher calls. The ordering is the whole point:
//!
//! - `create` writes to the store *before* producing a token, so a client
//!   can never hold a token for a session that isn't recorded yet. If the
//!   caller's request is cancelled mid-write, the future is dropped before
//!   any token exists.
//! - `resolve` decrypts *before* touching the store, so forged cookies
//!   cost one AEAD check and no I/O.
//! - `delete_and_clear` always returns the clearing cookie, whether or not
//!   the session existed, so the response doesn't reveal which it was.
//!
//! # Concurrency note
//!
//! `SessionHandler` holds no locks and no mutable state of its own. Share
//! it behind an `Arc` across request tasks. Concurrent writes to the same
//! session are last-write-wins, exactly as the store orders them.

use std::collections::HashMap;

use cloakroom_envelope::{Envelope, TokenCipher};
use cloakroom_store::SessionStore;

use crate::session::generate_session_id;
use crate::{ActiveSession, SessionError};

/// Creates, resolves, updates and deletes cookie-backed sessions.
///
/// ## Lifecycle
///
/// ```text
///                 create()
///  [Nonexistent] ─────────→ [Active] ──┐ read() / update()
///        ↑                     │  ↑    │ (TTL slides)
///        │  delete_and_clear() │  └────┘
///        └─────────────────────┘
///          (or TTL expiry, outside our control)
/// ```
///
/// There is no "rotate": a new identifier means `delete_and_clear` then
/// `create`, sequenced by the caller.
pub struct SessionHandler<S, C = Envelope> {
    store: S,
    cipher: C,
}

impl<S, C> SessionHandler<S, C>
where
    S: SessionStore,
    C: TokenCipher,
{
    /// Creates a handler over the given store and cipher.
    pub fn new(store: S, cipher: C) -> Self {
        Self { store, cipher }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The underlying cipher.
    pub fn cipher(&self) -> &C {
        &self.cipher
    }

    /// Starts a new session holding `session`, returning the opaque token
    /// to put in the cookie.
    ///
    /// # Errors
    /// - [`SessionError::Store`]: the write failed; no token is produced
    /// - [`SessionError::Envelope`]: sealing failed; the just-written
    ///   entry is removed again so no session is left without a cookie
    pub async fn create(
        &self,
        session: &S::Session,
    ) -> Result<String, SessionError> {
        let session_id = generate_session_id();

        // The write has to land before a token exists.
        self.store.set(&session_id, session).await?;

        let token = match self.cipher.encrypt(&session_id) {
            Ok(token) => token,
            Err(e) => {
                if let Err(cleanup) = self.store.delete(&session_id).await {
                    tracing::warn!(
                        %session_id,
                        error = %cleanup,
                        "failed to remove session after encryption error"
                    );
                }
                return Err(e.into());
            }
        };

        tracing::info!(%session_id, "session created");
        Ok(token)
    }

    /// Looks up the session behind a cookie value.
    ///
    /// Returns `Ok(None)` when:
    /// - there's no cookie value (or it's empty),
    /// - the value doesn't decrypt (malformed, tampered, other key),
    /// - it decrypts, but the store has no such session (deleted or
    ///   expired).
    ///
    /// A bad cookie is never an error here: attacker-controlled input
    /// must not be able to fail the request.
    ///
    /// # Errors
    /// Only [`SessionError::Store`], when the lookup itself fails.
    pub async fn resolve(
        &self,
        cookie_value: Option<&str>,
    ) -> Result<Option<ActiveSession<S::Session>>, SessionError> {
        let Some(token) = cookie_value.filter(|v| !v.is_empty()) else {
            return Ok(None);
        };
        let Some(session_id) = self.session_id(token) else {
            return Ok(None);
        };

        match self.store.get(&session_id).await? {
            Some(session) => Ok(Some(ActiveSession {
                session_id,
                session,
            })),
            None => {
                tracing::debug!(%session_id, "session cookie is stale");
                Ok(None)
            }
        }
    }

    /// Like [`resolve`](Self::resolve), picking the value out of a parsed
    /// cookie map by this store's cookie name.
    pub async fn resolve_from_cookies(
        &self,
        cookies: &HashMap<String, String>,
    ) -> Result<Option<ActiveSession<S::Session>>, SessionError> {
        let value = cookies.get(self.store.cookie_name()).map(String::as_str);
        self.resolve(value).await
    }

    /// Decrypts a token back to its session identifier, or `None` if it
    /// isn't one of ours.
    ///
    /// Says nothing about whether the session still exists.
    pub fn session_id(&self, token: &str) -> Option<String> {
        match self.cipher.decrypt(token) {
            Ok(session_id) => Some(session_id),
            Err(e) if e.is_decryption_failure() => {
                tracing::debug!(error = %e, "session cookie rejected");
                None
            }
            Err(e) => {
                // A custom cipher reporting something other than a bad
                // token. Still not the client's problem.
                tracing::warn!(error = %e, "session cookie could not be decrypted");
                None
            }
        }
    }

    /// Reads a session by identifier, refreshing its TTL.
    pub async fn read(
        &self,
        session_id: &str,
    ) -> Result<Option<S::Session>, SessionError> {
        Ok(self.store.get(session_id).await?)
    }

    /// Replaces the payload of an existing session.
    ///
    /// Doesn't check that the session exists: updating an unknown id
    /// creates it. Only pass identifiers you got from
    /// [`resolve`](Self::resolve).
    pub async fn update(
        &self,
        session_id: &str,
        session: &S::Session,
    ) -> Result<(), SessionError> {
        Ok(self.store.set(session_id, session).await?)
    }

    /// Removes a session from the store. Returns `true` if it existed.
    pub async fn delete(&self, session_id: &str) -> Result<bool, SessionError> {
        Ok(self.store.delete(session_id).await?)
    }

    /// Removes a session and returns the `Set-Cookie` value that clears
    /// the client's cookie.
    ///
    /// The clearing cookie comes back whether or not the session existed.
    pub async fn delete_and_clear(
        &self,
        session_id: &str,
    ) -> Result<String, SessionError> {
        let existed = self.store.delete(session_id).await?;
        tracing::info!(%session_id, existed, "session deleted");
        Ok(self.store.reset_cookie())
    }

    /// Seals an identifier directly, for callers that manage identifiers
    /// themselves.
    pub fn encrypt(&self, session_id: &str) -> Result<String, SessionError> {
        Ok(self.cipher.encrypt(session_id)?)
    }

    /// The session cookie's name.
    pub fn cookie_name(&self) -> &str {
        self.store.cookie_name()
    }

    /// The `Set-Cookie` value that hands `token` to the client.
    pub fn create_cookie_string(&self, token: &str) -> String {
        self.store.create_cookie_string(token)
    }
}

// =========================================================================
// Tests
// =========================================================================
