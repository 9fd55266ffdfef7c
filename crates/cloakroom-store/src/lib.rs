//! Session storage for Cloakroom.
//!
//! This crate defines what the session layer needs from a backing store,
//! and ships one implementation of it:
//!
//! 1. **Contract**: the [`SessionStore`] trait: get (with sliding
//!    expiration), set, delete, plus cookie helpers
//! 2. **Configuration**: [`StoreConfig`] and [`CookieOptions`], with the
//!    session TTL clamped into a sane range ([`clamp_ttl`])
//! 3. **Cookies**: `Set-Cookie` rendering shared by every store
//! 4. **In-process store**: [`MemoryStore`], for tests, demos and
//!    single-instance servers
//!
//! # How it fits in the stack
//!
//! ```text
//! Session Layer (above)  ← owns a store, calls it once per operation
//!     ↕
//! Store Layer (this crate)  ← id → payload, with TTL
//!     ↕
//! Your backend (below)  ← Redis, SQLite, a HashMap…
//! ```

mod config;
mod error;
mod memory;
mod set_cookie;
mod store;

pub use config::{
    CookieOptions, DEFAULT_COOKIE_NAME, DEFAULT_TTL_SECS, MAX_TTL, MIN_TTL, SameSite,
    StoreConfig, clamp_ttl,
};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use set_cookie::{removal_cookie, session_cookie};
pub use store::SessionStore;
