//! Session orchestration for Cloakroom.
//!
//! This crate ties the envelope and the store together into the four
//! things a web handler actually does with a session:
//!
//! 1. **Create**: store a payload under a new identifier, hand back an
//!    opaque token for the cookie
//! 2. **Resolve**: turn a cookie value back into the session, degrading
//!    to "no session" for anything that doesn't check out
//! 3. **Update**: overwrite the payload, identifier unchanged
//! 4. **Delete**: drop the session and clear the cookie
//!
//! # How it fits in the stack
//!
//! ```text
//! Your HTTP handlers (above)  ← cookie in, Set-Cookie out
//!     ↕
//! Session Layer (this crate)  ← SessionHandler
//!     ↕                ↕
//! Envelope Layer    Store Layer
//! ```

mod error;
mod handler;
mod session;

pub use error::SessionError;
pub use handler::SessionHandler;
pub use session::ActiveSession;
