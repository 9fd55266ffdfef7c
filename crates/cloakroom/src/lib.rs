//! # Cloakroom
//!
//! Opaque, encrypted session cookies.
//!
//! The client gets a ticket; the coat stays behind the counter. Cloakroom
//! stores your session payload server-side under a random identifier and
//! only ever hands the browser an AEAD-sealed version of that identifier.
//! A forged, tampered, or stale cookie simply resolves to "no session".
//!
//! ## Quick Start
//!
//! ```rust
//! use cloakroom::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), CloakroomError> {
//! let sessions = Cloakroom::builder()
//!     .key("00".repeat(32)) // load a real key from config!
//!     .build_in_memory::<String>()?;
//!
//! // Login: store the payload, send the token as a cookie.
//! let token = sessions.create(&"alice".to_string()).await?;
//! let set_cookie = sessions.create_cookie_string(&token);
//! assert!(set_cookie.starts_with("session="));
//!
//! // Later requests: cookie value in, session out.
//! let active = sessions.resolve(Some(&token)).await?.expect("logged in");
//! assert_eq!(active.session, "alice");
//!
//! // Logout.
//! let clear = sessions.delete_and_clear(&active.session_id).await?;
//! assert!(clear.contains("Max-Age=0"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Crates
//!
//! - [`cloakroom_envelope`]: token encryption
//! - [`cloakroom_store`]: store contract, cookie strings, in-memory store
//! - [`cloakroom_session`]: the session handler

mod builder;
mod error;
mod telemetry;

pub use builder::{Cloakroom, CloakroomBuilder, CloakroomConfig};
pub use error::CloakroomError;
pub use telemetry::init_tracing;

pub use cloakroom_envelope;
pub use cloakroom_session;
pub use cloakroom_store;

/// Everything most applications need, in one import.
pub mod prelude {
    pub use crate::{Cloakroom, CloakroomBuilder, CloakroomConfig, CloakroomError, init_tracing};
    pub use cloakroom_envelope::{Algorithm, Envelope, EnvelopeConfig, TokenCipher};
    pub use cloakroom_session::{ActiveSession, SessionError, SessionHandler};
    pub use cloakroom_store::{
        CookieOptions, MemoryStore, SameSite, SessionStore, StoreConfig, StoreError,
    };
}
