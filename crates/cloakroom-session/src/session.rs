//! Session types handed back to callers.

/// A session found through a valid cookie.
///
/// Both halves are always present together: if the cookie didn't decrypt,
/// or decrypted to an identifier the store no longer has, you get `None`
/// instead of a half-filled struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession<T> {
    /// The internal identifier. Never sent to the client as-is; use it
    /// for [`update`](crate::SessionHandler::update) and
    /// [`delete_and_clear`](crate::SessionHandler::delete_and_clear).
    pub session_id: String,

    /// The application payload, as last written.
    pub session: T,
}

/// Generates a fresh session identifier.
///
/// A UUIDv7: 74 random bits behind a millisecond timestamp. Uniqueness is
/// the only property callers rely on; the time ordering is incidental.
pub(crate) fn generate_session_id() -> String {
    uuid::Uuid::now_v7().hyphenated().to_string()
}
