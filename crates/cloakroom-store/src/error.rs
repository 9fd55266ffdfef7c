//! Error types for the store layer.

/// Errors a [`SessionStore`](crate::SessionStore) can report.
///
/// These are infrastructure faults. The session layer never swallows
/// them; they travel all the way up to whoever called `create`, `read`,
/// `update` or `delete`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store couldn't be reached or refused the operation.
    ///
    /// Concrete stores put their own diagnostic in the message (a Redis
    /// connection error, a locked SQLite file, and so on).
    #[error("session store unavailable: {0}")]
    Unavailable(String),

    /// A payload couldn't be converted to or from its stored form.
    #[error("session serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
