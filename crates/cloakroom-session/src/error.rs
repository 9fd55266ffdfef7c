//! Error types for the session layer.

use cloakroom_envelope::EnvelopeError;
use cloakroom_store::StoreError;

/// Errors that can escape a [`SessionHandler`](crate::SessionHandler)
/// operation.
///
/// Note what's *not* here: a bad cookie. Forged, corrupted, truncated,
/// or stale cookies make [`resolve`](crate::SessionHandler::resolve)
/// return `Ok(None)`, never an error. What remains are faults the
/// operator needs to see.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The cipher failed while sealing an identifier.
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    /// The backing store failed. Passed through untouched; the session
    /// layer never retries.
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_store_error_is_transparent() {
        let err: SessionError = StoreError::Unavailable("redis down".into()).into();
        assert!(matches!(err, SessionError::Store(_)));
        assert_eq!(err.to_string(), "session store unavailable: redis down");
    }

    #[test]
    fn test_from_envelope_error() {
        let err: SessionError = EnvelopeError::EncryptionFailed.into();
        assert!(matches!(err, SessionError::Envelope(_)));
    }
}
