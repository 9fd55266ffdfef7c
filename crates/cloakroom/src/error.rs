//! Unified error type for the Cloakroom facade.

use cloakroom_envelope::EnvelopeError;
use cloakroom_session::SessionError;
use cloakroom_store::StoreError;

/// Top-level error that wraps every layer's errors.
///
/// When using the `cloakroom` facade you deal with this single type
/// instead of importing one from each sub-crate. The `#[from]` attributes
/// let `?` convert sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum CloakroomError {
    /// Bad key or algorithm (at startup), or a sealing failure.
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    /// The backing store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A session operation failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The builder was told to read the key from an environment variable
    /// that isn't set (or isn't valid Unicode).
    #[error("environment variable {0} is not set")]
    MissingEnv(String),
}

impl CloakroomError {
    /// Returns `true` if this error means the process is misconfigured
    /// and shouldn't start serving.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingEnv(_) | Self::Envelope(EnvelopeError::Configuration(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_envelope_error() {
        let err: CloakroomError = EnvelopeError::Configuration("no key".into()).into();
        assert!(matches!(err, CloakroomError::Envelope(_)));
        assert!(err.is_configuration());
        assert!(err.to_string().contains("no key"));
    }

    #[test]
    fn test_from_store_error() {
        let err: CloakroomError = StoreError::Unavailable("down".into()).into();
        assert!(matches!(err, CloakroomError::Store(_)));
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_from_session_error() {
        let inner = SessionError::Store(StoreError::Unavailable("down".into()));
        let err: CloakroomError = inner.into();
        assert!(matches!(err, CloakroomError::Session(_)));
        assert_eq!(err.to_string(), "session store unavailable: down");
    }

    #[test]
    fn test_missing_env_names_variable() {
        let err = CloakroomError::MissingEnv("ENCRYPTION_KEY".into());
        assert!(err.is_configuration());
        assert_eq!(err.to_string(), "environment variable ENCRYPTION_KEY is not set");
    }
}
