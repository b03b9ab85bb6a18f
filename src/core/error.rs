//! Error types for the validator.
//!
//! Most operations are total and report problems as negative results. The
//! few that can genuinely fail return [`SecurityError`]:
//!
//! - token generation when the random source is unavailable
//! - signature set construction from invalid patterns or config
//! - attaching listeners to the host page

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SecurityError {
    /// The cryptographically secure random source failed
    #[error("Random source unavailable: {0}")]
    RandomSource(String),

    /// A signature pattern failed to compile
    #[error("Invalid signature '{name}': {reason}")]
    InvalidSignature { name: String, reason: String },

    /// A signature set document could not be parsed
    #[error("Signature config error: {0}")]
    SignatureConfig(#[from] serde_json::Error),

    /// A required browser API was unavailable or rejected the call
    #[error("Environment error: {0}")]
    Environment(String),
}

impl From<getrandom::Error> for SecurityError {
    fn from(err: getrandom::Error) -> Self {
        Self::RandomSource(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SecurityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_signature_displays_name() {
        let err = SecurityError::InvalidSignature {
            name: "broken".into(),
            reason: "unclosed group".into(),
        };
        assert_eq!(err.to_string(), "Invalid signature 'broken': unclosed group");
    }

    #[test]
    fn test_json_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SecurityError = json_err.into();
        assert!(matches!(err, SecurityError::SignatureConfig(_)));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SecurityError>();
    }
}
