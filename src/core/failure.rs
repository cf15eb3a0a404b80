//! # Failure Taxonomy
//!
//! Three ways an operation can go wrong, kept apart so the UI can word them
//! differently:
//!
//! ```text
//! FailureReason
//! ├── Invalid(ValidationError)   // input refused before any remote call
//! ├── Rejected(Rejection)        // call completed, service said no
//! └── Unavailable(RemoteError)   // call could not complete
//! ```
//!
//! Controllers never return these; they publish them.

use thiserror::Error;

use crate::remote::RemoteError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("please enter both identifier and password")]
    MissingCredentials,
    #[error("please enter both recipient and amount")]
    MissingFields,
    #[error("please enter a valid amount")]
    InvalidAmount,
    #[error("user ID is missing")]
    MissingSender,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("incorrect credentials")]
    Credentials,
    #[error("transfer refused")]
    Transfer,
    #[error("no account found")]
    NoAccount,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureReason {
    #[error("invalid input: {0}")]
    Invalid(#[from] ValidationError),
    #[error("rejected: {0}")]
    Rejected(#[from] Rejection),
    #[error("unavailable: {0}")]
    Unavailable(#[from] RemoteError),
}

impl FailureReason {
    /// Short text for a transient notification.
    pub fn notice(&self) -> String {
        match self {
            FailureReason::Invalid(e) => format!("Invalid input: {e}"),
            FailureReason::Rejected(Rejection::Credentials) => {
                "Login failed: incorrect credentials".to_string()
            }
            FailureReason::Rejected(Rejection::Transfer) => "Transfer failed".to_string(),
            FailureReason::Rejected(Rejection::NoAccount) => "No account found".to_string(),
            FailureReason::Unavailable(RemoteError::Network(msg)) => {
                format!("Network error: {msg}")
            }
            FailureReason::Unavailable(e) => format!("Service unavailable: {e}"),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, FailureReason::Invalid(_))
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, FailureReason::Rejected(_))
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, FailureReason::Unavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_are_distinguishable() {
        let invalid = FailureReason::from(ValidationError::InvalidAmount);
        let rejected = FailureReason::from(Rejection::Credentials);
        let unavailable = FailureReason::from(RemoteError::Network("refused".into()));

        assert!(invalid.is_validation() && !invalid.is_rejection() && !invalid.is_unavailable());
        assert!(rejected.is_rejection() && !rejected.is_validation());
        assert!(unavailable.is_unavailable() && !unavailable.is_rejection());
    }

    #[test]
    fn test_notice_wording() {
        assert_eq!(
            FailureReason::from(ValidationError::MissingFields).notice(),
            "Invalid input: please enter both recipient and amount"
        );
        assert_eq!(
            FailureReason::from(Rejection::Credentials).notice(),
            "Login failed: incorrect credentials"
        );
        assert_eq!(
            FailureReason::from(RemoteError::Network("connection refused".into())).notice(),
            "Network error: connection refused"
        );
        assert_eq!(
            FailureReason::from(RemoteError::Api {
                status: 500,
                message: "boom".into()
            })
            .notice(),
            "Service unavailable: service error (HTTP 500): boom"
        );
    }
}
