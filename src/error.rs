//! Error types for the Node Membership Registry
//!
//! Provides structured error types for the registry façade, configuration
//! loading and audit event encoding.

use thiserror::Error;

use crate::domain::NodeAddress;

/// Unified error type for the registry
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Registry Precondition Errors
    // =========================================================================
    #[error("Caller is not the registry authority: {caller}")]
    Unauthorized { caller: NodeAddress },

    #[error("Node already registered: {address}")]
    AlreadyExists { address: NodeAddress },

    #[error("Node not found: {address}")]
    NotFound { address: NodeAddress },

    #[error("Invalid authority target: the zero address cannot hold authority")]
    InvalidTarget,

    // =========================================================================
    // Parse Errors
    // =========================================================================
    #[error("Invalid node address: {0}")]
    InvalidAddress(String),

    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // =========================================================================
    // Configuration / IO Errors
    // =========================================================================
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this error is a rejected registry precondition
    ///
    /// These are caller logic errors: the registry state is untouched.
    pub fn is_precondition_failure(&self) -> bool {
        matches!(
            self,
            Error::Unauthorized { .. }
                | Error::AlreadyExists { .. }
                | Error::NotFound { .. }
                | Error::InvalidTarget
        )
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}

/// Result type alias for the registry
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_classification() {
        let err = Error::NotFound {
            address: NodeAddress::new([7; 20]),
        };
        assert!(err.is_precondition_failure());
        assert!(!err.is_retryable());

        assert!(Error::InvalidTarget.is_precondition_failure());

        let config_err = Error::Configuration("event_capacity must be positive".into());
        assert!(!config_err.is_precondition_failure());
        assert!(!config_err.is_retryable());
    }

    #[test]
    fn test_io_is_retryable() {
        let err = Error::from(std::io::Error::new(std::io::ErrorKind::Interrupted, "eintr"));
        assert!(err.is_retryable());
        assert!(!err.is_precondition_failure());
    }

    #[test]
    fn test_error_messages_carry_address() {
        let address = NodeAddress::new([0xab; 20]);
        let err = Error::AlreadyExists { address };
        assert_eq!(
            err.to_string(),
            format!("Node already registered: 0x{}", "ab".repeat(20))
        );
    }
}
