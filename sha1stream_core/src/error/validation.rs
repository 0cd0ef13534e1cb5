//! Validation related error types

use thiserror::Error;

/// Validation and configuration errors
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Text that does not parse as a 20-byte digest
    #[error("Invalid digest '{input}': {reason}")]
    InvalidDigest { input: String, reason: String },
}

impl ValidationError {
    /// Create an invalid configuration error
    pub fn invalid_configuration(message: &str) -> Self {
        Self::InvalidConfiguration {
            message: message.to_string(),
        }
    }

    /// Create an invalid digest error
    pub fn invalid_digest(input: &str, reason: &str) -> Self {
        Self::InvalidDigest {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_configuration_error() {
        let error = ValidationError::invalid_configuration("Bad config");
        assert!(error.to_string().contains("Invalid configuration"));
        assert!(error.to_string().contains("Bad config"));
    }

    #[test]
    fn test_invalid_digest_error() {
        let error = ValidationError::invalid_digest("xyz", "expected 40 hex digits");
        assert!(error.to_string().contains("Invalid digest 'xyz'"));
        assert!(error.to_string().contains("40 hex digits"));
    }
}
