//! Error types for the sha1stream core library
//!
//! This module contains all error types used throughout the library, organized
//! into logical categories for better maintainability and clarity.

use thiserror::Error;

pub mod internal;
pub mod io;
pub mod state;
pub mod validation;

pub use self::io::{IoError, IoErrorKind};
pub use self::state::StateError;
pub use self::validation::ValidationError;
pub use internal::InternalError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the sha1stream core library
///
/// Errors are categorized into four main types:
/// - I/O errors: opening and reading the chunk source
/// - Validation errors: configuration and parsed input
/// - Internal errors: buffer allocation and memory limits
/// - State errors: engine calls made in the wrong lifecycle phase
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error(transparent)]
    Io(#[from] IoError),

    /// Validation related errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Internal library errors
    #[error(transparent)]
    Internal(#[from] InternalError),

    /// Engine lifecycle misuse
    #[error(transparent)]
    State(#[from] StateError),
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io(IoError::from_std(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;
    use std::io;
    use std::path::Path;

    #[test]
    fn test_file_not_found_error_creation() {
        let path = Path::new("/non/existent/file.iso");
        let error = Error::Io(IoError::file_not_found(path));

        match error {
            Error::Io(io_err) => {
                assert_eq!(io_err.kind, IoErrorKind::FileNotFound);
                assert_eq!(io_err.path, Some(path.to_path_buf()));
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_state_error_conversion() {
        let error: Error = StateError::AlreadyFinished { operation: "update" }.into();

        assert!(matches!(
            error,
            Error::State(StateError::AlreadyFinished { operation: "update" })
        ));
        assert!(error.to_string().contains("update"));
    }

    #[test]
    fn test_buffer_allocation_error() {
        let error = Error::Internal(InternalError::buffer_allocation(524_288));

        assert!(matches!(
            error,
            Error::Internal(InternalError::BufferAllocation { size: 524_288 })
        ));
        assert!(error.to_string().contains("524288"));
    }

    #[test]
    fn test_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();

        match error {
            Error::Io(io_err) => {
                assert_eq!(io_err.kind, IoErrorKind::FileNotFound);
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_error_source_chain() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "Access denied");
        let path = Path::new("/test/file.iso");
        let error = Error::Io(IoError::permission_denied(path, io_error));

        assert!(error.source().is_some());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_error_display_formatting() {
        let errors = vec![
            Error::Io(IoError::file_not_found(Path::new("test.bin"))),
            Error::Validation(ValidationError::invalid_configuration("Invalid setting")),
            Error::Internal(InternalError::memory_limit_exceeded(1000, 1500)),
            Error::State(StateError::NotFinished),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }
}
