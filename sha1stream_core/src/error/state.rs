//! Engine lifecycle errors

use thiserror::Error;

/// Calls made against a [`Sha1State`](crate::hashing::Sha1State) in the
/// wrong phase. A rejected call leaves the state untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    /// `update` or `finish` after the digest was finalized
    #[error("Cannot {operation}: digest is already finished (call reset to start over)")]
    AlreadyFinished { operation: &'static str },

    /// `result` before `finish`
    #[error("Digest is not finished yet: call finish before reading the result")]
    NotFinished,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_finished_names_operation() {
        let error = StateError::AlreadyFinished { operation: "finish" };
        assert!(error.to_string().contains("Cannot finish"));
        assert!(error.to_string().contains("reset"));
    }

    #[test]
    fn test_not_finished_message() {
        assert!(StateError::NotFinished.to_string().contains("not finished"));
    }
}
