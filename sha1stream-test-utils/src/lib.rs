//! Test utilities for sha1stream
//!
//! This crate provides known-answer vectors, deterministic data and file
//! builders, and mock readers for testing the engine and its drivers.

pub mod builders;
pub mod mocks;
pub mod vectors;

// Re-export commonly used types
pub use builders::{ChunkPlan, TestDataBuilder, TestFileBuilder};
pub use mocks::{FailingReader, TrickleReader};
pub use vectors::{KnownVector, boundary_vectors, known_vectors};
