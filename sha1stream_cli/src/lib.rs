//! sha1stream command line interface
//!
//! Configuration, output formatting, progress rendering and error reporting
//! for the `sha1stream` binary.

pub mod config;
pub mod error;
pub mod output;
pub mod progress;
pub mod terminal;
