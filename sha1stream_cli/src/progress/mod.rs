//! Progress reporting module for the CLI
//!
//! Providers forward core progress updates to a rendering task that draws
//! them on stderr.

pub mod provider;
pub mod renderer;
pub mod utils;

pub use provider::create_progress_infrastructure;
pub use renderer::render_progress;
pub use utils::{format_elapsed, format_rate, format_size};
