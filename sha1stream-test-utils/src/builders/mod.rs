//! Builders for test payloads and files

mod test_data;

pub use test_data::{ChunkPlan, TestDataBuilder, TestFileBuilder};
