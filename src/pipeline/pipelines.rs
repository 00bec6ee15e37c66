//! Pipelines module (orchestration)

pub mod execute;

pub use execute::{print_pipeline, run_pipeline};
