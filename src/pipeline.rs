//! Pipeline module - driving the ROM generation tools
//!
//! This module provides:
//! - Mode selection from the command-line flags
//! - Stage planning for each mode
//! - Byte-exact stdin/stdout wiring between the external tools
//! - Sequential, fail-fast execution with an explicit state machine
//!
//! ## Module Structure
//! - `types.rs`: Modes, stages, invocations
//! - `pure/`: Pure functions (mode selection, planning, state machine, formatting)
//! - `operations/`: Atomic side effects (preflight checks, stdout capture, running a tool)
//! - `pipelines/`: High-level orchestration (execute)

mod operations;
mod pipelines;
mod pure;
mod types;

// Re-export public API
pub use operations::ProcessRunner;
pub use pipelines::{print_pipeline, run_pipeline};
pub use pure::{resolve_mode, ModeFlags, PipelineState};
pub use types::Stage;
