//! Operations module (atomic side effects)

pub mod capture;
pub mod preflight;
pub mod runner;

pub use preflight::{check_base_rom, ensure_output_dir};
pub use runner::{ProcessRunner, ToolRunner};
