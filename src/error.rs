//! Harness error type and exit-status mapping

use std::path::PathBuf;

use crate::pipeline::{PipelineState, Stage};

/// Every way a harness run can end early.
///
/// None of these are recovered locally; the pipeline stops at the first one.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("failed to load config from {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write config to {}: {source}", .path.display())]
    SaveConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("base image {} is not readable: {source}", .path.display())]
    BaseImage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to start {stage} ({program}): {source}")]
    Spawn {
        stage: Stage,
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to capture output of {stage} into {}: {source}", .path.display())]
    Capture {
        stage: Stage,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to send settings to {stage}: {source}")]
    Settings {
        stage: Stage,
        #[source]
        source: std::io::Error,
    },
    #[error("{stage} {}", describe_exit(.code))]
    ToolFailed { stage: Stage, code: Option<i32> },
    #[error("pipeline cannot move from {from:?} on {event}")]
    InvalidTransition { from: PipelineState, event: String },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

impl HarnessError {
    /// Process exit status for this failure.
    ///
    /// A failing tool's own status is propagated when it fits in a process
    /// exit code; anything else maps to the generic failure code 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            HarnessError::ToolFailed {
                code: Some(code), ..
            } => u8::try_from(*code).ok().filter(|c| *c != 0).unwrap_or(1),
            _ => 1,
        }
    }
}
