//! Pipeline types: modes, stages, invocations

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Which pipeline variant a run executes. Chosen once, never changes mid-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Run the generator without output, only checking that it accepts the base ROM
    Direct,
    /// Generate a patch, apply it with the external applier, run the result
    PatchAndRun,
    /// Generate a full uncompressed ROM, compress it, run the result
    DefaultFull,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExecutionMode::Direct => "direct",
            ExecutionMode::PatchAndRun => "patch-and-run",
            ExecutionMode::DefaultFull => "default-full",
        })
    }
}

/// Value of the generator's `--output-type` selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    None,
    Patch,
    UncompressedRom,
}

impl OutputKind {
    pub fn as_arg(self) -> &'static str {
        match self {
            OutputKind::None => "none",
            OutputKind::Patch => "patch",
            OutputKind::UncompressedRom => "uncompressed-rom",
        }
    }
}

/// One step of a pipeline, each backed by one external tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Generate(OutputKind),
    Apply,
    Compress,
    Emulate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Generate(kind) => write!(f, "generator ({})", kind.as_arg()),
            Stage::Apply => f.write_str("applier"),
            Stage::Compress => f.write_str("compressor"),
            Stage::Emulate => f.write_str("emulator"),
        }
    }
}

/// Settings object the applier reads from stdin (`--settings=-`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplierSettings {
    pub generate_from_file: bool,
    pub rom: PathBuf,
    pub patch_file: PathBuf,
    pub output_dir: PathBuf,
}

/// What a tool's stdin is connected to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StdinSource {
    /// The terminal, for interactive tools
    Inherit,
    /// Raw bytes of a file, opened read-only for this one call
    File(PathBuf),
    /// A text payload written in full, then closed
    Text(String),
}

/// Where a tool's stdout goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StdoutSink {
    Inherit,
    Discard,
    /// Captured verbatim, published to this path only on a zero exit
    Capture(PathBuf),
}

/// A fully resolved tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub stage: Stage,
    pub program: String,
    pub args: Vec<String>,
    pub stdin: StdinSource,
    pub stdout: StdoutSink,
}

/// How a tool exited. `code` is `None` when it was killed by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolExit {
    pub code: Option<i32>,
}

impl ToolExit {
    pub const SUCCESS: ToolExit = ToolExit { code: Some(0) };

    pub fn success(self) -> bool {
        self == ToolExit::SUCCESS
    }
}

impl fmt::Display for ToolExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "status {}", code),
            None => write!(f, "a signal"),
        }
    }
}

impl From<std::process::ExitStatus> for ToolExit {
    fn from(status: std::process::ExitStatus) -> Self {
        ToolExit {
            code: status.code(),
        }
    }
}
