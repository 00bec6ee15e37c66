use crate::error::HarnessError;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{self, PathBuf};

/// An external tool: the program to run plus the arguments that always come first.
///
/// The harness appends its own per-stage arguments after `args`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// File names of the generated artifacts inside the output directory
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct ArtifactNames {
    pub patch: String,
    pub uncompressed_rom: String,
    /// Also the name the applier writes its compressed ROM under
    pub compressed_rom: String,
}

impl Default for ArtifactNames {
    fn default() -> Self {
        Self {
            patch: "default.zpf".to_string(),
            uncompressed_rom: "default-uncompressed.z64".to_string(),
            compressed_rom: "default.z64".to_string(),
        }
    }
}

/// Harness configuration.
///
/// Built once at startup and only ever borrowed afterwards.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct HarnessConfig {
    /// Unmodified base ROM, streamed to the generator and handed to the applier
    pub base_rom: PathBuf,
    /// Directory all generated artifacts are written to
    pub output_dir: PathBuf,
    pub generator: ToolCommand,
    /// Extra generator arguments placed before the output type, e.g. `--world-count 2`
    pub generator_args: Vec<String>,
    pub applier: ToolCommand,
    pub compressor: ToolCommand,
    pub emulator: ToolCommand,
    pub artifacts: ArtifactNames,
    /// Whether pipelines end by running the emulator on the compressed ROM
    pub launch_emulator: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        let py_repo = paths::py_repo_dir();
        Self {
            base_rom: paths::oot_dir().join("oot-ntscu-1.0.n64"),
            output_dir: PathBuf::from("assets").join("generated"),
            generator: ToolCommand::new("cargo", &["run", "--release", "--"]),
            generator_args: Vec::new(),
            applier: ToolCommand {
                program: "python3".to_string(),
                args: vec![
                    py_repo.join("OoTRandomizer.py").display().to_string(),
                    "--settings=-".to_string(),
                ],
            },
            compressor: ToolCommand::new(
                py_repo.join("bin/Compress/Compress").display().to_string(),
                &[],
            ),
            emulator: ToolCommand::new("mupen64plus", &[]),
            artifacts: ArtifactNames::default(),
            launch_emulator: true,
        }
    }
}

impl HarnessConfig {
    /// Resolve `base_rom` and `output_dir` against the current directory.
    ///
    /// Tools run from their own working directories, so every path handed
    /// to them has to be absolute.
    pub fn into_absolute(mut self) -> Result<Self, HarnessError> {
        self.base_rom = path::absolute(&self.base_rom).map_err(|source| {
            HarnessError::BaseImage {
                path: self.base_rom.clone(),
                source,
            }
        })?;
        self.output_dir = path::absolute(&self.output_dir).map_err(|source| {
            HarnessError::OutputDir {
                path: self.output_dir.clone(),
                source,
            }
        })?;
        Ok(self)
    }

    pub fn patch_path(&self) -> PathBuf {
        self.output_dir.join(&self.artifacts.patch)
    }

    pub fn uncompressed_rom_path(&self) -> PathBuf {
        self.output_dir.join(&self.artifacts.uncompressed_rom)
    }

    pub fn compressed_rom_path(&self) -> PathBuf {
        self.output_dir.join(&self.artifacts.compressed_rom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_become_absolute() {
        let cwd = std::env::current_dir().unwrap();
        let cfg = HarnessConfig {
            base_rom: PathBuf::from("roms/base.n64"),
            output_dir: PathBuf::from("assets").join("generated"),
            ..Default::default()
        }
        .into_absolute()
        .unwrap();

        assert_eq!(cfg.base_rom, cwd.join("roms/base.n64"));
        assert_eq!(cfg.output_dir, cwd.join("assets/generated"));
        assert!(cfg.patch_path().is_absolute());
        assert!(cfg.compressed_rom_path().is_absolute());
    }

    #[test]
    fn absolute_paths_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = HarnessConfig {
            base_rom: dir.path().join("base.n64"),
            output_dir: dir.path().join("out"),
            ..Default::default()
        };
        assert_eq!(cfg.clone().into_absolute().unwrap(), cfg);
    }

    #[test]
    fn empty_output_dir_is_rejected() {
        let err = HarnessConfig {
            output_dir: PathBuf::new(),
            ..Default::default()
        }
        .into_absolute()
        .unwrap_err();
        assert!(matches!(err, HarnessError::OutputDir { .. }));
    }
}
