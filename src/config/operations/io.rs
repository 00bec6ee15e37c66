use crate::config::types::HarnessConfig;
use crate::error::HarnessError;

use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;

/// Load the harness config from `path`.
///
/// A missing file yields the defaults. A file that exists but can't be read
/// or parsed is an error, so a typo never silently runs against default tools.
pub fn load_cfg(path: &Path) -> Result<HarnessConfig, HarnessError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(HarnessConfig::default());
        }
        Err(e) => {
            return Err(HarnessError::Config {
                path: path.to_path_buf(),
                source: serde_json::Error::io(e),
            });
        }
    };

    serde_json::from_reader(BufReader::new(file)).map_err(|source| HarnessError::Config {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_cfg(path: &Path, config: &HarnessConfig) -> Result<(), HarnessError> {
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, config)?;
        Ok(())
    };
    write().map_err(|source| HarnessError::SaveConfig {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToolCommand;
    use std::path::PathBuf;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_cfg(&dir.path().join("settings.json")).unwrap();
        assert_eq!(cfg, HarnessConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{
                "base_rom": "/roms/base.n64",
                "emulator": { "program": "ares" },
                "artifacts": { "patch": "seed.zpf" }
            }"#,
        )
        .unwrap();

        let cfg = load_cfg(&path).unwrap();
        let defaults = HarnessConfig::default();
        assert_eq!(cfg.base_rom, PathBuf::from("/roms/base.n64"));
        assert_eq!(cfg.emulator, ToolCommand::new("ares", &[]));
        assert_eq!(cfg.artifacts.patch, "seed.zpf");
        assert_eq!(cfg.artifacts.compressed_rom, defaults.artifacts.compressed_rom);
        assert_eq!(cfg.generator, defaults.generator);
        assert!(cfg.launch_emulator);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ \"base_rom\": ").unwrap();

        let err = load_cfg(&path).unwrap_err();
        assert!(matches!(err, HarnessError::Config { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/romtest/settings.json");
        let mut cfg = HarnessConfig::default();
        cfg.generator_args = vec!["--world-count".to_string(), "2".to_string()];
        cfg.launch_emulator = false;

        save_cfg(&path, &cfg).unwrap();
        assert_eq!(load_cfg(&path).unwrap(), cfg);
    }

    #[test]
    fn artifact_paths_live_in_output_dir() {
        let mut cfg = HarnessConfig::default();
        cfg.output_dir = PathBuf::from("/tmp/gen");
        assert_eq!(cfg.patch_path(), PathBuf::from("/tmp/gen/default.zpf"));
        assert_eq!(
            cfg.uncompressed_rom_path(),
            PathBuf::from("/tmp/gen/default-uncompressed.z64")
        );
        assert_eq!(cfg.compressed_rom_path(), PathBuf::from("/tmp/gen/default.z64"));
    }
}
