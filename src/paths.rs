use std::env;
use std::path::PathBuf;

/// Home directory, or the current directory when `HOME` is unset.
pub fn home() -> PathBuf {
    env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn config_home() -> PathBuf {
    if let Some(xdg_config_home) = env::var_os("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg_config_home);
    }
    home().join(".config")
}

/// Where `settings.json` is looked up when `--config` isn't given.
pub fn default_config_path() -> PathBuf {
    config_home().join("romtest").join("settings.json")
}

/// Directory holding the base ROMs.
pub fn oot_dir() -> PathBuf {
    home().join("games/zelda/oot")
}

/// Checkout of the Python randomizer, which provides the applier and compressor.
pub fn py_repo_dir() -> PathBuf {
    home().join("git/github.com/OoTRandomizer/OoT-Randomizer/main")
}
