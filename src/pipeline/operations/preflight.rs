//! Checks and setup done before any tool starts

use std::fs::File;
use std::io;
use std::path::Path;

use crate::error::HarnessError;

/// Make sure the base ROM exists, is a regular file, and can be opened for reading.
pub fn check_base_rom(path: &Path) -> Result<(), HarnessError> {
    let base_image_err = |source| HarnessError::BaseImage {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(base_image_err)?;
    let metadata = file.metadata().map_err(base_image_err)?;
    if !metadata.is_file() {
        return Err(base_image_err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }
    Ok(())
}

/// Create the output directory and its parents. Existing directories are fine.
pub fn ensure_output_dir(path: &Path) -> Result<(), HarnessError> {
    std::fs::create_dir_all(path).map_err(|source| HarnessError::OutputDir {
        path: path.to_path_buf(),
        source,
    })
}
