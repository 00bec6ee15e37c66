//! Stdout capture into artifacts

use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tempfile::NamedTempFile;

/// A tool's stdout being written to a temp file next to its final artifact path.
///
/// Nothing reaches `dest` until [`Capture::publish`]; dropping the capture
/// removes the temp file and leaves any previous artifact untouched.
pub struct Capture {
    temp: NamedTempFile,
    dest: PathBuf,
}

impl Capture {
    /// Start a capture for `dest`.
    ///
    /// The published file keeps the mode of the artifact it replaces. A new
    /// artifact gets the umask-filtered 0666 a plain create would give it.
    pub fn begin(dest: &Path) -> io::Result<Self> {
        let dir = match dest.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut builder = tempfile::Builder::new();
        builder.prefix(".romtest-capture-");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(std::fs::Permissions::from_mode(0o666));
        }
        let temp = builder.tempfile_in(dir)?;

        if let Ok(existing) = std::fs::metadata(dest) {
            temp.as_file().set_permissions(existing.permissions())?;
        }
        Ok(Self {
            temp,
            dest: dest.to_path_buf(),
        })
    }

    /// A handle to hand to the child as its stdout
    pub fn stdio(&self) -> io::Result<Stdio> {
        Ok(Stdio::from(self.temp.as_file().try_clone()?))
    }

    /// Move the captured bytes into place, replacing whatever was there.
    pub fn publish(self) -> io::Result<PathBuf> {
        self.temp.persist(&self.dest).map_err(|e| e.error)?;
        Ok(self.dest)
    }
}
