//! Running one tool invocation to completion

use std::fs::File;
use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::HarnessError;

use super::super::types::{Invocation, StdinSource, StdoutSink, ToolExit};
use super::capture::Capture;

/// Runs a single invocation and blocks until the tool has exited.
///
/// Only a tool's exit status comes back; its stderr is never captured.
pub trait ToolRunner {
    fn run(&mut self, inv: &Invocation) -> Result<ToolExit, HarnessError>;
}

/// Spawns real processes
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&mut self, inv: &Invocation) -> Result<ToolExit, HarnessError> {
        let mut cmd = Command::new(&inv.program);
        cmd.args(&inv.args);

        match &inv.stdin {
            StdinSource::Inherit => {
                cmd.stdin(Stdio::inherit());
            }
            StdinSource::File(path) => {
                let file = File::open(path).map_err(|source| HarnessError::BaseImage {
                    path: path.clone(),
                    source,
                })?;
                cmd.stdin(Stdio::from(file));
            }
            StdinSource::Text(_) => {
                cmd.stdin(Stdio::piped());
            }
        }

        let capture_err = |path: &std::path::Path, source| HarnessError::Capture {
            stage: inv.stage,
            path: path.to_path_buf(),
            source,
        };
        let capture = match &inv.stdout {
            StdoutSink::Inherit => {
                cmd.stdout(Stdio::inherit());
                None
            }
            StdoutSink::Discard => {
                cmd.stdout(Stdio::null());
                None
            }
            StdoutSink::Capture(path) => {
                let capture = Capture::begin(path).map_err(|e| capture_err(path, e))?;
                cmd.stdout(capture.stdio().map_err(|e| capture_err(path, e))?);
                Some(capture)
            }
        };

        let spawn_err = |source| HarnessError::Spawn {
            stage: inv.stage,
            program: inv.program.clone(),
            source,
        };
        let mut child = cmd.spawn().map_err(spawn_err)?;
        // Close our copies of the child's stdio so the base ROM is only held by the child.
        drop(cmd);

        let sent = match (&inv.stdin, child.stdin.take()) {
            (StdinSource::Text(payload), Some(mut stdin)) => stdin.write_all(payload.as_bytes()),
            _ => Ok(()),
        };

        let exit = ToolExit::from(child.wait().map_err(spawn_err)?);
        if !exit.success() {
            return Ok(exit);
        }

        sent.map_err(|source| HarnessError::Settings {
            stage: inv.stage,
            source,
        })?;

        if let (Some(capture), StdoutSink::Capture(path)) = (capture, &inv.stdout) {
            capture.publish().map_err(|e| capture_err(path, e))?;
        }
        Ok(exit)
    }
}
