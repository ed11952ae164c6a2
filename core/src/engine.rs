//! Invokes the external simulation engine and verifies it actually produced
//! an output store.
//!
//! The engine is opaque: a binary taking a rendered input file and an output
//! store path. A nonzero exit, a missing output file, or an empty output
//! file is `EngineFailure` — never silent success.

use crate::error::{SweepError, SweepResult};
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Clone)]
pub struct EngineCommand {
    binary: PathBuf,
    input: PathBuf,
    output: PathBuf,
}

impl EngineCommand {
    pub fn new(binary: &Path, input: &Path, output: &Path) -> Self {
        Self {
            binary: binary.to_path_buf(),
            input: input.to_path_buf(),
            output: output.to_path_buf(),
        }
    }

    /// Run the engine to completion. Returns only after the output store
    /// has been verified present and non-empty.
    pub fn run(&self) -> SweepResult<()> {
        log::info!(
            "running engine: {} -i {} -o {}",
            self.binary.display(),
            self.input.display(),
            self.output.display()
        );

        let output = Command::new(&self.binary)
            .arg("-i")
            .arg(&self.input)
            .arg("-o")
            .arg(&self.output)
            .output()
            .map_err(|e| SweepError::EngineFailure {
                reason: format!("failed to launch {}: {e}", self.binary.display()),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SweepError::EngineFailure {
                reason: format!(
                    "{} exited with {}: {}",
                    self.binary.display(),
                    output.status,
                    stderr.trim()
                ),
            });
        }

        verify_output_store(&self.output)
    }
}

/// Check that a claimed output store exists and is non-empty before anything
/// tries to query it.
pub fn verify_output_store(path: &Path) -> SweepResult<()> {
    let meta = std::fs::metadata(path).map_err(|e| SweepError::EngineFailure {
        reason: format!("output store {} missing: {e}", path.display()),
    })?;
    if meta.len() == 0 {
        return Err(SweepError::EngineFailure {
            reason: format!("output store {} is empty", path.display()),
        });
    }
    Ok(())
}
