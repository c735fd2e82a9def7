//! The conversion seam: an exit-status-only contract with an external program.

use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// Converts one file, reporting only success or failure.
///
/// The production implementation shells out to a script; tests plug in
/// deterministic fakes so the queue and pool logic can be exercised without
/// spawning processes.
pub trait Converter: Send + Sync {
    fn convert(&self, path: &Path) -> Result<(), ConvertError>;
}

/// Why a single conversion failed. Carries the specific exit code or signal
/// so workers can log it; never escalated beyond the per-job counters.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to launch conversion program: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("conversion program exited with code {0}")]
    Exit(i32),
    #[error("conversion program killed by signal {0}")]
    Signal(i32),
    #[error("conversion program terminated without an exit code")]
    Interrupted,
}

/// Runs the configured conversion program once per job with the file path as
/// the only argument. Stdout/stderr are inherited, never captured; only the
/// exit status matters.
pub struct ScriptConverter {
    program: PathBuf,
}

impl ScriptConverter {
    /// `program` may be relative; `Command` resolves it against the process
    /// working directory, which is where the default script is documented to
    /// live.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Converter for ScriptConverter {
    fn convert(&self, path: &Path) -> Result<(), ConvertError> {
        let status = Command::new(&self.program).arg(path).status()?;
        if status.success() {
            return Ok(());
        }
        match status.code() {
            Some(code) => Err(ConvertError::Exit(code)),
            None => {
                #[cfg(unix)]
                {
                    use std::os::unix::process::ExitStatusExt;
                    if let Some(signal) = status.signal() {
                        return Err(ConvertError::Signal(signal));
                    }
                }
                Err(ConvertError::Interrupted)
            }
        }
    }
}
