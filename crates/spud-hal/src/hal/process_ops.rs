//! Process execution helpers.
//!
//! External commands are considered "world-touching" and must go through the HAL so probing
//! logic can be tested against recorded output without spawning real processes.
//!
//! Execution is synchronous and blocking with no timeout: a probe tool that hangs blocks the
//! whole run. SPUD is an interactive single-operator tool and accepts that.

use crate::{HalError, HalResult};
use std::process::Output;

/// Process execution trait (external command runner).
pub trait ProcessOps {
    /// Run a command to completion and return its raw output, whatever the exit status.
    ///
    /// Spawn failures (program missing, exec denied) are errors; a non-zero exit is not.
    fn command_output(&self, program: &str, args: &[&str]) -> HalResult<Output>;

    /// Run a command and return its stdout as a string, failing on non-zero exit.
    fn command_stdout(&self, program: &str, args: &[&str]) -> HalResult<String> {
        let output = self.command_output(program, args)?;
        if !output.status.success() {
            return Err(output_failed(program, &output));
        }
        Ok(String::from_utf8(output.stdout)?)
    }
}

pub(crate) fn map_command_err(program: &str, err: std::io::Error) -> HalError {
    if err.kind() == std::io::ErrorKind::NotFound {
        return HalError::CommandNotFound(program.to_string());
    }
    HalError::Io(err)
}

pub(crate) fn output_failed(program: &str, output: &Output) -> HalError {
    HalError::CommandFailed {
        program: program.to_string(),
        code: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}
