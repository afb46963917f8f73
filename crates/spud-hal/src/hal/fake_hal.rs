//! Fake HAL implementation for testing.
//!
//! This implementation records all operations without executing them and replays
//! scripted command output, so probing logic can be tested CI-safe without root
//! privileges or a real USB device attached.

use super::{MountOps, ProcessOps};
use crate::HalResult;
use std::collections::{HashMap, HashSet, VecDeque};
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};
use std::sync::{Arc, Mutex};

/// Operation records for testing and verification.
#[derive(Debug, Clone)]
pub enum Operation {
    Mount {
        source: PathBuf,
        target: PathBuf,
    },
    Unmount {
        target: PathBuf,
    },
    EnsureMountDir {
        path: PathBuf,
    },
    Command {
        program: String,
        args: Vec<String>,
    },
}

/// Scripted result for one command invocation.
#[derive(Debug, Clone)]
enum Script {
    Stdout(String),
    Fail { code: i32, stderr: String },
}

/// Shared state for FakeHal operations.
#[derive(Debug, Default)]
struct FakeHalState {
    /// All operations that were recorded
    operations: Vec<Operation>,
    /// Currently mounted paths
    mounted_paths: HashSet<PathBuf>,
    /// Per-program queues of scripted command results
    scripts: HashMap<String, VecDeque<Script>>,
}

/// Fake HAL implementation that records operations without executing them.
///
/// Commands replay scripted output (queued per program, consumed in order);
/// an unscripted command succeeds with empty output.
#[derive(Debug, Clone, Default)]
pub struct FakeHal {
    state: Arc<Mutex<FakeHalState>>,
}

impl FakeHal {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeHalState::default())),
        }
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<Operation> {
        self.state.lock().unwrap().operations.clone()
    }

    /// Get the number of operations recorded.
    pub fn operation_count(&self) -> usize {
        self.state.lock().unwrap().operations.len()
    }

    /// Check if a specific operation was recorded.
    pub fn has_operation(&self, check: impl Fn(&Operation) -> bool) -> bool {
        self.state.lock().unwrap().operations.iter().any(check)
    }

    /// Clear all recorded operations, mount state, and scripts.
    pub fn clear(&self) {
        let mut state = self.state.lock().unwrap();
        state.operations.clear();
        state.mounted_paths.clear();
        state.scripts.clear();
    }

    /// Queue successful stdout for the next invocation of `program`.
    pub fn script_stdout(&self, program: &str, stdout: &str) {
        self.state
            .lock()
            .unwrap()
            .scripts
            .entry(program.to_string())
            .or_default()
            .push_back(Script::Stdout(stdout.to_string()));
    }

    /// Queue a non-zero exit for the next invocation of `program`.
    pub fn script_failure(&self, program: &str, code: i32, stderr: &str) {
        self.state
            .lock()
            .unwrap()
            .scripts
            .entry(program.to_string())
            .or_default()
            .push_back(Script::Fail {
                code,
                stderr: stderr.to_string(),
            });
    }

    /// Mark a path as already mounted (test setup).
    pub fn set_mounted(&self, path: impl Into<PathBuf>) {
        self.state.lock().unwrap().mounted_paths.insert(path.into());
    }

    fn record_operation(&self, op: Operation) {
        self.state.lock().unwrap().operations.push(op);
    }

    fn take_script(&self, program: &str) -> Option<Script> {
        self.state
            .lock()
            .unwrap()
            .scripts
            .get_mut(program)
            .and_then(|queue| queue.pop_front())
    }
}

impl ProcessOps for FakeHal {
    fn command_output(&self, program: &str, args: &[&str]) -> HalResult<Output> {
        self.record_operation(Operation::Command {
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
        });

        let output = match self.take_script(program) {
            Some(Script::Stdout(stdout)) => Output {
                status: ExitStatus::from_raw(0),
                stdout: stdout.into_bytes(),
                stderr: Vec::new(),
            },
            Some(Script::Fail { code, stderr }) => Output {
                // Wait status encoding: exit code lives in the high byte.
                status: ExitStatus::from_raw(code << 8),
                stdout: Vec::new(),
                stderr: stderr.into_bytes(),
            },
            None => Output {
                status: ExitStatus::from_raw(0),
                stdout: Vec::new(),
                stderr: Vec::new(),
            },
        };
        Ok(output)
    }
}

impl MountOps for FakeHal {
    fn mount_device(&self, source: &Path, target: &Path, dry_run: bool) -> HalResult<()> {
        if dry_run {
            log::info!(
                "FAKE HAL DRY RUN: mount {} -> {}",
                source.display(),
                target.display()
            );
            return Ok(());
        }

        self.record_operation(Operation::Mount {
            source: source.to_path_buf(),
            target: target.to_path_buf(),
        });
        self.state
            .lock()
            .unwrap()
            .mounted_paths
            .insert(target.to_path_buf());
        Ok(())
    }

    fn unmount(&self, target: &Path, dry_run: bool) -> HalResult<()> {
        if dry_run {
            log::info!("FAKE HAL DRY RUN: unmount {}", target.display());
            return Ok(());
        }

        self.record_operation(Operation::Unmount {
            target: target.to_path_buf(),
        });
        self.state.lock().unwrap().mounted_paths.remove(target);
        Ok(())
    }

    fn is_mounted(&self, path: &Path) -> HalResult<bool> {
        Ok(self.state.lock().unwrap().mounted_paths.contains(path))
    }

    fn ensure_mount_dir(&self, path: &Path, dry_run: bool) -> HalResult<()> {
        if dry_run {
            log::info!("FAKE HAL DRY RUN: mkdir -p {}", path.display());
            return Ok(());
        }

        self.record_operation(Operation::EnsureMountDir {
            path: path.to_path_buf(),
        });
        Ok(())
    }
}
