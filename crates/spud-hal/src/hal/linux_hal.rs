//! Linux HAL implementation using real commands and system calls.

use super::{MountOps, ProcessOps};
use crate::hal::process_ops::{map_command_err, output_failed};
use crate::HalResult;
use nix::sys::stat;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

/// Real HAL implementation for Linux systems.
#[derive(Debug, Clone, Default)]
pub struct LinuxHal;

impl LinuxHal {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessOps for LinuxHal {
    fn command_output(&self, program: &str, args: &[&str]) -> HalResult<Output> {
        Command::new(program)
            .args(args)
            .output()
            .map_err(|e| map_command_err(program, e))
    }
}

impl MountOps for LinuxHal {
    fn mount_device(&self, source: &Path, target: &Path, dry_run: bool) -> HalResult<()> {
        if dry_run {
            log::info!(
                "DRY RUN: mount {} -> {}",
                source.display(),
                target.display()
            );
            return Ok(());
        }

        let source = source.display().to_string();
        let target = target.display().to_string();
        let output = self.command_output("mount", &[&source, &target])?;
        if !output.status.success() {
            return Err(output_failed("mount", &output));
        }
        Ok(())
    }

    fn unmount(&self, target: &Path, dry_run: bool) -> HalResult<()> {
        if dry_run {
            log::info!("DRY RUN: unmount {}", target.display());
            return Ok(());
        }

        let target = target.display().to_string();
        let output = self.command_output("umount", &[&target])?;
        if !output.status.success() {
            return Err(output_failed("umount", &output));
        }
        Ok(())
    }

    fn is_mounted(&self, path: &Path) -> HalResult<bool> {
        Ok(is_mount_point(path))
    }

    fn ensure_mount_dir(&self, path: &Path, dry_run: bool) -> HalResult<()> {
        if dry_run {
            log::info!("DRY RUN: mkdir -p {}", path.display());
            return Ok(());
        }
        fs::create_dir_all(path)?;
        Ok(())
    }
}

/// Mount point detection via stat: a mount point's device number differs from its
/// parent's, or path and parent are the same file (a filesystem root such as `/`).
///
/// Any stat failure (missing path, permission) answers "not a mount point".
/// Symlinks are never mount points.
fn is_mount_point(path: &Path) -> bool {
    let Ok(st) = stat::lstat(path) else {
        return false;
    };
    if st.st_mode & libc::S_IFMT == libc::S_IFLNK {
        return false;
    }
    let Ok(parent) = stat::stat(&path.join("..")) else {
        return false;
    };
    st.st_dev != parent.st_dev || st.st_ino == parent.st_ino
}
