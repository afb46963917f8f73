//! 🥔 SPUD hardware abstraction layer.
//!
//! `spud-hal` isolates every interaction with the running OS (external
//! commands, mount operations, procfs and sysfs reads) behind traits so the
//! probing logic in `spud-core` stays testable without real USB hardware.

pub mod error;
pub mod hal;
pub mod procfs;
pub mod sysfs;

pub use error::{HalError, HalResult};
pub use hal::{FakeHal, LinuxHal, MountOps, Operation, ProcessOps, SystemHal};

use nix::unistd::Uid;

/// Fails unless the process runs with root privileges.
///
/// Mounting and unmounting go through the real mount table, so the CLI
/// refuses to start those paths as an unprivileged user.
pub fn ensure_root() -> HalResult<()> {
    if Uid::effective().is_root() {
        Ok(())
    } else {
        Err(HalError::PermissionDenied)
    }
}
