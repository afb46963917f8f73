//! Mount operations trait.

use crate::HalResult;
use std::path::Path;

/// Trait for mount state queries and mount/unmount of block devices.
pub trait MountOps {
    /// Mount a device or partition at a target path with default options.
    ///
    /// # Arguments
    /// * `source` - Device or partition path (e.g., `/dev/sdb1`)
    /// * `target` - Mount point path
    /// * `dry_run` - If true, log the operation but don't execute it
    fn mount_device(&self, source: &Path, target: &Path, dry_run: bool) -> HalResult<()>;

    /// Unmount a filesystem.
    ///
    /// # Arguments
    /// * `target` - Mount point path to unmount
    /// * `dry_run` - If true, log the operation but don't execute it
    fn unmount(&self, target: &Path, dry_run: bool) -> HalResult<()>;

    /// Check if a path is currently a mount point.
    ///
    /// This is an OS-level predicate on the path itself, not a mount-table lookup.
    /// A path that does not exist is not a mount point.
    fn is_mounted(&self, path: &Path) -> HalResult<bool>;

    /// Create a mount point directory (and parents) if it does not exist yet.
    fn ensure_mount_dir(&self, path: &Path, dry_run: bool) -> HalResult<()>;
}
