//! Whole-disk USB device metadata and mount lifecycle.

use crate::resolver::PrimaryPartitionResolver;
use anyhow::Result;
use spud_hal::sysfs::block;
use spud_hal::{HalResult, MountOps};
use std::path::{Path, PathBuf};

pub const SYS_BLOCK_DIR: &str = "/sys/block";
pub const MEDIA_DIR: &str = "/media";

/// Everything SPUD knows about one whole-disk USB device.
///
/// Sysfs attributes are optional per device: `None` means the kernel did not
/// publish the file, which is different from a published empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDevice {
    /// Device node, e.g. `/dev/sdb`.
    pub device_path: PathBuf,
    /// Kernel name, e.g. `sdb`.
    pub device_name: String,
    /// Sysfs directory for the whole disk, e.g. `/sys/block/sdb`.
    pub sys_block_path: PathBuf,
    /// Where SPUD mounts this device, e.g. `/media/sdb`.
    pub media_path: PathBuf,
    /// Partition node selected for mounting, e.g. `/dev/sdb1`.
    pub primary_partition: String,
    pub removable: Option<bool>,
    pub size_bytes: Option<u64>,
    pub vendor: Option<String>,
    pub model: Option<String>,
}

impl BlockDevice {
    /// Probe one device node against the live sysfs tree.
    pub fn probe(device: &Path, resolver: &dyn PrimaryPartitionResolver) -> Result<BlockDevice> {
        Self::probe_in(device, resolver, Path::new(SYS_BLOCK_DIR), Path::new(MEDIA_DIR))
    }

    /// Probe one device node, reading attributes under `sys_block_root` and
    /// deriving the mount point under `media_root`.
    pub fn probe_in(
        device: &Path,
        resolver: &dyn PrimaryPartitionResolver,
        sys_block_root: &Path,
        media_root: &Path,
    ) -> Result<BlockDevice> {
        let device_name = block::device_basename(device)?;
        let sys_block_path = sys_block_root.join(&device_name);
        let media_path = media_root.join(&device_name);
        let primary_partition = resolver.resolve(device)?;

        let removable = block::attr_flag(&sys_block_path, "removable")?;
        let size_bytes = block::size_bytes(&sys_block_path)?;
        let device_dir = sys_block_path.join("device");
        let vendor = block::attr_string(&device_dir, "vendor")?;
        let model = block::attr_string(&device_dir, "model")?;

        Ok(BlockDevice {
            device_path: device.to_path_buf(),
            device_name,
            sys_block_path,
            media_path,
            primary_partition,
            removable,
            size_bytes,
            vendor,
            model,
        })
    }

    pub fn is_mounted<H: MountOps + ?Sized>(&self, hal: &H) -> HalResult<bool> {
        hal.is_mounted(&self.media_path)
    }

    /// Mount the primary partition at the device's media path.
    ///
    /// Already-mounted devices are left alone. Returns the mount state after
    /// the operation, so a dry run reports `false`.
    pub fn mount_default_partition<H: MountOps + ?Sized>(
        &self,
        hal: &H,
        dry_run: bool,
    ) -> HalResult<bool> {
        if hal.is_mounted(&self.media_path)? {
            return Ok(true);
        }
        hal.ensure_mount_dir(&self.media_path, dry_run)?;
        hal.mount_device(Path::new(&self.primary_partition), &self.media_path, dry_run)?;
        hal.is_mounted(&self.media_path)
    }

    /// Unmount the device's media path and return true once it is no longer
    /// a mount point.
    pub fn unmount_default_partition<H: MountOps + ?Sized>(
        &self,
        hal: &H,
        dry_run: bool,
    ) -> HalResult<bool> {
        hal.unmount(&self.media_path, dry_run)?;
        Ok(!hal.is_mounted(&self.media_path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spud_hal::{FakeHal, Operation};
    use std::fs;
    use tempfile::tempdir;

    struct FixedResolver(&'static str);

    impl PrimaryPartitionResolver for FixedResolver {
        fn resolve(&self, _device: &Path) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn write_sysfs_disk(root: &Path, name: &str) {
        let disk = root.join(name);
        fs::create_dir_all(disk.join("device")).unwrap();
        fs::write(disk.join("removable"), "1\n").unwrap();
        fs::write(disk.join("size"), "31266816\n").unwrap();
        fs::write(disk.join("device/vendor"), "SanDisk \n").unwrap();
        fs::write(disk.join("device/model"), "Cruzer Blade    \n").unwrap();
    }

    #[test]
    fn probe_collects_sysfs_attributes() {
        let tmp = tempdir().unwrap();
        write_sysfs_disk(tmp.path(), "sdb");

        let device = BlockDevice::probe_in(
            Path::new("/dev/sdb"),
            &FixedResolver("/dev/sdb1"),
            tmp.path(),
            Path::new("/media"),
        )
        .unwrap();

        assert_eq!(device.device_name, "sdb");
        assert_eq!(device.sys_block_path, tmp.path().join("sdb"));
        assert_eq!(device.media_path, PathBuf::from("/media/sdb"));
        assert_eq!(device.primary_partition, "/dev/sdb1");
        assert_eq!(device.removable, Some(true));
        assert_eq!(device.size_bytes, Some(31266816 * 512));
        assert_eq!(device.vendor.as_deref(), Some("SanDisk"));
        assert_eq!(device.model.as_deref(), Some("Cruzer Blade"));
    }

    #[test]
    fn probe_leaves_unpublished_attributes_unknown() {
        let tmp = tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("sdc")).unwrap();

        let device = BlockDevice::probe_in(
            Path::new("/dev/sdc"),
            &FixedResolver("/dev/sdc1"),
            tmp.path(),
            Path::new("/media"),
        )
        .unwrap();

        assert_eq!(device.removable, None);
        assert_eq!(device.size_bytes, None);
        assert_eq!(device.vendor, None);
        assert_eq!(device.model, None);
    }

    fn sample_device() -> BlockDevice {
        BlockDevice {
            device_path: PathBuf::from("/dev/sdb"),
            device_name: "sdb".to_string(),
            sys_block_path: PathBuf::from("/sys/block/sdb"),
            media_path: PathBuf::from("/media/sdb"),
            primary_partition: "/dev/sdb1".to_string(),
            removable: Some(true),
            size_bytes: Some(16008609792),
            vendor: Some("SanDisk".to_string()),
            model: Some("Cruzer Blade".to_string()),
        }
    }

    #[test]
    fn mount_creates_dir_then_mounts() {
        let hal = FakeHal::new();
        let device = sample_device();

        let mounted = device.mount_default_partition(&hal, false).unwrap();

        assert!(mounted);
        let ops = hal.operations();
        assert!(matches!(
            &ops[0],
            Operation::EnsureMountDir { path } if path == Path::new("/media/sdb")
        ));
        assert!(matches!(
            &ops[1],
            Operation::Mount { source, target }
                if source == Path::new("/dev/sdb1") && target == Path::new("/media/sdb")
        ));
    }

    #[test]
    fn mount_skips_already_mounted_device() {
        let hal = FakeHal::new();
        hal.set_mounted("/media/sdb");
        let device = sample_device();

        let mounted = device.mount_default_partition(&hal, false).unwrap();

        assert!(mounted);
        assert_eq!(hal.operation_count(), 0);
    }

    #[test]
    fn dry_run_mount_touches_nothing() {
        let hal = FakeHal::new();
        let device = sample_device();

        let mounted = device.mount_default_partition(&hal, true).unwrap();

        assert!(!mounted);
        assert_eq!(hal.operation_count(), 0);
    }

    #[test]
    fn unmount_reports_resulting_state() {
        let hal = FakeHal::new();
        hal.set_mounted("/media/sdb");
        let device = sample_device();

        let unmounted = device.unmount_default_partition(&hal, false).unwrap();

        assert!(unmounted);
        assert!(hal.has_operation(|op| matches!(
            op,
            Operation::Unmount { target } if target == Path::new("/media/sdb")
        )));
        assert!(!device.is_mounted(&hal).unwrap());
    }
}
