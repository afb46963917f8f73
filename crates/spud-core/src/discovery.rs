//! Discovery of whole-disk USB block devices.
//!
//! The kernel's partition listing provides candidate names; each candidate's
//! `/sys/class/block` symlink is resolved to decide whether the device hangs
//! off a USB controller.

use anyhow::{Context, Result};
use spud_hal::procfs::partitions;
use std::fs;
use std::path::{Path, PathBuf};

pub const PARTITION_LISTING: &str = "/proc/partitions";
pub const SYS_CLASS_BLOCK: &str = "/sys/class/block";
pub const DEV_DIR: &str = "/dev";

/// Path fragment that marks a resolved sysfs device path as USB-attached.
const USB_PATH_MARKER: &str = "/usb";

/// Device nodes of all USB-attached whole disks, in kernel listing order.
pub fn discover_usb_disks() -> Result<Vec<PathBuf>> {
    discover_usb_disks_in(
        Path::new(PARTITION_LISTING),
        Path::new(SYS_CLASS_BLOCK),
        Path::new(DEV_DIR),
    )
}

/// Discovery against caller-supplied roots, for tests running on a fixture
/// tree instead of the live system.
pub fn discover_usb_disks_in(
    listing: &Path,
    sys_class_block: &Path,
    dev_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let content = fs::read_to_string(listing)
        .with_context(|| format!("reading partition listing {}", listing.display()))?;
    let rows = partitions::parse_partition_listing(&content)
        .with_context(|| format!("parsing partition listing {}", listing.display()))?;

    let mut disks = Vec::new();
    for row in rows.iter().filter(|row| row.is_whole_disk()) {
        let link = sys_class_block.join(&row.name);
        if !link.is_symlink() {
            continue;
        }
        // A dangling or unreadable link means the device went away mid-probe.
        let Ok(resolved) = fs::canonicalize(&link) else {
            continue;
        };
        if resolved.to_string_lossy().contains(USB_PATH_MARKER) {
            disks.push(dev_dir.join(&row.name));
        }
    }
    Ok(disks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::symlink;
    use tempfile::tempdir;

    const LISTING: &str = "\
major minor  #blocks  name

   8        0   15632384 sda
   8        1   15631360 sda1
   8       16  976762584 sdb
 179        0   31166976 mmcblk0
";

    /// Lays out `devices/...` targets and `class/block` symlinks the way the
    /// kernel does, with `sda` and `sdb` on the USB bus and `mmcblk0` not.
    fn fixture_tree(root: &Path) -> (PathBuf, PathBuf) {
        let usb_sda = root.join("devices/pci0000:00/usb2/2-1/block/sda");
        let usb_sdb = root.join("devices/pci0000:00/usb2/2-2/block/sdb");
        let mmc = root.join("devices/platform/mmc_host/block/mmcblk0");
        for dir in [&usb_sda, &usb_sdb, &mmc] {
            fs::create_dir_all(dir).unwrap();
        }

        let class_block = root.join("class/block");
        fs::create_dir_all(&class_block).unwrap();
        symlink(&usb_sda, class_block.join("sda")).unwrap();
        symlink(&usb_sdb, class_block.join("sdb")).unwrap();
        symlink(&mmc, class_block.join("mmcblk0")).unwrap();

        let listing = root.join("partitions");
        fs::write(&listing, LISTING).unwrap();
        (listing, class_block)
    }

    #[test]
    fn discovers_usb_disks_in_listing_order() {
        let tmp = tempdir().unwrap();
        let (listing, class_block) = fixture_tree(tmp.path());

        let disks = discover_usb_disks_in(&listing, &class_block, Path::new("/dev")).unwrap();

        assert_eq!(
            disks,
            vec![PathBuf::from("/dev/sda"), PathBuf::from("/dev/sdb")]
        );
    }

    #[test]
    fn skips_partitions_and_non_usb_disks() {
        let tmp = tempdir().unwrap();
        let (listing, class_block) = fixture_tree(tmp.path());

        let disks = discover_usb_disks_in(&listing, &class_block, Path::new("/dev")).unwrap();

        assert!(!disks.contains(&PathBuf::from("/dev/sda1")));
        assert!(!disks.contains(&PathBuf::from("/dev/mmcblk0")));
    }

    #[test]
    fn skips_disk_without_sysfs_entry() {
        let tmp = tempdir().unwrap();
        let class_block = tmp.path().join("class/block");
        fs::create_dir_all(&class_block).unwrap();
        let listing = tmp.path().join("partitions");
        fs::write(&listing, LISTING).unwrap();

        let disks = discover_usb_disks_in(&listing, &class_block, Path::new("/dev")).unwrap();

        assert!(disks.is_empty());
    }

    #[test]
    fn skips_dangling_sysfs_link() {
        let tmp = tempdir().unwrap();
        let class_block = tmp.path().join("class/block");
        fs::create_dir_all(&class_block).unwrap();
        symlink(tmp.path().join("gone/usb9/sda"), class_block.join("sda")).unwrap();
        let listing = tmp.path().join("partitions");
        fs::write(&listing, LISTING).unwrap();

        let disks = discover_usb_disks_in(&listing, &class_block, Path::new("/dev")).unwrap();

        assert!(disks.is_empty());
    }

    #[test]
    fn missing_listing_is_fatal() {
        let tmp = tempdir().unwrap();
        let err = discover_usb_disks_in(
            &tmp.path().join("partitions"),
            &tmp.path().join("class/block"),
            Path::new("/dev"),
        )
        .unwrap_err();

        assert!(err.to_string().contains("partition listing"));
    }

    #[test]
    fn malformed_listing_is_fatal() {
        let tmp = tempdir().unwrap();
        let listing = tmp.path().join("partitions");
        fs::write(&listing, "major minor  #blocks  name\n\n   8\n").unwrap();

        let err = discover_usb_disks_in(
            &listing,
            &tmp.path().join("class/block"),
            Path::new("/dev"),
        )
        .unwrap_err();

        assert!(err.to_string().contains("parsing partition listing"));
    }
}
