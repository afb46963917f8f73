//! Helpers related to block devices in sysfs.
//!
//! Sysfs attribute files are optional: a driver that does not publish a
//! property simply has no file for it. Readers here keep that tri-state
//! explicit, `Ok(None)` for absent, never a zero or empty-string stand-in.

use crate::{HalError, HalResult};
use std::fs;
use std::path::Path;

/// Linux block layer sector unit. Sysfs `size` files count these regardless
/// of the device's physical sector size.
pub const SECTOR_SIZE: u64 = 512;

pub fn device_basename(path: &Path) -> HalResult<String> {
    let name = path
        .file_name()
        .ok_or_else(|| HalError::Other(format!("invalid device path {}", path.display())))?
        .to_string_lossy()
        .to_string();
    Ok(name)
}

/// Reads an optional single-value sysfs attribute file.
///
/// An absent file is `Ok(None)`. A present file yields its trimmed content;
/// a present-but-empty file is `Some("")`, kept distinct from absent.
pub fn attr_string(dir: &Path, name: &str) -> HalResult<Option<String>> {
    let path = dir.join(name);
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    Ok(Some(content.trim().to_string()))
}

/// Reads an optional flag attribute: `"1"` is true, any other content false.
pub fn attr_flag(dir: &Path, name: &str) -> HalResult<Option<bool>> {
    Ok(attr_string(dir, name)?.map(|v| v == "1"))
}

/// Reads the block device size from `<dir>/size`, converting sectors to bytes.
///
/// An absent file is `Ok(None)`; a present file that does not parse as a
/// sector count is a fatal error.
pub fn size_bytes(dir: &Path) -> HalResult<Option<u64>> {
    let Some(raw) = attr_string(dir, "size")? else {
        return Ok(None);
    };
    let sectors: u64 = raw.parse().map_err(|_| {
        HalError::Parse(format!(
            "invalid sector count {raw:?} in {}",
            dir.display()
        ))
    })?;
    Ok(Some(sectors.saturating_mul(SECTOR_SIZE)))
}
