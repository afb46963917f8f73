//! Primary partition resolution for a whole-disk device.

use crate::errors::ProbeError;
use anyhow::{Context, Result};
use spud_hal::ProcessOps;
use std::path::Path;

/// Maps a whole-disk device node (`/dev/sda`) to the partition node that
/// should be mounted (`/dev/sda1`).
pub trait PrimaryPartitionResolver {
    fn resolve(&self, device: &Path) -> Result<String>;
}

/// Resolver backed by `fdisk -l`, which prints partition rows last so the
/// final populated line of its output names the highest partition.
pub struct FdiskResolver<'a, H: ProcessOps + ?Sized> {
    hal: &'a H,
}

impl<'a, H: ProcessOps + ?Sized> FdiskResolver<'a, H> {
    pub fn new(hal: &'a H) -> Self {
        Self { hal }
    }
}

impl<H: ProcessOps + ?Sized> PrimaryPartitionResolver for FdiskResolver<'_, H> {
    fn resolve(&self, device: &Path) -> Result<String> {
        let device_arg = device.to_string_lossy();
        let listing = self
            .hal
            .command_stdout("fdisk", &["-l", device_arg.as_ref()])
            .with_context(|| format!("probing partition table of {}", device.display()))?;
        let partition = parse_primary_partition(&listing)
            .with_context(|| format!("unusable fdisk listing for {}", device.display()))?;
        Ok(partition)
    }
}

/// Extracts the partition node from an `fdisk -l` listing.
///
/// The listing ends with a newline, so the second-to-last `\n`-separated
/// segment is the last populated line; its first column is the node path.
pub fn parse_primary_partition(listing: &str) -> std::result::Result<String, ProbeError> {
    let segments: Vec<&str> = listing.split('\n').collect();
    if segments.len() < 2 {
        return Err(ProbeError::TruncatedProbeOutput);
    }
    let entry = segments[segments.len() - 2];
    let partition = entry
        .split_whitespace()
        .next()
        .ok_or(ProbeError::EmptyProbeEntry)?;
    Ok(partition.to_string())
}
