//! HAL trait definitions and implementations.
//!
//! This module defines the traits for system operations the probing logic needs
//! and provides both real (LinuxHal) and fake (FakeHal) implementations.

pub mod fake_hal;
pub mod linux_hal;
pub mod mount_ops;
pub mod process_ops;

pub use fake_hal::{FakeHal, Operation};
pub use linux_hal::LinuxHal;
pub use mount_ops::MountOps;
pub use process_ops::ProcessOps;

/// Complete HAL combining all system operation traits.
pub trait SystemHal: MountOps + ProcessOps + Send + Sync {}

/// Automatically implement SystemHal for any type implementing all required traits.
impl<T> SystemHal for T where T: MountOps + ProcessOps + Send + Sync {}
