//! Readers for sysfs-exposed device attributes.

pub mod block;
