//! 🥔 SPUD probing library.
//!
//! `spud-core` holds the probing pipeline: discovery of USB whole disks,
//! per-device metadata collection, mount-table parsing, and correlation of
//! the two into storage records. All OS access goes through `spud-hal`, so
//! everything here runs against fixtures in tests.

pub mod correlate;
pub mod device;
pub mod discovery;
pub mod errors;
pub mod mount_table;
pub mod probe;
pub mod resolver;
