//! Parsers for procfs-exposed text formats.

pub mod partitions;
