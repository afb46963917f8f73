//! Parsing helpers for `/proc/partitions` (and similar partition listings).

use crate::{HalError, HalResult};

/// One row of the kernel partition listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionRow {
    pub major: u32,
    pub minor: u32,
    pub blocks: u64,
    pub name: String,
}

impl PartitionRow {
    /// Whole-disk entries sit at offset 0 of each 16-wide minor number block;
    /// non-zero offsets are partitions on that disk.
    pub fn is_whole_disk(&self) -> bool {
        self.minor % 16 == 0
    }
}

/// Parses a partition listing: two header lines, then whitespace-delimited
/// rows `major minor #blocks name`.
///
/// A row that is short or non-numeric after the header is a fatal parse error;
/// the listing is kernel-generated, so a malformed row means this is not the
/// file we think it is.
pub fn parse_partition_listing(content: &str) -> HalResult<Vec<PartitionRow>> {
    content.lines().skip(2).map(parse_row).collect()
}

fn parse_row(line: &str) -> HalResult<PartitionRow> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(HalError::Parse(format!(
            "partition row too short: {line:?}"
        )));
    }
    Ok(PartitionRow {
        major: parse_number(fields[0], line)?,
        minor: parse_number(fields[1], line)?,
        blocks: parse_number(fields[2], line)?,
        name: fields[3].to_string(),
    })
}

fn parse_number<T: std::str::FromStr>(field: &str, line: &str) -> HalResult<T> {
    field.parse().map_err(|_| {
        HalError::Parse(format!(
            "non-numeric field {field:?} in partition row {line:?}"
        ))
    })
}
