use thiserror::Error;

/// Probe failures that mean the host told us something we refuse to guess
/// around. These abort the whole probe rather than degrade a single field.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProbeError {
    #[error("mount table line {0:?} does not match \"SOURCE on MOUNTPOINT type FSTYPE OPTIONS\"")]
    MountLine(String),

    #[error("partition table listing ended before any partition entry")]
    TruncatedProbeOutput,

    #[error("partition table listing has a blank entry where a partition was expected")]
    EmptyProbeEntry,
}
