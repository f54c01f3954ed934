//! Error taxonomy for deployment runs.
//!
//! First error wins: every variant except `Configuration` is fatal, aborts
//! the remaining pipeline, and is surfaced exactly once. Nothing is retried
//! or aggregated.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeployError {
    /// Transport or authentication failure while connecting. No cleanup or
    /// upload is attempted after this.
    #[error("connection failed: {cause}")]
    Connection { cause: anyhow::Error },

    /// The remote target directory could not be listed.
    #[error("remote listing of {path} failed: {cause}")]
    RemoteList { path: String, cause: anyhow::Error },

    /// A single remote delete or recursive removal failed. Remaining deletes
    /// are skipped.
    #[error("remote delete of {path} failed: {cause}")]
    RemoteDelete { path: String, cause: anyhow::Error },

    /// The local source tree could not be enumerated.
    #[error("local enumeration under {dir} failed: {cause}")]
    LocalEnumeration { dir: String, cause: anyhow::Error },

    /// A single remote mkdir or file transfer failed. Remaining uploads are
    /// skipped.
    #[error("upload of {path} failed: {cause}")]
    Upload { path: String, cause: anyhow::Error },

    /// Invalid configuration. The only recovered condition: the run is
    /// skipped cleanly instead of aborting.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}
