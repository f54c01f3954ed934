use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

/// Kind of a remote listing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One remote listing record, named relative to the listed directory.
#[derive(Debug, Clone)]
pub struct RemoteEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl RemoteEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Remote file store capability used by the deploy engine.
///
/// One value of this trait is one live session. The engine owns it for the
/// duration of a run and closes it on every exit path after connection, so
/// no session outlives its run.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// List the contents of a remote directory.
    async fn list_dir(&self, path: &str) -> Result<Vec<RemoteEntry>>;

    /// Delete a single remote file.
    async fn delete_file(&self, path: &str) -> Result<()>;

    /// Remove a remote directory and everything under it.
    async fn remove_dir_all(&self, path: &str) -> Result<()>;

    /// Create a remote directory.
    async fn create_dir(&self, path: &str) -> Result<()>;

    /// Upload a local file to a remote path.
    async fn put_file(&self, local: &Path, remote: &str) -> Result<()>;

    /// Close the session. Called exactly once per run.
    async fn close(&self) -> Result<()>;
}

/// Session factory. A connector yields at most one session per run, with a
/// single attempt and no retry.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn RemoteStore>>;
}
