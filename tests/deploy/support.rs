// Shared test doubles for the deploy pipeline tests

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use sftp_deploy::report::Reporter;
use sftp_deploy::store::{Connector, RemoteEntry, RemoteStore};

/// Every operation the engine issued against the store, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    List(String),
    DeleteFile(String),
    RemoveDirAll(String),
    CreateDir(String),
    Put { local: String, remote: String },
    Close,
}

#[derive(Default)]
pub struct MockState {
    pub listing: Vec<RemoteEntry>,
    pub ops: Vec<StoreOp>,
    pub fail_list: bool,
    pub fail_delete_on: Option<String>,
    pub fail_put_on: Option<String>,
}

/// In-memory remote store that records every call. Clones share state, so a
/// test can keep a handle while the engine owns the boxed session.
#[derive(Clone, Default)]
pub struct MockStore {
    state: Arc<Mutex<MockState>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing(entries: Vec<RemoteEntry>) -> Self {
        let store = Self::new();
        store.state.lock().unwrap().listing = entries;
        store
    }

    pub fn fail_list(self) -> Self {
        self.state.lock().unwrap().fail_list = true;
        self
    }

    pub fn fail_delete_on(self, path: &str) -> Self {
        self.state.lock().unwrap().fail_delete_on = Some(path.to_string());
        self
    }

    pub fn fail_put_on(self, path: &str) -> Self {
        self.state.lock().unwrap().fail_put_on = Some(path.to_string());
        self
    }

    pub fn ops(&self) -> Vec<StoreOp> {
        self.state.lock().unwrap().ops.clone()
    }

    pub fn closed(&self) -> bool {
        self.ops().contains(&StoreOp::Close)
    }

    /// Remote paths created by put/mkdir calls, in order.
    pub fn created_paths(&self) -> Vec<String> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                StoreOp::CreateDir(path) => Some(path),
                StoreOp::Put { remote, .. } => Some(remote),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl RemoteStore for MockStore {
    async fn list_dir(&self, path: &str) -> Result<Vec<RemoteEntry>> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(StoreOp::List(path.to_string()));
        if state.fail_list {
            return Err(anyhow!("permission denied"));
        }
        Ok(state.listing.clone())
    }

    async fn delete_file(&self, path: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(StoreOp::DeleteFile(path.to_string()));
        if state.fail_delete_on.as_deref() == Some(path) {
            return Err(anyhow!("delete rejected"));
        }
        Ok(())
    }

    async fn remove_dir_all(&self, path: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(StoreOp::RemoveDirAll(path.to_string()));
        if state.fail_delete_on.as_deref() == Some(path) {
            return Err(anyhow!("rmdir rejected"));
        }
        Ok(())
    }

    async fn create_dir(&self, path: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(StoreOp::CreateDir(path.to_string()));
        Ok(())
    }

    async fn put_file(&self, local: &Path, remote: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(StoreOp::Put {
            local: local.to_string_lossy().to_string(),
            remote: remote.to_string(),
        });
        if state.fail_put_on.as_deref() == Some(remote) {
            return Err(anyhow!("transfer rejected"));
        }
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.state.lock().unwrap().ops.push(StoreOp::Close);
        Ok(())
    }
}

/// Connector handing out clones of one mock store.
pub struct MockConnector {
    store: MockStore,
    pub fail_connect: bool,
}

impl MockConnector {
    pub fn new(store: MockStore) -> Self {
        Self {
            store,
            fail_connect: false,
        }
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn connect(&self) -> Result<Box<dyn RemoteStore>> {
        if self.fail_connect {
            return Err(anyhow!("connection refused"));
        }
        Ok(Box::new(self.store.clone()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Success,
    Error,
}

/// Reporter that records every event for later inspection.
#[derive(Clone, Default)]
pub struct RecordingReporter {
    events: Arc<Mutex<Vec<(Level, String)>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages_at(&self, level: Level) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, msg)| msg.clone())
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn info(&self, msg: &str) {
        self.events.lock().unwrap().push((Level::Info, msg.to_string()));
    }

    fn warn(&self, msg: &str) {
        self.events.lock().unwrap().push((Level::Warn, msg.to_string()));
    }

    fn success(&self, msg: &str) {
        self.events.lock().unwrap().push((Level::Success, msg.to_string()));
    }

    fn error(&self, msg: &str) {
        self.events.lock().unwrap().push((Level::Error, msg.to_string()));
    }
}

/// Build the scenario tree `a.txt`, `sub/`, `sub/b.txt` in a temp directory.
pub fn sample_tree() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"alpha").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join("b.txt"), b"beta").unwrap();
    dir
}

/// Local directory string for a temp tree, with the trailing separator the
/// path rewrite relies on.
pub fn local_dir_of(dir: &TempDir) -> String {
    format!("{}/", dir.path().display())
}
