//! SFTP implementation of the remote store.
//!
//! Session establishment follows the usual ssh2 sequence: TCP connect
//! bounded by the ready timeout, SSH handshake, password authentication,
//! then the SFTP subsystem.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use ssh2::{Session, Sftp};
use std::io;
use std::net::{TcpStream, ToSocketAddrs};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use crate::config::ConnectionConfig;
use crate::store::backend::{Connector, EntryKind, RemoteEntry, RemoteStore};

/// Connects to an SFTP server with a fixed username/password credential set.
pub struct SftpConnector {
    config: ConnectionConfig,
}

impl SftpConnector {
    pub fn new(config: ConnectionConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Connector for SftpConnector {
    async fn connect(&self) -> Result<Box<dyn RemoteStore>> {
        let store = SftpStore::connect(&self.config)?;
        Ok(Box::new(store))
    }
}

struct SftpInner {
    session: Session,
    sftp: Sftp,
}

/// One live SFTP session.
pub struct SftpStore {
    inner: Mutex<SftpInner>,
}

impl SftpStore {
    /// Establish a session against the configured host.
    pub fn connect(config: &ConnectionConfig) -> Result<Self> {
        let addr = format!("{}:{}", config.host, config.port);
        let timeout = Duration::from_millis(config.ready_timeout_ms);

        let resolved = addr
            .to_socket_addrs()
            .with_context(|| format!("Failed to resolve {}", addr))?
            .next()
            .ok_or_else(|| anyhow!("No address found for {}", addr))?;

        let tcp = TcpStream::connect_timeout(&resolved, timeout)
            .with_context(|| format!("TCP connection to {} failed", addr))?;

        let mut session = Session::new().context("Failed to create SSH session")?;
        session.set_tcp_stream(tcp);
        session
            .handshake()
            .with_context(|| format!("SSH handshake with {} failed", addr))?;
        session
            .userauth_password(&config.username, &config.password)
            .with_context(|| format!("Authentication failed for {}@{}", config.username, addr))?;

        let sftp = session.sftp().context("Failed to open SFTP subsystem")?;

        Ok(Self {
            inner: Mutex::new(SftpInner { session, sftp }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, SftpInner> {
        // The session is only driven by one run at a time; a poisoned lock
        // can still be used to disconnect.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn remove_recursive(sftp: &Sftp, path: &Path) -> Result<()> {
    let listed = sftp
        .readdir(path)
        .with_context(|| format!("Failed to list remote directory: {}", path.display()))?;

    for (entry, stat) in listed {
        if stat.is_dir() {
            remove_recursive(sftp, &entry)?;
        } else {
            sftp.unlink(&entry)
                .with_context(|| format!("Failed to delete remote file: {}", entry.display()))?;
        }
    }

    sftp.rmdir(path)
        .with_context(|| format!("Failed to remove remote directory: {}", path.display()))?;
    Ok(())
}

#[async_trait]
impl RemoteStore for SftpStore {
    async fn list_dir(&self, path: &str) -> Result<Vec<RemoteEntry>> {
        let inner = self.lock();
        let listed = inner
            .sftp
            .readdir(Path::new(path))
            .with_context(|| format!("Failed to list remote directory: {}", path))?;

        let mut entries = Vec::with_capacity(listed.len());
        for (entry_path, stat) in listed {
            let name = entry_path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| entry_path.to_string_lossy().to_string());
            let kind = if stat.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            entries.push(RemoteEntry { name, kind });
        }
        Ok(entries)
    }

    async fn delete_file(&self, path: &str) -> Result<()> {
        let inner = self.lock();
        inner
            .sftp
            .unlink(Path::new(path))
            .with_context(|| format!("Failed to delete remote file: {}", path))
    }

    async fn remove_dir_all(&self, path: &str) -> Result<()> {
        let inner = self.lock();
        remove_recursive(&inner.sftp, Path::new(path))
    }

    async fn create_dir(&self, path: &str) -> Result<()> {
        let inner = self.lock();
        inner
            .sftp
            .mkdir(Path::new(path), 0o755)
            .with_context(|| format!("Failed to create remote directory: {}", path))
    }

    async fn put_file(&self, local: &Path, remote: &str) -> Result<()> {
        let inner = self.lock();
        let mut source = std::fs::File::open(local)
            .with_context(|| format!("Failed to open local file: {}", local.display()))?;
        let mut target = inner
            .sftp
            .create(Path::new(remote))
            .with_context(|| format!("Failed to create remote file: {}", remote))?;
        io::copy(&mut source, &mut target)
            .with_context(|| format!("Failed to write remote file: {}", remote))?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        let inner = self.lock();
        inner
            .session
            .disconnect(None, "deployment finished", None)
            .context("Failed to close SFTP session")
    }
}
