//! Deploy engine.
//!
//! Sequences the pipeline phases over a single remote session: connect,
//! clear the remote target, enumerate the local tree, upload. Control flows
//! strictly top to bottom; the first unrecovered error closes the session
//! and aborts the run.

use std::path::Path;
use std::sync::Arc;

use crate::config::DeployConfig;
use crate::deploy::enumerate::LocalTree;
use crate::deploy::error::DeployError;
use crate::deploy::path_utils::remote_target;
use crate::deploy::timing::{format_mission_time, MissionTiming};
use crate::report::Reporter;
use crate::store::{Connector, RemoteStore};

/// Pipeline state for one run.
///
/// `Closed` and `Failed` are terminal; both entail the session being closed,
/// or never opened for failures before `Connecting` completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeployPhase {
    #[default]
    Idle,
    Connecting,
    Listing,
    Deleting,
    Enumerating,
    Uploading,
    Closed,
    Failed,
}

/// One-shot deployment engine. Create, `run()`, discard.
///
/// A single engine drives a single run; concurrent runs over one session are
/// not supported and avoiding them is the caller's responsibility.
pub struct DeployEngine {
    config: DeployConfig,
    connector: Arc<dyn Connector>,
    reporter: Arc<dyn Reporter>,
    timing: MissionTiming,
    phase: DeployPhase,
}

impl DeployEngine {
    pub fn new(
        config: DeployConfig,
        connector: Arc<dyn Connector>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            config,
            connector,
            reporter,
            timing: MissionTiming::new(),
            phase: DeployPhase::default(),
        }
    }

    /// Current pipeline state.
    pub fn phase(&self) -> DeployPhase {
        self.phase
    }

    /// Timing marks recorded so far.
    pub fn timing(&self) -> MissionTiming {
        self.timing
    }

    /// Run the full pipeline once.
    ///
    /// The first error is reported through the error channel, closes the
    /// session if one is open, and aborts the run. An unset local directory
    /// skips the run with a single error log and zero remote calls; that is
    /// the only recovered condition.
    pub async fn run(&mut self) -> Result<(), DeployError> {
        if self.config.local_dir.is_empty() {
            let err = DeployError::Configuration("local source directory is not set".to_string());
            self.reporter.error(&format!("deployment skipped: {}", err));
            return Ok(());
        }

        self.timing.start();

        self.phase = DeployPhase::Connecting;
        let store = match self.connector.connect().await {
            Ok(store) => store,
            Err(cause) => {
                let err = DeployError::Connection { cause };
                self.phase = DeployPhase::Failed;
                self.reporter.error(&err.to_string());
                return Err(err);
            }
        };
        self.reporter.info(&format!(
            "connected to {}:{}",
            self.config.connection.host, self.config.connection.port
        ));

        match self.mirror(store.as_ref()).await {
            Ok(()) => {
                self.close(store.as_ref()).await;
                self.phase = DeployPhase::Closed;
                self.timing.end();
                self.reporter.info(&format!(
                    "mission time: {}",
                    format_mission_time(self.timing.elapsed())
                ));
                Ok(())
            }
            Err(err) => {
                self.close(store.as_ref()).await;
                self.phase = DeployPhase::Failed;
                self.reporter.error(&err.to_string());
                Err(err)
            }
        }
    }

    /// Cleanup, enumeration and upload over an open session.
    async fn mirror(&mut self, store: &dyn RemoteStore) -> Result<(), DeployError> {
        self.clear_remote(store).await?;
        let entries = self.enumerate_local()?;
        self.upload(store, &entries).await
    }

    /// List the remote target directory and remove every entry found,
    /// strictly one at a time in listing order.
    async fn clear_remote(&mut self, store: &dyn RemoteStore) -> Result<(), DeployError> {
        self.phase = DeployPhase::Listing;
        let remote_dir = self.config.remote_dir.clone();
        let listing = store
            .list_dir(&remote_dir)
            .await
            .map_err(|cause| DeployError::RemoteList {
                path: remote_dir.clone(),
                cause,
            })?;

        self.phase = DeployPhase::Deleting;
        self.reporter.warn("clearing remote directory...");

        for entry in listing {
            let path = format!("{}{}", remote_dir, entry.name);
            self.reporter.warn(&format!("deleting: {}", path));

            let removal = if entry.is_dir() {
                store.remove_dir_all(&path).await
            } else {
                store.delete_file(&path).await
            };
            removal.map_err(|cause| DeployError::RemoteDelete { path, cause })?;
        }

        Ok(())
    }

    fn enumerate_local(&mut self) -> Result<Vec<String>, DeployError> {
        self.phase = DeployPhase::Enumerating;
        LocalTree::enumerate(
            &self.config.local_dir,
            &self.config.exclude,
            self.config.filter.as_deref(),
        )
    }

    /// Transfer every enumerated entry, strictly sequentially in enumeration
    /// order. The entry kind is resolved by a local stat at upload time.
    async fn upload(
        &mut self,
        store: &dyn RemoteStore,
        entries: &[String],
    ) -> Result<(), DeployError> {
        self.phase = DeployPhase::Uploading;
        self.reporter.info("starting upload...");

        for entry in entries {
            let target = remote_target(entry, &self.config.local_dir, &self.config.remote_dir)?;

            let outcome = if LocalTree::is_directory(entry) {
                store.create_dir(&target).await
            } else {
                store.put_file(Path::new(entry), &target).await
            };
            outcome.map_err(|cause| DeployError::Upload {
                path: entry.clone(),
                cause,
            })?;

            self.reporter.success(&format!("uploading: {} -> {}", entry, target));
        }

        self.reporter.info("upload complete");
        Ok(())
    }

    async fn close(&self, store: &dyn RemoteStore) {
        if let Err(err) = store.close().await {
            self.reporter.warn(&format!("failed to close session: {}", err));
        }
    }
}
