//! Local source tree enumeration.
//!
//! Mirrors the recursive glob walk of the original pipeline: the pattern is
//! the local directory string with `**` appended, so the trailing separator
//! of the configured directory is significant.

use anyhow::{anyhow, Context, Result};
use std::path::Path;

use crate::deploy::error::DeployError;
use crate::deploy::exclude::ExcludePatterns;

/// Local filesystem queries used by the deploy pipeline.
pub struct LocalTree;

impl LocalTree {
    /// Enumerate every entry under `local_dir` in glob order.
    ///
    /// The first match is the source root itself and is always dropped by
    /// construction, not by a filter. Exclude patterns run before the filter
    /// predicate; both preserve enumeration order.
    pub fn enumerate(
        local_dir: &str,
        exclude: &ExcludePatterns,
        filter: Option<&(dyn Fn(&str) -> bool + Send + Sync)>,
    ) -> Result<Vec<String>, DeployError> {
        let paths = Self::walk(local_dir).map_err(|cause| DeployError::LocalEnumeration {
            dir: local_dir.to_string(),
            cause,
        })?;

        Ok(paths
            .into_iter()
            .filter(|path| !exclude.is_excluded(path))
            .filter(|path| filter.map_or(true, |keep| keep(path)))
            .collect())
    }

    fn walk(local_dir: &str) -> Result<Vec<String>> {
        if !Path::new(local_dir).is_dir() {
            return Err(anyhow!("{} is not a directory", local_dir));
        }

        let pattern = format!("{}**", local_dir);
        let mut paths = Vec::new();

        for entry in glob::glob(&pattern)
            .with_context(|| format!("Invalid enumeration pattern: {}", pattern))?
        {
            let path = entry.context("Failed to read local entry")?;
            paths.push(path.to_string_lossy().to_string());
        }

        // The root itself always matches first and is never uploaded
        if !paths.is_empty() {
            paths.remove(0);
        }

        Ok(paths)
    }

    /// Stat an entry without following symlinks, like `lstat`.
    pub fn is_directory(path: &str) -> bool {
        std::fs::symlink_metadata(path)
            .map(|meta| meta.is_dir())
            .unwrap_or(false)
    }
}
