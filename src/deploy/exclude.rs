//! Exclude pattern matching for deployment uploads.
//!
//! Supports gitignore-style glob patterns for dropping entries from the
//! enumerated local tree before they reach the remote store.

use anyhow::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Entries never worth shipping to a web root.
pub const DEFAULT_EXCLUDES: &[&str] = &[".DS_Store", "Thumbs.db", "desktop.ini", "*.swp", "*~"];

/// Compiled exclude pattern set.
#[derive(Debug, Clone)]
pub struct ExcludePatterns {
    glob_set: GlobSet,
    patterns: Vec<String>,
}

impl Default for ExcludePatterns {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ExcludePatterns {
    /// Empty set: nothing is excluded.
    pub fn none() -> Self {
        Self {
            glob_set: GlobSet::empty(),
            patterns: Vec::new(),
        }
    }

    /// Default set covering OS droppings.
    pub fn with_defaults() -> Self {
        Self::from_patterns(DEFAULT_EXCLUDES).unwrap_or_else(|_| Self::none())
    }

    /// Compile a pattern list.
    pub fn from_patterns(patterns: &[&str]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        let mut list = Vec::new();

        for pattern in patterns {
            builder.add(Glob::new(pattern)?);
            list.push(pattern.to_string());
        }

        Ok(Self {
            glob_set: builder.build()?,
            patterns: list,
        })
    }

    /// Check whether a path should be dropped from the upload set.
    ///
    /// Matches the full path, the file name, and every path component, so a
    /// bare directory pattern like `node_modules` also excludes the
    /// directory's contents.
    pub fn is_excluded(&self, path: &str) -> bool {
        if self.glob_set.is_match(path) {
            return true;
        }

        if let Some(name) = std::path::Path::new(path).file_name() {
            if self.glob_set.is_match(name.to_string_lossy().as_ref()) {
                return true;
            }
        }

        for component in std::path::Path::new(path).components() {
            if let std::path::Component::Normal(name) = component {
                if self.glob_set.is_match(name.to_string_lossy().as_ref()) {
                    return true;
                }
            }
        }

        false
    }

    /// Raw pattern strings.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}
