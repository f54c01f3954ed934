// Path rewrite helpers for the upload phase.
// Remote paths always use forward slashes regardless of platform.

use crate::deploy::error::DeployError;

/// Normalize platform separators to forward slashes.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Rewrite a local entry path to its remote target by substituting the local
/// prefix with the remote directory.
///
/// The entry must actually begin with the normalized local prefix. A
/// non-prefixed entry is rejected as a validation error instead of silently
/// producing a malformed remote path.
pub fn remote_target(entry: &str, local_dir: &str, remote_dir: &str) -> Result<String, DeployError> {
    let normalized = normalize_separators(entry);
    let prefix = normalize_separators(local_dir);

    match normalized.strip_prefix(&prefix) {
        Some(rest) => Ok(format!("{}{}", remote_dir, rest)),
        None => Err(DeployError::Upload {
            path: entry.to_string(),
            cause: anyhow::anyhow!("entry path does not start with the local prefix {:?}", prefix),
        }),
    }
}
