//! Environment discovery under a user's envs root.
//!
//! # Responsibility
//! - List immediate subdirectories of the envs root as candidate
//!   environments.
//! - Apply skip rules for entries that can never become kernels.
//!
//! # Invariants
//! - A nonexistent envs root is an empty result, never an error.
//! - Skipped entries are logged, never silently dropped.
//! - Results are sorted by name for deterministic processing order.

use crate::model::environment::Environment;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

pub type ScanResult<T> = Result<T, ScanError>;

/// Discovery error for envs-root listing failures.
#[derive(Debug)]
pub enum ScanError {
    /// Reading the envs root (or one of its entries) failed.
    Filesystem { path: PathBuf, source: io::Error },
}

impl Display for ScanError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Filesystem { path, source } => {
                write!(f, "cannot read envs root `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ScanError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Filesystem { source, .. } => Some(source),
        }
    }
}

/// Lists candidate environments directly under `envs_root`.
///
/// # Contract
/// - Nonexistent `envs_root` returns `Ok(vec![])` (spawn-time no-op).
/// - Skips plain files, hidden (dot-prefixed) directories, and directories
///   whose names cannot serve as kernel names.
/// - Output is sorted by environment name.
///
/// # Side effects
/// - Emits `env_discover` logging events with counts and status.
pub fn discover_environments(envs_root: &Path) -> ScanResult<Vec<Environment>> {
    info!(
        "event=env_discover module=scan status=start envs_root={}",
        envs_root.display()
    );

    if !envs_root.exists() {
        info!(
            "event=env_discover module=scan status=ok envs_root={} found=0 reason=missing_root",
            envs_root.display()
        );
        return Ok(Vec::new());
    }

    let entries = match std::fs::read_dir(envs_root) {
        Ok(entries) => entries,
        Err(err) => {
            error!(
                "event=env_discover module=scan status=error envs_root={} error={}",
                envs_root.display(),
                err
            );
            return Err(ScanError::Filesystem {
                path: envs_root.to_path_buf(),
                source: err,
            });
        }
    };

    let mut environments = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| ScanError::Filesystem {
            path: envs_root.to_path_buf(),
            source: err,
        })?;
        let path = entry.path();

        // is_dir follows symlinks, so linked environment directories count.
        if !path.is_dir() {
            continue;
        }

        if Environment::is_hidden(&path) {
            continue;
        }

        match Environment::from_dir(&path) {
            Some(environment) => environments.push(environment),
            None => {
                warn!(
                    "event=env_discover module=scan status=warn skipped={} reason=invalid_name",
                    path.display()
                );
            }
        }
    }

    environments.sort_by(|a, b| a.name.cmp(&b.name));

    info!(
        "event=env_discover module=scan status=ok envs_root={} found={}",
        envs_root.display(),
        environments.len()
    );
    Ok(environments)
}
