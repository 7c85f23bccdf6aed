//! Environment domain model.
//!
//! # Responsibility
//! - Represent one discovered environment directory for a single pass.
//! - Decide which directory names are acceptable as kernel names.
//!
//! # Invariants
//! - `name` always equals the base name of `dir`.
//! - An `Environment` is transient; it is never persisted between runs.

use crate::paths::KernelLayout;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

// Kernel directory names double as kernel identifiers, so they must stay
// within the character set frontends accept for kernel spec names.
static KERNEL_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("valid kernel name regex"));

/// One candidate environment directory found under the envs root.
///
/// The directory base name serves as both the kernel identifier and the
/// display label, matching what users see in their environment listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// Base name of the environment directory.
    pub name: String,
    /// Absolute path of the environment directory.
    pub dir: PathBuf,
}

impl Environment {
    /// Builds an environment record from its directory path.
    ///
    /// Returns `None` when the base name is missing, not UTF-8, or not a
    /// valid kernel name. Callers treat that as "skip", never as an error.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Option<Self> {
        let dir = dir.into();
        let name = dir.file_name()?.to_str()?;
        if !is_valid_kernel_name(name) {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            dir,
        })
    }

    /// Absolute path of this environment's interpreter per the layout.
    ///
    /// Derivation is a pure join; existence of the binary is checked by the
    /// registrar, and only as a warning.
    pub fn interpreter_path(&self, layout: &KernelLayout) -> PathBuf {
        layout.interpreter_path(&self.dir)
    }

    /// Returns whether this environment is hidden (dot-prefixed directory).
    pub fn is_hidden(path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with('.'))
    }
}

/// Returns whether `name` can be used as a kernel directory name.
pub fn is_valid_kernel_name(name: &str) -> bool {
    KERNEL_NAME_RE.is_match(name)
}
