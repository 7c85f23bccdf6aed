//! Filesystem layout conventions for environment and kernel paths.
//!
//! # Responsibility
//! - Hold the relative-path constants the registrar must not hard-code.
//! - Derive every concrete path from a home directory plus this layout.
//!
//! # Invariants
//! - All derivations are pure joins; nothing here touches the filesystem.
//! - The descriptor file name is always `kernel.json`.

use std::path::{Path, PathBuf};

/// Default envs root relative to a user's home directory.
pub const DEFAULT_ENVS_SUBPATH: &str = ".conda/envs";

/// Default kernel root relative to a user's home directory.
///
/// This is the conventional per-user discovery path of Jupyter frontends;
/// deployments with a relocated data directory override it via
/// [`KernelLayout::with_kernels_subpath`].
pub const DEFAULT_KERNELS_SUBPATH: &str = ".local/share/jupyter/kernels";

/// Default interpreter location relative to an environment directory.
pub const DEFAULT_INTERPRETER_SUBPATH: &str = "bin/python";

/// Descriptor file name inside each kernel directory.
pub const DESCRIPTOR_FILE_NAME: &str = "kernel.json";

/// Relative-path conventions joining homes, environments and kernels.
///
/// The defaults match a conda-per-user deployment; each subpath can be
/// overridden independently so frontends with different data directories
/// stay supported without touching registrar logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelLayout {
    envs_subpath: PathBuf,
    kernels_subpath: PathBuf,
    interpreter_subpath: PathBuf,
}

impl Default for KernelLayout {
    fn default() -> Self {
        Self {
            envs_subpath: PathBuf::from(DEFAULT_ENVS_SUBPATH),
            kernels_subpath: PathBuf::from(DEFAULT_KERNELS_SUBPATH),
            interpreter_subpath: PathBuf::from(DEFAULT_INTERPRETER_SUBPATH),
        }
    }
}

impl KernelLayout {
    /// Replaces the envs root subpath (relative to home).
    pub fn with_envs_subpath(mut self, subpath: impl Into<PathBuf>) -> Self {
        self.envs_subpath = subpath.into();
        self
    }

    /// Replaces the kernel root subpath (relative to home).
    pub fn with_kernels_subpath(mut self, subpath: impl Into<PathBuf>) -> Self {
        self.kernels_subpath = subpath.into();
        self
    }

    /// Replaces the interpreter subpath (relative to an env directory).
    pub fn with_interpreter_subpath(mut self, subpath: impl Into<PathBuf>) -> Self {
        self.interpreter_subpath = subpath.into();
        self
    }

    /// `<home>/.conda/envs`
    pub fn envs_root(&self, home_dir: &Path) -> PathBuf {
        home_dir.join(&self.envs_subpath)
    }

    /// `<home>/.local/share/jupyter/kernels`
    pub fn kernels_root(&self, home_dir: &Path) -> PathBuf {
        home_dir.join(&self.kernels_subpath)
    }

    /// `<home>/.local/share/jupyter/kernels/<name>`
    pub fn kernel_dir(&self, home_dir: &Path, kernel_name: &str) -> PathBuf {
        self.kernels_root(home_dir).join(kernel_name)
    }

    /// `<kernel_dir>/kernel.json`
    pub fn descriptor_path(&self, kernel_dir: &Path) -> PathBuf {
        kernel_dir.join(DESCRIPTOR_FILE_NAME)
    }

    /// `<env_dir>/bin/python`
    pub fn interpreter_path(&self, env_dir: &Path) -> PathBuf {
        env_dir.join(&self.interpreter_subpath)
    }
}
