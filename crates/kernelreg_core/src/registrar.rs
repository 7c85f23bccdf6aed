//! Kernel registration over discovered environments.
//!
//! # Responsibility
//! - Materialize one kernel directory plus `kernel.json` per environment.
//! - Keep descriptor writes atomic and unconditionally overwriting.
//!
//! # Invariants
//! - Kernel directory creation is idempotent; "already exists" never fails.
//! - A descriptor is either absent, stale-but-complete, or current; a
//!   truncated `kernel.json` is never observable.
//! - Per-environment failures do not stop the batch; they are collected and
//!   surfaced after every environment has been attempted.
//! - Stale descriptors for removed environments are left untouched.

use crate::model::environment::Environment;
use crate::model::kernel_spec::KernelSpec;
use crate::paths::KernelLayout;
use crate::scan::{discover_environments, ScanError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub type RegistrarResult<T> = Result<T, RegistrarError>;

/// Registration error for one batch pass.
#[derive(Debug)]
pub enum RegistrarError {
    /// A precondition or listing failure that aborts the whole pass.
    Filesystem { path: PathBuf, source: io::Error },
    /// The pass completed but one or more environments failed to register.
    Incomplete { failures: Vec<RegistrationFailure> },
}

impl Display for RegistrarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Filesystem { path, source } => {
                write!(f, "filesystem error at `{}`: {source}", path.display())
            }
            Self::Incomplete { failures } => {
                write!(f, "failed to register {} environment(s):", failures.len())?;
                for failure in failures {
                    write!(f, " [{failure}]")?;
                }
                Ok(())
            }
        }
    }
}

impl Error for RegistrarError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Filesystem { source, .. } => Some(source),
            Self::Incomplete { .. } => None,
        }
    }
}

impl From<ScanError> for RegistrarError {
    fn from(value: ScanError) -> Self {
        match value {
            ScanError::Filesystem { path, source } => Self::Filesystem { path, source },
        }
    }
}

/// One environment that could not be registered during a batch pass.
#[derive(Debug)]
pub struct RegistrationFailure {
    /// Environment (and kernel) name.
    pub name: String,
    /// Path the failing operation targeted.
    pub path: PathBuf,
    /// Underlying OS error.
    pub source: io::Error,
}

impl Display for RegistrationFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "env `{}` at `{}`: {}",
            self.name,
            self.path.display(),
            self.source
        )
    }
}

/// Outcome of a successful batch pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterSummary {
    /// Names of environments whose descriptor was (re)written.
    pub registered: Vec<String>,
    /// Registered environments whose interpreter binary was not found.
    ///
    /// Such kernels are unusable until the interpreter appears, but the
    /// registration itself still succeeds (the env may be mid-install).
    pub missing_interpreters: Vec<String>,
}

/// Registers kernels for every environment under a user's home directory.
///
/// Wraps [`KernelRegistrar`] with the default [`KernelLayout`]; this is the
/// whole-program operation the CLI calls.
pub fn register_all_kernels(
    home_dir: &Path,
    envs_root: &Path,
) -> RegistrarResult<RegisterSummary> {
    KernelRegistrar::default().register_all_kernels_in(home_dir, envs_root)
}

/// Batch kernel registrar bound to one path layout.
#[derive(Debug, Clone, Default)]
pub struct KernelRegistrar {
    layout: KernelLayout,
}

impl KernelRegistrar {
    /// Creates a registrar using a custom path layout.
    pub fn new(layout: KernelLayout) -> Self {
        Self { layout }
    }

    /// Returns the layout this registrar derives paths from.
    pub fn layout(&self) -> &KernelLayout {
        &self.layout
    }

    /// Registers kernels for all environments under the layout's envs root.
    pub fn register_all_kernels(&self, home_dir: &Path) -> RegistrarResult<RegisterSummary> {
        let envs_root = self.layout.envs_root(home_dir);
        self.register_all_kernels_in(home_dir, &envs_root)
    }

    /// Registers kernels for all environments under an explicit envs root.
    ///
    /// # Contract
    /// - `home_dir` must be an existing directory; otherwise the pass fails
    ///   before touching anything.
    /// - A missing or empty `envs_root` completes as a no-op.
    /// - Every discovered environment is attempted; failures accumulate into
    ///   [`RegistrarError::Incomplete`] after the pass. Descriptors written
    ///   before a failure are kept.
    ///
    /// # Side effects
    /// - Creates kernel directories and writes `kernel.json` files under
    ///   `home_dir` only. No network, no process spawning.
    pub fn register_all_kernels_in(
        &self,
        home_dir: &Path,
        envs_root: &Path,
    ) -> RegistrarResult<RegisterSummary> {
        info!(
            "event=kernel_register module=registrar status=start home={} envs_root={}",
            home_dir.display(),
            envs_root.display()
        );

        if !home_dir.is_dir() {
            let err = io::Error::new(
                io::ErrorKind::NotFound,
                "home directory does not exist or is not a directory",
            );
            error!(
                "event=kernel_register module=registrar status=error home={} error={}",
                home_dir.display(),
                err
            );
            return Err(RegistrarError::Filesystem {
                path: home_dir.to_path_buf(),
                source: err,
            });
        }

        let environments = discover_environments(envs_root)?;

        let mut summary = RegisterSummary::default();
        let mut failures = Vec::new();
        for environment in &environments {
            let interpreter = environment.interpreter_path(&self.layout);
            if !interpreter.is_file() {
                warn!(
                    "event=interpreter_check module=registrar status=warn env={} interpreter={} reason=missing",
                    environment.name,
                    interpreter.display()
                );
                summary.missing_interpreters.push(environment.name.clone());
            }

            match self.register_environment(home_dir, environment) {
                Ok(()) => {
                    info!(
                        "event=kernel_register module=registrar status=ok env={} interpreter={}",
                        environment.name,
                        interpreter.display()
                    );
                    summary.registered.push(environment.name.clone());
                }
                Err(failure) => {
                    error!(
                        "event=kernel_register module=registrar status=error env={} path={} error={}",
                        failure.name,
                        failure.path.display(),
                        failure.source
                    );
                    failures.push(failure);
                }
            }
        }

        if !failures.is_empty() {
            return Err(RegistrarError::Incomplete { failures });
        }

        info!(
            "event=kernel_register module=registrar status=done home={} registered={} missing_interpreters={}",
            home_dir.display(),
            summary.registered.len(),
            summary.missing_interpreters.len()
        );
        Ok(summary)
    }

    /// Writes one environment's kernel directory and descriptor.
    fn register_environment(
        &self,
        home_dir: &Path,
        environment: &Environment,
    ) -> Result<(), RegistrationFailure> {
        let kernel_dir = self.layout.kernel_dir(home_dir, &environment.name);
        std::fs::create_dir_all(&kernel_dir).map_err(|err| RegistrationFailure {
            name: environment.name.clone(),
            path: kernel_dir.clone(),
            source: err,
        })?;

        let spec = KernelSpec::python(&environment.interpreter_path(&self.layout), &environment.name);
        let bytes = spec.to_json_bytes().map_err(|err| RegistrationFailure {
            name: environment.name.clone(),
            path: kernel_dir.clone(),
            source: err.into(),
        })?;

        let descriptor_path = self.layout.descriptor_path(&kernel_dir);
        write_atomic(&kernel_dir, &descriptor_path, &bytes).map_err(|err| {
            RegistrationFailure {
                name: environment.name.clone(),
                path: descriptor_path,
                source: err,
            }
        })
    }
}

/// Replaces `final_path` with `bytes` via temp-file-then-rename.
///
/// The temp file lives in the destination directory so the rename stays on
/// one filesystem and is atomic. A failure anywhere leaves either the old
/// descriptor or none, never a truncated one.
fn write_atomic(dir: &Path, final_path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(final_path).map_err(|err| err.error)?;
    Ok(())
}
