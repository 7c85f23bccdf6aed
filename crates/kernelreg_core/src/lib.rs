//! Core logic for the kernel registrar.
//!
//! Scans a user's home directory for conda-style environments and writes one
//! Jupyter `kernel.json` descriptor per environment. All ambient lookups
//! (home resolution, CLI flags) live in the caller; this crate takes explicit
//! paths only.

pub mod logging;
pub mod model;
pub mod paths;
pub mod registrar;
pub mod scan;

pub use logging::{default_log_level, init_file_logging, init_stderr_logging, LoggingError};
pub use model::environment::{is_valid_kernel_name, Environment};
pub use model::kernel_spec::{KernelSpec, LANGUAGE_PYTHON};
pub use paths::{KernelLayout, DESCRIPTOR_FILE_NAME};
pub use registrar::{
    register_all_kernels, KernelRegistrar, RegisterSummary, RegistrarError, RegistrarResult,
    RegistrationFailure,
};
pub use scan::{discover_environments, ScanError, ScanResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
