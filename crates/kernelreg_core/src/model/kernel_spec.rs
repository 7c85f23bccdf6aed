//! Kernel descriptor model (`kernel.json`).
//!
//! # Responsibility
//! - Define the exact on-disk shape consumed by notebook frontends.
//! - Produce deterministic descriptor bytes for idempotent writes.
//!
//! # Invariants
//! - Field order is fixed by the struct, so serialization is byte-stable.
//! - `argv` always ends with the `{connection_file}` placeholder the
//!   frontend substitutes at kernel launch.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Language tag for interpreter-based python environments.
pub const LANGUAGE_PYTHON: &str = "python";

/// Launch-module arguments appended after the interpreter path.
const PYTHON_ARGV_TAIL: [&str; 4] = ["-m", "ipykernel_launcher", "-f", "{connection_file}"];

/// On-disk kernel descriptor, one per registered environment.
///
/// Jupyter frontends read this file from their kernel-discovery path; the
/// three fields below are the complete contract for this registrar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelSpec {
    /// Command line used to start the kernel, interpreter first.
    pub argv: Vec<String>,
    /// Label shown in the frontend's kernel picker.
    pub display_name: String,
    /// Kernel implementation language tag.
    pub language: String,
}

impl KernelSpec {
    /// Builds a python kernel descriptor for one environment interpreter.
    ///
    /// # Contract
    /// - `argv[0]` is the interpreter path, rendered lossily when the path
    ///   is not valid UTF-8 (such paths never pass discovery validation).
    /// - `language` is always [`LANGUAGE_PYTHON`].
    pub fn python(interpreter: &Path, display_name: impl Into<String>) -> Self {
        let mut argv = Vec::with_capacity(1 + PYTHON_ARGV_TAIL.len());
        argv.push(interpreter.to_string_lossy().into_owned());
        argv.extend(PYTHON_ARGV_TAIL.iter().map(|arg| (*arg).to_string()));
        Self {
            argv,
            display_name: display_name.into(),
            language: LANGUAGE_PYTHON.to_string(),
        }
    }

    /// Serializes this descriptor to the exact bytes written to disk.
    ///
    /// Pretty-printed with a trailing newline; repeated calls on equal
    /// specs yield identical bytes, which is what makes whole-file
    /// overwrites idempotent.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut bytes = serde_json::to_vec_pretty(self)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}
