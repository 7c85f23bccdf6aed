//! Spawn-time CLI entry point.
//!
//! # Responsibility
//! - Resolve ambient inputs (home directory, flags) exactly once, here.
//! - Delegate all registration logic to `kernelreg_core`.
//! - Map outcomes to exit codes: 0 on success (including zero envs found),
//!   1 on any registrar or bootstrap failure.

use clap::Parser;
use kernelreg_core::{
    default_log_level, init_file_logging, init_stderr_logging, KernelLayout, KernelRegistrar,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "kernelreg",
    version,
    about = "Registers Jupyter kernels for a user's conda-style environments"
)]
struct Cli {
    /// Target home directory; defaults to the invoking user's home.
    #[arg(long)]
    home: Option<PathBuf>,

    /// Environments root; defaults to `.conda/envs` under the home directory.
    #[arg(long)]
    envs_root: Option<PathBuf>,

    /// Kernel root under the home directory; defaults to
    /// `.local/share/jupyter/kernels`. An absolute path replaces the home
    /// prefix entirely.
    #[arg(long)]
    kernels_dir: Option<PathBuf>,

    /// Write rolling log files to this directory instead of stderr.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error.
    #[arg(long, default_value_t = default_log_level().to_string())]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();
    std::process::exit(run(cli));
}

fn run(cli: Cli) -> i32 {
    let logging = match &cli.log_dir {
        Some(dir) => init_file_logging(&cli.log_level, dir),
        None => init_stderr_logging(&cli.log_level),
    };
    if let Err(err) = logging {
        eprintln!("kernelreg: {err}");
        return 1;
    }
    log::info!(
        "event=cli_start module=cli status=ok version={}",
        env!("CARGO_PKG_VERSION")
    );

    // Ambient home lookup happens only here; core takes explicit paths.
    let home_dir = match cli.home.or_else(dirs::home_dir) {
        Some(home_dir) => home_dir,
        None => {
            eprintln!("kernelreg: cannot resolve a home directory; pass --home");
            return 1;
        }
    };

    let mut layout = KernelLayout::default();
    if let Some(kernels_dir) = cli.kernels_dir {
        layout = layout.with_kernels_subpath(kernels_dir);
    }
    let registrar = KernelRegistrar::new(layout);

    let result = match cli.envs_root {
        Some(envs_root) => registrar.register_all_kernels_in(&home_dir, &envs_root),
        None => registrar.register_all_kernels(&home_dir),
    };

    match result {
        Ok(summary) => {
            println!(
                "registered {} kernel(s) under {}",
                summary.registered.len(),
                home_dir.display()
            );
            for name in &summary.missing_interpreters {
                eprintln!("kernelreg: warning: env `{name}` has no interpreter binary yet");
            }
            0
        }
        Err(err) => {
            eprintln!("kernelreg: {err}");
            1
        }
    }
}
