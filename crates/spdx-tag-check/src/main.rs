//! Checker binary for SPDX tag-value documents.
//!
//! Exits with status 0 when every document parses, 1 when any document has
//! errors or cannot be read, and 2 on invalid configuration.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};

use spdx_tag_check::check::check_all;
use spdx_tag_check::config::{CheckConfig, LogLevel};
use spdx_tag_check::error::CheckError;
use spdx_tag_check::logging::init_logging;

/// Check SPDX tag-value documents for malformed fields.
#[derive(Parser, Debug)]
#[command(name = "spdx-tag-check", version, about)]
struct Args {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<LogLevel>,

    /// Report tags that no record accepts.
    #[arg(long)]
    strict: bool,

    /// Documents to check.
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn build_config(args: &Args) -> Result<CheckConfig, CheckError> {
    let config = CheckConfig::from_env()?;
    Ok(config.apply_overrides(args.log_level, args.strict.then_some(true)))
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&CheckConfig::default());
            error!(error = %e, "invalid configuration");
            return ExitCode::from(2);
        }
    };
    init_logging(&config);
    debug!(?config, files = args.files.len(), "starting spdx-tag-check");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match check_all(&config, &args.files, &mut out) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = %e, "check aborted");
            ExitCode::FAILURE
        }
    }
}
