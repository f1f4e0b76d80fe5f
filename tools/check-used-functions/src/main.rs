// Copyright 2024 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Binding completeness guard
//! INTENT: Fail CI when a declared C API function is never called by the binding
//! IDL (target): check(root) -> exit status
//! DEPS: bindcheck (declaration + reference scan), clap (arguments), env_logger (RUST_LOG)
//! READINESS: Command-line tool; no service dependencies
//! TESTS: Covered by bindcheck usage and scenario tests
//! NOTE: Prints one `Missing: <name>` line per unused function and exits 1; silent on success

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use bindcheck::Config;
use clap::Parser;

#[derive(Parser)]
#[command(name = "check-used-functions")]
#[command(version, about = "Check that every declared C API function is used by the binding")]
struct Cli {
    /// Project root; configured paths are relative to it
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Configuration file (defaults to <root>/bindcheck.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let config = Config::load_or_default(&cli.root, cli.config.as_deref())?;
    let report = bindcheck::check(&config.usage.resolve(&cli.root))?;
    if report.is_clean() {
        return Ok(ExitCode::SUCCESS);
    }

    for line in report.lines() {
        println!("{line}");
    }
    Ok(ExitCode::FAILURE)
}
