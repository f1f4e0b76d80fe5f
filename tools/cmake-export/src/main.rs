// Copyright 2024 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: CMake export manifest generator
//! INTENT: List every C API function carrying the export marker for the binding build
//! IDL (target): generate(root) -> exported.cmake
//! DEPS: bindcheck (extraction + rendering), clap (arguments), env_logger (RUST_LOG)
//! READINESS: Command-line tool; no service dependencies
//! TESTS: Covered by bindcheck export and scenario tests
//! NOTE: A header tree without any marker still produces a valid, empty manifest

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use bindcheck::Config;
use clap::Parser;

#[derive(Parser)]
#[command(name = "cmake-export")]
#[command(version, about = "Write the EXPORTED_FUNCTIONS manifest from the C API headers")]
struct Cli {
    /// Project root; configured paths are relative to it
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Configuration file (defaults to <root>/bindcheck.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Manifest path, overriding the configured one
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = Config::load_or_default(&cli.root, cli.config.as_deref())?;
    if let Some(output) = cli.output {
        config.export.output = output;
    }
    let export = config.export.resolve(&cli.root);
    let functions = bindcheck::generate(&export)?;
    log::debug!("cmake-export: {}", functions.join(" "));
    Ok(ExitCode::SUCCESS)
}
