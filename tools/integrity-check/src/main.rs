// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! Run the device integrity checks on the current machine and print JSON.
//!
//! Useful from `adb shell` on a device or emulator, where the checks see the
//! same filesystem and properties the app would.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use device_integrity::{DetectorConfig, DeviceIntegrityDetector, OsPlatform, Verdict};
use log::debug;
use serde_json::json;

#[derive(Parser, Debug)]
#[command(name = "integrity-check", version, about = "Report device integrity signals")]
struct Args {
    /// Check to run
    #[arg(value_enum, default_value_t = Check::Report)]
    check: Check,

    /// TOML file with detector settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Locate helper used to look for `su`
    #[arg(long)]
    which: Option<String>,

    /// Upper bound for the locate helper, in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Check {
    Rooted,
    Emulator,
    Debug,
    Debugger,
    Instrumented,
    Lock,
    Report,
}

fn load_config(args: &Args) -> Result<DetectorConfig> {
    let mut config = match &args.config {
        Some(path) => DetectorConfig::from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => DetectorConfig::default(),
    };
    if let Some(which) = &args.which {
        config.which_program = which.clone();
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.which_timeout_ms = timeout_ms;
    }
    Ok(config)
}

fn plugin_value(verdict: Verdict) -> serde_json::Value {
    match verdict.diagnostic {
        Some(diagnostic) => json!({ "value": verdict.value, "diagnostic": diagnostic }),
        None => json!({ "value": verdict.value }),
    }
}

fn run(args: &Args) -> Result<serde_json::Value> {
    let config = load_config(args)?;
    debug!("using {:?}", config);
    let detector = DeviceIntegrityDetector::with_config(OsPlatform::new(), config);

    let output = match args.check {
        Check::Rooted => plugin_value(detector.root_verdict()),
        Check::Emulator => plugin_value(detector.emulator_verdict()),
        Check::Debug => plugin_value(detector.debug_build_verdict()),
        Check::Debugger => plugin_value(detector.debugger_verdict()),
        Check::Instrumented => plugin_value(detector.instrumentation_verdict()),
        Check::Lock => plugin_value(detector.lock_screen_verdict()),
        Check::Report => serde_json::to_value(detector.report()).context("serializing report")?,
    };
    Ok(output)
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let output = run(&args)?;

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", rendered);
    Ok(())
}
