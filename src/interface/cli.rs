//! # Command Line
//!
//! Options shared by the `aura` and `killbot` binaries.

use clap::Parser;
use std::path::PathBuf;

use crate::domain::config::DEFAULT_CONFIG_PATH;

#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Path to the YAML configuration file (optional; defaults apply when missing)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}
