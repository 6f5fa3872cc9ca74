// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Runtime configuration for the headless runner (C9): CLI flags take
//! precedence over a TOML file, which takes precedence over environment
//! variables (loaded from a `.env` file via `dotenvy` if present).

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::core::error::{Fault, Result};

/// Command-line arguments, parsed with `clap`.
#[derive(Debug, Parser)]
#[command(name = "psrx-cpu", about = "Headless PlayStation CPU interpreter")]
struct Args {
    /// Path to a BIOS image (SCPH100x or similar, exactly 0x80000 bytes).
    /// Falls back to `--config`'s `bios` key, then `PSRX_BIOS_PATH`, if omitted.
    bios: Option<PathBuf>,

    /// Path to a TOML config file layered beneath CLI flags.
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Print a disassembled trace line for every retired instruction.
    #[arg(short = 't', long)]
    trace: bool,

    /// Stop after this many retired instructions; runs forever if omitted.
    #[arg(short = 'm', long)]
    max_steps: Option<u64>,

    /// Override the CPU's reset vector (decimal, or hex with a `0x` prefix).
    /// Only useful for test harnesses that want to drop into a fixture
    /// routine instead of the real BIOS entry point.
    #[arg(long, value_parser = parse_u32)]
    start_pc: Option<u32>,
}

/// A config file's contents, every field optional: CLI flags win, then the
/// file, then environment variables, then built-in defaults.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    bios: Option<PathBuf>,
    trace: Option<bool>,
    max_steps: Option<u64>,
    start_pc: Option<u32>,
}

/// Fully resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub bios_path: PathBuf,
    pub trace: bool,
    pub max_steps: Option<u64>,
    /// Optional reset-vector override for test harnesses; honored by
    /// [`crate::core::cpu::Cpu::with_start_pc`] in place of `RESET_PC`.
    pub start_pc: Option<u32>,
}

impl Config {
    /// Resolve configuration from `std::env::args()`, a TOML file, and the
    /// process environment, in that precedence order.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let args = Args::parse();
        Self::resolve(args)
    }

    fn resolve(args: Args) -> Result<Self> {
        let file_config = match &args.config {
            Some(path) => load_toml(path)?,
            None => FileConfig::default(),
        };

        let bios_path = args
            .bios
            .or(file_config.bios)
            .or_else(|| std::env::var("PSRX_BIOS_PATH").ok().map(PathBuf::from))
            .ok_or_else(|| Fault::IoError {
                path: "<bios path>".to_string(),
                cause: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no BIOS path given on the command line, in the config file, or via PSRX_BIOS_PATH",
                ),
            })?;

        let trace = args.trace
            || file_config.trace.unwrap_or(false)
            || env_flag("PSRX_TRACE");

        let max_steps = args.max_steps.or(file_config.max_steps).or_else(|| {
            std::env::var("PSRX_MAX_STEPS")
                .ok()
                .and_then(|v| v.parse().ok())
        });

        let start_pc = args.start_pc.or(file_config.start_pc).or_else(|| {
            std::env::var("PSRX_START_PC")
                .ok()
                .and_then(|v| parse_u32(&v).ok())
        });

        Ok(Config {
            bios_path,
            trace,
            max_steps,
            start_pc,
        })
    }
}

fn env_flag(name: &str) -> bool {
    matches!(std::env::var(name).as_deref(), Ok("1") | Ok("true"))
}

/// Parse a `u32` from decimal, or from hex when prefixed with `0x`/`0X`.
fn parse_u32(s: &str) -> std::result::Result<u32, std::num::ParseIntError> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    }
}

fn load_toml(path: &Path) -> Result<FileConfig> {
    let text = std::fs::read_to_string(path).map_err(|e| Fault::IoError {
        path: path.display().to_string(),
        cause: e,
    })?;
    toml::from_str(&text).map_err(|e| Fault::IoError {
        path: path.display().to_string(),
        cause: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
    })
}
