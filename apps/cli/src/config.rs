// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI configuration loaded from environment variables and arguments.

use anyhow::{bail, Result};
use archplan_engine::{EngineConfig, LayoutOptions};
use std::path::PathBuf;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Settings read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Seed recorded with layout results.
    pub design_seed: u64,
    /// Circulation factor override; derived from the project name when unset.
    pub circulation_factor: Option<f64>,
    /// Advisory maximum department width in meters.
    pub acceptable_width: f64,
    /// Attach triangle meshes to 3D volumes.
    pub include_meshes: bool,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// absent or unparsable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = LayoutOptions::default();
        Self {
            design_seed: lookup("ARCHPLAN_DESIGN_SEED")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.design_seed),
            circulation_factor: lookup("ARCHPLAN_CIRCULATION_FACTOR")
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|f| f.is_finite() && *f > 0.0),
            acceptable_width: lookup("ARCHPLAN_ACCEPTABLE_WIDTH")
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|w| w.is_finite() && *w > 0.0)
                .unwrap_or(defaults.acceptable_width),
            include_meshes: lookup("ARCHPLAN_INCLUDE_MESHES")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(true),
            log_format: match lookup("ARCHPLAN_LOG_FORMAT") {
                Some(v) if v.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            include_meshes: self.include_meshes,
            ..EngineConfig::default()
        }
    }

    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            design_seed: self.design_seed,
            circulation_factor: self.circulation_factor,
            acceptable_width: self.acceptable_width,
            ..LayoutOptions::default()
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub const USAGE: &str = "usage: archplan <design.json | -> [--layout] [--pretty]";

/// Command-line arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// Design file, or `None` to read standard input.
    pub input: Option<PathBuf>,
    /// Run the layout pass after normalizing.
    pub layout: bool,
    /// Indent the JSON output.
    pub pretty: bool,
}

impl Args {
    /// Parse arguments, excluding the program name.
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut input = None;
        let mut layout = false;
        let mut pretty = false;

        for arg in args {
            match arg.as_str() {
                "--layout" => layout = true,
                "--pretty" => pretty = true,
                flag if flag.starts_with("--") => bail!("unknown option `{}`\n{}", flag, USAGE),
                path => {
                    if input.is_some() {
                        bail!("more than one input given\n{}", USAGE);
                    }
                    input = Some(path.to_string());
                }
            }
        }

        let Some(input) = input else {
            bail!("missing input\n{}", USAGE);
        };

        Ok(Self {
            input: (input != "-").then(|| PathBuf::from(input)),
            layout,
            pretty,
        })
    }
}
