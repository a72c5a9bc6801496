// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ArchPlan CLI - normalize a design document and optionally lay it out.
//!
//! Reads design JSON from a file (or `-` for standard input) and prints the
//! result as JSON on standard output. Logs go to standard error.
//!
//! # Environment
//!
//! - `RUST_LOG` - log filter (default `info,archplan=debug`)
//! - `ARCHPLAN_LOG_FORMAT=json` - JSON log lines
//! - `ARCHPLAN_DESIGN_SEED`, `ARCHPLAN_CIRCULATION_FACTOR`,
//!   `ARCHPLAN_ACCEPTABLE_WIDTH` - layout options
//! - `ARCHPLAN_INCLUDE_MESHES` - attach triangle meshes to volumes

use anyhow::{Context, Result};
use archplan_engine::{Engine, EngineOutput};
use std::io::{Read, Write};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

mod config;

use config::{Args, Config, LogFormat};

const DEFAULT_LOG_FILTER: &str = "info,archplan=debug";

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

fn main() -> Result<()> {
    let config = Config::from_env();
    init_logging(config.log_format);

    let args = Args::parse(std::env::args().skip(1))?;
    let engine = Engine::new(config.engine_config());
    let start = Instant::now();

    let design = match &args.input {
        Some(path) => engine
            .normalize_file(path)
            .with_context(|| format!("failed to load design from {}", path.display()))?,
        None => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .context("failed to read design from standard input")?;
            engine
                .normalize_bytes(&bytes)
                .context("failed to load design from standard input")?
        }
    };

    tracing::info!(
        rooms = design.rooms.len(),
        walls = design.walls.len(),
        openings = design.openings.len(),
        structural = design.structural.len(),
        "Design normalized"
    );

    let layout = args
        .layout
        .then(|| engine.plan(&design, &config.layout_options()));
    let output = EngineOutput { design, layout };

    let value = output.to_value().context("failed to serialize output")?;
    let text = if args.pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
    .context("failed to render output")?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", text).context("failed to write output")?;

    tracing::info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        layout = args.layout,
        "Done"
    );
    Ok(())
}
