// Copyright 2025 Chris Custine
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

mod cli;
mod config;
mod http;
mod map;
mod segments;
mod weather;

use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, error, info, warn};

use cli::Cli;
use config::AppConfig;
use map::LeafletRenderer;
use segments::DoogalSegments;
use weather::OpenMeteoForecast;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if cli.print_config_path {
        return match AppConfig::get_config_path() {
            Ok(path) => {
                println!("{}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => report(&e),
        };
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(e.as_ref()),
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    let pipeline_config = config.to_pipeline_config()?;

    if cli.save_config {
        config.save(cli.config.as_deref())?;
        info!("Configuration saved");
    }

    let client = http::build_client(config.request_timeout())?;
    let segment_source = DoogalSegments::new(client.clone(), config.segments_url.clone());
    let forecast_source = OpenMeteoForecast::new(client, config.forecast_url.clone());
    let renderer = LeafletRenderer::new(config.zoom_start, config.tile_url.clone());

    let summary = wind_align::run(&pipeline_config, &segment_source, &forecast_source, &renderer)?;

    println!(
        "{} of {} segments run within {}° of the wind ({:.1} km/h from {:.0}° {}). Map: {}",
        summary.aligned,
        summary.fetched,
        config.max_alignment_angle_deg,
        summary.wind.speed_kmh(),
        summary.wind.direction_deg(),
        summary.wind.cardinal(),
        summary.output_path.display()
    );

    if cli.open {
        let target = std::fs::canonicalize(&summary.output_path)
            .unwrap_or_else(|_err| summary.output_path.clone());
        if let Err(e) = webbrowser::open(&target.to_string_lossy()) {
            warn!("Could not open browser: {}", e);
        }
    }

    Ok(())
}

/// Log an error (cause chain at debug level) and return a failure code.
fn report(err: &dyn Error) -> ExitCode {
    error!("{}", err);
    let mut source = err.source();
    while let Some(cause) = source {
        debug!("  caused by: {}", cause);
        source = cause.source();
    }
    ExitCode::FAILURE
}
