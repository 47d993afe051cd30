use anyhow::Context;
use clap::{Parser, Subcommand};
use weather_core::{Config, Dashboard, Location, Metric, RangeMode};

use crate::{interactive, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dashboard", version, about = "Hourly weather charts for any point on the map")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render both panels once for the given inputs.
    Show {
        /// Latitude in degrees; defaults to the configured marker position.
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude in degrees; defaults to the configured marker position.
        #[arg(long, allow_negative_numbers = true)]
        lon: Option<f64>,

        /// temperature_2m, precipitation or windspeed_10m.
        #[arg(long, value_parser = parse_metric)]
        metric: Option<Metric>,

        /// forecast or historical.
        #[arg(long, value_parser = parse_range)]
        range: Option<RangeMode>,

        /// Print the chart descriptions as JSON instead of drawing them.
        #[arg(long)]
        json: bool,
    },

    /// Pick the location, metric and range from menus; charts update on every change.
    Interactive,

    /// Edit the starting inputs and API settings.
    Configure,
}

fn parse_metric(s: &str) -> Result<Metric, String> {
    s.parse().map_err(|e: anyhow::Error| e.to_string())
}

fn parse_range(s: &str) -> Result<RangeMode, String> {
    s.parse().map_err(|e: anyhow::Error| e.to_string())
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command.unwrap_or(Command::Interactive) {
            Command::Show { lat, lon, metric, range, json } => {
                let mut config = config;
                let mut inputs = config.initial_inputs();
                inputs.location = Location::new(
                    lat.unwrap_or(inputs.location.latitude),
                    lon.unwrap_or(inputs.location.longitude),
                );
                inputs.metric = metric.unwrap_or(inputs.metric);
                inputs.range = range.unwrap_or(inputs.range);
                config.set_initial_inputs(&inputs);

                let dashboard =
                    Dashboard::from_config(&config).context("Failed to set up weather source")?;
                let panels = dashboard
                    .refresh()
                    .await
                    .context("Dashboard cycle was superseded")?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&panels)?);
                } else {
                    print!("{}", render::panels(&panels));
                }
            }
            Command::Interactive => {
                let dashboard =
                    Dashboard::from_config(&config).context("Failed to set up weather source")?;
                interactive::run(&dashboard).await?;
            }
            Command::Configure => {
                interactive::configure(config)?;
            }
        }

        Ok(())
    }
}
