//! Regboard CLI
//!
//! Offline inspection of the registration file, without starting the server:
//! - Summarize registrations per city for a selection
//! - List cities and their chart colours
//! - Generate a default config file

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use regboard::config::{generate_default_config, Config};
use regboard::dashboard::{Aggregates, Dataset};
use regboard::logging;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "regboard-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect user registration data from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: standard locations + environment)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Data file, overrides the configured path
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Registrations per city for a selection
    Summary {
        /// Cities to include (repeatable; none = all)
        #[arg(long = "city")]
        cities: Vec<String>,
        /// First day included (YYYY-MM-DD, default: earliest)
        #[arg(long)]
        start: Option<String>,
        /// Last day included (YYYY-MM-DD, default: latest)
        #[arg(long)]
        end: Option<String>,
        /// Also print the per-day breakdown
        #[arg(long)]
        daily: bool,
    },

    /// List cities in first-seen order with their colours
    Cities,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct CityRow<'a> {
    city: &'a str,
    color: &'a str,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("writing config to {:?}", path))?;
                println!("Wrote default config to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let config = load_config(&cli)?;
    // stderr keeps logs out of piped table/json output
    logging::init(&config.logging, std::io::stderr).context("installing log subscriber")?;

    match cli.command {
        Commands::Config { .. } => {}

        Commands::Summary {
            ref cities,
            ref start,
            ref end,
            daily,
        } => {
            let dataset = load_dataset(&config)?;
            let selection = regboard::FilterSelection::from_controls(
                dataset.table(),
                cities,
                start.as_deref(),
                end.as_deref(),
                None,
            );
            let aggregates = dataset.aggregate(&selection);

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&aggregates)?);
            } else if dataset.table().is_empty() {
                println!("No registrations loaded");
            } else {
                println!(
                    "Registrations {} to {}: {}",
                    selection.start, selection.end, aggregates.filtered_rows
                );
                print_distribution(&aggregates);
                if daily {
                    print_daily(&aggregates);
                }
            }
        }

        Commands::Cities => {
            let dataset = load_dataset(&config)?;
            let rows: Vec<CityRow> = dataset
                .table()
                .cities()
                .iter()
                .map(|city| CityRow {
                    city,
                    color: dataset.colors().color_or_default(city),
                })
                .collect();

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("{:<30} {}", "City", "Color");
                println!("{}", "-".repeat(40));
                for row in rows {
                    println!("{:<30} {}", row.city, row.color);
                }
            }
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {:?}", path))?,
        None => Config::load_default().context("loading default config")?,
    };
    if let Some(data) = &cli.data {
        config.data.path = data.clone();
    }
    Ok(config)
}

fn load_dataset(config: &Config) -> Result<Dataset> {
    Dataset::load(&config.data.loader(), &config.data.path)
        .with_context(|| format!("loading registrations from {:?}", config.data.path))
}

fn print_distribution(aggregates: &Aggregates) {
    if aggregates.is_empty() {
        println!("No registrations match the selection");
        return;
    }

    let total = aggregates.filtered_rows as f64;
    println!("{:<30} {:>10} {:>8}", "City", "Users", "Share");
    println!("{}", "-".repeat(50));
    for slice in &aggregates.distribution {
        println!(
            "{:<30} {:>10} {:>7.1}%",
            slice.city,
            slice.count,
            slice.count as f64 * 100.0 / total
        );
    }
}

fn print_daily(aggregates: &Aggregates) {
    println!();
    println!("{:<12} {:<30} {:>10}", "Date", "City", "Users");
    println!("{}", "-".repeat(54));
    for point in &aggregates.trend {
        println!(
            "{:<12} {:<30} {:>10}",
            point.date.to_string(),
            point.city,
            point.count
        );
    }
}
