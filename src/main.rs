//! CSV to KML CLI
//!
//! Converts a drone flight-log CSV into a KML `gx:Track`, detecting the
//! timestamp, latitude, longitude and elevation columns from their headers.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

use drone_track_kml::columns::HeaderAliasTable;
use drone_track_kml::commands::{execute_convert, validate_args, ConvertArgs};
use drone_track_kml::output::PlacemarkLabel;

/// Convert a drone flight-log CSV into a KML track
#[derive(Parser, Debug)]
#[command(name = "csv-to-kml")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input CSV file
    input: PathBuf,

    /// Output KML file
    output: PathBuf,

    /// Placemark title style
    #[arg(long, value_enum, default_value_t = PlacemarkLabel::Uas)]
    label: PlacemarkLabel,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse CLI arguments; a wrong argument count prints usage and exits non-zero
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let args = ConvertArgs {
        input: cli.input,
        output: cli.output,
        label: cli.label,
        json: cli.json,
    };

    // Validate args first
    validate_args(&args)?;

    let aliases = HeaderAliasTable::standard();
    execute_convert(&args, &aliases)?;

    Ok(())
}
