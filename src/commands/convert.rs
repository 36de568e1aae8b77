//! Convert command implementation.
//!
//! The convert command:
//! 1. Reads the CSV header row
//! 2. Resolves the timestamp/latitude/longitude/elevation columns
//! 3. Builds the track row by row
//! 4. Writes the KML file
//! 5. Prints the column diagnostics and row counters

use crate::columns::{resolve, ColumnReport, HeaderAliasTable};
use crate::input::{csv_reader, open_csv, read_headers, Row};
use crate::output::{validate_output_path, write_kml, PlacemarkLabel, TrackTitles};
use crate::track::{RunSummary, Track, TrackBuilder};
use crate::utils::error::{ConvertError, InputError};
use anyhow::{Context, Result};
use csv::StringRecord;
use log::{debug, info, warn};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Arguments for the convert command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ConvertArgs {
    /// Input CSV flight log
    pub input: PathBuf,

    /// Output KML path
    pub output: PathBuf,

    /// Placemark title style
    pub label: PlacemarkLabel,

    /// Print the run summary as JSON instead of text
    pub json: bool,
}

impl Default for ConvertArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: PathBuf::from("track.kml"),
            label: PlacemarkLabel::default(),
            json: false,
        }
    }
}

/// Convert CSV records into a track.
///
/// **Public** - core pipeline, independent of files and console
///
/// # Errors
/// * `ConvertError::UnresolvableColumn` - a required column was not detected
/// * `ConvertError::Input` - the CSV could not be read
pub fn convert_records<R: Read>(
    mut reader: csv::Reader<R>,
    aliases: &HeaderAliasTable,
) -> Result<(Track, RunSummary), ConvertError> {
    let headers = read_headers(&mut reader)?;
    let header_names: Vec<String> = headers.iter().map(str::to_string).collect();

    let assignment = resolve(&header_names, aliases);
    let mut builder = TrackBuilder::new(ColumnReport::new(header_names, assignment))?;

    debug!("Using columns: {:?}", builder.columns());

    let mut record = StringRecord::new();
    while reader.read_record(&mut record).map_err(InputError::from)? {
        builder.push(&Row::new(&headers, &record));
    }

    Ok(builder.finish())
}

/// Convert any CSV byte source into a track
pub fn convert_reader<R: Read>(
    source: R,
    aliases: &HeaderAliasTable,
) -> Result<(Track, RunSummary), ConvertError> {
    convert_records(csv_reader(source), aliases)
}

/// Convert one CSV file to one KML file without console output.
///
/// **Public** - for callers that collect `RunSummary::to_log()` themselves
///
/// No output file is created when column detection fails.
pub fn convert_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    label: PlacemarkLabel,
    aliases: &HeaderAliasTable,
) -> Result<RunSummary, ConvertError> {
    let input = input.as_ref();

    let (track, summary) = convert_records(open_csv(input)?, aliases)?;
    write_kml(&track, &TrackTitles::from_input(input, label), output)?;

    if summary.nothing_written() {
        warn!("No valid rows were written from {}", input.display());
    }

    Ok(summary)
}

/// Execute the convert command
///
/// **Public** - main entry point called from main.rs
///
/// Diagnostics are printed on every path that gets past opening the input,
/// including column detection failure and KML write failure.
///
/// # Errors
/// * Input open/read failures
/// * Unresolvable columns (no output file is written)
/// * KML write failures
pub fn execute_convert(args: &ConvertArgs, aliases: &HeaderAliasTable) -> Result<RunSummary> {
    let start_time = Instant::now();

    info!("Converting {} -> {}", args.input.display(), args.output.display());

    let reader = open_csv(&args.input)
        .with_context(|| format!("Failed to open input {}", args.input.display()))?;

    let (track, summary) = match convert_records(reader, aliases) {
        Ok(converted) => converted,
        Err(ConvertError::UnresolvableColumn { missing, report }) => {
            print_report(&report, args.json)?;
            println!("\nError: Could not detect all required columns in CSV. Aborting.");
            return Err(ConvertError::UnresolvableColumn { missing, report }.into());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", args.input.display()))
        }
    };

    let titles = TrackTitles::from_input(&args.input, args.label);
    let written = write_kml(&track, &titles, &args.output);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary.columns);
        if written.is_ok() {
            println!("\nFinished writing KML to: {}", args.output.display());
        }
        println!("{}", summary.counters());
    }

    if summary.nothing_written() {
        warn!("No valid rows were written; check the detected columns");
    }

    written.with_context(|| format!("Failed to write KML to {}", args.output.display()))?;

    debug!("Row accounting balanced: {}", summary.is_balanced());
    info!("Conversion completed in {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(summary)
}

/// **Private** - column diagnostics for the failure path
fn print_report(report: &ColumnReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}

/// Validate convert arguments
///
/// **Public** - can be called before execute_convert for early validation
pub fn validate_args(args: &ConvertArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if !args.input.is_file() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    validate_output_path(&args.output)?;

    if args.input == args.output {
        anyhow::bail!("Output path must differ from the input path");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_validate_args_valid() {
        let input = csv_file("time,lat,lon,alt\n");
        let args = ConvertArgs {
            input: input.path().to_path_buf(),
            ..Default::default()
        };

        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_missing_input() {
        let args = ConvertArgs {
            input: PathBuf::from("/definitely/not/here.csv"),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_output_is_directory() {
        let input = csv_file("time,lat,lon,alt\n");
        let dir = tempfile::tempdir().unwrap();
        let args = ConvertArgs {
            input: input.path().to_path_buf(),
            output: dir.path().to_path_buf(),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_same_path() {
        let input = csv_file("time,lat,lon,alt\n");
        let args = ConvertArgs {
            input: input.path().to_path_buf(),
            output: input.path().to_path_buf(),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_convert_reader_counts() {
        let data = "time,lat,lon,alt\nt1,1.0,2.0,3.0\n,1.0,2.0,3.0\nt3,0.0,2.0,3.0\n";
        let (track, summary) = convert_reader(data.as_bytes(), &HeaderAliasTable::standard()).unwrap();

        assert_eq!(track.len(), 1);
        assert_eq!(summary.total_rows, 3);
        assert_eq!(summary.rows_skipped_missing, 1);
        assert_eq!(summary.rows_skipped_coords, 1);
    }

    #[test]
    fn test_convert_reader_empty_input_is_unresolvable() {
        let result = convert_reader("".as_bytes(), &HeaderAliasTable::standard());
        match result {
            Err(ConvertError::UnresolvableColumn { missing, .. }) => assert_eq!(missing.len(), 4),
            other => panic!("unexpected result: {:?}", other.map(|(_, s)| s)),
        }
    }
}
