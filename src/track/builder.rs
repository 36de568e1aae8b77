//! Build a track from CSV rows.
//!
//! Each row is classified exactly once:
//! - written to the track
//! - skipped for missing/invalid data (empty timestamp, unparseable number)
//! - skipped for invalid coordinates (latitude or longitude exactly 0.0)
//!
//! A zero latitude or longitude is how flight controllers report "no GPS fix",
//! so such rows are dropped even though 0.0 is a valid position on paper.

use super::point::{Coordinate, Track, TrackPoint};
use super::summary::RunSummary;
use crate::columns::{ColumnReport, ResolvedColumns, SemanticField};
use crate::input::Row;
use crate::utils::error::ConvertError;
use log::debug;
use thiserror::Error;

/// Why a row did not become a track point
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowRejection {
    #[error("missing timestamp")]
    MissingTimestamp,

    #[error("invalid {field} value '{value}'")]
    InvalidNumber { field: SemanticField, value: String },

    #[error("invalid coordinates (lat {latitude}, lon {longitude})")]
    ZeroCoordinate { latitude: f64, longitude: f64 },
}

impl RowRejection {
    pub fn outcome(&self) -> RowOutcome {
        match self {
            RowRejection::MissingTimestamp | RowRejection::InvalidNumber { .. } => {
                RowOutcome::SkippedMissing
            }
            RowRejection::ZeroCoordinate { .. } => RowOutcome::SkippedZeroCoordinate,
        }
    }
}

/// Counter a row was tallied under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    Written,
    SkippedMissing,
    SkippedZeroCoordinate,
}

/// Convert one row into a track point.
///
/// **Public** - the per-row classification step, usable on its own
///
/// Missing cells read as empty; all cells are trimmed. The timestamp is
/// checked before any number is parsed.
pub fn parse_row(row: &Row<'_>, columns: &ResolvedColumns) -> Result<TrackPoint, RowRejection> {
    let cell = |header: &str| row.get(header).unwrap_or("").trim();

    let when = cell(columns.timestamp.as_str());
    if when.is_empty() {
        return Err(RowRejection::MissingTimestamp);
    }

    let latitude = parse_number(SemanticField::Latitude, cell(columns.latitude.as_str()))?;
    let longitude = parse_number(SemanticField::Longitude, cell(columns.longitude.as_str()))?;
    let elevation = parse_number(SemanticField::Elevation, cell(columns.elevation.as_str()))?;

    if latitude == 0.0 || longitude == 0.0 {
        return Err(RowRejection::ZeroCoordinate {
            latitude,
            longitude,
        });
    }

    Ok(TrackPoint {
        when: when.to_string(),
        coord: Coordinate::new(longitude, latitude, elevation),
    })
}

/// **Private** - decimal or exponent float literal
fn parse_number(field: SemanticField, value: &str) -> Result<f64, RowRejection> {
    value.parse::<f64>().map_err(|_| RowRejection::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Accumulates track points and row counters for one input file
#[derive(Debug)]
pub struct TrackBuilder {
    columns: ResolvedColumns,
    report: ColumnReport,
    track: Track,
    total_rows: usize,
    rows_written: usize,
    rows_skipped_missing: usize,
    rows_skipped_coords: usize,
}

impl TrackBuilder {
    /// Create a builder for a file whose columns have been detected.
    ///
    /// # Errors
    /// * `ConvertError::UnresolvableColumn` - any of the four fields is unresolved
    pub fn new(report: ColumnReport) -> Result<Self, ConvertError> {
        let columns = match report.assignment.require() {
            Ok(columns) => columns,
            Err(missing) => {
                return Err(ConvertError::UnresolvableColumn {
                    missing,
                    report: Box::new(report),
                })
            }
        };

        Ok(Self {
            columns,
            report,
            track: Track::new(),
            total_rows: 0,
            rows_written: 0,
            rows_skipped_missing: 0,
            rows_skipped_coords: 0,
        })
    }

    /// Classify one row and update the counters
    pub fn push(&mut self, row: &Row<'_>) -> RowOutcome {
        self.total_rows += 1;

        match parse_row(row, &self.columns) {
            Ok(point) => {
                self.track.push(point);
                self.rows_written += 1;
                RowOutcome::Written
            }
            Err(rejection) => {
                debug!("Row {} skipped: {}", self.total_rows, rejection);
                let outcome = rejection.outcome();
                match outcome {
                    RowOutcome::SkippedZeroCoordinate => self.rows_skipped_coords += 1,
                    _ => self.rows_skipped_missing += 1,
                }
                outcome
            }
        }
    }

    pub fn columns(&self) -> &ResolvedColumns {
        &self.columns
    }

    /// Finish the run, yielding the track and its summary
    pub fn finish(self) -> (Track, RunSummary) {
        let summary = RunSummary {
            columns: self.report,
            total_rows: self.total_rows,
            rows_written: self.rows_written,
            rows_skipped_missing: self.rows_skipped_missing,
            rows_skipped_coords: self.rows_skipped_coords,
        };
        (self.track, summary)
    }
}

/// Build a track from an in-memory row sequence.
///
/// **Public** - convenience wrapper around [`TrackBuilder`]
///
/// # Errors
/// * `ConvertError::UnresolvableColumn` - see [`TrackBuilder::new`]
pub fn build<'a, I>(rows: I, report: ColumnReport) -> Result<(Track, RunSummary), ConvertError>
where
    I: IntoIterator<Item = Row<'a>>,
{
    let mut builder = TrackBuilder::new(report)?;
    for row in rows {
        builder.push(&row);
    }
    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv::StringRecord;

    fn columns() -> ResolvedColumns {
        ResolvedColumns {
            timestamp: "time".to_string(),
            latitude: "lat".to_string(),
            longitude: "lon".to_string(),
            elevation: "alt".to_string(),
        }
    }

    fn headers() -> StringRecord {
        StringRecord::from(vec!["time", "lat", "lon", "alt"])
    }

    fn parse(cells: Vec<&str>) -> Result<TrackPoint, RowRejection> {
        let headers = headers();
        let record = StringRecord::from(cells);
        parse_row(&Row::new(&headers, &record), &columns())
    }

    #[test]
    fn test_parse_row_valid() {
        let point = parse(vec![" 2025-01-01T00:00:00Z ", " 45.5", "-122.6 ", "1e2"]).unwrap();

        assert_eq!(point.when, "2025-01-01T00:00:00Z");
        assert_eq!(point.coord, Coordinate::new(-122.6, 45.5, 100.0));
    }

    #[test]
    fn test_empty_timestamp_checked_before_numbers() {
        let result = parse(vec!["   ", "abc", "def", "ghi"]);
        assert_eq!(result, Err(RowRejection::MissingTimestamp));
    }

    #[test]
    fn test_invalid_number_names_field() {
        let result = parse(vec!["t1", "1.0", "2.0", "high"]);
        assert_eq!(
            result,
            Err(RowRejection::InvalidNumber {
                field: SemanticField::Elevation,
                value: "high".to_string(),
            })
        );
    }

    #[test]
    fn test_missing_cell_is_invalid_number() {
        let result = parse(vec!["t1", "1.0"]);
        assert_eq!(
            result,
            Err(RowRejection::InvalidNumber {
                field: SemanticField::Longitude,
                value: String::new(),
            })
        );
    }

    #[test]
    fn test_negative_zero_is_zero_coordinate() {
        let result = parse(vec!["t1", "-0.0", "2.0", "3.0"]);
        assert_eq!(result.unwrap_err().outcome(), RowOutcome::SkippedZeroCoordinate);
    }

    #[test]
    fn test_zero_elevation_is_allowed() {
        assert!(parse(vec!["t1", "1.0", "2.0", "0"]).is_ok());
    }

    #[test]
    fn test_rejection_outcomes() {
        assert_eq!(RowRejection::MissingTimestamp.outcome(), RowOutcome::SkippedMissing);
        assert_eq!(
            RowRejection::ZeroCoordinate {
                latitude: 0.0,
                longitude: 1.0
            }
            .outcome(),
            RowOutcome::SkippedZeroCoordinate
        );
    }
}
