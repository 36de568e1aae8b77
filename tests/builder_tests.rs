use csv::StringRecord;
use drone_track_kml::columns::{resolve, ColumnReport, HeaderAliasTable};
use drone_track_kml::input::Row;
use drone_track_kml::track::{build, Coordinate, RowOutcome, TrackBuilder};
use drone_track_kml::utils::ConvertError;

const HEADERS: [&str; 4] = ["timestamp", "lat", "lon", "elev"];

fn report(headers: &[&str]) -> ColumnReport {
    let names: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let assignment = resolve(&names, &HeaderAliasTable::standard());
    ColumnReport::new(names, assignment)
}

fn push_one(cells: [&str; 4]) -> RowOutcome {
    let headers = StringRecord::from(HEADERS.to_vec());
    let record = StringRecord::from(cells.to_vec());
    let mut builder = TrackBuilder::new(report(&HEADERS)).unwrap();
    builder.push(&Row::new(&headers, &record))
}

#[test]
fn test_zero_latitude_is_skipped_as_coordinate() {
    let outcome = push_one(["2025-01-01T00:00:00Z", "0.0", "12.3", "100"]);
    assert_eq!(outcome, RowOutcome::SkippedZeroCoordinate);
}

#[test]
fn test_all_zero_is_skipped_as_coordinate() {
    let outcome = push_one(["t1", "0", "0", "0"]);
    assert_eq!(outcome, RowOutcome::SkippedZeroCoordinate);
}

#[test]
fn test_empty_timestamp_is_skipped_as_missing() {
    let outcome = push_one(["", "1.0", "2.0", "3.0"]);
    assert_eq!(outcome, RowOutcome::SkippedMissing);
}

#[test]
fn test_unparseable_latitude_is_skipped_as_missing() {
    let outcome = push_one(["t1", "abc", "2.0", "3.0"]);
    assert_eq!(outcome, RowOutcome::SkippedMissing);
}

#[test]
fn test_bad_number_with_empty_timestamp_counts_once() {
    let outcome = push_one(["", "0.0", "abc", "3.0"]);
    assert_eq!(outcome, RowOutcome::SkippedMissing);
}

#[test]
fn test_valid_row_is_written() {
    let outcome = push_one(["t1", "1.5", "-2.5", "-3e1"]);
    assert_eq!(outcome, RowOutcome::Written);
}

#[test]
fn test_build_counters_balance() {
    let headers = StringRecord::from(HEADERS.to_vec());
    let records: Vec<StringRecord> = vec![
        vec!["t1", "45.0", "-122.0", "10"],
        vec!["", "45.0", "-122.0", "10"],
        vec!["t3", "0.0", "-122.0", "10"],
        vec!["t4", "45.1", "x", "10"],
        vec!["t5", "45.2", "-122.2", "12.5"],
        vec!["t6"],
    ]
    .into_iter()
    .map(StringRecord::from)
    .collect();

    let rows = records.iter().map(|r| Row::new(&headers, r));
    let (track, summary) = build(rows, report(&HEADERS)).unwrap();

    assert_eq!(summary.total_rows, 6);
    assert_eq!(summary.rows_written, 2);
    assert_eq!(summary.rows_skipped_missing, 3);
    assert_eq!(summary.rows_skipped_coords, 1);
    assert!(summary.is_balanced());

    let whens: Vec<_> = track.points().iter().map(|p| p.when.as_str()).collect();
    assert_eq!(whens, vec!["t1", "t5"]);
    assert_eq!(track.points()[1].coord, Coordinate::new(-122.2, 45.2, 12.5));
}

#[test]
fn test_builder_rejects_partial_columns() {
    let result = TrackBuilder::new(report(&["timestamp", "latitude", "longitude"]));

    match result {
        Err(ConvertError::UnresolvableColumn { missing, report }) => {
            assert_eq!(missing.len(), 1);
            assert_eq!(report.headers.len(), 3);
        }
        other => panic!("expected UnresolvableColumn, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_build_with_no_rows() {
    let (track, summary) = build(Vec::<Row>::new(), report(&HEADERS)).unwrap();

    assert!(track.is_empty());
    assert_eq!(summary.total_rows, 0);
    assert!(summary.nothing_written());
}
