//! CSV input: header extraction and per-record row views.

use crate::utils::error::InputError;
use csv::{ReaderBuilder, StringRecord};
use log::debug;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const UTF8_BOM: char = '\u{feff}';

/// Open a CSV file for reading.
///
/// **Public** - main entry point for file input
///
/// # Errors
/// * `InputError::OpenFailed` - file missing or unreadable
pub fn open_csv(path: impl AsRef<Path>) -> Result<csv::Reader<BufReader<File>>, InputError> {
    let path = path.as_ref();
    debug!("Opening CSV: {}", path.display());

    let file = File::open(path)?;
    Ok(csv_reader(BufReader::new(file)))
}

/// Wrap any byte source in a CSV reader configured for flight logs.
///
/// Rows may be shorter or longer than the header row; headers and cells
/// are left untrimmed so the original header text survives.
pub fn csv_reader<R: Read>(source: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::None)
        .from_reader(source)
}

/// Read the header row, stripping a leading byte-order mark.
///
/// An empty input yields an empty header list.
pub fn read_headers<R: Read>(reader: &mut csv::Reader<R>) -> Result<StringRecord, InputError> {
    let raw = reader.headers()?;

    let headers: StringRecord = raw
        .iter()
        .enumerate()
        .map(|(i, h)| if i == 0 { h.trim_start_matches(UTF8_BOM) } else { h })
        .collect();

    debug!("Read {} headers", headers.len());
    Ok(headers)
}

/// One input record viewed through its header row
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    headers: &'a StringRecord,
    record: &'a StringRecord,
}

impl<'a> Row<'a> {
    pub fn new(headers: &'a StringRecord, record: &'a StringRecord) -> Self {
        Self { headers, record }
    }

    /// Cell under `header`, or `None` when the column is absent or the
    /// record is too short. Duplicate headers resolve to the later column.
    pub fn get(&self, header: &str) -> Option<&'a str> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(_, h)| *h == header)
            .map(|(pos, _)| pos)
            .last()
            .and_then(|pos| self.record.get(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_headers_strips_bom() {
        let data = "\u{feff}timestamp,lat\n1,2\n";
        let mut reader = csv_reader(data.as_bytes());
        let headers = read_headers(&mut reader).unwrap();

        assert_eq!(headers.get(0), Some("timestamp"));
        assert_eq!(headers.get(1), Some("lat"));
    }

    #[test]
    fn test_read_headers_empty_input() {
        let mut reader = csv_reader("".as_bytes());
        let headers = read_headers(&mut reader).unwrap();
        assert!(headers.is_empty());
    }

    #[test]
    fn test_row_short_record_is_absent() {
        let headers = StringRecord::from(vec!["a", "b", "c"]);
        let record = StringRecord::from(vec!["1"]);
        let row = Row::new(&headers, &record);

        assert_eq!(row.get("a"), Some("1"));
        assert_eq!(row.get("c"), None);
        assert_eq!(row.get("missing"), None);
    }

    #[test]
    fn test_row_duplicate_header_uses_later_column() {
        let headers = StringRecord::from(vec!["lat", "lat"]);
        let record = StringRecord::from(vec!["1.0", "2.0"]);
        let row = Row::new(&headers, &record);

        assert_eq!(row.get("lat"), Some("2.0"));
    }

    #[test]
    fn test_row_duplicate_header_past_short_record() {
        let headers = StringRecord::from(vec!["lat", "lon", "lat"]);
        let record = StringRecord::from(vec!["1.0", "2.0"]);
        let row = Row::new(&headers, &record);

        assert_eq!(row.get("lon"), Some("2.0"));
        assert_eq!(row.get("lat"), None);
    }

    #[test]
    fn test_flexible_rows_are_accepted() {
        let data = "a,b\n1\n1,2,3\n";
        let mut reader = csv_reader(data.as_bytes());
        let records: Vec<_> = reader.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(records.len(), 2);
    }
}
