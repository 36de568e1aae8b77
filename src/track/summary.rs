//! Run summary: counters and detected columns for one converted file.

use crate::columns::ColumnReport;
use serde::Serialize;
use std::fmt;

/// Result counters for one conversion run.
///
/// `rows_written + rows_skipped_missing + rows_skipped_coords == total_rows`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Detected headers and the columns chosen from them
    pub columns: ColumnReport,

    /// Data rows read (header excluded)
    pub total_rows: usize,

    /// Rows that became track points
    pub rows_written: usize,

    /// Rows with an empty timestamp or an unparseable number
    pub rows_skipped_missing: usize,

    /// Rows whose latitude or longitude was 0.0 (no GPS fix)
    pub rows_skipped_coords: usize,
}

impl RunSummary {
    pub fn is_balanced(&self) -> bool {
        self.rows_written + self.rows_skipped_missing + self.rows_skipped_coords == self.total_rows
    }

    /// True when the run produced an empty track
    pub fn nothing_written(&self) -> bool {
        self.rows_written == 0
    }

    /// Counter block, without the column diagnostics
    pub fn counters(&self) -> String {
        let mut out = format!(
            "Rows processed: {}\n  Rows written: {}\n  Rows skipped (invalid/missing data): {}\n  Rows skipped due to invalid coordinates (0.0): {}",
            self.total_rows, self.rows_written, self.rows_skipped_missing, self.rows_skipped_coords
        );
        if self.nothing_written() {
            out.push_str(
                "\nWarning: no valid rows were written to KML. Check your CSV and detected columns above.",
            );
        }
        out
    }

    /// Full diagnostic log as one string, for callers without a console
    pub fn to_log(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.columns)?;
        write!(f, "{}", self.counters())
    }
}
