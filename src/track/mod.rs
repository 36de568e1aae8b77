//! Track construction from validated rows.
//!
//! This module turns resolved columns and a row stream into:
//! - An ordered `gx:Track` point list
//! - Per-run counters (written / skipped)

pub mod builder;
pub mod point;
pub mod summary;

// Re-export main types and functions
pub use builder::{build, parse_row, RowOutcome, RowRejection, TrackBuilder};
pub use point::{format_coordinate_value, Coordinate, Track, TrackPoint};
pub use summary::RunSummary;
