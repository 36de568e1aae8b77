//! Tabular input for flight logs.

pub mod csv_reader;

pub use csv_reader::{csv_reader, open_csv, read_headers, Row};
