//! Drone Track KML
//!
//! Converts tabular drone flight logs (CSV) into KML tracks using the
//! Google `gx:Track` extension.
//!
//! This crate provides the core implementation for the
//! `csv-to-kml` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! csv-to-kml flight.csv flight.kml
//! ```
//!
//! Library callers can run the pipeline on any reader:
//!
//! ```ignore
//! let aliases = HeaderAliasTable::standard();
//! let (track, summary) = convert_reader(file, &aliases)?;
//! println!("{}", summary.to_log());
//! ```

pub mod columns;
pub mod commands;
pub mod input;
pub mod output;
pub mod track;
pub mod utils;
