//! Output writers for converted tracks.
//!
//! This module handles writing KML documents to disk or to memory.

pub mod kml;

// Re-export main functions
pub use kml::{
    kml_to_string, validate_output_path, write_kml, write_kml_to, PlacemarkLabel, TrackTitles,
};
