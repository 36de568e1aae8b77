//! KML track output writer.
//!
//! Writes a `Track` as a single `Placemark` holding a `gx:Track`, with
//! `when`/`gx:coord` pairs in track order, indented by two spaces.

use crate::track::Track;
use crate::utils::config::{DOCUMENT_TITLE_PREFIX, GX_NAMESPACE, KML_INDENT, KML_NAMESPACE};
use crate::utils::error::OutputError;
use log::{debug, info};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Label used for the placemark title
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum PlacemarkLabel {
    /// "UAS - <name>"
    #[default]
    Uas,
    /// "Flight Path - <name>"
    FlightPath,
}

impl PlacemarkLabel {
    pub fn prefix(&self) -> &'static str {
        match self {
            PlacemarkLabel::Uas => "UAS",
            PlacemarkLabel::FlightPath => "Flight Path",
        }
    }
}

/// Document and placemark titles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackTitles {
    pub document: String,
    pub placemark: String,
}

impl TrackTitles {
    /// Derive titles from the input file's base name without extension
    pub fn from_input(input_path: impl AsRef<Path>, label: PlacemarkLabel) -> Self {
        let stem = input_path
            .as_ref()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_name(&stem, label)
    }

    pub fn from_name(name: &str, label: PlacemarkLabel) -> Self {
        Self {
            document: format!("{} - {}", DOCUMENT_TITLE_PREFIX, name),
            placemark: format!("{} - {}", label.prefix(), name),
        }
    }
}

/// Write a track to a KML file
///
/// **Public** - main entry point for KML output
///
/// # Arguments
/// * `track` - Points to write, in order
/// * `titles` - Document and placemark names
/// * `output_path` - Path to output KML file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is empty, a directory, or its parent cannot be created
pub fn write_kml(
    track: &Track,
    titles: &TrackTitles,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing KML to: {}", output_path.display());

    validate_output_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    write_kml_to(&mut writer, track, titles)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!("KML written successfully ({} points)", track.len());

    Ok(())
}

/// Render a track to a KML string (for tests or in-memory use)
pub fn kml_to_string(track: &Track, titles: &TrackTitles) -> Result<String, OutputError> {
    let mut buffer = Vec::new();
    write_kml_to(&mut buffer, track, titles)?;

    // Every event is built from &str, so the buffer is valid UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Serialize a KML document into any writer
///
/// **Public** - shared by file and string output
pub fn write_kml_to<W: Write>(
    sink: W,
    track: &Track,
    titles: &TrackTitles,
) -> Result<(), OutputError> {
    let mut writer = Writer::new_with_indent(sink, b' ', KML_INDENT);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let kml = BytesStart::new("kml")
        .with_attributes([("xmlns", KML_NAMESPACE), ("xmlns:gx", GX_NAMESPACE)]);
    writer.write_event(Event::Start(kml))?;

    writer.write_event(Event::Start(BytesStart::new("Document")))?;
    write_text_element(&mut writer, "name", &titles.document)?;

    writer.write_event(Event::Start(BytesStart::new("Placemark")))?;
    write_text_element(&mut writer, "name", &titles.placemark)?;

    writer.write_event(Event::Start(BytesStart::new("gx:Track")))?;
    for point in track.points() {
        write_text_element(&mut writer, "when", &point.when)?;
        write_text_element(&mut writer, "gx:coord", &point.coord.to_string())?;
    }
    writer.write_event(Event::End(BytesEnd::new("gx:Track")))?;

    writer.write_event(Event::End(BytesEnd::new("Placemark")))?;
    writer.write_event(Event::End(BytesEnd::new("Document")))?;
    writer.write_event(Event::End(BytesEnd::new("kml")))?;

    let mut sink = writer.into_inner();
    sink.write_all(b"\n")?;

    Ok(())
}

/// **Private** - `<name>text</name>` on one line
fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), OutputError> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Validate that output path is writable
///
/// **Public** - also used for early argument validation
pub fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
