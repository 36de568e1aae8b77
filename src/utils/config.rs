//! Configuration and constants for the converter.

// Known header spellings per semantic field (lowercase, highest priority first).
// Drone vendors and log exporters disagree on naming, so detection is alias-driven.
pub const TIMESTAMP_ALIASES: &[&str] = &[
    "timestamp",
    "time",
    "time_utc",
    "datetime",
    "date_time",
    "gpstime",
    "utc_time",
];
pub const LATITUDE_ALIASES: &[&str] = &["latitude", "lat", "lat_deg", "lat_dd", "latitude_deg"];
pub const LONGITUDE_ALIASES: &[&str] = &[
    "longitude",
    "lon",
    "long",
    "lng",
    "lon_deg",
    "lon_dd",
    "longitude_deg",
];
pub const ELEVATION_ALIASES: &[&str] = &["elevation", "altitude", "alt", "height", "elev", "alt_m"];

/// Default KML namespace
pub const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

/// Google extension namespace (gx:Track, gx:coord)
pub const GX_NAMESPACE: &str = "http://www.google.com/kml/ext/2.2";

/// Prefix for the document-level `<name>`
pub const DOCUMENT_TITLE_PREFIX: &str = "Drone Flight Track";

/// Indentation width of the written KML
pub const KML_INDENT: usize = 2;
