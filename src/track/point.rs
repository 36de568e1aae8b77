//! Track data types.

use std::fmt;

/// A 3D position in WGS84 degrees and meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
    pub elevation: f64,
}

impl Coordinate {
    pub fn new(longitude: f64, latitude: f64, elevation: f64) -> Self {
        Self {
            longitude,
            latitude,
            elevation,
        }
    }
}

/// Renders as `lon lat ele`, the `gx:coord` text form.
///
/// See [`format_coordinate_value`] for how each number is written.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            format_coordinate_value(self.longitude),
            format_coordinate_value(self.latitude),
            format_coordinate_value(self.elevation)
        )
    }
}

/// Shortest round-trip text for one coordinate value.
///
/// Integral values keep a trailing `.0` (`100.0`). Non-finite values are
/// `nan`, `inf` and `-inf`. Exponents carry a sign and at least two digits
/// (`1e+16`, `1.5e-05`).
pub fn format_coordinate_value(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // Debug switches to exponent form below 1e-4 and from 1e16 upwards
    let text = format!("{:?}", value);
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => text,
    }
}

/// One written sample: timestamp text plus position
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPoint {
    /// Timestamp exactly as it appeared in the input (trimmed)
    pub when: String,
    pub coord: Coordinate,
}

/// Ordered track points, in input row order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    points: Vec<TrackPoint>,
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: TrackPoint) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
