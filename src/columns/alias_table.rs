//! Semantic fields and the header alias table used to detect them.

use crate::utils::config::{
    ELEVATION_ALIASES, LATITUDE_ALIASES, LONGITUDE_ALIASES, TIMESTAMP_ALIASES,
};
use serde::Serialize;
use std::fmt;

/// One of the four columns a track point is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticField {
    Timestamp,
    Latitude,
    Longitude,
    Elevation,
}

impl SemanticField {
    /// All fields, in diagnostic display order
    pub const ALL: [SemanticField; 4] = [
        SemanticField::Timestamp,
        SemanticField::Latitude,
        SemanticField::Longitude,
        SemanticField::Elevation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticField::Timestamp => "timestamp",
            SemanticField::Latitude => "latitude",
            SemanticField::Longitude => "longitude",
            SemanticField::Elevation => "elevation",
        }
    }

    fn index(self) -> usize {
        match self {
            SemanticField::Timestamp => 0,
            SemanticField::Latitude => 1,
            SemanticField::Longitude => 2,
            SemanticField::Elevation => 3,
        }
    }
}

impl fmt::Display for SemanticField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable mapping from semantic field to its priority-ordered aliases.
///
/// Aliases are stored lowercase. Build once with [`HeaderAliasTable::standard`]
/// and pass it by reference to [`resolve`](super::resolve).
#[derive(Debug, Clone)]
pub struct HeaderAliasTable {
    aliases: [&'static [&'static str]; 4],
}

impl HeaderAliasTable {
    /// The built-in table covering common drone log exports
    pub fn standard() -> Self {
        Self::new(
            TIMESTAMP_ALIASES,
            LATITUDE_ALIASES,
            LONGITUDE_ALIASES,
            ELEVATION_ALIASES,
        )
    }

    /// Build a table from explicit alias lists.
    ///
    /// Every alias must already be lowercase; the resolver compares it
    /// against lower-cased header keys without further folding.
    pub fn new(
        timestamp: &'static [&'static str],
        latitude: &'static [&'static str],
        longitude: &'static [&'static str],
        elevation: &'static [&'static str],
    ) -> Self {
        debug_assert!(
            [timestamp, latitude, longitude, elevation]
                .iter()
                .flat_map(|list| list.iter())
                .all(|alias| alias.to_lowercase() == *alias),
            "header aliases must be lowercase"
        );

        Self {
            aliases: [timestamp, latitude, longitude, elevation],
        }
    }

    /// Aliases for `field`, highest priority first
    pub fn aliases_for(&self, field: SemanticField) -> &[&'static str] {
        self.aliases[field.index()]
    }
}

impl Default for HeaderAliasTable {
    fn default() -> Self {
        Self::standard()
    }
}
