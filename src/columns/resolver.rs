//! Header detection: map raw CSV headers onto semantic fields.
//!
//! Resolution runs two passes per field, using the field's aliases in
//! priority order:
//! 1. Exact pass - the first alias equal to a normalized header wins
//! 2. Substring pass - the first alias contained in any normalized header
//!    wins; among its matches the shortest normalized header is chosen
//!
//! Normalized means trimmed and lower-cased. When two headers normalize to
//! the same key the later header's original text is kept, but the key keeps
//! the position of its first occurrence. Ties on length in the substring
//! pass go to the key that appears first in that order.

use super::alias_table::{HeaderAliasTable, SemanticField};
use log::debug;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Outcome of resolving a single semantic field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ResolvedColumn {
    /// Original (not lower-cased) header text
    Resolved(String),
    Unresolved,
}

impl ResolvedColumn {
    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolvedColumn::Resolved(_))
    }

    pub fn as_deref(&self) -> Option<&str> {
        match self {
            ResolvedColumn::Resolved(name) => Some(name),
            ResolvedColumn::Unresolved => None,
        }
    }
}

impl fmt::Display for ResolvedColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedColumn::Resolved(name) => write!(f, "'{}'", name),
            ResolvedColumn::Unresolved => f.write_str("not detected"),
        }
    }
}

/// Column chosen for each semantic field of one input file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnAssignment {
    pub timestamp: ResolvedColumn,
    pub latitude: ResolvedColumn,
    pub longitude: ResolvedColumn,
    pub elevation: ResolvedColumn,
}

impl ColumnAssignment {
    pub fn get(&self, field: SemanticField) -> &ResolvedColumn {
        match field {
            SemanticField::Timestamp => &self.timestamp,
            SemanticField::Latitude => &self.latitude,
            SemanticField::Longitude => &self.longitude,
            SemanticField::Elevation => &self.elevation,
        }
    }

    /// Fields that no header matched
    pub fn missing(&self) -> Vec<SemanticField> {
        SemanticField::ALL
            .into_iter()
            .filter(|field| !self.get(*field).is_resolved())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// Convert into [`ResolvedColumns`] if every field was resolved.
    ///
    /// # Errors
    /// The list of unresolved fields, in display order.
    pub fn require(&self) -> Result<ResolvedColumns, Vec<SemanticField>> {
        match (
            self.timestamp.as_deref(),
            self.latitude.as_deref(),
            self.longitude.as_deref(),
            self.elevation.as_deref(),
        ) {
            (Some(timestamp), Some(latitude), Some(longitude), Some(elevation)) => {
                Ok(ResolvedColumns {
                    timestamp: timestamp.to_string(),
                    latitude: latitude.to_string(),
                    longitude: longitude.to_string(),
                    elevation: elevation.to_string(),
                })
            }
            _ => Err(self.missing()),
        }
    }
}

/// Fully resolved column names; the only input the track builder accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub timestamp: String,
    pub latitude: String,
    pub longitude: String,
    pub elevation: String,
}

/// Detected headers plus their resolution, for diagnostic display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnReport {
    pub headers: Vec<String>,
    pub assignment: ColumnAssignment,
}

impl ColumnReport {
    pub fn new(headers: Vec<String>, assignment: ColumnAssignment) -> Self {
        Self { headers, assignment }
    }
}

impl fmt::Display for ColumnReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Available CSV headers:")?;
        if self.headers.is_empty() {
            writeln!(f, "  (no headers detected)")?;
        } else {
            let quoted: Vec<String> = self.headers.iter().map(|h| format!("'{}'", h)).collect();
            writeln!(f, "  {}", quoted.join(", "))?;
        }
        write!(f, "Detected columns:")?;
        for field in SemanticField::ALL {
            write!(f, "\n  {:<9} -> {}", field.as_str(), self.assignment.get(field))?;
        }
        Ok(())
    }
}

/// Case-insensitive header index in first-occurrence order
struct HeaderIndex<'a> {
    entries: Vec<(String, &'a str)>,
}

impl<'a> HeaderIndex<'a> {
    fn build<S: AsRef<str>>(headers: &'a [S]) -> Self {
        let mut entries: Vec<(String, &'a str)> = Vec::with_capacity(headers.len());
        let mut positions: HashMap<String, usize> = HashMap::with_capacity(headers.len());

        for header in headers.iter().map(AsRef::as_ref) {
            if header.is_empty() {
                continue;
            }
            let key = header.trim().to_lowercase();
            match positions.get(&key) {
                // Last write wins on the original text
                Some(&pos) => entries[pos].1 = header,
                None => {
                    positions.insert(key.clone(), entries.len());
                    entries.push((key, header));
                }
            }
        }

        Self { entries }
    }

    fn exact(&self, alias: &str) -> Option<&'a str> {
        self.entries
            .iter()
            .find(|(key, _)| key == alias)
            .map(|(_, original)| *original)
    }

    fn shortest_containing(&self, alias: &str) -> Option<&'a str> {
        self.entries
            .iter()
            .filter(|(key, _)| key.contains(alias))
            .min_by_key(|(key, _)| key.chars().count())
            .map(|(_, original)| *original)
    }
}

/// Resolve the four semantic fields against a header row.
///
/// **Public** - main entry point for column detection
///
/// Never fails: fields without a match come back as
/// [`ResolvedColumn::Unresolved`], and an empty header list resolves nothing.
pub fn resolve<S: AsRef<str>>(headers: &[S], aliases: &HeaderAliasTable) -> ColumnAssignment {
    let index = HeaderIndex::build(headers);

    let resolve_one = |field: SemanticField| {
        let column = resolve_field(&index, aliases.aliases_for(field));
        debug!("Resolved {} -> {}", field, column);
        column
    };

    ColumnAssignment {
        timestamp: resolve_one(SemanticField::Timestamp),
        latitude: resolve_one(SemanticField::Latitude),
        longitude: resolve_one(SemanticField::Longitude),
        elevation: resolve_one(SemanticField::Elevation),
    }
}

/// **Private** - exact pass, then substring pass
fn resolve_field(index: &HeaderIndex<'_>, aliases: &[&str]) -> ResolvedColumn {
    let found = aliases
        .iter()
        .find_map(|alias| index.exact(alias))
        .or_else(|| aliases.iter().find_map(|alias| index.shortest_containing(alias)));

    match found {
        Some(original) => ResolvedColumn::Resolved(original.to_string()),
        None => ResolvedColumn::Unresolved,
    }
}
