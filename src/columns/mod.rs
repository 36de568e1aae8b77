//! Column detection for tabular flight logs.
//!
//! This module handles:
//! - The fixed header alias table
//! - Resolving headers to timestamp/latitude/longitude/elevation
//! - Diagnostic reporting of what was detected

pub mod alias_table;
pub mod resolver;

// Re-export main types
pub use alias_table::{HeaderAliasTable, SemanticField};
pub use resolver::{resolve, ColumnAssignment, ColumnReport, ResolvedColumn, ResolvedColumns};
