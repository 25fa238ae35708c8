//! Error types for the street-network model
//!
//! [`MappingError`] covers everything that can go wrong while loading attribute
//! tables or assembling a [`crate::StreetNetwork`] from them. Downstream crates
//! wrap it in their own error enums.

use polars::prelude::PolarsError;
use thiserror::Error;

use crate::attributes::TableKind;
use crate::{EdgeKey, NodeId};

/// Unified error type for network and table operations.
#[derive(Error, Debug)]
pub enum MappingError {
    /// I/O errors (file access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors raised by the dataframe engine
    #[error("Table error: {0}")]
    Polars(#[from] PolarsError),

    /// A required or requested column is absent
    #[error("column '{column}' not found in {table} table")]
    MissingColumn { table: TableKind, column: String },

    /// A column used for coloring does not hold numbers
    #[error("column '{column}' in {table} table is not numeric (found {dtype})")]
    NonNumericColumn {
        table: TableKind,
        column: String,
        dtype: String,
    },

    /// An identifier column holds a null
    #[error("{table} table has a missing '{column}' value at row {row}")]
    MissingKey {
        table: TableKind,
        column: &'static str,
        row: usize,
    },

    /// An edge references a node absent from the graph
    #[error("edge references unknown node {0}")]
    UnknownNode(NodeId),

    /// Two edge rows share the same `(u, v, key)`
    #[error("edge table lists edge {0} more than once")]
    DuplicateEdge(EdgeKey),

    /// Edge geometry could not be parsed
    #[error("Geometry error: {0}")]
    Geometry(String),
}

/// Convenience type alias for Results using MappingError.
pub type MappingResult<T> = Result<T, MappingError>;
