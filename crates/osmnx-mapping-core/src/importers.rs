//! CSV loaders for node and edge attribute tables.
//!
//! Column types are inferred by polars. Identifier columns are cast to
//! integers when the tables are wrapped, so `osmid`/`u`/`v` may be stored as
//! either integers or integer-looking strings.

use std::path::Path;

use polars::prelude::*;
use tracing::debug;

use crate::attributes::AttributeTable;
use crate::error::MappingResult;

fn read_csv(path: &Path) -> MappingResult<DataFrame> {
    let frame = CsvReader::from_path(path)?
        .has_header(true)
        .infer_schema(Some(1000))
        .finish()?;
    debug!(
        path = %path.display(),
        rows = frame.height(),
        columns = frame.width(),
        "read attribute table"
    );
    Ok(frame)
}

/// Reads a node table (`osmid`, optional `x`/`y`, attribute columns).
pub fn read_nodes_csv(path: impl AsRef<Path>) -> MappingResult<AttributeTable> {
    AttributeTable::nodes(read_csv(path.as_ref())?)
}

/// Reads an edge table (`u`, `v`, optional `key`/`geometry`, attribute columns).
pub fn read_edges_csv(path: impl AsRef<Path>) -> MappingResult<AttributeTable> {
    AttributeTable::edges(read_csv(path.as_ref())?)
}
