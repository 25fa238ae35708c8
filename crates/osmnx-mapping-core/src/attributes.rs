//! Node and edge attribute tables.
//!
//! An [`AttributeTable`] wraps a polars [`DataFrame`] with one row per graph
//! entity. Node tables are keyed by `osmid`; edge tables by `u`, `v` and
//! `key`. Everything else is free-form attribute data.

use std::collections::HashMap;

use polars::prelude::*;

use crate::error::{MappingError, MappingResult};
use crate::{EdgeKey, NodeId, Point};

pub const NODE_ID_COLUMN: &str = "osmid";
pub const EDGE_SOURCE_COLUMN: &str = "u";
pub const EDGE_TARGET_COLUMN: &str = "v";
pub const EDGE_KEY_COLUMN: &str = "key";
pub const GEOMETRY_COLUMN: &str = "geometry";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Nodes,
    Edges,
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableKind::Nodes => f.write_str("nodes"),
            TableKind::Edges => f.write_str("edges"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AttributeTable {
    kind: TableKind,
    frame: DataFrame,
}

impl AttributeTable {
    /// Wraps a node table. The frame must have an `osmid` column.
    pub fn nodes(frame: DataFrame) -> MappingResult<Self> {
        let table = Self {
            kind: TableKind::Nodes,
            frame,
        };
        table.column(NODE_ID_COLUMN)?;
        Ok(table)
    }

    /// Wraps an edge table. The frame must have `u` and `v` columns; when `key`
    /// is absent it is derived by numbering repeated `(u, v)` pairs from 0.
    pub fn edges(mut frame: DataFrame) -> MappingResult<Self> {
        if frame.column(EDGE_KEY_COLUMN).is_err() {
            let u = id_column(&frame, TableKind::Edges, EDGE_SOURCE_COLUMN)?;
            let v = id_column(&frame, TableKind::Edges, EDGE_TARGET_COLUMN)?;
            let mut seen: HashMap<(i64, i64), i64> = HashMap::new();
            let keys: Vec<i64> = u
                .into_iter()
                .zip(v)
                .map(|pair| {
                    let next = seen.entry(pair).or_insert(0);
                    let key = *next;
                    *next += 1;
                    key
                })
                .collect();
            frame.with_column(Series::new(EDGE_KEY_COLUMN, keys))?;
        }
        let table = Self {
            kind: TableKind::Edges,
            frame,
        };
        table.column(EDGE_SOURCE_COLUMN)?;
        table.column(EDGE_TARGET_COLUMN)?;
        Ok(table)
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.frame.column(name).is_ok()
    }

    fn column(&self, name: &str) -> MappingResult<&Series> {
        self.frame
            .column(name)
            .map_err(|_| MappingError::MissingColumn {
                table: self.kind,
                column: name.to_string(),
            })
    }

    /// Reads a numeric column as floats. Nulls and non-finite values become `None`.
    pub fn numeric_values(&self, name: &str) -> MappingResult<Vec<Option<f64>>> {
        let series = self.column(name)?;
        if !series.dtype().is_numeric() {
            return Err(MappingError::NonNumericColumn {
                table: self.kind,
                column: name.to_string(),
                dtype: series.dtype().to_string(),
            });
        }
        let floats = series.cast(&DataType::Float64)?;
        let values = floats
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| x.is_finite()))
            .collect();
        Ok(values)
    }

    /// Observed `(min, max)` of a numeric column, or `None` if no value is present.
    pub fn value_range(&self, name: &str) -> MappingResult<Option<(f64, f64)>> {
        let range = self
            .numeric_values(name)?
            .into_iter()
            .flatten()
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            });
        Ok(range)
    }

    pub fn node_ids(&self) -> MappingResult<Vec<NodeId>> {
        Ok(id_column(&self.frame, self.kind, NODE_ID_COLUMN)?
            .into_iter()
            .map(NodeId::new)
            .collect())
    }

    pub fn edge_keys(&self) -> MappingResult<Vec<EdgeKey>> {
        let u = id_column(&self.frame, self.kind, EDGE_SOURCE_COLUMN)?;
        let v = id_column(&self.frame, self.kind, EDGE_TARGET_COLUMN)?;
        let key = id_column(&self.frame, self.kind, EDGE_KEY_COLUMN)?;
        Ok(u.into_iter()
            .zip(v)
            .zip(key)
            .map(|((u, v), key)| EdgeKey::new(NodeId::new(u), NodeId::new(v), key))
            .collect())
    }

    /// Present values of `name` keyed by node id.
    pub fn node_values(&self, name: &str) -> MappingResult<HashMap<NodeId, f64>> {
        let values = self.numeric_values(name)?;
        Ok(self
            .node_ids()?
            .into_iter()
            .zip(values)
            .filter_map(|(id, v)| v.map(|v| (id, v)))
            .collect())
    }

    /// Present values of `name` keyed by `(u, v, key)`.
    pub fn edge_values(&self, name: &str) -> MappingResult<HashMap<EdgeKey, f64>> {
        let values = self.numeric_values(name)?;
        Ok(self
            .edge_keys()?
            .into_iter()
            .zip(values)
            .filter_map(|(key, v)| v.map(|v| (key, v)))
            .collect())
    }

    /// Per-row positions from `x`/`y`, or `None` if either column is absent.
    pub(crate) fn coordinates(&self) -> MappingResult<Option<Vec<Option<Point>>>> {
        if !(self.has_column("x") && self.has_column("y")) {
            return Ok(None);
        }
        let xs = self.numeric_values("x")?;
        let ys = self.numeric_values("y")?;
        Ok(Some(
            xs.into_iter()
                .zip(ys)
                .map(|pair| match pair {
                    (Some(x), Some(y)) => Some(Point::new(x, y)),
                    _ => None,
                })
                .collect(),
        ))
    }

    /// Per-row polylines parsed from a WKT `geometry` column, if present.
    pub(crate) fn geometries(&self) -> MappingResult<Option<Vec<Option<Vec<Point>>>>> {
        let Ok(series) = self.frame.column(GEOMETRY_COLUMN) else {
            return Ok(None);
        };
        let text = series.utf8().map_err(|_| {
            MappingError::Geometry(format!(
                "'{GEOMETRY_COLUMN}' column must hold WKT text, found {}",
                series.dtype()
            ))
        })?;
        let mut lines = Vec::with_capacity(text.len());
        for value in text.into_iter() {
            lines.push(match value {
                Some(wkt) if !wkt.trim().is_empty() => Some(parse_linestring(wkt)?),
                _ => None,
            });
        }
        Ok(Some(lines))
    }
}

fn id_column(frame: &DataFrame, table: TableKind, name: &'static str) -> MappingResult<Vec<i64>> {
    let series = frame.column(name).map_err(|_| MappingError::MissingColumn {
        table,
        column: name.to_string(),
    })?;
    let ints = series.cast(&DataType::Int64)?;
    ints.i64()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.ok_or(MappingError::MissingKey { table, column: name, row }))
        .collect()
}

/// Parses `LINESTRING (x y, x y, ...)`. `LINESTRING EMPTY` yields no points.
pub fn parse_linestring(wkt: &str) -> MappingResult<Vec<Point>> {
    let trimmed = wkt.trim();
    let body = trimmed
        .get(..10)
        .filter(|head| head.eq_ignore_ascii_case("LINESTRING"))
        .map(|_| trimmed[10..].trim())
        .ok_or_else(|| MappingError::Geometry(format!("expected LINESTRING, got '{wkt}'")))?;
    if body.eq_ignore_ascii_case("EMPTY") {
        return Ok(Vec::new());
    }
    let inner = body
        .strip_prefix('(')
        .and_then(|b| b.strip_suffix(')'))
        .ok_or_else(|| MappingError::Geometry(format!("unbalanced parentheses in '{wkt}'")))?;

    inner
        .split(',')
        .map(|pair| {
            let mut coords = pair.split_whitespace().map(str::parse::<f64>);
            match (coords.next(), coords.next()) {
                (Some(Ok(x)), Some(Ok(y))) => Ok(Point::new(x, y)),
                _ => Err(MappingError::Geometry(format!(
                    "bad coordinate '{}' in '{wkt}'",
                    pair.trim()
                ))),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge_table() -> AttributeTable {
        AttributeTable::edges(
            DataFrame::new(vec![
                Series::new("u", &[1i64, 1, 2]),
                Series::new("v", &[2i64, 2, 3]),
                Series::new("speed", &[Some(30.0f64), None, Some(50.0)]),
                Series::new("highway", &["primary", "primary", "residential"]),
            ])
            .unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn missing_key_column_is_derived() {
        let keys = edge_table().edge_keys().unwrap();
        assert_eq!(keys[0].key, 0);
        assert_eq!(keys[1].key, 1);
        assert_eq!(keys[2].key, 0);
    }

    #[test]
    fn value_range_skips_missing_values() {
        assert_eq!(
            edge_table().value_range("speed").unwrap(),
            Some((30.0, 50.0))
        );
    }

    #[test]
    fn value_range_skips_nan() {
        let table = AttributeTable::nodes(
            DataFrame::new(vec![
                Series::new("osmid", &[1i64, 2, 3]),
                Series::new("score", &[f64::NAN, 4.0, 2.0]),
            ])
            .unwrap(),
        )
        .unwrap();
        assert_eq!(table.value_range("score").unwrap(), Some((2.0, 4.0)));
        assert_eq!(table.node_values("score").unwrap().len(), 2);
    }

    #[test]
    fn integer_columns_are_numeric() {
        let table = AttributeTable::nodes(
            DataFrame::new(vec![
                Series::new("osmid", &[1i64, 2]),
                Series::new("lanes", &[2i32, 4]),
            ])
            .unwrap(),
        )
        .unwrap();
        assert_eq!(table.value_range("lanes").unwrap(), Some((2.0, 4.0)));
    }

    #[test]
    fn text_column_is_rejected() {
        let err = edge_table().numeric_values("highway").unwrap_err();
        assert!(matches!(err, MappingError::NonNumericColumn { .. }));
    }

    #[test]
    fn unknown_column_is_reported_with_table() {
        let err = edge_table().value_range("length").unwrap_err();
        assert!(err.to_string().contains("edges table"));
    }

    #[test]
    fn node_table_requires_osmid() {
        let frame = DataFrame::new(vec![Series::new("id", &[1i64])]).unwrap();
        assert!(AttributeTable::nodes(frame).is_err());
    }

    #[test]
    fn edge_values_are_keyed() {
        let values = edge_table().edge_values("speed").unwrap();
        let key = EdgeKey::new(NodeId::new(2), NodeId::new(3), 0);
        assert_eq!(values.get(&key), Some(&50.0));
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn parses_linestrings() {
        let line = parse_linestring("LINESTRING (1 2, 3.5 4)").unwrap();
        assert_eq!(line, vec![Point::new(1.0, 2.0), Point::new(3.5, 4.0)]);
        assert!(parse_linestring("linestring EMPTY").unwrap().is_empty());
        assert!(parse_linestring("POINT (1 2)").is_err());
        assert!(parse_linestring("LINESTRING (1 2, x 4)").is_err());
    }
}
