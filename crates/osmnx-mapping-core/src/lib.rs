//! # osmnx-mapping-core: Street Network Model
//!
//! Provides the graph and tabular data structures the mapping tools operate on.
//!
//! ## Design
//!
//! Street networks are modeled as **directed multigraphs** where:
//! - **Nodes**: [`Intersection`]s identified by their OSM id
//! - **Edges**: [`Street`] segments identified by `(u, v, key)`; `key`
//!   separates parallel segments between the same pair of intersections
//!
//! Per-entity attributes (speeds, travel times, aggregated scores, ...) do not
//! live on the graph. They are kept in two [`AttributeTable`]s, one row per node
//! and one row per edge, so that any computed column can drive a visualization
//! without touching the topology.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use osmnx_mapping_core::importers::{read_edges_csv, read_nodes_csv};
//! use osmnx_mapping_core::StreetNetwork;
//!
//! let nodes = read_nodes_csv("nodes.csv")?;
//! let edges = read_edges_csv("edges.csv")?;
//! let network = StreetNetwork::from_tables(&nodes, &edges)?;
//! println!("{}", network.stats());
//! # Ok::<(), osmnx_mapping_core::MappingError>(())
//! ```
//!
//! ## Modules
//!
//! - [`attributes`] - Node and edge attribute tables backed by polars
//! - [`importers`] - CSV loaders for attribute tables
//! - [`error`] - Error type shared by the above

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, EdgeIndex};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub mod attributes;
pub mod error;
pub mod importers;

pub use attributes::{AttributeTable, TableKind};
pub use error::{MappingError, MappingResult};
pub use petgraph::graph::NodeIndex;

/// Crate version, reported by `--debug-info`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// OSM node identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(i64);

impl NodeId {
    #[inline]
    pub fn new(value: i64) -> Self {
        NodeId(value)
    }
    #[inline]
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies one edge of the multigraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeKey {
    pub u: NodeId,
    pub v: NodeId,
    pub key: i64,
}

impl EdgeKey {
    pub fn new(u: NodeId, v: NodeId, key: i64) -> Self {
        Self { u, v, key }
    }
}

impl std::fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.u, self.v, self.key)
    }
}

/// Planar coordinate (projected or lon/lat, the model does not care).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone)]
pub struct Intersection {
    pub id: NodeId,
    /// `None` when the source table carried no usable coordinates
    pub position: Option<Point>,
}

impl Intersection {
    pub fn new(id: NodeId) -> Self {
        Self { id, position: None }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Point::new(x, y));
        self
    }
}

#[derive(Debug, Clone)]
pub struct Street {
    pub key: EdgeKey,
    /// Interior polyline including both endpoints; empty means a straight segment
    pub geometry: Vec<Point>,
}

impl Street {
    pub fn new(key: EdgeKey) -> Self {
        Self {
            key,
            geometry: Vec::new(),
        }
    }

    pub fn with_geometry(mut self, geometry: Vec<Point>) -> Self {
        self.geometry = geometry;
        self
    }
}

/// Axis-aligned bounding box of node coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    fn include(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }
}

#[derive(Debug, Default)]
pub struct StreetNetwork {
    pub graph: DiGraph<Intersection, Street>,
    index: HashMap<NodeId, NodeIndex>,
}

impl StreetNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an intersection, or updates the position of an existing one.
    pub fn add_intersection(&mut self, intersection: Intersection) -> NodeIndex {
        if let Some(&idx) = self.index.get(&intersection.id) {
            if intersection.position.is_some() {
                self.graph[idx].position = intersection.position;
            }
            return idx;
        }
        let id = intersection.id;
        let idx = self.graph.add_node(intersection);
        self.index.insert(id, idx);
        idx
    }

    /// Adds a street between two known intersections.
    pub fn add_street(&mut self, street: Street) -> MappingResult<EdgeIndex> {
        let from = self
            .node_index(street.key.u)
            .ok_or(MappingError::UnknownNode(street.key.u))?;
        let to = self
            .node_index(street.key.v)
            .ok_or(MappingError::UnknownNode(street.key.v))?;
        Ok(self.graph.add_edge(from, to, street))
    }

    pub fn node_index(&self, id: NodeId) -> Option<NodeIndex> {
        self.index.get(&id).copied()
    }

    /// True when every intersection has a position.
    pub fn has_coordinates(&self) -> bool {
        self.graph.node_weights().all(|n| n.position.is_some())
    }

    /// Bounding box over node positions and street geometry, if any are known.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self
            .graph
            .node_weights()
            .filter_map(|n| n.position)
            .chain(
                self.graph
                    .edge_weights()
                    .flat_map(|e| e.geometry.iter().copied()),
            );
        let first = points.next()?;
        let mut bounds = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in points {
            bounds.include(p);
        }
        Some(bounds)
    }

    /// Compute basic statistics about the network
    pub fn stats(&self) -> NetworkStats {
        NetworkStats {
            num_nodes: self.graph.node_count(),
            num_edges: self.graph.edge_count(),
            num_positioned: self
                .graph
                .node_weights()
                .filter(|n| n.position.is_some())
                .count(),
        }
    }

    /// Builds the graph described by a node table and an edge table.
    ///
    /// Node positions come from the optional `x`/`y` columns. Edge geometry
    /// comes from an optional `geometry` column holding WKT `LINESTRING`s.
    /// Each `(u, v, key)` may appear only once in the edge table.
    pub fn from_tables(nodes: &AttributeTable, edges: &AttributeTable) -> MappingResult<Self> {
        let mut network = Self::new();

        let ids = nodes.node_ids()?;
        let positions = nodes.coordinates()?;
        for (row, id) in ids.into_iter().enumerate() {
            let mut intersection = Intersection::new(id);
            if let Some(point) = positions.as_ref().and_then(|p| p[row]) {
                intersection.position = Some(point);
            }
            network.add_intersection(intersection);
        }

        let keys = edges.edge_keys()?;
        let geometries = edges.geometries()?;
        let mut seen = HashSet::with_capacity(keys.len());
        for (row, key) in keys.into_iter().enumerate() {
            if !seen.insert(key) {
                return Err(MappingError::DuplicateEdge(key));
            }
            let mut street = Street::new(key);
            if let Some(line) = geometries.as_ref().and_then(|g| g[row].clone()) {
                street.geometry = line;
            }
            network.add_street(street)?;
        }

        debug!(
            nodes = network.graph.node_count(),
            edges = network.graph.edge_count(),
            "assembled street network from tables"
        );
        Ok(network)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NetworkStats {
    pub num_nodes: usize,
    pub num_edges: usize,
    pub num_positioned: usize,
}

impl std::fmt::Display for NetworkStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} nodes ({} with coordinates), {} edges",
            self.num_nodes, self.num_positioned, self.num_edges
        )
    }
}
