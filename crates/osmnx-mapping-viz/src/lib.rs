//! # osmnx-mapping-viz: Static Network Rendering
//!
//! Colors the nodes, edges, or both of a [`StreetNetwork`] by one numeric
//! attribute column and attaches a colorbar spanning the observed range.
//!
//! ```rust,no_run
//! use osmnx_mapping_core::importers::{read_edges_csv, read_nodes_csv};
//! use osmnx_mapping_core::StreetNetwork;
//! use osmnx_mapping_viz::{RenderRequest, StaticVisualiser, Target, Visualiser};
//!
//! let nodes = read_nodes_csv("nodes.csv")?;
//! let edges = read_edges_csv("edges.csv")?;
//! let network = StreetNetwork::from_tables(&nodes, &edges)?;
//!
//! let request = RenderRequest::new("travel_time").with_target(Target::Both);
//! let figure = StaticVisualiser::new().render(&network, &nodes, &edges, &request)?;
//! figure.save("travel_time.png", 1.0)?;
//! # Ok::<(), osmnx_mapping_viz::VizError>(())
//! ```
//!
//! [`StreetNetwork`]: osmnx_mapping_core::StreetNetwork

pub mod color;
pub mod colormap;
pub mod error;
pub mod figure;
pub mod layout;
pub mod normalize;
pub mod options;
pub mod plan;
pub mod plotter;
pub mod visualiser;

pub use color::Color;
pub use colormap::Colormap;
pub use error::{VizError, VizResult};
pub use figure::{Colorbar, Figure, Shape};
pub use normalize::Normalize;
pub use options::{RenderOptions, RenderRequest, ResultColumns, Target};
pub use plotter::{GraphPlotter, Paint, PlotStyle, SvgPlotter};
pub use visualiser::{StaticVisualiser, Visualiser};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
