//! Graph plotting backends.

use std::collections::HashMap;

use osmnx_mapping_core::{NodeIndex, Point, StreetNetwork};
use petgraph::visit::EdgeRef;
use tracing::debug;

use crate::color::Color;
use crate::error::VizResult;
use crate::figure::{Figure, Shape};
use crate::layout::layout_network;

/// Pixels per typographic point at 100 dpi.
const PT_TO_PX: f64 = 100.0 / 72.0;
/// Fraction of the canvas left blank around the graph.
const MARGIN: f64 = 0.02;

/// One color for every element, or one per element index.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Uniform(Color),
    PerElement(Vec<Color>),
}

impl Paint {
    pub fn color_at(&self, index: usize) -> Color {
        match self {
            Paint::Uniform(color) => *color,
            Paint::PerElement(colors) => colors.get(index).copied().unwrap_or(Color::TRANSPARENT),
        }
    }
}

/// Everything a plotter needs to draw a network.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotStyle {
    /// Indexed by `NodeIndex::index()`
    pub node_paint: Paint,
    /// Indexed by `EdgeIndex::index()`
    pub edge_paint: Paint,
    /// Marker area in points squared; 0 hides nodes
    pub node_size: f64,
    /// Stroke width in points
    pub edge_line_width: f64,
    pub background: Color,
    pub width: u32,
    pub height: u32,
    pub layout_iterations: usize,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            node_paint: Paint::Uniform(Color::WHITE),
            edge_paint: Paint::Uniform(Color::rgb(0x99, 0x99, 0x99)),
            node_size: 15.0,
            edge_line_width: 1.0,
            background: Color::rgb(0x11, 0x11, 0x11),
            width: 800,
            height: 800,
            layout_iterations: 200,
        }
    }
}

/// Draws a street network into a fresh [`Figure`].
pub trait GraphPlotter {
    fn plot_graph(&self, network: &StreetNetwork, style: &PlotStyle) -> VizResult<Figure>;
}

/// Default backend: projects coordinates onto an SVG canvas.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgPlotter;

impl GraphPlotter for SvgPlotter {
    fn plot_graph(&self, network: &StreetNetwork, style: &PlotStyle) -> VizResult<Figure> {
        let width = style.width as f64;
        let height = style.height as f64;
        let mut figure = Figure::new(width, height, style.background);

        let use_geometry = network.has_coordinates();
        let positions: HashMap<NodeIndex, Point> = if use_geometry {
            network
                .graph
                .node_indices()
                .filter_map(|idx| network.graph[idx].position.map(|p| (idx, p)))
                .collect()
        } else {
            debug!(
                iterations = style.layout_iterations,
                "nodes lack coordinates, using force layout"
            );
            layout_network(network, style.layout_iterations)
        };

        let mut extent = positions.values().copied().collect::<Vec<_>>();
        if use_geometry {
            extent.extend(
                network
                    .graph
                    .edge_weights()
                    .flat_map(|street| street.geometry.iter().copied()),
            );
        }
        let Some(projection) = Projection::fit(&extent, width, height) else {
            return Ok(figure);
        };

        if style.edge_line_width > 0.0 {
            let stroke_width = style.edge_line_width * PT_TO_PX;
            for edge in network.graph.edge_references() {
                let street = edge.weight();
                let points: Vec<(f64, f64)> = if use_geometry && street.geometry.len() >= 2 {
                    street
                        .geometry
                        .iter()
                        .map(|p| projection.project(*p))
                        .collect()
                } else {
                    match (positions.get(&edge.source()), positions.get(&edge.target())) {
                        (Some(a), Some(b)) => vec![projection.project(*a), projection.project(*b)],
                        _ => continue,
                    }
                };
                figure.push(Shape::Polyline {
                    points,
                    stroke: style.edge_paint.color_at(edge.id().index()),
                    width: stroke_width,
                });
            }
        }

        if style.node_size > 0.0 {
            let radius = style.node_size.sqrt() / 2.0 * PT_TO_PX;
            for idx in network.graph.node_indices() {
                let Some(point) = positions.get(&idx) else {
                    continue;
                };
                let (cx, cy) = projection.project(*point);
                figure.push(Shape::Circle {
                    cx,
                    cy,
                    r: radius,
                    fill: style.node_paint.color_at(idx.index()),
                });
            }
        }

        Ok(figure)
    }
}

/// Equal-aspect fit of data coordinates into the canvas, y axis pointing up.
#[derive(Debug, Clone, Copy)]
struct Projection {
    min_x: f64,
    max_y: f64,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Projection {
    fn fit(points: &[Point], width: f64, height: f64) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        let margin = MARGIN * width.min(height);
        let avail_w = (width - 2.0 * margin).max(1.0);
        let avail_h = (height - 2.0 * margin).max(1.0);
        let span_x = max_x - min_x;
        let span_y = max_y - min_y;
        let scale = match (span_x > 0.0, span_y > 0.0) {
            (true, true) => (avail_w / span_x).min(avail_h / span_y),
            (true, false) => avail_w / span_x,
            (false, true) => avail_h / span_y,
            (false, false) => 1.0,
        };

        Some(Self {
            min_x,
            max_y,
            scale,
            offset_x: (width - span_x * scale) / 2.0,
            offset_y: (height - span_y * scale) / 2.0,
        })
    }

    fn project(&self, p: Point) -> (f64, f64) {
        (
            self.offset_x + (p.x - self.min_x) * self.scale,
            self.offset_y + (self.max_y - p.y) * self.scale,
        )
    }
}
