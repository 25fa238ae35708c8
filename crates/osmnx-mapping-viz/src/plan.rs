//! Target selection, range computation and attribute coloring.
//!
//! [`plan_render`] does all the request validation and data work for a
//! render without touching a plotting backend, so it is the place where
//! every caller-input error surfaces.
//!
//! Nodes and edges are each colored against their own observed range. The
//! colorbar spans the range of every colored class.

use std::collections::HashMap;
use std::hash::Hash;

use osmnx_mapping_core::{AttributeTable, StreetNetwork};
use tracing::debug;

use crate::color::Color;
use crate::colormap::Colormap;
use crate::error::VizResult;
use crate::normalize::{union_range, Normalize, DEFAULT_RANGE};
use crate::options::{RenderRequest, ResolvedOptions, Target};
use crate::plotter::{Paint, PlotStyle};

/// Neutral edge color used when only nodes are colored.
pub const NEUTRAL_EDGE_COLOR: Color = Color::GRAY;

#[derive(Debug, Clone)]
pub struct RenderPlan {
    pub column: String,
    pub target: Target,
    /// Colorbar scale: observed range of the colored classes, `[0, 1]` if degenerate
    pub norm: Normalize,
    pub colormap: Colormap,
    pub colorbar_label: String,
    pub style: PlotStyle,
}

pub fn plan_render(
    network: &StreetNetwork,
    nodes: &AttributeTable,
    edges: &AttributeTable,
    request: &RenderRequest,
) -> VizResult<RenderPlan> {
    let column = request.result_columns.resolve()?;
    let options = request.options.validate()?;
    let target = request.target;

    let edge_range = match target {
        Target::Edges | Target::Both => edges.value_range(column)?,
        Target::Nodes => None,
    };
    let node_range = match target {
        Target::Nodes | Target::Both => nodes.value_range(column)?,
        Target::Edges => None,
    };
    let norm = Normalize::from_observed(union_range(edge_range, node_range));
    debug!(
        colored = %target,
        column,
        vmin = norm.vmin(),
        vmax = norm.vmax(),
        "resolved normalization range"
    );

    let edge_scale = class_scale(edge_range);
    let node_scale = class_scale(node_range);
    let edge_colors = || -> VizResult<Paint> {
        let values = edges.edge_values(column)?;
        Ok(Paint::PerElement(lookup(
            network.graph.edge_weights().map(|street| street.key),
            &values,
            |value| colorize(&options, edge_scale, value),
        )))
    };
    let node_colors = || -> VizResult<Paint> {
        let values = nodes.node_values(column)?;
        Ok(Paint::PerElement(lookup(
            network.graph.node_weights().map(|node| node.id),
            &values,
            |value| colorize(&options, node_scale, value),
        )))
    };

    let base = PlotStyle {
        edge_line_width: options.edge_line_width,
        node_size: options.node_size,
        background: options.background_color,
        width: options.width,
        height: options.height,
        layout_iterations: options.layout_iterations,
        ..PlotStyle::default()
    };
    let style = match target {
        Target::Edges => PlotStyle {
            edge_paint: edge_colors()?,
            node_size: 0.0,
            ..base
        },
        Target::Nodes => PlotStyle {
            node_paint: node_colors()?,
            edge_paint: Paint::Uniform(NEUTRAL_EDGE_COLOR),
            ..base
        },
        Target::Both => PlotStyle {
            edge_paint: edge_colors()?,
            node_paint: node_colors()?,
            ..base
        },
    };

    Ok(RenderPlan {
        column: column.to_string(),
        target,
        norm,
        colormap: options.colormap.clone(),
        colorbar_label: options.colorbar_label.clone(),
        style,
    })
}

/// Color scale over one entity class's own values. A constant class has zero
/// span and maps to the low end of the colormap.
fn class_scale(range: Option<(f64, f64)>) -> Normalize {
    let (lo, hi) = range.unwrap_or(DEFAULT_RANGE);
    Normalize::new(lo, hi)
}

fn colorize(options: &ResolvedOptions, scale: Normalize, value: Option<f64>) -> Color {
    match value {
        Some(v) => options.colormap.sample(scale.normalize(v)),
        None => options.missing_value_color,
    }
}

fn lookup<K: Eq + Hash>(
    keys: impl Iterator<Item = K>,
    values: &HashMap<K, f64>,
    colorize: impl Fn(Option<f64>) -> Color,
) -> Vec<Color> {
    keys.map(|key| colorize(values.get(&key).copied())).collect()
}
