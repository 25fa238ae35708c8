//! Render request and options.
//!
//! [`RenderOptions`] is plain data with documented defaults so it can be
//! deserialized from a config file section. [`RenderOptions::validate`] turns
//! it into [`ResolvedOptions`] (parsed colors, loaded colormap) before any
//! drawing happens.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::colormap::Colormap;
use crate::error::{VizError, VizResult};

/// Which entity class receives attribute colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Edges,
    Nodes,
    Both,
}

impl FromStr for Target {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "edges" => Ok(Target::Edges),
            "nodes" => Ok(Target::Nodes),
            "both" => Ok(Target::Both),
            other => Err(VizError::InvalidTarget(other.to_string())),
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Target::Edges => "edges",
            Target::Nodes => "nodes",
            Target::Both => "both",
        })
    }
}

/// A single column name, or a collection that must hold exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultColumns {
    Single(String),
    Many(Vec<String>),
}

impl ResultColumns {
    pub fn resolve(&self) -> VizResult<&str> {
        match self {
            ResultColumns::Single(name) => Ok(name.as_str()),
            ResultColumns::Many(names) => match names.as_slice() {
                [name] => Ok(name.as_str()),
                [] => Err(VizError::NoResultColumn),
                many => Err(VizError::MultipleResultColumns(many.len())),
            },
        }
    }
}

impl From<&str> for ResultColumns {
    fn from(name: &str) -> Self {
        ResultColumns::Single(name.to_string())
    }
}

impl From<String> for ResultColumns {
    fn from(name: String) -> Self {
        ResultColumns::Single(name)
    }
}

impl From<Vec<String>> for ResultColumns {
    fn from(names: Vec<String>) -> Self {
        ResultColumns::Many(names)
    }
}

impl From<&[&str]> for ResultColumns {
    fn from(names: &[&str]) -> Self {
        ResultColumns::Many(names.iter().map(|n| n.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ResultColumns {
    fn from(names: [&str; N]) -> Self {
        ResultColumns::from(&names[..])
    }
}

/// Styling and canvas options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Palette name, e.g. `Greens`, `viridis`, `Reds_r`.
    pub colormap: String,
    /// Edge stroke width in points.
    pub edge_line_width: f64,
    /// Node marker area in points squared; 0 hides nodes.
    pub node_size: f64,
    /// Color for entities whose value is absent.
    pub missing_value_color: String,
    pub colorbar_label: String,
    pub background_color: String,
    /// Canvas width in pixels, excluding the colorbar panel.
    pub width: u32,
    pub height: u32,
    /// Force-layout iterations used when nodes carry no coordinates.
    pub layout_iterations: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            colormap: "Greens".to_string(),
            edge_line_width: 0.5,
            node_size: 50.0,
            missing_value_color: "#cccccc".to_string(),
            colorbar_label: "Aggregated Value".to_string(),
            background_color: "#111111".to_string(),
            width: 800,
            height: 800,
            layout_iterations: 200,
        }
    }
}

/// Validated form of [`RenderOptions`].
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    pub colormap: Colormap,
    pub edge_line_width: f64,
    pub node_size: f64,
    pub missing_value_color: Color,
    pub colorbar_label: String,
    pub background_color: Color,
    pub width: u32,
    pub height: u32,
    pub layout_iterations: usize,
}

impl RenderOptions {
    pub fn validate(&self) -> VizResult<ResolvedOptions> {
        if !(self.edge_line_width.is_finite() && self.edge_line_width >= 0.0) {
            return Err(VizError::InvalidOption(format!(
                "edge_line_width must be a non-negative number, got {}",
                self.edge_line_width
            )));
        }
        if !(self.node_size.is_finite() && self.node_size >= 0.0) {
            return Err(VizError::InvalidOption(format!(
                "node_size must be a non-negative number, got {}",
                self.node_size
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(VizError::InvalidOption(format!(
                "canvas must be at least 1x1 pixels, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(ResolvedOptions {
            colormap: Colormap::from_name(&self.colormap)?,
            edge_line_width: self.edge_line_width,
            node_size: self.node_size,
            missing_value_color: self.missing_value_color.parse()?,
            colorbar_label: self.colorbar_label.clone(),
            background_color: self.background_color.parse()?,
            width: self.width,
            height: self.height,
            layout_iterations: self.layout_iterations,
        })
    }
}

#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub result_columns: ResultColumns,
    pub target: Target,
    pub options: RenderOptions,
}

impl RenderRequest {
    pub fn new(result_columns: impl Into<ResultColumns>) -> Self {
        Self {
            result_columns: result_columns.into(),
            target: Target::default(),
            options: RenderOptions::default(),
        }
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }
}
