use osmnx_mapping_core::{AttributeTable, StreetNetwork};
use tracing::debug;

use crate::error::VizResult;
use crate::figure::Figure;
use crate::plan::plan_render;
use crate::options::RenderRequest;
use crate::plotter::{GraphPlotter, SvgPlotter};

/// Renders a street network colored by one attribute column.
pub trait Visualiser {
    fn render(
        &self,
        network: &StreetNetwork,
        nodes: &AttributeTable,
        edges: &AttributeTable,
        request: &RenderRequest,
    ) -> VizResult<Figure>;
}

/// Static image renderer: draws the graph with the injected plotter and
/// attaches a colorbar scaled to the attribute's observed range.
#[derive(Debug, Clone, Default)]
pub struct StaticVisualiser<P = SvgPlotter> {
    plotter: P,
}

impl StaticVisualiser<SvgPlotter> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: GraphPlotter> StaticVisualiser<P> {
    pub fn with_plotter(plotter: P) -> Self {
        Self { plotter }
    }
}

impl<P: GraphPlotter> Visualiser for StaticVisualiser<P> {
    fn render(
        &self,
        network: &StreetNetwork,
        nodes: &AttributeTable,
        edges: &AttributeTable,
        request: &RenderRequest,
    ) -> VizResult<Figure> {
        let plan = plan_render(network, nodes, edges, request)?;
        let mut figure = self.plotter.plot_graph(network, &plan.style)?;
        figure.add_colorbar(plan.norm, plan.colormap, plan.colorbar_label);
        debug!(colored = %plan.target, column = %plan.column, "rendered static figure");
        Ok(figure)
    }
}
