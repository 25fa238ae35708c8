use anyhow::{Context, Result};
use tracing::info;

use osmnx_mapping_core::importers::{read_edges_csv, read_nodes_csv};
use osmnx_mapping_core::StreetNetwork;
use osmnx_mapping_viz::{RenderRequest, StaticVisualiser, Visualiser};

use crate::cli::RenderArgs;
use crate::config::AppConfig;

pub fn handle(args: &RenderArgs, config: &AppConfig) -> Result<()> {
    let nodes = read_nodes_csv(&args.nodes)
        .with_context(|| format!("loading nodes from {}", args.nodes.display()))?;
    let edges = read_edges_csv(&args.edges)
        .with_context(|| format!("loading edges from {}", args.edges.display()))?;
    let network = StreetNetwork::from_tables(&nodes, &edges).context("building street network")?;
    info!("Loaded network: {}", network.stats());

    let request = RenderRequest::new(args.columns.clone())
        .with_target(args.target)
        .with_options(config.render_options(args));
    let figure = StaticVisualiser::new().render(&network, &nodes, &edges, &request)?;
    figure
        .save(&args.out, args.scale)
        .with_context(|| format!("writing {}", args.out.display()))?;

    println!("Figure written to {}", args.out.display());
    Ok(())
}
