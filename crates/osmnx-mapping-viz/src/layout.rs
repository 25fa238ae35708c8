use std::collections::HashMap;

use fdg_sim::{
    force::fruchterman_reingold, ForceGraph, ForceGraphHelper, Simulation, SimulationParameters,
};
use osmnx_mapping_core::{NodeIndex, Point, StreetNetwork};
use petgraph::visit::EdgeRef;

/// Runs a force-directed layout on the provided `StreetNetwork`.
///
/// Used when intersections carry no coordinates. Positions are keyed by the
/// network's own node indices; edge direction is ignored.
pub fn layout_network(network: &StreetNetwork, iterations: usize) -> HashMap<NodeIndex, Point> {
    if network.graph.node_count() == 0 {
        return HashMap::new();
    }

    let mut graph: ForceGraph<usize, ()> = ForceGraph::default();
    let mut index_map: HashMap<usize, _> = HashMap::new();
    for node_idx in network.graph.node_indices() {
        let intersection = &network.graph[node_idx];
        let idx = graph.add_force_node(intersection.id.to_string(), node_idx.index());
        index_map.insert(node_idx.index(), idx);
    }

    for edge in network.graph.edge_references() {
        if let (Some(&from), Some(&to)) = (
            index_map.get(&edge.source().index()),
            index_map.get(&edge.target().index()),
        ) {
            if from != to {
                graph.add_edge(from, to, ());
            }
        }
    }

    let mut params = SimulationParameters::default();
    params.set_force(fruchterman_reingold(45.0, 0.95));
    let mut simulation = Simulation::from_graph(graph, params);
    for _ in 0..iterations {
        simulation.update(0.02);
    }

    let graph = simulation.get_graph();
    graph
        .node_indices()
        .map(|idx| {
            let node = &graph[idx];
            (
                NodeIndex::new(node.data),
                Point::new(node.location.x as f64, node.location.y as f64),
            )
        })
        .collect()
}
