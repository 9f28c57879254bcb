//! Results persistence

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use petgraph::visit::EdgeRef;
use serde_json::{json, to_string_pretty};

use crate::cluster::{HierarchyTree, PartitionStats};
use crate::error::Result;
use crate::graph::flow::{FlowGraph, FlowStats};

/// Save the labeled graph and hierarchy to the specified directory
pub fn save_results(
    graph: &FlowGraph,
    tree: &HierarchyTree,
    flow_stats: &FlowStats,
    partition_stats: &PartitionStats,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving {} labeled places to {}", graph.node_count(), output_dir);

    fs::create_dir_all(output_dir)?;

    save_summary(graph, flow_stats, partition_stats, output_dir)?;
    save_nodes(graph, tree, output_dir)?;
    save_edges(graph, output_dir)?;
    save_hierarchy(tree, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Summary statistics for the whole run
fn save_summary(
    graph: &FlowGraph,
    flow_stats: &FlowStats,
    partition_stats: &PartitionStats,
    output_dir: &str,
) -> Result<()> {
    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;

    let total_capacity: f64 = graph.edge_references().map(|edge| *edge.weight()).sum();
    let summary = json!({
        "graph_stats": {
            "input_points": flow_stats.input_points,
            "retained_points": flow_stats.retained_points,
            "node_count": graph.node_count(),
            "edge_count": graph.edge_count(),
            "total_capacity": total_capacity,
        },
        "partition_stats": {
            "components": partition_stats.components,
            "singletons": partition_stats.singletons,
            "cuts": partition_stats.cuts,
            "groups": partition_stats.groups,
        }
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

/// Per-place table: coordinates, group label, and the group's depth in the
/// hierarchy
fn save_nodes(graph: &FlowGraph, tree: &HierarchyTree, output_dir: &str) -> Result<()> {
    let path = Path::new(output_dir).join("nodes.json");
    let mut file = File::create(path)?;

    let nodes: Vec<_> = graph
        .node_indices()
        .map(|node| {
            let place = &graph[node];
            let group = place.group;
            json!({
                "index": node.index(),
                "longitude": place.longlat[0],
                "latitude": place.longlat[1],
                "group": group,
                "level": group.map(|g| tree.depth_of(g)),
            })
        })
        .collect();

    file.write_all(to_string_pretty(&json!({ "nodes": nodes }))?.as_bytes())?;

    Ok(())
}

/// Edge list with flow capacities
fn save_edges(graph: &FlowGraph, output_dir: &str) -> Result<()> {
    let path = Path::new(output_dir).join("edges.json");
    let mut file = File::create(path)?;

    let edges: Vec<_> = graph
        .edge_references()
        .map(|edge| {
            json!({
                "source": edge.source().index(),
                "target": edge.target().index(),
                "capacity": edge.weight(),
            })
        })
        .collect();

    file.write_all(to_string_pretty(&json!({ "edges": edges }))?.as_bytes())?;

    Ok(())
}

/// The hierarchy as child-to-parent pairs
fn save_hierarchy(tree: &HierarchyTree, output_dir: &str) -> Result<()> {
    let path = Path::new(output_dir).join("hierarchy.json");
    let mut file = File::create(path)?;

    let edges: Vec<_> = tree
        .parent_edges()
        .into_iter()
        .map(|(child, parent)| json!({ "child": child, "parent": parent }))
        .collect();

    let hierarchy = json!({
        "groups": tree.groups(),
        "edges": edges,
    });

    file.write_all(to_string_pretty(&hierarchy)?.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::partition;
    use crate::graph::flow::Place;

    fn labeled_fixture() -> (FlowGraph, HierarchyTree, PartitionStats) {
        let mut graph = FlowGraph::new_undirected();
        for _ in 0..3 {
            graph.add_node(Place::new([30.0, 1.0]));
        }
        graph.add_edge(0.into(), 1.into(), 2.5);
        partition(graph, 8).unwrap()
    }

    #[test]
    fn test_save_results_writes_files() {
        let (graph, tree, stats) = labeled_fixture();
        let flow_stats = FlowStats {
            input_points: 4,
            retained_points: 3,
        };
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_str().unwrap();
        save_results(&graph, &tree, &flow_stats, &stats, dir_str).unwrap();

        for name in ["summary.json", "nodes.json", "edges.json", "hierarchy.json"] {
            let contents = fs::read_to_string(dir.path().join(name)).unwrap();
            let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
            assert!(parsed.is_object(), "{name} should hold an object");
        }

        let nodes: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("nodes.json")).unwrap())
                .unwrap();
        assert_eq!(nodes["nodes"].as_array().unwrap().len(), 3);
        assert_eq!(nodes["nodes"][2]["group"], 1);
    }
}
