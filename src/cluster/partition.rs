//! Work-queue hierarchical splitting

use std::collections::HashSet;

use petgraph::graph::NodeIndex;

use crate::cluster::mincut::{MinimumCut, StoerWagner};
use crate::cluster::{HierarchyTree, PartitionStats, SENTINEL_GROUP};
use crate::error::{Error, Result};
use crate::graph::components::{components_excluding, connected_components, normalize_pair};
use crate::graph::flow::FlowGraph;

/// Split the flow graph hierarchically until every group is at most
/// `max_group_size` nodes, using the built-in Stoer-Wagner cut
///
/// Returns the graph with a group label on every node, the tree of which
/// groups were split from which, and counts for diagnostics. The edge set
/// of the returned graph is the input's, untouched; cuts happen on private
/// working copies.
pub fn partition(
    graph: FlowGraph,
    max_group_size: usize,
) -> Result<(FlowGraph, HierarchyTree, PartitionStats)> {
    partition_with(&StoerWagner, graph, max_group_size)
}

/// [`partition`] with a caller-supplied minimum-cut implementation
pub fn partition_with(
    cutter: &impl MinimumCut,
    mut graph: FlowGraph,
    max_group_size: usize,
) -> Result<(FlowGraph, HierarchyTree, PartitionStats)> {
    if max_group_size == 0 {
        return Err(Error::ZeroGroupSize);
    }

    let mut tree = HierarchyTree::new();
    let mut next_group = SENTINEL_GROUP + 1;
    let mut singletons = 0usize;
    let mut cuts = 0usize;

    // Seed the work queue: lone points take the sentinel, small components
    // are done, large ones get split
    let components = connected_components(&graph);
    let component_count = components.len();
    let mut work: Vec<(Vec<NodeIndex>, u32)> = Vec::new();
    for component in components {
        if component.len() == 1 {
            if !tree.contains_group(SENTINEL_GROUP) {
                tree.add_group(SENTINEL_GROUP);
            }
            set_group(&mut graph, &component, SENTINEL_GROUP);
            singletons += 1;
            continue;
        }
        let group = next_group;
        next_group += 1;
        tree.add_group(group);
        set_group(&mut graph, &component, group);
        if component.len() > max_group_size {
            work.push((component, group));
        }
    }
    if component_count > 1 {
        log::info!("There are {} connected components at the start.", component_count);
    }

    while let Some((members, parent)) = work.pop() {
        let cut = cutter.minimum_cut(&graph, &members, parent)?;
        cuts += 1;
        let removed: HashSet<(NodeIndex, NodeIndex)> = cut
            .iter()
            .map(|&(a, b)| normalize_pair(a, b))
            .collect();

        let pieces = components_excluding(&graph, &members, &removed);
        if pieces.len() < 2 {
            // A cut that separates nothing would loop forever
            return Err(Error::CutFailed {
                group: parent,
                size: members.len(),
                reason: format!("removing {} edges left one piece", removed.len()),
            });
        }
        log::debug!(
            "Split group {} ({} nodes) into {} pieces",
            parent,
            members.len(),
            pieces.len()
        );

        for piece in pieces {
            let group = next_group;
            next_group += 1;
            tree.add_child(group, parent);
            set_group(&mut graph, &piece, group);
            if piece.len() > max_group_size {
                work.push((piece, group));
            }
        }
    }

    let stats = PartitionStats {
        components: component_count,
        singletons,
        cuts,
        groups: tree.group_count(),
    };
    log::info!(
        "Partitioned {} components into {} groups with {} cuts",
        stats.components,
        stats.groups,
        stats.cuts
    );
    Ok((graph, tree, stats))
}

fn set_group(graph: &mut FlowGraph, nodes: &[NodeIndex], group: u32) {
    for &node in nodes {
        graph[node].group = Some(group);
    }
}
