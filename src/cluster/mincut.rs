//! Minimum edge cut of a capacitated undirected subgraph
//!
//! The partitioner only needs the contract: given a connected set of nodes,
//! return a minimum-total-capacity set of edges whose removal disconnects
//! it. The shipped implementation is Stoer-Wagner; anything satisfying the
//! trait can be swapped in.

use std::collections::HashMap;

use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use crate::error::{Error, Result};
use crate::graph::flow::FlowGraph;

/// Capability to compute a minimum edge cut over a node subset of a flow
/// graph
pub trait MinimumCut {
    /// Return the cut as unordered node pairs. `group` identifies the
    /// component being split, for error reporting only.
    fn minimum_cut(
        &self,
        graph: &FlowGraph,
        members: &[NodeIndex],
        group: u32,
    ) -> Result<Vec<(NodeIndex, NodeIndex)>>;
}

/// Stoer-Wagner global minimum cut (Stoer & Wagner 1997)
///
/// Runs maximum-adjacency phases over a dense capacity matrix, merging the
/// last two vertices of each phase, and keeps the lightest cut-of-the-phase.
/// O(n^3) on the component size, which is fine for the component sizes this
/// crate splits.
#[derive(Debug, Default, Clone, Copy)]
pub struct StoerWagner;

impl MinimumCut for StoerWagner {
    fn minimum_cut(
        &self,
        graph: &FlowGraph,
        members: &[NodeIndex],
        group: u32,
    ) -> Result<Vec<(NodeIndex, NodeIndex)>> {
        let n = members.len();
        if n < 2 {
            return Err(Error::CutFailed {
                group,
                size: n,
                reason: "fewer than two nodes".into(),
            });
        }

        let local: HashMap<NodeIndex, usize> = members
            .iter()
            .enumerate()
            .map(|(position, &node)| (node, position))
            .collect();

        // Dense capacity matrix over the member set
        let mut weight = vec![vec![0.0f64; n]; n];
        let mut internal_edges = 0usize;
        for &node in members {
            for edge in graph.edges(node) {
                let Some(&other) = local.get(&edge.target()) else {
                    continue;
                };
                let this = local[&node];
                if this < other {
                    weight[this][other] += *edge.weight();
                    weight[other][this] = weight[this][other];
                    internal_edges += 1;
                }
            }
        }
        if internal_edges == 0 {
            return Err(Error::CutFailed {
                group,
                size: n,
                reason: "no internal edges".into(),
            });
        }

        let side = best_cut_side(&mut weight, n);

        // The cut is every original edge crossing the best side
        let in_side = {
            let mut flags = vec![false; n];
            for &vertex in &side {
                flags[vertex] = true;
            }
            flags
        };
        let mut cut = Vec::new();
        for &node in members {
            for edge in graph.edges(node) {
                let Some(&other) = local.get(&edge.target()) else {
                    continue;
                };
                let this = local[&node];
                if this < other && in_side[this] != in_side[other] {
                    cut.push(crate::graph::components::normalize_pair(node, edge.target()));
                }
            }
        }
        cut.sort_unstable();
        cut.dedup();

        if cut.is_empty() {
            return Err(Error::CutFailed {
                group,
                size: n,
                reason: "cut separated nothing".into(),
            });
        }
        Ok(cut)
    }
}

/// Run the Stoer-Wagner phases and return one side of the lightest cut
/// found, as indices into the original member order
fn best_cut_side(weight: &mut [Vec<f64>], n: usize) -> Vec<usize> {
    // Each active vertex is a supernode holding the original vertices
    // merged into it
    let mut merged: Vec<Vec<usize>> = (0..n).map(|vertex| vec![vertex]).collect();
    let mut active: Vec<usize> = (0..n).collect();
    let mut best_weight = f64::INFINITY;
    let mut best_side: Vec<usize> = vec![0];

    while active.len() > 1 {
        // Maximum-adjacency order: repeatedly take the vertex most tightly
        // connected to the growing set; ties go to the lower index so runs
        // are reproducible
        let mut connectivity = vec![0.0f64; n];
        let mut in_set: Vec<bool> = vec![false; n];
        let mut previous = active[0];
        let mut last = active[0];
        let mut last_connectivity = 0.0;

        for step in 0..active.len() {
            let mut pick = usize::MAX;
            let mut pick_weight = f64::NEG_INFINITY;
            for &vertex in &active {
                if in_set[vertex] {
                    continue;
                }
                let w = connectivity[vertex];
                if w > pick_weight {
                    pick = vertex;
                    pick_weight = w;
                }
            }
            in_set[pick] = true;
            if step + 1 == active.len() {
                previous = last;
                last = pick;
                last_connectivity = pick_weight;
            } else {
                last = pick;
            }
            for &vertex in &active {
                if !in_set[vertex] {
                    connectivity[vertex] += weight[pick][vertex];
                }
            }
        }

        // Cut-of-the-phase separates the last vertex from the rest
        if last_connectivity < best_weight {
            best_weight = last_connectivity;
            best_side = merged[last].clone();
        }

        // Merge the last vertex into the one added before it
        for &vertex in &active {
            if vertex != last && vertex != previous {
                weight[previous][vertex] += weight[last][vertex];
                weight[vertex][previous] = weight[previous][vertex];
            }
        }
        let absorbed = std::mem::take(&mut merged[last]);
        merged[previous].extend(absorbed);
        active.retain(|&vertex| vertex != last);
    }

    best_side
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::flow::Place;

    fn graph_with_edges(nodes: usize, edges: &[(u32, u32, f64)]) -> FlowGraph {
        let mut graph = FlowGraph::new_undirected();
        for _ in 0..nodes {
            graph.add_node(Place::new([0.0, 0.0]));
        }
        for &(a, b, capacity) in edges {
            graph.add_edge(a.into(), b.into(), capacity);
        }
        graph
    }

    /// Two cliques of `size` nodes joined by a single unit bridge
    fn barbell(size: usize) -> FlowGraph {
        let mut edges = Vec::new();
        for clique in 0..2u32 {
            let offset = clique * size as u32;
            for a in 0..size as u32 {
                for b in (a + 1)..size as u32 {
                    edges.push((offset + a, offset + b, 1.0));
                }
            }
        }
        edges.push((size as u32 - 1, size as u32, 1.0));
        graph_with_edges(2 * size, &edges)
    }

    #[test]
    fn test_barbell_cuts_the_bridge() {
        let graph = barbell(6);
        let members: Vec<NodeIndex> = graph.node_indices().collect();
        let cut = StoerWagner.minimum_cut(&graph, &members, 2).unwrap();
        assert_eq!(cut, vec![(NodeIndex::new(5), NodeIndex::new(6))]);
    }

    #[test]
    fn test_weighted_cut_avoids_heavy_edges() {
        // A path with one light edge in the middle
        let graph = graph_with_edges(
            4,
            &[(0, 1, 10.0), (1, 2, 0.5), (2, 3, 10.0)],
        );
        let members: Vec<NodeIndex> = graph.node_indices().collect();
        let cut = StoerWagner.minimum_cut(&graph, &members, 2).unwrap();
        assert_eq!(cut, vec![(NodeIndex::new(1), NodeIndex::new(2))]);
    }

    #[test]
    fn test_triangle_cut_weight() {
        let graph = graph_with_edges(3, &[(0, 1, 1.0), (1, 2, 1.0), (0, 2, 1.0)]);
        let members: Vec<NodeIndex> = graph.node_indices().collect();
        let cut = StoerWagner.minimum_cut(&graph, &members, 2).unwrap();
        // Any single vertex is a minimum side; the cut is its two edges
        assert_eq!(cut.len(), 2);
    }

    #[test]
    fn test_single_node_fails() {
        let graph = graph_with_edges(1, &[]);
        let members: Vec<NodeIndex> = graph.node_indices().collect();
        assert!(matches!(
            StoerWagner.minimum_cut(&graph, &members, 9),
            Err(Error::CutFailed { group: 9, .. })
        ));
    }

    #[test]
    fn test_no_internal_edges_fails() {
        let graph = graph_with_edges(3, &[(0, 1, 1.0)]);
        let members = vec![NodeIndex::new(0), NodeIndex::new(2)];
        assert!(matches!(
            StoerWagner.minimum_cut(&graph, &members, 4),
            Err(Error::CutFailed { .. })
        ));
    }
}
