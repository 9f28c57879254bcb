//! Connected components via union-find

use std::collections::{HashMap, HashSet};

use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use crate::graph::flow::FlowGraph;

/// Union-Find with path compression and union by rank
pub struct DisjointSets {
    parent: Vec<u32>,
    rank: Vec<u32>,
}

impl DisjointSets {
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size as u32).collect(),
            rank: vec![1; size],
        }
    }

    /// Find the root of the set containing x, compressing the path
    pub fn find(&mut self, x: u32) -> u32 {
        let parent = self.parent[x as usize];
        if parent != x {
            self.parent[x as usize] = self.find(parent);
        }
        self.parent[x as usize]
    }

    /// Union the sets containing x and y
    pub fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return;
        }
        // Attach the smaller tree under the larger
        if self.rank[root_x as usize] > self.rank[root_y as usize] {
            self.parent[root_y as usize] = root_x;
            self.rank[root_x as usize] += self.rank[root_y as usize];
        } else {
            self.parent[root_x as usize] = root_y;
            self.rank[root_y as usize] += self.rank[root_x as usize];
        }
    }
}

/// Connected components of the whole graph, each sorted by node index,
/// ordered by their smallest member
pub fn connected_components(graph: &FlowGraph) -> Vec<Vec<NodeIndex>> {
    let mut sets = DisjointSets::new(graph.node_count());
    for edge in graph.edge_references() {
        sets.union(edge.source().index() as u32, edge.target().index() as u32);
    }
    collect_components(graph.node_indices(), |node| sets.find(node.index() as u32))
}

/// Connected components among `members` only, ignoring edges listed in
/// `removed`
///
/// `removed` pairs must be normalized with [`normalize_pair`].
pub fn components_excluding(
    graph: &FlowGraph,
    members: &[NodeIndex],
    removed: &HashSet<(NodeIndex, NodeIndex)>,
) -> Vec<Vec<NodeIndex>> {
    let local: HashMap<NodeIndex, u32> = members
        .iter()
        .enumerate()
        .map(|(position, &node)| (node, position as u32))
        .collect();
    let mut sets = DisjointSets::new(members.len());
    for &node in members {
        for edge in graph.edges(node) {
            let other = edge.target();
            let Some(&other_local) = local.get(&other) else {
                continue;
            };
            if removed.contains(&normalize_pair(node, other)) {
                continue;
            }
            sets.union(local[&node], other_local);
        }
    }
    collect_components(members.iter().copied(), |node| sets.find(local[&node]))
}

/// An unordered node pair as a canonical key
pub fn normalize_pair(a: NodeIndex, b: NodeIndex) -> (NodeIndex, NodeIndex) {
    if a.index() <= b.index() {
        (a, b)
    } else {
        (b, a)
    }
}

fn collect_components<I, F>(nodes: I, mut root_of: F) -> Vec<Vec<NodeIndex>>
where
    I: Iterator<Item = NodeIndex>,
    F: FnMut(NodeIndex) -> u32,
{
    let mut by_root: HashMap<u32, Vec<NodeIndex>> = HashMap::new();
    for node in nodes {
        by_root.entry(root_of(node)).or_default().push(node);
    }
    let mut components: Vec<Vec<NodeIndex>> = by_root.into_values().collect();
    for component in &mut components {
        component.sort_unstable();
    }
    components.sort_unstable_by_key(|component| component[0]);
    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::flow::Place;

    fn graph_with_edges(nodes: usize, edges: &[(u32, u32)]) -> FlowGraph {
        let mut graph = FlowGraph::new_undirected();
        for _ in 0..nodes {
            graph.add_node(Place::new([0.0, 0.0]));
        }
        for &(a, b) in edges {
            graph.add_edge(a.into(), b.into(), 1.0);
        }
        graph
    }

    #[test]
    fn test_two_components_and_a_singleton() {
        let graph = graph_with_edges(5, &[(0, 1), (2, 3)]);
        let components = connected_components(&graph);
        assert_eq!(components.len(), 3);
        assert_eq!(components[0], vec![NodeIndex::new(0), NodeIndex::new(1)]);
        assert_eq!(components[1], vec![NodeIndex::new(2), NodeIndex::new(3)]);
        assert_eq!(components[2], vec![NodeIndex::new(4)]);
    }

    #[test]
    fn test_excluding_removed_edge_splits() {
        let graph = graph_with_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        let members: Vec<NodeIndex> = graph.node_indices().collect();
        let mut removed = HashSet::new();
        removed.insert(normalize_pair(NodeIndex::new(2), NodeIndex::new(1)));
        let components = components_excluding(&graph, &members, &removed);
        assert_eq!(components.len(), 2);
        assert_eq!(components[0], vec![NodeIndex::new(0), NodeIndex::new(1)]);
        assert_eq!(components[1], vec![NodeIndex::new(2), NodeIndex::new(3)]);
    }

    #[test]
    fn test_members_subset_only() {
        let graph = graph_with_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        let members = vec![NodeIndex::new(0), NodeIndex::new(1), NodeIndex::new(3)];
        let components = components_excluding(&graph, &members, &HashSet::new());
        // Node 3 is only reachable through node 2, which is outside the set
        assert_eq!(components.len(), 2);
        assert_eq!(components[1], vec![NodeIndex::new(3)]);
    }

    #[test]
    fn test_deterministic_ordering() {
        let graph = graph_with_edges(6, &[(4, 5), (0, 1), (2, 3)]);
        let first = connected_components(&graph);
        let second = connected_components(&graph);
        assert_eq!(first, second);
        assert_eq!(first[0][0], NodeIndex::new(0));
    }
}
