//! Hierarchical decomposition of the flow graph

pub mod mincut;
pub mod partition;

use itertools::Itertools;
use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;
use serde::Serialize;

pub use mincut::{MinimumCut, StoerWagner};
pub use partition::{partition, partition_with};

/// Reserved group id for points that belong to no multi-node cluster
pub const SENTINEL_GROUP: u32 = 1;

/// Which groups were split from which
///
/// Nodes are group ids; each edge points from a child group to the group it
/// was cut out of. Groups that came straight from connected components have
/// no parent and are the roots.
#[derive(Debug, Clone)]
pub struct HierarchyTree {
    tree: DiGraphMap<u32, ()>,
}

impl Default for HierarchyTree {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchyTree {
    pub fn new() -> Self {
        Self {
            tree: DiGraphMap::new(),
        }
    }

    /// Register a group with no parent
    pub fn add_group(&mut self, group: u32) {
        self.tree.add_node(group);
    }

    /// Register `child` as split out of `parent`
    pub fn add_child(&mut self, child: u32, parent: u32) {
        self.tree.add_edge(child, parent, ());
    }

    pub fn contains_group(&self, group: u32) -> bool {
        self.tree.contains_node(group)
    }

    /// The group this one was split out of, if any
    pub fn parent_of(&self, group: u32) -> Option<u32> {
        self.tree
            .neighbors_directed(group, Direction::Outgoing)
            .next()
    }

    /// Groups split out of this one
    pub fn children_of(&self, group: u32) -> Vec<u32> {
        self.tree
            .neighbors_directed(group, Direction::Incoming)
            .sorted_unstable()
            .collect()
    }

    /// Hops from this group up to its root
    pub fn depth_of(&self, group: u32) -> usize {
        let mut depth = 0;
        let mut current = group;
        while let Some(parent) = self.parent_of(current) {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// All group ids, ascending
    pub fn groups(&self) -> Vec<u32> {
        self.tree.nodes().sorted_unstable().collect()
    }

    /// All child-to-parent pairs, ascending by child
    pub fn parent_edges(&self) -> Vec<(u32, u32)> {
        self.tree
            .all_edges()
            .map(|(child, parent, _)| (child, parent))
            .sorted_unstable()
            .collect()
    }

    pub fn group_count(&self) -> usize {
        self.tree.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.node_count() == 0
    }

    /// True when no group is its own ancestor
    pub fn is_acyclic(&self) -> bool {
        !petgraph::algo::is_cyclic_directed(&self.tree)
    }
}

/// Counts recorded while partitioning
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PartitionStats {
    /// Connected components in the input graph
    pub components: usize,

    /// Nodes assigned the sentinel group
    pub singletons: usize,

    /// Minimum cuts computed
    pub cuts: usize,

    /// Groups in the hierarchy, sentinel included
    pub groups: usize,
}
