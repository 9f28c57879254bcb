//! Weighted interaction graph over places

use petgraph::graph::UnGraph;
use serde::{Deserialize, Serialize};

/// Node payload: where the place is, and which group the partitioner put it
/// in
///
/// `group` is `None` until partitioning runs; afterwards every node carries
/// a label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Longitude and latitude of the place
    pub longlat: [f64; 2],

    /// Group label assigned by the partitioner
    pub group: Option<u32>,
}

impl Place {
    pub fn new(longlat: [f64; 2]) -> Self {
        Self {
            longlat,
            group: None,
        }
    }
}

/// Undirected graph of places with gravity-model flow capacities on the
/// edges
///
/// Each undirected edge is stored once, so its capacity is symmetric by
/// construction. The edge set is fixed after construction; the partitioner
/// only annotates `group` labels and cuts edges on private working copies.
pub type FlowGraph = UnGraph<Place, f64>;

/// Counts recorded while filtering the input points
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FlowStats {
    /// Points handed to the builder
    pub input_points: usize,

    /// Points above the intensity floor, i.e. graph nodes
    pub retained_points: usize,
}
