//! Core library for gravity-model flow graphs and hierarchical segmentation
//! of population centers

pub mod cluster;
pub mod config;
pub mod data;
pub mod error;
pub mod geo;
pub mod graph;
pub mod spatial;
pub mod storage;

pub use cluster::{partition, partition_with, HierarchyTree, MinimumCut, StoerWagner, SENTINEL_GROUP};
pub use config::Config;
pub use data::PlaceRecord;
pub use error::{Error, Result};
pub use graph::{build_flow_graph, calculate_gravity_constant, FlowGraph, Place};
