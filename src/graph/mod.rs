//! Flow graph construction

pub mod builder;
pub mod components;
pub mod flow;

pub use builder::{build_flow_graph, calculate_gravity_constant};
pub use flow::{FlowGraph, FlowStats, Place};
