//! Error types for graph construction and partitioning

use thiserror::Error;

/// Errors surfaced by the segmenter library
#[derive(Error, Debug)]
pub enum Error {
    /// The gravity exponent must be strictly positive for the lattice
    /// normalization to be defined
    #[error("gravity exponent must be positive, got {0}")]
    GravityExponent(f64),

    /// Cutoff radius and plaquette size must both be strictly positive
    #[error("gravity cutoff {cutoff} m and plaquette {plaquette} m must be positive")]
    GravityConfig { cutoff: f64, plaquette: f64 },

    /// The reference lattice contained no cells, so the normalization
    /// constant is undefined
    #[error("gravity lattice sum is zero for cutoff {cutoff} m, plaquette {plaquette} m")]
    GravityDegenerate { cutoff: f64, plaquette: f64 },

    /// A maximum group size of zero can never be satisfied
    #[error("maximum group size must be at least 1")]
    ZeroGroupSize,

    /// A point record failed validation at ingestion
    #[error("point {row}: {reason}")]
    InvalidPoint { row: usize, reason: String },

    /// The minimum-cut primitive could not decompose a queued component.
    /// Partial results are discarded because the labeling would be
    /// inconsistent with the hierarchy.
    #[error("minimum cut failed for group {group} ({size} nodes): {reason}")]
    CutFailed {
        group: u32,
        size: usize,
        reason: String,
    },

    /// Errors from the points table reader
    #[error("points table: {0}")]
    Table(#[from] polars::prelude::PolarsError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
