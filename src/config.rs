//! Configuration for graph construction and partitioning

/// Parameters controlling the gravity model and the segmentation bound
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum geodesic distance in meters at which two places interact
    pub cutoff_meters: f64,

    /// Gravity decay exponent applied to the distance between two places
    pub exponent: f64,

    /// Side length in meters of one cell of the reference lattice used to
    /// normalize the gravity constant
    pub plaquette_meters: f64,

    /// No group may contain more nodes than this unless it cannot be cut
    pub max_group_size: usize,

    /// Places at or below this intensity carry no flow and are dropped
    pub intensity_floor: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cutoff_meters: 200_000.0,
            exponent: 1.0,
            plaquette_meters: 1_000.0,
            max_group_size: 250,
            intensity_floor: 1e-3,
        }
    }
}
