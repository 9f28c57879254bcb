//! Nearest-neighbor index over places
//!
//! Places are projected onto a mean-radius sphere with
//! [`crate::geo::longlat_to_xyz`] and bulk-loaded into an R-tree, so that
//! "everything within R meters" queries run in sublinear time instead of an
//! all-pairs scan. Queries return a superset: the Cartesian chord slightly
//! underestimates the geodesic arc, so callers widen the radius and re-check
//! candidates against the exact geodesic distance.

use rstar::{Point as RstarPoint, RTree};

use crate::geo::longlat_to_xyz;

/// One indexed place: its Cartesian position plus its position in the
/// caller's point list
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedPlace {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub index: usize,
}

impl RstarPoint for IndexedPlace {
    type Scalar = f64;
    const DIMENSIONS: usize = 3;

    fn generate(mut generator: impl FnMut(usize) -> Self::Scalar) -> Self {
        Self {
            x: generator(0),
            y: generator(1),
            z: generator(2),
            index: usize::MAX,
        }
    }

    fn nth(&self, index: usize) -> Self::Scalar {
        match index {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => unreachable!(),
        }
    }

    fn nth_mut(&mut self, index: usize) -> &mut Self::Scalar {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => unreachable!(),
        }
    }
}

/// R-tree over a fixed batch of longitude/latitude points
pub struct SpatialIndex {
    tree: RTree<IndexedPlace>,
    positions: Vec<[f64; 3]>,
}

impl SpatialIndex {
    /// Build the index from a slice of longitude/latitude pairs
    pub fn build(lonlats: &[[f64; 2]]) -> Self {
        let positions: Vec<[f64; 3]> = lonlats.iter().map(|&ll| longlat_to_xyz(ll)).collect();
        let entries: Vec<IndexedPlace> = positions
            .iter()
            .enumerate()
            .map(|(index, &[x, y, z])| IndexedPlace { x, y, z, index })
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
            positions,
        }
    }

    /// Number of indexed points
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Indices of all points whose chord distance from point `index` is at
    /// most `radius_meters`, including `index` itself
    ///
    /// Sorted ascending so downstream edge construction is deterministic.
    pub fn within_radius(&self, index: usize, radius_meters: f64) -> Vec<usize> {
        let [x, y, z] = self.positions[index];
        let center = IndexedPlace { x, y, z, index };
        let mut near: Vec<usize> = self
            .tree
            .locate_within_distance(center, radius_meters * radius_meters)
            .map(|place| place.index)
            .collect();
        near.sort_unstable();
        near
    }
}
