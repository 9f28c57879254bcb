//! Raster grid windows, without any raster file I/O
//!
//! Callers load gridded population and prevalence bands however they like and
//! hand them over as `ndarray` views plus the six-coefficient affine transform
//! that maps pixel indices to longitude/latitude. This module does the pixel
//! math: locating the window of pixels within a radius of a point and
//! aggregating band values over it, skipping the negative sentinel values
//! rasters use for missing data.

use ndarray::{s, ArrayView2};

use crate::data::PlaceRecord;
use crate::error::Result;
use crate::geo::bbox_around;

/// Affine pixel-to-geographic transform in the usual six-coefficient order:
/// `[origin_x, pixel_width, shear_x, origin_y, shear_y, pixel_height]`
///
/// `pixel_height` is negative for north-up grids.
#[derive(Debug, Clone, Copy)]
pub struct GridTransform {
    coefficients: [f64; 6],
}

/// An inclusive rectangle of pixel indices, `x` for columns and `y` for rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelWindow {
    pub x_min: i64,
    pub x_max: i64,
    pub y_min: i64,
    pub y_max: i64,
}

impl GridTransform {
    pub fn new(coefficients: [f64; 6]) -> Self {
        Self { coefficients }
    }

    /// Longitude/latitude of a (possibly fractional) pixel position
    pub fn pixel_coord(&self, pixel: [f64; 2]) -> [f64; 2] {
        let c = &self.coefficients;
        [
            c[0] + pixel[0] * c[1] + pixel[1] * c[2],
            c[3] + pixel[0] * c[4] + pixel[1] * c[5],
        ]
    }

    /// The pixel whose cell contains this longitude/latitude
    ///
    /// Shear terms are ignored, matching the grids in use (north-up, axis
    /// aligned).
    pub fn pixel_containing(&self, lonlat: [f64; 2]) -> [i64; 2] {
        let c = &self.coefficients;
        [
            ((lonlat[0] - c[0]) / c[1]).floor() as i64,
            ((lonlat[1] - c[3]) / c[5]).floor() as i64,
        ]
    }

    /// Window of pixels covering the disk of `radius_meters` around a point
    pub fn window_near_point(&self, lonlat: [f64; 2], radius_meters: f64) -> PixelWindow {
        let bbox = bbox_around(lonlat, radius_meters);
        let corners = [
            self.pixel_containing([bbox.min().x, bbox.min().y]),
            self.pixel_containing([bbox.min().x, bbox.max().y]),
            self.pixel_containing([bbox.max().x, bbox.min().y]),
            self.pixel_containing([bbox.max().x, bbox.max().y]),
        ];
        PixelWindow {
            x_min: corners.iter().map(|c| c[0]).min().unwrap_or(0),
            x_max: corners.iter().map(|c| c[0]).max().unwrap_or(0),
            y_min: corners.iter().map(|c| c[1]).min().unwrap_or(0),
            y_max: corners.iter().map(|c| c[1]).max().unwrap_or(0),
        }
    }
}

/// Clamp a window to a grid of `(rows, cols)` and return row/column ranges
fn clamped_ranges(window: &PixelWindow, shape: &[usize]) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
    let rows = shape[0] as i64;
    let cols = shape[1] as i64;
    let y0 = window.y_min.clamp(0, rows);
    let y1 = (window.y_max + 1).clamp(y0, rows);
    let x0 = window.x_min.clamp(0, cols);
    let x1 = (window.x_max + 1).clamp(x0, cols);
    (y0 as usize..y1 as usize, x0 as usize..x1 as usize)
}

/// Sum of the strictly positive entries inside a window
///
/// Rasters mark out-of-bounds cells with large negative values; those and
/// empty cells are excluded.
pub fn sum_within_window(grid: ArrayView2<'_, f64>, window: &PixelWindow) -> f64 {
    let (rows, cols) = clamped_ranges(window, grid.shape());
    grid.slice(s![rows, cols])
        .iter()
        .filter(|&&value| value > 0.0)
        .sum()
}

/// Mean of the non-negative entries inside a window, or zero if the window
/// holds no valid data
pub fn mean_within_window(grid: ArrayView2<'_, f64>, window: &PixelWindow) -> f64 {
    let (rows, cols) = clamped_ranges(window, grid.shape());
    let slice = grid.slice(s![rows, cols]);
    let mut sum = 0.0;
    let mut count = 0usize;
    for &value in slice.iter() {
        if value >= 0.0 {
            sum += value;
            count += 1;
        }
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Assign population and intensity to peak locations
///
/// For each peak: population is summed and intensity averaged over all
/// pixels within `radius_meters`, each band using its own transform.
pub fn assign_attributes(
    peaks: &[[f64; 2]],
    population: ArrayView2<'_, f64>,
    population_transform: &GridTransform,
    intensity: ArrayView2<'_, f64>,
    intensity_transform: &GridTransform,
    radius_meters: f64,
) -> Result<Vec<PlaceRecord>> {
    let mut places = Vec::with_capacity(peaks.len());
    for (row, &lonlat) in peaks.iter().enumerate() {
        let pop_window = population_transform.window_near_point(lonlat, radius_meters);
        let pop = sum_within_window(population, &pop_window);
        let intensity_window = intensity_transform.window_near_point(lonlat, radius_meters);
        let prevalence = mean_within_window(intensity, &intensity_window);
        places.push(PlaceRecord::new(row, pop, prevalence, lonlat[0], lonlat[1])?);
    }
    Ok(places)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // The LandScan global transform: 1/120 degree pixels, north up
    fn landscan_transform() -> GridTransform {
        GridTransform::new([
            -180.0,
            0.0083333333333333,
            0.0,
            89.99999999999929,
            0.0,
            -0.0083333333333333,
        ])
    }

    #[test]
    fn test_pixel_round_trip() {
        let transform = landscan_transform();
        let coord = transform.pixel_coord([25_199.5, 10_768.5]);
        assert!(coord[0] > 10.0 && coord[0] < 50.0);
        assert!(coord[1] > -10.0 && coord[1] < 10.0);
        let containing = transform.pixel_containing(coord);
        assert_eq!(containing, [25_199, 10_768]);
    }

    #[test]
    fn test_window_near_point_is_ordered() {
        let transform = landscan_transform();
        let window = transform.window_near_point([30.0, 1.0], 100_000.0);
        assert!(window.x_max > window.x_min);
        assert!(window.y_max > window.y_min);
        // 100 km is roughly 0.9 degrees, i.e. about 108 pixels either side
        assert!(window.x_max - window.x_min < 300);
    }

    #[test]
    fn test_sum_skips_negative_sentinels() {
        let grid = array![
            [1.0, 2.0, -9999.0],
            [3.0, -9999.0, 4.0],
            [0.0, 5.0, 6.0],
        ];
        let window = PixelWindow {
            x_min: 0,
            x_max: 2,
            y_min: 0,
            y_max: 1,
        };
        assert_eq!(sum_within_window(grid.view(), &window), 10.0);
    }

    #[test]
    fn test_mean_keeps_zeros_skips_sentinels() {
        let grid = array![[0.5, -1.0], [0.0, 0.1]];
        let window = PixelWindow {
            x_min: 0,
            x_max: 1,
            y_min: 0,
            y_max: 1,
        };
        let mean = mean_within_window(grid.view(), &window);
        assert!((mean - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_window_clamped_to_grid() {
        let grid = array![[1.0, 1.0], [1.0, 1.0]];
        let window = PixelWindow {
            x_min: -5,
            x_max: 10,
            y_min: -5,
            y_max: 10,
        };
        assert_eq!(sum_within_window(grid.view(), &window), 4.0);
    }

    #[test]
    fn test_assign_attributes() {
        // One-degree pixels centered on a small region
        let transform = GridTransform::new([29.0, 1.0, 0.0, 3.0, 0.0, -1.0]);
        let population = array![
            [100.0, 200.0, 300.0],
            [400.0, 500.0, -9999.0],
            [700.0, 800.0, 900.0],
        ];
        let prevalence = array![
            [0.1, 0.2, 0.3],
            [0.4, 0.5, -9999.0],
            [0.7, 0.8, 0.9],
        ];
        let places = assign_attributes(
            &[[30.5, 1.5]],
            population.view(),
            &transform,
            prevalence.view(),
            &transform,
            60_000.0,
        )
        .unwrap();
        assert_eq!(places.len(), 1);
        // The window around the center pixel covers the whole 3x3 block,
        // minus the sentinel cell
        assert_eq!(places[0].population, 3_900.0);
        assert!((places[0].intensity - 3.9 / 8.0).abs() < 1e-12);
    }
}
