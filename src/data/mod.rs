//! Place records and their ingestion

pub mod grid;
pub mod table;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geo::check_longlat;

/// One population center, as produced by peak detection over a population
/// raster
///
/// Records are immutable once constructed; graph construction reads them and
/// never writes them back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    /// Population assigned to this place (non-negative)
    pub population: f64,

    /// Prevalence or other intensity measure at this place (non-negative)
    pub intensity: f64,

    pub longitude: f64,

    pub latitude: f64,
}

impl PlaceRecord {
    /// Validate and construct a record. `row` is reported in errors so a bad
    /// line in an input table can be found again.
    pub fn new(row: usize, population: f64, intensity: f64, longitude: f64, latitude: f64) -> Result<Self> {
        check_longlat([longitude, latitude]).map_err(|reason| Error::InvalidPoint { row, reason })?;
        if !population.is_finite() || population < 0.0 {
            return Err(Error::InvalidPoint {
                row,
                reason: format!("population {population} must be finite and non-negative"),
            });
        }
        if !intensity.is_finite() || intensity < 0.0 {
            return Err(Error::InvalidPoint {
                row,
                reason: format!("intensity {intensity} must be finite and non-negative"),
            });
        }
        Ok(Self {
            population,
            intensity,
            longitude,
            latitude,
        })
    }

    /// Longitude/latitude pair in the order the geographic helpers expect
    pub fn longlat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_record() {
        let record = PlaceRecord::new(0, 12_000.0, 0.2, 32.5, 1.4).unwrap();
        assert_eq!(record.longlat(), [32.5, 1.4]);
    }

    #[test]
    fn test_rejects_bad_latitude() {
        let err = PlaceRecord::new(7, 100.0, 0.1, 30.0, 95.0).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("point 7"), "{text}");
        assert!(text.contains("latitude"), "{text}");
    }

    #[test]
    fn test_rejects_negative_population() {
        assert!(PlaceRecord::new(0, -5.0, 0.1, 30.0, 1.0).is_err());
    }

    #[test]
    fn test_rejects_nan_intensity() {
        assert!(PlaceRecord::new(0, 5.0, f64::NAN, 30.0, 1.0).is_err());
    }
}
