//! CSV points-table ingestion

use polars::prelude::*;

use crate::data::PlaceRecord;
use crate::error::{Error, Result};

/// Column names expected in a points table
const COLUMNS: [&str; 4] = ["population", "intensity", "longitude", "latitude"];

/// Load place records from a CSV file with `population`, `intensity`,
/// `longitude`, and `latitude` columns
///
/// Every row is validated; a row with out-of-range or non-finite values
/// fails the whole load rather than being silently clamped or skipped.
pub fn load_places(path: &str) -> Result<Vec<PlaceRecord>> {
    log::info!("Reading points table: {}", path);

    if !std::path::Path::new(path).exists() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("file not found: {path}"),
        )));
    }

    let df = LazyCsvReader::new(path).with_has_header(true).finish()?.collect()?;
    log::info!("Loaded {} rows", df.height());

    // Numeric columns may parse as integers; make them uniform
    let mut columns = Vec::with_capacity(COLUMNS.len());
    for name in COLUMNS {
        columns.push(df.column(name)?.cast(&DataType::Float64)?);
    }
    let population = columns[0].f64()?;
    let intensity = columns[1].f64()?;
    let longitude = columns[2].f64()?;
    let latitude = columns[3].f64()?;

    let mut places = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let missing = |name: &str| Error::InvalidPoint {
            row,
            reason: format!("missing {name}"),
        };
        let record = PlaceRecord::new(
            row,
            population.get(row).ok_or_else(|| missing("population"))?,
            intensity.get(row).ok_or_else(|| missing("intensity"))?,
            longitude.get(row).ok_or_else(|| missing("longitude"))?,
            latitude.get(row).ok_or_else(|| missing("latitude"))?,
        )?;
        places.push(record);
    }

    Ok(places)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_places() {
        let file = write_csv(
            "population,intensity,longitude,latitude\n\
             12000,0.25,32.5,1.4\n\
             800,0.0,33.0,1.0\n",
        );
        let places = load_places(file.path().to_str().unwrap()).unwrap();
        assert_eq!(places.len(), 2);
        assert_eq!(places[0].population, 12_000.0);
        assert_eq!(places[1].intensity, 0.0);
    }

    #[test]
    fn test_rejects_out_of_range_latitude() {
        let file = write_csv(
            "population,intensity,longitude,latitude\n\
             12000,0.25,32.5,95.0\n",
        );
        let err = load_places(file.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("latitude"));
    }

    #[test]
    fn test_missing_file() {
        assert!(load_places("/no/such/points.csv").is_err());
    }
}
