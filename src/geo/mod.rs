//! Ellipsoidal-earth distance and bearing primitives
//!
//! Wraps the `geo` crate's WGS84 geodesic measure (Karney 2013) and adds the
//! coordinate conversions the rest of the crate needs: a radius-to-bounding-box
//! helper for raster windows and a Cartesian projection for the spatial index.

use geo::{coord, Destination, Distance, Geodesic, Point, Rect};

/// Earth's mean radius in meters, used for the Cartesian projection
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Compass bearings for walking a disk out to its bounding box
const CARDINAL_BEARINGS: [f64; 4] = [0.0, 90.0, 180.0, 270.0];

/// Geodesic distance in meters between two longitude/latitude points
pub fn distance_meters(a: [f64; 2], b: [f64; 2]) -> f64 {
    Geodesic.distance(Point::new(a[0], a[1]), Point::new(b[0], b[1]))
}

/// The point reached by traveling `meters` from `origin` at the given
/// compass bearing in degrees
pub fn destination(origin: [f64; 2], bearing_deg: f64, meters: f64) -> [f64; 2] {
    let p = Geodesic.destination(Point::new(origin[0], origin[1]), bearing_deg, meters);
    [p.x(), p.y()]
}

/// Geographic bounding box of the disk of radius `meters` around `origin`
///
/// Walks the four cardinal bearings and spans the results. Good for the
/// radii used here; not meaningful across the poles or the antimeridian.
pub fn bbox_around(origin: [f64; 2], meters: f64) -> Rect {
    let corners: Vec<[f64; 2]> = CARDINAL_BEARINGS
        .iter()
        .map(|&bearing| destination(origin, bearing, meters))
        .collect();
    let xs = corners.iter().map(|c| c[0]);
    let ys = corners.iter().map(|c| c[1]);
    Rect::new(
        coord! { x: xs.clone().fold(f64::INFINITY, f64::min), y: ys.clone().fold(f64::INFINITY, f64::min) },
        coord! { x: xs.fold(f64::NEG_INFINITY, f64::max), y: ys.fold(f64::NEG_INFINITY, f64::max) },
    )
}

/// Convert longitude/latitude to Cartesian coordinates on a sphere of
/// Earth's mean radius
///
/// Euclidean distance in this frame is a chord and slightly underestimates
/// the geodesic arc, so range queries built on it must widen their radius
/// and re-check candidates with [`distance_meters`].
pub fn longlat_to_xyz(lonlat: [f64; 2]) -> [f64; 3] {
    let lon = lonlat[0].to_radians();
    let lat = lonlat[1].to_radians();
    [
        EARTH_RADIUS_METERS * lat.cos() * lon.cos(),
        EARTH_RADIUS_METERS * lat.cos() * lon.sin(),
        EARTH_RADIUS_METERS * lat.sin(),
    ]
}

/// Check that a longitude/latitude pair is finite and in range
pub fn check_longlat(lonlat: [f64; 2]) -> std::result::Result<(), String> {
    let [lon, lat] = lonlat;
    if !lon.is_finite() || !lat.is_finite() {
        return Err(format!("non-finite coordinates ({lon}, {lat})"));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(format!("longitude {lon} outside [-180, 180]"));
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(format!("latitude {lat} outside [-90, 90]"));
    }
    Ok(())
}
