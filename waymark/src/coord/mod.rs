//! Geographic coordinate types
//!
//! Provides the WGS-84 coordinate value used throughout the crate, range
//! validation, and great-circle distance used for geofence containment
//! checks and nearest-placemark lookups.

use std::f64::consts::PI;
use std::fmt;

use thiserror::Error;

/// Minimum valid latitude in degrees.
pub const MIN_LAT: f64 = -90.0;
/// Maximum valid latitude in degrees.
pub const MAX_LAT: f64 = 90.0;
/// Minimum valid longitude in degrees.
pub const MIN_LON: f64 = -180.0;
/// Maximum valid longitude in degrees.
pub const MAX_LON: f64 = 180.0;

/// Mean earth radius in meters, used by the haversine distance.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Errors from constructing a coordinate with out-of-range components.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// Latitude outside -90.0..=90.0 degrees.
    #[error("Invalid latitude: {0} (must be {MIN_LAT}..={MAX_LAT})")]
    InvalidLatitude(f64),

    /// Longitude outside -180.0..=180.0 degrees.
    #[error("Invalid longitude: {0} (must be {MIN_LON}..={MAX_LON})")]
    InvalidLongitude(f64),
}

/// A WGS-84 geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in degrees (positive north).
    pub latitude: f64,
    /// Longitude in degrees (positive east).
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate, validating both components.
    ///
    /// # Arguments
    ///
    /// * `latitude` - Latitude in degrees (-90.0 to 90.0)
    /// * `longitude` - Longitude in degrees (-180.0 to 180.0)
    ///
    /// # Returns
    ///
    /// A `Result` containing the coordinate or an error if either component
    /// is out of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordError> {
        if !(MIN_LAT..=MAX_LAT).contains(&latitude) {
            return Err(CoordError::InvalidLatitude(latitude));
        }
        if !(MIN_LON..=MAX_LON).contains(&longitude) {
            return Err(CoordError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

/// Great-circle distance between two coordinates in meters.
///
/// Uses the haversine formula on a spherical earth, which is accurate to
/// well under 0.5% — more than enough for a 500m geofence radius.
#[inline]
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.latitude * PI / 180.0;
    let lat_b = b.latitude * PI / 180.0;
    let d_lat = (b.latitude - a.latitude) * PI / 180.0;
    let d_lon = (b.longitude - a.longitude) * PI / 180.0;

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}
