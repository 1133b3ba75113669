//! Points of interest catalog
//!
//! A fixed, ordered list of three demo places. The catalog is frozen
//! configuration data: it is constructed at compile time, never mutated,
//! and every call to [`catalog`] returns the same entries in the same
//! order.

use crate::coord::Coordinate;

/// Index of the catalog entry whose coordinate seeds the monitored
/// geofence region.
pub const MONITORED_PLACE_INDEX: usize = 2;

/// A named point of interest rendered on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Place {
    /// Display name.
    pub title: &'static str,
    /// Free-text description.
    pub body: &'static str,
    /// WGS-84 position.
    pub coordinate: Coordinate,
    /// Opaque reference to a bundled image asset.
    pub image_name: &'static str,
}

const CATALOG: [Place; 3] = [
    Place {
        title: "Pursuit",
        body: "Tuition-free software engineering fellowship in Long Island City.",
        coordinate: Coordinate {
            latitude: 40.7430,
            longitude: -73.9419,
        },
        image_name: "pursuit",
    },
    Place {
        title: "Brooklyn Museum",
        body: "Art museum on Eastern Parkway, home to around 500,000 objects.",
        coordinate: Coordinate {
            latitude: 40.6712,
            longitude: -73.9636,
        },
        image_name: "brooklyn-museum",
    },
    Place {
        title: "Central Park",
        body: "843 acres of meadows, woods, and water in the middle of Manhattan.",
        coordinate: Coordinate {
            latitude: 40.7851,
            longitude: -73.9683,
        },
        image_name: "central-park",
    },
];

/// Returns the fixed catalog of places.
///
/// Pure and deterministic: the same three entries in the same order on
/// every call.
pub fn catalog() -> &'static [Place; 3] {
    &CATALOG
}
