//! Location provider capability types
//!
//! Defines the [`LocationProvider`] trait that stands in for the platform
//! location service, the event enum it delivers, and the value types shared
//! by implementations.

use std::fmt;
use std::future::Future;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::coord::{distance_meters, Coordinate};

/// Authorization scope an application can request from the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationLevel {
    /// Location access at any time, including in the background.
    Always,
    /// Location access only while the application is in use.
    WhenInUse,
}

/// Authorization state as reported by the platform.
///
/// The application only observes this value; transitions are driven by the
/// platform service and the user's OS-level choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationStatus {
    /// The user has not yet made a choice.
    NotDetermined,
    /// Location access is blocked by device policy.
    Restricted,
    /// The user explicitly denied access.
    Denied,
    /// Access granted while the application is in use.
    AuthorizedWhenInUse,
    /// Access granted at any time.
    AuthorizedAlways,
    /// A status value this crate does not recognize.
    Unknown,
}

/// A circular region monitored for boundary crossings.
#[derive(Debug, Clone, PartialEq)]
pub struct GeofenceRegion {
    /// Identifier reported back in entry/exit events.
    pub identifier: String,
    /// Center of the circle.
    pub center: Coordinate,
    /// Radius in meters.
    pub radius_meters: f64,
    /// Deliver an event when the device enters the region.
    pub notify_on_entry: bool,
    /// Deliver an event when the device leaves the region.
    pub notify_on_exit: bool,
}

impl GeofenceRegion {
    /// Whether a coordinate falls within the region.
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        distance_meters(self.center, coordinate) <= self.radius_meters
    }
}

impl fmt::Display for GeofenceRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" centered at {} (radius {:.0}m)",
            self.identifier, self.center, self.radius_meters
        )
    }
}

/// A single position report from the location service.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationFix {
    /// Reported position.
    pub coordinate: Coordinate,
    /// Wall-clock time the fix was produced.
    pub timestamp: DateTime<Utc>,
}

impl LocationFix {
    /// Creates a fix stamped with the current time.
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            timestamp: Utc::now(),
        }
    }
}

impl fmt::Display for LocationFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.coordinate, self.timestamp.to_rfc3339())
    }
}

/// A human-readable place description produced by reverse geocoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Placemark {
    /// Place or street name.
    pub name: String,
    /// City or neighborhood.
    pub locality: String,
    /// Position the description refers to.
    pub coordinate: Coordinate,
}

impl fmt::Display for Placemark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.name, self.locality)
    }
}

/// Errors surfaced by a location provider.
///
/// Both variants are terminal to the operation that raised them: callers
/// log and move on, there is no retry or propagation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// A forward or reverse geocoding request failed.
    #[error("Geocoding failed: {0}")]
    Geocode(String),

    /// The underlying location service reported a failure.
    #[error("Location service failure: {0}")]
    Service(String),
}

/// Events delivered asynchronously by a location provider.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationEvent {
    /// One or more new position fixes.
    LocationsUpdated(Vec<LocationFix>),
    /// The service failed; the payload describes why.
    Failed(ProviderError),
    /// The authorization status changed.
    AuthorizationChanged(AuthorizationStatus),
    /// The device entered a monitored region.
    EnteredRegion(GeofenceRegion),
    /// The device left a monitored region.
    ExitedRegion(GeofenceRegion),
}

/// Capability trait for the platform location service.
///
/// Implementations deliver [`LocationEvent`]s over the channel supplied at
/// construction. Geocoding methods are asynchronous requests against an
/// external service; no cancellation token is threaded through, so callers
/// needing cancellation must wrap these futures themselves.
pub trait LocationProvider: Send + Sync {
    /// Asks the user for location authorization at the given level.
    ///
    /// Redundant requests are deduplicated by the provider; the outcome is
    /// reported asynchronously via
    /// [`LocationEvent::AuthorizationChanged`].
    fn request_authorization(&self, level: AuthorizationLevel);

    /// Whether low-power significant-change tracking is available.
    fn is_significant_change_tracking_available(&self) -> bool;

    /// Starts significant-change tracking.
    fn start_significant_change_tracking(&self);

    /// Begins monitoring a geofence region for the process lifetime.
    fn start_monitoring_region(&self, region: GeofenceRegion);

    /// Resolves a coordinate to place descriptions, best match first.
    fn reverse_geocode(
        &self,
        coordinate: Coordinate,
    ) -> impl Future<Output = Result<Vec<Placemark>, ProviderError>> + Send;

    /// Resolves a free-text address to coordinates, best match first.
    fn forward_geocode(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<Vec<Coordinate>, ProviderError>> + Send;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use parking_lot::Mutex;

    /// Mock location provider for testing.
    ///
    /// Records every call made against it and replays configured geocode
    /// results.
    pub struct MockLocationProvider {
        pub tracking_available: bool,
        pub authorization_requests: Mutex<Vec<AuthorizationLevel>>,
        pub tracking_starts: Mutex<usize>,
        pub monitored_regions: Mutex<Vec<GeofenceRegion>>,
        pub reverse_requests: Mutex<Vec<Coordinate>>,
        pub forward_requests: Mutex<Vec<String>>,
        pub reverse_result: Mutex<Result<Vec<Placemark>, ProviderError>>,
        pub forward_result: Mutex<Result<Vec<Coordinate>, ProviderError>>,
    }

    impl MockLocationProvider {
        pub fn new() -> Self {
            Self {
                tracking_available: true,
                authorization_requests: Mutex::new(Vec::new()),
                tracking_starts: Mutex::new(0),
                monitored_regions: Mutex::new(Vec::new()),
                reverse_requests: Mutex::new(Vec::new()),
                forward_requests: Mutex::new(Vec::new()),
                reverse_result: Mutex::new(Ok(Vec::new())),
                forward_result: Mutex::new(Ok(Vec::new())),
            }
        }

        pub fn without_tracking(mut self) -> Self {
            self.tracking_available = false;
            self
        }
    }

    impl LocationProvider for MockLocationProvider {
        fn request_authorization(&self, level: AuthorizationLevel) {
            self.authorization_requests.lock().push(level);
        }

        fn is_significant_change_tracking_available(&self) -> bool {
            self.tracking_available
        }

        fn start_significant_change_tracking(&self) {
            *self.tracking_starts.lock() += 1;
        }

        fn start_monitoring_region(&self, region: GeofenceRegion) {
            self.monitored_regions.lock().push(region);
        }

        async fn reverse_geocode(
            &self,
            coordinate: Coordinate,
        ) -> Result<Vec<Placemark>, ProviderError> {
            self.reverse_requests.lock().push(coordinate);
            self.reverse_result.lock().clone()
        }

        async fn forward_geocode(&self, address: &str) -> Result<Vec<Coordinate>, ProviderError> {
            self.forward_requests.lock().push(address.to_string());
            self.forward_result.lock().clone()
        }
    }

    #[test]
    fn test_region_contains_center() {
        let region = GeofenceRegion {
            identifier: "test".to_string(),
            center: Coordinate {
                latitude: 40.7851,
                longitude: -73.9683,
            },
            radius_meters: 500.0,
            notify_on_entry: true,
            notify_on_exit: false,
        };
        assert!(region.contains(region.center));
    }

    #[test]
    fn test_region_excludes_distant_coordinate() {
        let region = GeofenceRegion {
            identifier: "test".to_string(),
            center: Coordinate {
                latitude: 40.7851,
                longitude: -73.9683,
            },
            radius_meters: 500.0,
            notify_on_entry: true,
            notify_on_exit: false,
        };
        let miami = Coordinate {
            latitude: 25.7617,
            longitude: -80.1918,
        };
        assert!(!region.contains(miami));
    }

    #[tokio::test]
    async fn test_mock_records_geocode_requests() {
        let mock = MockLocationProvider::new();
        let coordinate = Coordinate {
            latitude: 40.6712,
            longitude: -73.9636,
        };

        let result = mock.reverse_geocode(coordinate).await;
        assert!(result.is_ok());
        assert_eq!(mock.reverse_requests.lock().as_slice(), &[coordinate]);

        let result = mock.forward_geocode("miami").await;
        assert!(result.is_ok());
        assert_eq!(mock.forward_requests.lock().as_slice(), &["miami"]);
    }
}
