//! Simulated location provider
//!
//! A deterministic stand-in for the platform location service, used by the
//! demo binary and by integration-style tests. Authorization is granted as
//! soon as it is requested, geocoding is served from a small built-in
//! gazetteer, and position fixes are pushed explicitly via
//! [`SimulatedLocationProvider::advance_to`], which also evaluates geofence
//! boundary crossings.

use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedSender;

use crate::coord::{distance_meters, Coordinate};
use crate::provider::{
    AuthorizationLevel, AuthorizationStatus, GeofenceRegion, LocationEvent, LocationFix,
    LocationProvider, Placemark, ProviderError,
};

/// Maximum distance between a queried coordinate and a gazetteer entry for
/// reverse geocoding to consider it a match.
const REVERSE_MATCH_RADIUS_M: f64 = 50_000.0;

/// One named place the simulated geocoder knows about.
struct GazetteerEntry {
    name: &'static str,
    locality: &'static str,
    latitude: f64,
    longitude: f64,
}

/// The built-in gazetteer backing both geocoding directions.
const GAZETTEER: &[GazetteerEntry] = &[
    GazetteerEntry {
        name: "miami",
        locality: "Miami, FL",
        latitude: 25.7617,
        longitude: -80.1918,
    },
    GazetteerEntry {
        name: "pursuit",
        locality: "Long Island City, NY",
        latitude: 40.7430,
        longitude: -73.9419,
    },
    GazetteerEntry {
        name: "brooklyn museum",
        locality: "Brooklyn, NY",
        latitude: 40.6712,
        longitude: -73.9636,
    },
    GazetteerEntry {
        name: "central park",
        locality: "New York, NY",
        latitude: 40.7851,
        longitude: -73.9683,
    },
];

impl GazetteerEntry {
    fn coordinate(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    fn placemark(&self) -> Placemark {
        Placemark {
            name: self.name.to_string(),
            locality: self.locality.to_string(),
            coordinate: self.coordinate(),
        }
    }
}

/// Mutable provider state behind one lock.
struct SimState {
    authorization: AuthorizationStatus,
    tracking: bool,
    regions: Vec<MonitoredRegion>,
}

/// A monitored region plus whether the last known position was inside it.
struct MonitoredRegion {
    region: GeofenceRegion,
    inside: bool,
}

/// Deterministic in-process location provider.
pub struct SimulatedLocationProvider {
    events: UnboundedSender<LocationEvent>,
    tracking_available: bool,
    state: Mutex<SimState>,
}

impl SimulatedLocationProvider {
    /// Creates a provider that delivers events over `events`.
    pub fn new(events: UnboundedSender<LocationEvent>) -> Self {
        Self {
            events,
            tracking_available: true,
            state: Mutex::new(SimState {
                authorization: AuthorizationStatus::NotDetermined,
                tracking: false,
                regions: Vec::new(),
            }),
        }
    }

    /// Configures whether significant-change tracking reports as available.
    pub fn with_tracking_available(mut self, available: bool) -> Self {
        self.tracking_available = available;
        self
    }

    /// Moves the simulated device to `coordinate`.
    ///
    /// Emits a [`LocationEvent::LocationsUpdated`] fix when tracking is
    /// active, then evaluates every monitored region and emits entry/exit
    /// events for boundary crossings, honoring each region's notify flags.
    pub fn advance_to(&self, coordinate: Coordinate) {
        let mut state = self.state.lock();

        if state.tracking {
            self.emit(LocationEvent::LocationsUpdated(vec![LocationFix::new(
                coordinate,
            )]));
        }

        for monitored in &mut state.regions {
            let now_inside = monitored.region.contains(coordinate);
            if now_inside && !monitored.inside && monitored.region.notify_on_entry {
                self.emit(LocationEvent::EnteredRegion(monitored.region.clone()));
            }
            if !now_inside && monitored.inside && monitored.region.notify_on_exit {
                self.emit(LocationEvent::ExitedRegion(monitored.region.clone()));
            }
            monitored.inside = now_inside;
        }
    }

    /// Injects a service failure, as the platform would on hardware error.
    pub fn fail(&self, message: &str) {
        self.emit(LocationEvent::Failed(ProviderError::Service(
            message.to_string(),
        )));
    }

    fn emit(&self, event: LocationEvent) {
        // The subscriber may already be gone during teardown.
        let _ = self.events.send(event);
    }
}

impl LocationProvider for SimulatedLocationProvider {
    fn request_authorization(&self, level: AuthorizationLevel) {
        let mut state = self.state.lock();
        // The platform deduplicates redundant requests.
        if state.authorization != AuthorizationStatus::NotDetermined {
            return;
        }
        state.authorization = match level {
            AuthorizationLevel::Always => AuthorizationStatus::AuthorizedAlways,
            AuthorizationLevel::WhenInUse => AuthorizationStatus::AuthorizedWhenInUse,
        };
        self.emit(LocationEvent::AuthorizationChanged(state.authorization));
    }

    fn is_significant_change_tracking_available(&self) -> bool {
        self.tracking_available
    }

    fn start_significant_change_tracking(&self) {
        self.state.lock().tracking = true;
    }

    fn start_monitoring_region(&self, region: GeofenceRegion) {
        self.state.lock().regions.push(MonitoredRegion {
            region,
            inside: false,
        });
    }

    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<Vec<Placemark>, ProviderError> {
        let mut matches: Vec<&GazetteerEntry> = GAZETTEER
            .iter()
            .filter(|entry| {
                distance_meters(entry.coordinate(), coordinate) <= REVERSE_MATCH_RADIUS_M
            })
            .collect();
        matches.sort_by(|a, b| {
            let da = distance_meters(a.coordinate(), coordinate);
            let db = distance_meters(b.coordinate(), coordinate);
            da.total_cmp(&db)
        });

        if matches.is_empty() {
            return Err(ProviderError::Geocode(format!(
                "no placemark near {}",
                coordinate
            )));
        }
        Ok(matches.into_iter().map(|entry| entry.placemark()).collect())
    }

    async fn forward_geocode(&self, address: &str) -> Result<Vec<Coordinate>, ProviderError> {
        let needle = address.trim().to_lowercase();
        let matches: Vec<Coordinate> = GAZETTEER
            .iter()
            .filter(|entry| entry.name.contains(&needle))
            .map(|entry| entry.coordinate())
            .collect();

        if matches.is_empty() {
            return Err(ProviderError::Geocode(format!(
                "no matches for \"{}\"",
                address
            )));
        }
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn provider() -> (SimulatedLocationProvider, mpsc::UnboundedReceiver<LocationEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (SimulatedLocationProvider::new(tx), rx)
    }

    fn central_park_region() -> GeofenceRegion {
        GeofenceRegion {
            identifier: "monitoring region".to_string(),
            center: Coordinate {
                latitude: 40.7851,
                longitude: -73.9683,
            },
            radius_meters: 500.0,
            notify_on_entry: true,
            notify_on_exit: false,
        }
    }

    #[test]
    fn test_first_authorization_request_grants_and_notifies() {
        let (provider, mut rx) = provider();
        provider.request_authorization(AuthorizationLevel::Always);

        let event = rx.try_recv().unwrap();
        assert_eq!(
            event,
            LocationEvent::AuthorizationChanged(AuthorizationStatus::AuthorizedAlways)
        );
    }

    #[test]
    fn test_redundant_authorization_requests_are_deduplicated() {
        let (provider, mut rx) = provider();
        provider.request_authorization(AuthorizationLevel::Always);
        provider.request_authorization(AuthorizationLevel::WhenInUse);

        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err(), "Expected exactly one status event");
    }

    #[test]
    fn test_advance_without_tracking_emits_no_fix() {
        let (provider, mut rx) = provider();
        provider.advance_to(Coordinate {
            latitude: 40.7,
            longitude: -74.0,
        });
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_advance_with_tracking_emits_fix() {
        let (provider, mut rx) = provider();
        provider.start_significant_change_tracking();

        let target = Coordinate {
            latitude: 40.7,
            longitude: -74.0,
        };
        provider.advance_to(target);

        match rx.try_recv().unwrap() {
            LocationEvent::LocationsUpdated(fixes) => {
                assert_eq!(fixes.len(), 1);
                assert_eq!(fixes[0].coordinate, target);
            }
            other => panic!("Expected LocationsUpdated, got {:?}", other),
        }
    }

    #[test]
    fn test_geofence_entry_fires_once() {
        let (provider, mut rx) = provider();
        let region = central_park_region();
        let center = region.center;
        provider.start_monitoring_region(region);

        // Approach from outside, then move within the fence twice.
        provider.advance_to(Coordinate {
            latitude: 40.6712,
            longitude: -73.9636,
        });
        provider.advance_to(center);
        provider.advance_to(Coordinate {
            latitude: center.latitude + 0.001,
            longitude: center.longitude,
        });

        match rx.try_recv().unwrap() {
            LocationEvent::EnteredRegion(region) => {
                assert_eq!(region.identifier, "monitoring region");
            }
            other => panic!("Expected EnteredRegion, got {:?}", other),
        }
        assert!(rx.try_recv().is_err(), "Entry should fire exactly once");
    }

    #[test]
    fn test_exit_suppressed_when_notify_on_exit_is_false() {
        let (provider, mut rx) = provider();
        let region = central_park_region();
        let center = region.center;
        provider.start_monitoring_region(region);

        provider.advance_to(center);
        provider.advance_to(Coordinate {
            latitude: 40.6712,
            longitude: -73.9636,
        });

        // Entry event only; the exit crossing is silent.
        assert!(matches!(
            rx.try_recv().unwrap(),
            LocationEvent::EnteredRegion(_)
        ));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_forward_geocode_miami() {
        let (provider, _rx) = provider();
        let result = provider.forward_geocode("miami").await.unwrap();
        assert_eq!(result[0].latitude, 25.7617);
        assert_eq!(result[0].longitude, -80.1918);
    }

    #[tokio::test]
    async fn test_forward_geocode_is_case_insensitive() {
        let (provider, _rx) = provider();
        let result = provider.forward_geocode("Central Park").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_forward_geocode_unknown_address_fails() {
        let (provider, _rx) = provider();
        let result = provider.forward_geocode("atlantis").await;
        match result {
            Err(ProviderError::Geocode(msg)) => assert!(msg.contains("atlantis")),
            _ => panic!("Expected Geocode error"),
        }
    }

    #[tokio::test]
    async fn test_reverse_geocode_nearest_first() {
        let (provider, _rx) = provider();
        let near_brooklyn_museum = Coordinate {
            latitude: 40.6715,
            longitude: -73.9630,
        };
        let result = provider.reverse_geocode(near_brooklyn_museum).await.unwrap();
        assert_eq!(result[0].name, "brooklyn museum");
    }

    #[tokio::test]
    async fn test_reverse_geocode_remote_coordinate_fails() {
        let (provider, _rx) = provider();
        let middle_of_atlantic = Coordinate {
            latitude: 30.0,
            longitude: -45.0,
        };
        let result = provider.reverse_geocode(middle_of_atlantic).await;
        assert!(result.is_err());
    }
}
