//! Location session
//!
//! [`LocationSession`] mediates all interaction with the platform location
//! service: it requests authorization, starts significant-change tracking
//! when available, monitors a single fixed geofence, and exposes the two
//! geocoding conversions. Provider events are drained by [`run_events`] and
//! only logged; nothing downstream consumes them.
//!
//! # Design
//!
//! - Geocoding conversions are fire-and-forget: they spawn a task, log the
//!   outcome, and return immediately. No cancellation token is threaded
//!   through; callers needing cancellation must wrap the provider calls
//!   themselves.
//! - Log lines are produced by pure `describe_*` / label functions so tests
//!   can assert their content without capturing subscriber output.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, warn};

use crate::coord::Coordinate;
use crate::place::{self, MONITORED_PLACE_INDEX};
use crate::provider::{
    AuthorizationLevel, AuthorizationStatus, GeofenceRegion, LocationEvent, LocationProvider,
    Placemark, ProviderError,
};

/// Identifier of the single region monitored for the process lifetime.
pub const REGION_IDENTIFIER: &str = "monitoring region";

/// Radius of the monitored region in meters.
pub const REGION_RADIUS_METERS: f64 = 500.0;

/// Owns the provider handle and drives the session lifecycle.
pub struct LocationSession<P> {
    provider: Arc<P>,
}

impl<P: LocationProvider + 'static> LocationSession<P> {
    /// Starts a session, running the initialization protocol in order:
    /// request both authorization levels, start significant-change tracking
    /// if available (silently skipped otherwise), and begin monitoring the
    /// fixed geofence region.
    pub fn start(provider: Arc<P>) -> Self {
        provider.request_authorization(AuthorizationLevel::Always);
        provider.request_authorization(AuthorizationLevel::WhenInUse);

        if provider.is_significant_change_tracking_available() {
            provider.start_significant_change_tracking();
        }
        // Unavailable tracking is a documented no-op fallback, not an error.

        provider.start_monitoring_region(monitored_region());

        Self { provider }
    }

    /// Resolves `coordinate` to a place description, fire-and-forget.
    ///
    /// The first resulting placemark (or the error) is logged when the
    /// request completes; nothing is returned to the caller. Concurrent
    /// calls are independent.
    pub fn convert_coordinate_to_placemark(&self, coordinate: Coordinate) {
        let provider = Arc::clone(&self.provider);
        tokio::spawn(async move {
            let result = provider.reverse_geocode(coordinate).await;
            match describe_reverse_geocode(coordinate, &result) {
                Ok(line) => info!("{}", line),
                Err(line) => warn!("{}", line),
            }
        });
    }

    /// Resolves a free-text address to a coordinate, fire-and-forget.
    ///
    /// Same contract as [`convert_coordinate_to_placemark`]: the first
    /// matching coordinate (or the error) is logged on completion.
    ///
    /// [`convert_coordinate_to_placemark`]: Self::convert_coordinate_to_placemark
    pub fn convert_place_name_to_coordinate(&self, address: &str) {
        let provider = Arc::clone(&self.provider);
        let address = address.to_string();
        tokio::spawn(async move {
            let result = provider.forward_geocode(&address).await;
            match describe_forward_geocode(&address, &result) {
                Ok(line) => info!("{}", line),
                Err(line) => warn!("{}", line),
            }
        });
    }
}

/// The geofence region the session monitors: centered on the catalog's
/// monitored place, 500m radius, entry notifications only.
pub fn monitored_region() -> GeofenceRegion {
    let place = &place::catalog()[MONITORED_PLACE_INDEX];
    GeofenceRegion {
        identifier: REGION_IDENTIFIER.to_string(),
        center: place.coordinate,
        radius_meters: REGION_RADIUS_METERS,
        notify_on_entry: true,
        notify_on_exit: false,
    }
}

/// Drains provider events until the channel closes, logging each one.
pub async fn run_events(mut events: UnboundedReceiver<LocationEvent>) {
    while let Some(event) = events.recv().await {
        handle_event(&event);
    }
}

/// Logs a single provider event.
pub fn handle_event(event: &LocationEvent) {
    match event {
        LocationEvent::LocationsUpdated(fixes) => {
            info!("{}", describe_fixes(fixes));
        }
        LocationEvent::Failed(error) => {
            warn!("Location service error: {}", error);
        }
        LocationEvent::AuthorizationChanged(status) => {
            // Unrecognized status values are silently ignored.
            if let Some(label) = authorization_label(*status) {
                info!("Authorization changed: {}", label);
            }
        }
        LocationEvent::EnteredRegion(region) => {
            info!("Entered region {}", region);
        }
        LocationEvent::ExitedRegion(region) => {
            // Unreachable while the monitored region has notify_on_exit
            // disabled; kept for interface completeness.
            info!("Exited region {}", region);
        }
    }
}

/// Human-readable label for a known authorization status.
///
/// Returns `None` for [`AuthorizationStatus::Unknown`], which the handler
/// ignores without logging.
pub fn authorization_label(status: AuthorizationStatus) -> Option<&'static str> {
    match status {
        AuthorizationStatus::NotDetermined => Some("notDetermined"),
        AuthorizationStatus::Restricted => Some("restricted"),
        AuthorizationStatus::Denied => Some("denied"),
        AuthorizationStatus::AuthorizedWhenInUse => Some("authorizedWhenInUse"),
        AuthorizationStatus::AuthorizedAlways => Some("authorizedAlways"),
        AuthorizationStatus::Unknown => None,
    }
}

/// Formats the outcome of a reverse geocode: `Ok` with the log line for a
/// resolved placemark, `Err` with the log line for a failure.
pub fn describe_reverse_geocode(
    coordinate: Coordinate,
    result: &Result<Vec<Placemark>, ProviderError>,
) -> Result<String, String> {
    match result {
        Ok(placemarks) => match placemarks.first() {
            Some(placemark) => Ok(format!("Reverse geocoded {}: {}", coordinate, placemark)),
            None => Err(format!("No placemark found for {}", coordinate)),
        },
        Err(error) => Err(format!(
            "Reverse geocoding failed for {}: {}",
            coordinate, error
        )),
    }
}

/// Formats the outcome of a forward geocode, same convention as
/// [`describe_reverse_geocode`].
pub fn describe_forward_geocode(
    address: &str,
    result: &Result<Vec<Coordinate>, ProviderError>,
) -> Result<String, String> {
    match result {
        Ok(coordinates) => match coordinates.first() {
            Some(coordinate) => Ok(format!("Resolved \"{}\" to {}", address, coordinate)),
            None => Err(format!("No coordinate found for \"{}\"", address)),
        },
        Err(error) => Err(format!("Failed to resolve \"{}\": {}", address, error)),
    }
}

fn describe_fixes(fixes: &[crate::provider::LocationFix]) -> String {
    let positions: Vec<String> = fixes.iter().map(|fix| fix.to_string()).collect();
    format!(
        "Received {} location fix(es): [{}]",
        fixes.len(),
        positions.join(", ")
    )
}
