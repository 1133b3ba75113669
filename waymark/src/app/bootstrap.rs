//! Demo application bootstrap.
//!
//! Wires the simulated provider, location session, headless map, and
//! controller together in the right order, and drives the simulated walk
//! toward the monitored geofence.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::app::{AppConfig, AppError};
use crate::controller::MapController;
use crate::coord::Coordinate;
use crate::map::HeadlessMap;
use crate::place::{self, MONITORED_PLACE_INDEX};
use crate::provider::SimulatedLocationProvider;
use crate::session::{self, LocationSession};

/// A running demo application.
///
/// Construction order matters: the session starts (and therefore requests
/// authorization and begins monitoring) before the controller touches the
/// map, mirroring the view-ready sequence of the original demo.
pub struct WaymarkApp {
    config: AppConfig,
    provider: Arc<SimulatedLocationProvider>,
    controller: Arc<MapController<SimulatedLocationProvider, HeadlessMap>>,
    map: Arc<HeadlessMap>,
    events: JoinHandle<()>,
}

impl WaymarkApp {
    /// Starts the demo: provider, session, map, controller, event loop.
    pub fn start(config: AppConfig) -> Result<Self, AppError> {
        if config.demo_address.trim().is_empty() {
            return Err(AppError::Config("demo address is empty".to_string()));
        }

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let provider = Arc::new(
            SimulatedLocationProvider::new(events_tx)
                .with_tracking_available(config.tracking_available),
        );

        let session = LocationSession::start(Arc::clone(&provider));
        let map = Arc::new(HeadlessMap::new());
        let controller = Arc::new(MapController::new(session, Arc::clone(&map)));
        Arc::clone(&controller).start(&config.demo_address);

        let events = tokio::spawn(session::run_events(events_rx));

        Ok(Self {
            config,
            provider,
            controller,
            map,
            events,
        })
    }

    /// The simulated location provider, for driving position updates.
    pub fn provider(&self) -> &Arc<SimulatedLocationProvider> {
        &self.provider
    }

    /// The headless map, for inspecting rendered annotations.
    pub fn map(&self) -> &Arc<HeadlessMap> {
        &self.map
    }

    /// Walks the simulated device from the first catalog place into the
    /// monitored geofence, pausing between waypoints, then exercises the
    /// reverse geocode and an annotation selection.
    pub async fn run_demo_route(&self) {
        let start = place::catalog()[0].coordinate;
        let goal = place::catalog()[MONITORED_PLACE_INDEX].coordinate;

        info!("Starting demo route: {} -> {}", start, goal);
        for waypoint in interpolate_route(start, goal, self.config.route.steps) {
            self.provider.advance_to(waypoint);
            tokio::time::sleep(self.config.route.step_interval).await;
        }

        self.controller.lookup_place_description();
        self.map.select_annotation(MONITORED_PLACE_INDEX);
    }

    /// Tears the demo down and waits for the event loop to drain.
    pub async fn shutdown(self) {
        let Self {
            config: _,
            provider,
            controller,
            map,
            events,
        } = self;

        // Dropping every provider handle closes the event channel, which
        // ends the run_events loop.
        drop(controller);
        drop(map);
        drop(provider);
        let _ = events.await;
    }
}

/// Evenly spaced waypoints from `start` to `goal`, endpoint included.
fn interpolate_route(start: Coordinate, goal: Coordinate, steps: usize) -> Vec<Coordinate> {
    let steps = steps.max(1);
    (1..=steps)
        .map(|step| {
            let t = step as f64 / steps as f64;
            Coordinate {
                latitude: start.latitude + (goal.latitude - start.latitude) * t,
                longitude: start.longitude + (goal.longitude - start.longitude) * t,
            }
        })
        .collect()
}
