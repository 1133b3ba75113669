//! Demo application configuration.

use std::time::Duration;

/// Default address for the demonstration forward geocode.
pub const DEFAULT_DEMO_ADDRESS: &str = "miami";

/// Default number of waypoints on the simulated route.
pub const DEFAULT_ROUTE_STEPS: usize = 5;

/// Default pause between simulated position fixes.
pub const DEFAULT_STEP_INTERVAL: Duration = Duration::from_millis(500);

/// Top-level configuration for [`WaymarkApp`].
///
/// [`WaymarkApp`]: crate::app::WaymarkApp
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Address passed to the demonstration forward geocode at startup.
    pub demo_address: String,

    /// Whether the simulated provider reports significant-change tracking
    /// as available.
    pub tracking_available: bool,

    /// Simulated route configuration.
    pub route: RouteConfig,
}

/// Shape of the simulated walk toward the monitored geofence.
#[derive(Clone, Debug)]
pub struct RouteConfig {
    /// Number of interpolated waypoints.
    pub steps: usize,

    /// Pause between waypoints.
    pub step_interval: Duration,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            steps: DEFAULT_ROUTE_STEPS,
            step_interval: DEFAULT_STEP_INTERVAL,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            demo_address: DEFAULT_DEMO_ADDRESS.to_string(),
            tracking_available: true,
            route: RouteConfig::default(),
        }
    }
}

impl AppConfig {
    /// Set the demonstration geocode address.
    pub fn with_demo_address(mut self, address: impl Into<String>) -> Self {
        self.demo_address = address.into();
        self
    }

    /// Set significant-change tracking availability.
    pub fn with_tracking_available(mut self, available: bool) -> Self {
        self.tracking_available = available;
        self
    }

    /// Set the number of route waypoints.
    pub fn with_route_steps(mut self, steps: usize) -> Self {
        self.route.steps = steps;
        self
    }

    /// Set the pause between route waypoints.
    pub fn with_step_interval(mut self, interval: Duration) -> Self {
        self.route.step_interval = interval;
        self
    }
}
