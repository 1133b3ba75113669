//! Location provider abstraction
//!
//! This module defines the capability boundary between the application and
//! the platform location service: the [`LocationProvider`] trait, the
//! [`LocationEvent`]s a provider delivers, and a deterministic
//! [`SimulatedLocationProvider`] used by the demo binary and tests.
//!
//! Events are delivered over a `tokio::sync::mpsc` unbounded channel whose
//! sender is handed to the provider at construction; the receiving half is
//! drained by the session's event loop.

mod sim;
mod types;

pub use sim::SimulatedLocationProvider;
pub use types::{
    AuthorizationLevel, AuthorizationStatus, GeofenceRegion, LocationEvent, LocationFix,
    LocationProvider, Placemark, ProviderError,
};

#[cfg(test)]
pub use types::tests::MockLocationProvider;
