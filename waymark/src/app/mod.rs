//! Demo application bootstrap and lifecycle.
//!
//! This module provides [`WaymarkApp`], which owns the wiring between the
//! simulated location provider, the location session, the headless map,
//! and the map controller:
//!
//! ```text
//! SimulatedLocationProvider ──events──► LocationSession::run_events
//!            ▲                                (log only)
//!            │ imperative calls
//!      LocationSession ◄───── MapController ─────► HeadlessMap
//! ```
//!
//! # Example
//!
//! ```ignore
//! use waymark::app::{AppConfig, WaymarkApp};
//!
//! let app = WaymarkApp::start(AppConfig::default())?;
//! app.run_demo_route().await;
//! app.shutdown().await;
//! ```

mod bootstrap;
mod config;
mod error;

pub use bootstrap::WaymarkApp;
pub use config::{AppConfig, RouteConfig, DEFAULT_DEMO_ADDRESS};
pub use error::AppError;
