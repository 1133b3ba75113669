//! Waymark - location session and map annotation demo
//!
//! This library binds a location service capability to a map display: it
//! requests authorization, starts significant-change tracking, monitors a
//! single fixed geofence, converts between place names and coordinates,
//! and renders a handful of fixed points of interest as map annotations.
//!
//! The platform services are modeled as capability traits
//! ([`provider::LocationProvider`] and [`map::MapRenderer`]) so the same
//! session logic runs against a real backend, the bundled simulator, or
//! test mocks.

pub mod app;
pub mod controller;
pub mod coord;
pub mod map;
pub mod place;
pub mod provider;
pub mod session;
