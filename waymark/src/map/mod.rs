//! Map rendering abstraction
//!
//! Defines the [`MapRenderer`] capability the controller draws against, the
//! annotation value types derived from catalog places, and the
//! [`MapDelegate`] callback interface the renderer invokes. A
//! [`HeadlessMap`] implementation renders to the log for the demo binary.

mod headless;

use std::fmt;
use std::sync::Arc;

use crate::coord::Coordinate;
use crate::place::Place;

pub use headless::HeadlessMap;

/// Reuse identifier shared by all pooled annotation views.
pub const ANNOTATION_REUSE_ID: &str = "locationAnnotation";

/// A labeled point rendered on the map, derived 1:1 from a [`Place`].
#[derive(Debug, Clone, PartialEq)]
pub struct MapAnnotation {
    /// Position of the marker.
    pub coordinate: Coordinate,
    /// Label shown next to the marker.
    pub title: String,
}

impl MapAnnotation {
    /// Builds the annotation for a catalog place.
    pub fn from_place(place: &Place) -> Self {
        Self {
            coordinate: place.coordinate,
            title: place.title.to_string(),
        }
    }
}

impl fmt::Display for MapAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" at {}", self.title, self.coordinate)
    }
}

/// Items the map may request a view for.
///
/// Only point annotations get views; anything else (the live user-location
/// marker, overlays) is rendered by the map itself.
#[derive(Debug, Clone, PartialEq)]
pub enum MapItem {
    /// A point annotation from the catalog.
    Point(MapAnnotation),
    /// The device's own position marker.
    UserLocation(Coordinate),
}

/// A marker-style view displaying one annotation.
///
/// Views are recycled through the renderer's pool, keyed by
/// [`ANNOTATION_REUSE_ID`]; the catalog is small and homogeneous, so no
/// per-place view differentiation exists.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationView {
    /// Pool key for recycling.
    pub reuse_identifier: &'static str,
    /// Annotation currently displayed, if any.
    pub annotation: Option<MapAnnotation>,
    /// Whether tapping the marker shows a callout bubble.
    pub callout_enabled: bool,
}

impl AnnotationView {
    /// Constructs a fresh marker view with the callout enabled.
    pub fn marker(annotation: MapAnnotation) -> Self {
        Self {
            reuse_identifier: ANNOTATION_REUSE_ID,
            annotation: Some(annotation),
            callout_enabled: true,
        }
    }
}

/// Capability trait for the map display.
pub trait MapRenderer: Send + Sync {
    /// Toggles rendering of the device's live position.
    fn set_shows_user_location(&self, shows: bool);

    /// Registers the delegate that supplies views and receives
    /// interaction callbacks.
    ///
    /// Implementations should hold the delegate weakly; the delegate
    /// usually owns the map, and a strong reference back would form a
    /// cycle.
    fn set_rendering_delegate(&self, delegate: Arc<dyn MapDelegate>);

    /// Adds annotations to the display.
    fn add_annotations(&self, annotations: &[MapAnnotation]);

    /// Adjusts the viewport so every annotation is visible.
    fn fit_viewport(&self, annotations: &[MapAnnotation], animated: bool);

    /// Takes a view out of the recycling pool, if one matches.
    fn dequeue_reusable_view(&self, reuse_identifier: &str) -> Option<AnnotationView>;

    /// Returns a view to the recycling pool.
    fn recycle_view(&self, view: AnnotationView);
}

/// Rendering delegate callbacks, invoked by the map.
pub trait MapDelegate: Send + Sync {
    /// The user selected an annotation view.
    fn annotation_selected(&self, view: &AnnotationView);

    /// The user tapped the accessory control in a callout bubble.
    fn callout_accessory_tapped(&self, view: &AnnotationView);

    /// Supplies the view for an item, or `None` if the map should render
    /// it itself.
    fn view_for_annotation(&self, item: &MapItem) -> Option<AnnotationView>;
}
