//! Map controller
//!
//! Composes the location session and the map renderer: on startup it fires
//! one demonstration geocode, configures the map, and places one annotation
//! per catalog entry. It also serves as the map's rendering delegate,
//! supplying pooled marker views and logging interaction callbacks.

use std::sync::Arc;

use tracing::info;

use crate::map::{
    AnnotationView, MapAnnotation, MapDelegate, MapItem, MapRenderer, ANNOTATION_REUSE_ID,
};
use crate::place;
use crate::provider::LocationProvider;
use crate::session::LocationSession;

/// Catalog index reverse-geocoded by [`MapController::lookup_place_description`].
const REVERSE_DEMO_INDEX: usize = 1;

/// Wires the location session to a map display.
pub struct MapController<P, M> {
    session: LocationSession<P>,
    map: Arc<M>,
}

impl<P, M> MapController<P, M>
where
    P: LocationProvider + 'static,
    M: MapRenderer + 'static,
{
    pub fn new(session: LocationSession<P>, map: Arc<M>) -> Self {
        Self { session, map }
    }

    /// Runs the startup sequence: the demonstration forward geocode, map
    /// configuration (live user position + delegate registration), then
    /// annotation loading with an animated viewport fit.
    pub fn start(self: Arc<Self>, demo_address: &str) {
        self.session.convert_place_name_to_coordinate(demo_address);

        self.map.set_shows_user_location(true);
        self.map
            .set_rendering_delegate(Arc::clone(&self) as Arc<dyn MapDelegate>);

        let annotations = make_annotations();
        self.map.add_annotations(&annotations);
        self.map.fit_viewport(&annotations, true);
    }

    /// Demonstration reverse geocode of a fixed catalog entry; the result
    /// is only logged.
    pub fn lookup_place_description(&self) {
        let place = &place::catalog()[REVERSE_DEMO_INDEX];
        self.session
            .convert_coordinate_to_placemark(place.coordinate);
    }
}

/// One annotation per catalog place, in catalog order.
pub fn make_annotations() -> Vec<MapAnnotation> {
    place::catalog().iter().map(MapAnnotation::from_place).collect()
}

impl<P, M> MapDelegate for MapController<P, M>
where
    P: LocationProvider + 'static,
    M: MapRenderer + 'static,
{
    fn annotation_selected(&self, view: &AnnotationView) {
        match &view.annotation {
            Some(annotation) => info!("Annotation selected: {}", annotation),
            None => info!("Annotation selected (empty view)"),
        }
    }

    fn callout_accessory_tapped(&self, view: &AnnotationView) {
        match &view.annotation {
            Some(annotation) => info!("Callout accessory tapped: {}", annotation),
            None => info!("Callout accessory tapped (empty view)"),
        }
    }

    fn view_for_annotation(&self, item: &MapItem) -> Option<AnnotationView> {
        let MapItem::Point(annotation) = item else {
            return None;
        };

        match self.map.dequeue_reusable_view(ANNOTATION_REUSE_ID) {
            Some(mut view) => {
                view.annotation = Some(annotation.clone());
                Some(view)
            }
            None => Some(AnnotationView::marker(annotation.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinate;
    use crate::map::tests::MockMapRenderer;
    use crate::provider::MockLocationProvider;

    fn controller() -> (
        Arc<MapController<MockLocationProvider, MockMapRenderer>>,
        Arc<MockLocationProvider>,
        Arc<MockMapRenderer>,
    ) {
        let provider = Arc::new(MockLocationProvider::new());
        let map = Arc::new(MockMapRenderer::new());
        let session = LocationSession::start(Arc::clone(&provider));
        let controller = Arc::new(MapController::new(session, Arc::clone(&map)));
        (controller, provider, map)
    }

    #[test]
    fn test_make_annotations_mirrors_catalog() {
        let annotations = make_annotations();
        assert_eq!(annotations.len(), 3);
        for (annotation, place) in annotations.iter().zip(place::catalog().iter()) {
            assert_eq!(annotation.title, place.title);
            assert_eq!(annotation.coordinate, place.coordinate);
        }
    }

    #[tokio::test]
    async fn test_start_configures_map_and_loads_annotations() {
        let (controller, _provider, map) = controller();
        Arc::clone(&controller).start("miami");

        assert_eq!(*map.shows_user_location.lock(), Some(true));
        assert!(map.delegate.lock().is_some());
        assert_eq!(map.added.lock().len(), 3);
        assert_eq!(map.fit_calls.lock().as_slice(), &[(3, true)]);
    }

    #[tokio::test]
    async fn test_start_issues_the_demo_forward_geocode() {
        let (controller, provider, _map) = controller();
        Arc::clone(&controller).start("miami");

        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
        assert_eq!(provider.forward_requests.lock().as_slice(), &["miami"]);
    }

    #[tokio::test]
    async fn test_lookup_place_description_uses_catalog_entry_one() {
        let (controller, provider, _map) = controller();
        controller.lookup_place_description();

        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
        let requests = provider.reverse_requests.lock();
        assert_eq!(requests.as_slice(), &[place::catalog()[1].coordinate]);
    }

    #[tokio::test]
    async fn test_view_for_non_point_item_is_none() {
        let (controller, _provider, _map) = controller();
        let item = MapItem::UserLocation(Coordinate {
            latitude: 40.7,
            longitude: -74.0,
        });
        assert!(controller.view_for_annotation(&item).is_none());
    }

    #[tokio::test]
    async fn test_view_for_point_constructs_marker_when_pool_is_empty() {
        let (controller, _provider, _map) = controller();
        let annotation = make_annotations().remove(0);
        let view = controller
            .view_for_annotation(&MapItem::Point(annotation.clone()))
            .unwrap();

        assert!(view.callout_enabled);
        assert_eq!(view.reuse_identifier, ANNOTATION_REUSE_ID);
        assert_eq!(view.annotation, Some(annotation));
    }

    #[tokio::test]
    async fn test_view_for_point_reuses_pooled_view() {
        let (controller, _provider, map) = controller();
        let annotations = make_annotations();

        // Seed the pool with a view that displayed a different annotation.
        map.recycle_view(AnnotationView::marker(annotations[0].clone()));

        let view = controller
            .view_for_annotation(&MapItem::Point(annotations[1].clone()))
            .unwrap();
        assert_eq!(view.annotation, Some(annotations[1].clone()));
        // The pool is now drained.
        assert!(map.dequeue_reusable_view(ANNOTATION_REUSE_ID).is_none());
    }
}
