//! Headless map renderer
//!
//! Stands in for a real map display: every operation is rendered to the
//! log, annotations are retained for inspection, and a simple
//! last-in-first-out pool backs view recycling. Used by the demo binary
//! and by integration-style tests that need a full renderer rather than a
//! call recorder.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::map::{AnnotationView, MapAnnotation, MapDelegate, MapItem, MapRenderer};

/// Log-backed map renderer with a view recycling pool.
///
/// The delegate is held weakly, the way map frameworks hold theirs: the
/// controller owns the map, so a strong reference back would form a cycle
/// and keep both alive past teardown.
pub struct HeadlessMap {
    shows_user_location: Mutex<bool>,
    delegate: Mutex<Option<Weak<dyn MapDelegate>>>,
    annotations: Mutex<Vec<MapAnnotation>>,
    pool: Mutex<Vec<AnnotationView>>,
}

impl HeadlessMap {
    pub fn new() -> Self {
        Self {
            shows_user_location: Mutex::new(false),
            delegate: Mutex::new(None),
            annotations: Mutex::new(Vec::new()),
            pool: Mutex::new(Vec::new()),
        }
    }

    /// Annotations currently on the map, in insertion order.
    pub fn annotations(&self) -> Vec<MapAnnotation> {
        self.annotations.lock().clone()
    }

    /// Whether the live user position is being rendered.
    pub fn shows_user_location(&self) -> bool {
        *self.shows_user_location.lock()
    }

    /// Simulates the user tapping the annotation at `index`.
    ///
    /// Asks the delegate for a view (exercising the pooling contract),
    /// reports the selection, and recycles the view afterwards the way a
    /// real map reclaims off-screen views.
    pub fn select_annotation(&self, index: usize) {
        let annotation = match self.annotations.lock().get(index) {
            Some(annotation) => annotation.clone(),
            None => return,
        };
        let delegate = match self.delegate.lock().as_ref().and_then(Weak::upgrade) {
            Some(delegate) => delegate,
            None => return,
        };

        if let Some(view) = delegate.view_for_annotation(&MapItem::Point(annotation)) {
            delegate.annotation_selected(&view);
            self.recycle_view(view);
        }
    }
}

impl Default for HeadlessMap {
    fn default() -> Self {
        Self::new()
    }
}

impl MapRenderer for HeadlessMap {
    fn set_shows_user_location(&self, shows: bool) {
        *self.shows_user_location.lock() = shows;
        debug!(shows, "User location rendering toggled");
    }

    fn set_rendering_delegate(&self, delegate: Arc<dyn MapDelegate>) {
        *self.delegate.lock() = Some(Arc::downgrade(&delegate));
    }

    fn add_annotations(&self, annotations: &[MapAnnotation]) {
        for annotation in annotations {
            info!("Map annotation added: {}", annotation);
        }
        self.annotations.lock().extend_from_slice(annotations);
    }

    fn fit_viewport(&self, annotations: &[MapAnnotation], animated: bool) {
        info!(
            count = annotations.len(),
            animated, "Viewport adjusted to show annotations"
        );
    }

    fn dequeue_reusable_view(&self, reuse_identifier: &str) -> Option<AnnotationView> {
        let mut pool = self.pool.lock();
        let index = pool
            .iter()
            .position(|view| view.reuse_identifier == reuse_identifier)?;
        Some(pool.remove(index))
    }

    fn recycle_view(&self, view: AnnotationView) {
        self.pool.lock().push(view);
    }
}
