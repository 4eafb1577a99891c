//! Application state for the web layer.

use std::sync::Arc;

use crate::geo::GeoResolver;
use crate::store::FoodStore;

/// Shared application state.
///
/// Generic over the store so the router can be driven by an in-memory
/// store in tests.
pub struct AppState<S> {
    /// Submissions and station reference data
    pub store: Arc<S>,

    /// Map link resolution and nearest-station lookup
    pub geo: Arc<GeoResolver>,
}

impl<S: FoodStore> AppState<S> {
    /// Create a new app state.
    pub fn new(store: S, geo: GeoResolver) -> Self {
        Self {
            store: Arc::new(store),
            geo: Arc::new(geo),
        }
    }
}

// Derived Clone would require `S: Clone`.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            geo: Arc::clone(&self.geo),
        }
    }
}
