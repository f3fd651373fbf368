//! Application state.

use std::sync::Arc;

use crate::engine::Engine;

/// Shared across handlers. Holds no per-request data.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<dyn Engine>,
}

impl AppState {
    pub fn new(engine: Arc<dyn Engine>) -> Self {
        Self { engine }
    }
}
