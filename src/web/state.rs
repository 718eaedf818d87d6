use std::sync::Arc;

use crate::pipeline::Predictor;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<Predictor>,
}
