//! Application state for the gateway.

use std::sync::Arc;

use crate::client::{FullApi, KitchenSettings};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Backend every request is forwarded to
    pub api: Arc<dyn FullApi>,
    pub kitchen: KitchenSettings,
}

impl AppState {
    pub fn new(api: Arc<dyn FullApi>, kitchen: KitchenSettings) -> Self {
        Self { api, kitchen }
    }
}
