use std::sync::Arc;

use crate::{catalog::CatalogSource, config::CheckoutTimings, session::SessionRegistry};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogSource>,
    pub sessions: SessionRegistry,
    pub timings: CheckoutTimings,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogSource>, timings: CheckoutTimings) -> Self {
        Self {
            catalog,
            sessions: SessionRegistry::new(),
            timings,
        }
    }
}
