//! Application state shared by the HTTP handlers

use std::sync::Arc;

use crate::infrastructure::catalog::CatalogServices;

#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogServices>,
}

impl AppState {
    pub fn new(catalog: CatalogServices) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}
