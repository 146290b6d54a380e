use crate::config::AppConfig;
use crate::models::plant::PlantCatalog;

/// Read-only data shared by every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: PlantCatalog,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(catalog: PlantCatalog, config: AppConfig) -> Self {
        Self { catalog, config }
    }
}
