use crate::bundle::ModelBundle;
use crate::registry::RequestRegistry;

/// Shared by every worker through `web::Data`.
pub struct AppState {
    pub bundle: ModelBundle,
    pub registry: RequestRegistry,
    pub city: String,
}

impl AppState {
    pub fn new(bundle: ModelBundle, city: impl Into<String>) -> Self {
        Self {
            bundle,
            registry: RequestRegistry::new(),
            city: city.into(),
        }
    }
}
