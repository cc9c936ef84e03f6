use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use admision::config::RegistryConfig;
use admision::registry::import::load_registry;
use admision::{AppError, InMemoryRegistry};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Build the registry from the configured seed directory. Without one the
/// service starts empty, which keeps local development friction-free.
pub(crate) fn build_registry(config: &RegistryConfig) -> Result<InMemoryRegistry, AppError> {
    match config.data_dir.as_deref() {
        Some(dir) => Ok(load_registry(dir)?),
        None => {
            warn!("APP_DATA_DIR not set; starting with an empty registry");
            Ok(InMemoryRegistry::default())
        }
    }
}
