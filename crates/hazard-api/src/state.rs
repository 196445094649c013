use std::sync::{Arc, Mutex};

use hazard_core::{HazardError, ServiceConfig, SnapshotStore, TriggerProvider};

/// Shared handler state.
///
/// Readers only touch the store. The trigger provider sits behind its own
/// mutex so overlapping update requests run one after another.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SnapshotStore>,
    pub provider: Arc<Mutex<Box<dyn TriggerProvider>>>,
    pub config: Arc<ServiceConfig>,
}

impl AppState {
    pub fn new(
        config: ServiceConfig,
        store: SnapshotStore,
        provider: Box<dyn TriggerProvider>,
    ) -> Self {
        Self {
            store: Arc::new(store),
            provider: Arc::new(Mutex::new(provider)),
            config: Arc::new(config),
        }
    }

    /// Build store and provider from a validated config.
    pub fn from_config(config: ServiceConfig) -> Result<Self, HazardError> {
        let store = config.build_store()?;
        let provider = config.build_trigger_provider();
        Ok(Self::new(config, store, provider))
    }
}
