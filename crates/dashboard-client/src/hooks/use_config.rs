//! Hook for loading and persisting the service configuration.

use dashboard_core::ServiceConfig;
use gloo::storage::{LocalStorage, Storage};
use yew::prelude::*;

const CONFIG_SERVICE_KEY: &str = "$tig-dashboard$/config/service";

/// Context type carrying the editable configuration.
pub type ConfigContext = UseStateHandle<ServiceConfig>;

/// Read the stored configuration, falling back to defaults.
pub fn load_service_config() -> ServiceConfig {
    match LocalStorage::get::<ServiceConfig>(CONFIG_SERVICE_KEY) {
        Ok(config) => config.validate().unwrap_or_else(|e| {
            tracing::warn!("ignoring stored config: {e}");
            ServiceConfig::default()
        }),
        Err(_) => ServiceConfig::default(),
    }
}

/// Configuration state that writes itself back to local storage.
#[hook]
pub fn use_service_config() -> ConfigContext {
    let config = use_state(load_service_config);
    {
        use_effect_with((*config).clone(), move |config| {
            if let Err(e) = LocalStorage::set(CONFIG_SERVICE_KEY, config) {
                tracing::warn!("failed to persist config: {e}");
            }
            || ()
        });
    }
    config
}
