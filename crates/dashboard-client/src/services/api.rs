//! The data service handed to pages through context.

use dashboard_core::{ServiceConfig, TigApiService};

use super::{HttpTransport, WasmSpawner};

pub type ApiService = TigApiService<HttpTransport, WasmSpawner>;

/// Context value wrapping the shared [`ApiService`].
///
/// Two handles are equal when they share the same service, so pages only
/// re-subscribe when the service is rebuilt.
#[derive(Clone)]
pub struct ApiHandle {
    service: ApiService,
}

impl ApiHandle {
    pub fn new(config: &ServiceConfig) -> Self {
        tracing::info!(api = %config.api_base_url, "building api service");
        Self {
            service: ApiService::new(HttpTransport::new(config.clone()), WasmSpawner),
        }
    }

    pub fn service(&self) -> &ApiService {
        &self.service
    }
}

impl PartialEq for ApiHandle {
    fn eq(&self, other: &Self) -> bool {
        self.service.same_service(&other.service)
    }
}
