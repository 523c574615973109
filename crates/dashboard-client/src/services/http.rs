//! HTTP transport backed by `gloo::net`.

use dashboard_core::{ServiceConfig, ServiceError, Transport};
use futures::future::LocalBoxFuture;
use gloo::net::http::Request;

/// Fetches topic payloads with `GET {api_base_url}/{path}`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    config: ServiceConfig,
}

impl HttpTransport {
    pub fn new(config: ServiceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, path: &str) -> LocalBoxFuture<'static, Result<serde_json::Value, ServiceError>> {
        let url = self.config.endpoint(path);

        Box::pin(async move {
            tracing::debug!(%url, "GET");
            let response = Request::get(&url)
                .send()
                .await
                .map_err(|e| ServiceError::Transport(e.to_string()))?;

            if !response.ok() {
                return Err(ServiceError::Status {
                    status: response.status(),
                    url,
                });
            }

            response
                .json::<serde_json::Value>()
                .await
                .map_err(|e| ServiceError::Transport(e.to_string()))
        })
    }
}
