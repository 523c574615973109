//! Browser-side implementations of the data service seams.

mod api;
mod http;
mod spawner;

pub use api::{ApiHandle, ApiService};
pub use http::HttpTransport;
pub use spawner::WasmSpawner;
