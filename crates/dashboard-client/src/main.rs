//! TIG Benchmarker Dashboard Client
//!
//! Yew WASM frontend. Build with `trunk build` or
//! `cargo check -p dashboard-client --target wasm32-unknown-unknown`.

mod app;
mod components;
mod hooks;
mod pages;
mod routes;
mod services;

use app::App;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer};
use tracing_web::MakeWebConsoleWriter;

fn main() {
    console_error_panic_hook::set_once();

    let config = hooks::load_service_config();
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(dashboard_core::config::DEFAULT_LOG_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new())
        .with_filter(filter);

    tracing_subscriber::registry().with(fmt_layer).init();

    tracing::info!(api = %config.api_base_url, "starting dashboard");

    yew::Renderer::<App>::new().render();
}
