//! Application routes.

use dashboard_core::{normalize_path, RouteError, RouteTable, CATCH_ALL};
use yew_router::prelude::*;

/// Application routes.
#[derive(Debug, Clone, Copy, Routable, PartialEq, Eq)]
pub enum Route {
    /// Landing page.
    #[at("/home")]
    Home,
    /// API configuration.
    #[at("/config")]
    Config,
    /// Mainnet block height and algorithms.
    #[at("/network")]
    Network,
    /// Slave monitor.
    #[at("/slaves")]
    Slaves,
}

/// Path-to-page table; unknown paths redirect to the home page.
pub fn route_table() -> Result<RouteTable<Route>, RouteError> {
    RouteTable::builder()
        .page("home", Route::Home)
        .page("config", Route::Config)
        .page("network", Route::Network)
        .page("slaves", Route::Slaves)
        .redirect(CATCH_ALL, "home")
        .build()
}

/// Page selected for a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub route: Route,
    /// The browser location should be rewritten to `route`.
    pub redirected: bool,
}

thread_local! {
    static ROUTES: Result<RouteTable<Route>, RouteError> = route_table();
}

/// Resolve a browser path through the route table.
pub fn resolve(path: &str) -> Result<Resolved, RouteError> {
    ROUTES.with(|table| {
        let table = table.as_ref().map_err(Clone::clone)?;
        let resolution = table.resolve(path)?;
        let route = *resolution.page;
        Ok(Resolved {
            route,
            redirected: resolution.redirected
                || normalize_path(&route.to_path()) != normalize_path(path),
        })
    })
}
