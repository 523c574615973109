//! Main application component.

use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::Layout;
use crate::hooks::{use_service_config, ConfigContext};
use crate::pages::{ConfigPage, HomePage, MainnetInfoPage, SlaveMonitorPage};
use crate::routes::{self, Route};
use crate::services::ApiHandle;

/// Route render function.
fn render(route: Route) -> Html {
    match route {
        Route::Home => html! { <HomePage /> },
        Route::Config => html! { <ConfigPage /> },
        Route::Network => html! { <MainnetInfoPage /> },
        Route::Slaves => html! { <SlaveMonitorPage /> },
    }
}

/// Resolves the current location through the route table and renders the
/// selected page, rewriting the location after a redirect.
#[function_component(RouteOutlet)]
fn route_outlet() -> Html {
    let location = use_location();
    let navigator = use_navigator();
    let path = location
        .map(|location| location.path().to_string())
        .unwrap_or_default();
    let resolved = routes::resolve(&path);

    {
        let target = resolved
            .as_ref()
            .ok()
            .filter(|resolved| resolved.redirected)
            .map(|resolved| resolved.route);
        use_effect_with(target, move |target| {
            if let (Some(route), Some(navigator)) = (target, navigator) {
                tracing::debug!(to = %route.to_path(), "redirecting");
                navigator.replace(route);
            }
        });
    }

    match resolved {
        Ok(resolved) => render(resolved.route),
        Err(e) => {
            tracing::error!("route table is invalid: {e}");
            html! {
                <section class="page error-page">
                    <h1>{ "Routing error" }</h1>
                    <p>{ e.to_string() }</p>
                </section>
            }
        }
    }
}

/// Root application component with router, config and API service.
#[function_component(App)]
pub fn app() -> Html {
    let config = use_service_config();
    let api = use_memo((*config).clone(), ApiHandle::new);

    html! {
        <BrowserRouter>
            <ContextProvider<ConfigContext> context={config.clone()}>
                <ContextProvider<ApiHandle> context={(*api).clone()}>
                    <Layout>
                        <RouteOutlet />
                    </Layout>
                </ContextProvider<ApiHandle>>
            </ContextProvider<ConfigContext>>
        </BrowserRouter>
    }
}
