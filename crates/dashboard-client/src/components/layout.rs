//! Page frame with the navigation bar.

use yew::prelude::*;
use yew_router::prelude::*;

use crate::routes::Route;

/// Props for the Layout component.
#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    /// Child content to render.
    pub children: Html,
}

const NAV_ITEMS: [(Route, &str); 4] = [
    (Route::Home, "Home"),
    (Route::Network, "Mainnet"),
    (Route::Slaves, "Slaves"),
    (Route::Config, "Config"),
];

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    let current = use_route::<Route>();

    html! {
        <div class="app-layout">
            <nav class="app-nav">
                { for NAV_ITEMS.iter().map(|(route, label)| {
                    let active = current == Some(*route);
                    html! {
                        <Link<Route> to={*route} classes={classes!("nav-link", active.then_some("active"))}>
                            { *label }
                        </Link<Route>>
                    }
                })}
            </nav>

            <main class="app-main">
                { props.children.clone() }
            </main>
        </div>
    }
}
