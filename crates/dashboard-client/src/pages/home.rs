//! Home page.

use yew::prelude::*;
use yew_router::prelude::*;

use crate::routes::Route;

#[function_component(HomePage)]
pub fn home_page() -> Html {
    html! {
        <section class="page home-page">
            <h1>{ "TIG Benchmarker" }</h1>
            <ul class="home-links">
                <li><Link<Route> to={Route::Network}>{ "Mainnet info" }</Link<Route>></li>
                <li><Link<Route> to={Route::Slaves}>{ "Slave monitor" }</Link<Route>></li>
                <li><Link<Route> to={Route::Config}>{ "Configuration" }</Link<Route>></li>
            </ul>
        </section>
    }
}
