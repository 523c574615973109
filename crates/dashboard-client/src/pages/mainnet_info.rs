//! Mainnet info page: block height card and algorithm table.

use dashboard_core::{AlgorithmInfo, MainnetInfoTopic};
use yew::prelude::*;

use crate::components::StreamStatus;
use crate::hooks::use_data_page;

/// Adoption as a percentage with two decimals, or a dash.
pub fn format_adoption(adoption: Option<f64>) -> String {
    adoption.map_or_else(|| "-".to_string(), |value| format!("{:.2}%", value * 100.0))
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |value| value.to_string())
}

fn algorithm_row(algorithm: &AlgorithmInfo) -> Html {
    html! {
        <tr key={algorithm.id.clone()}>
            <td>{ &algorithm.name }</td>
            <td>{ &algorithm.challenge_id }</td>
            <td class="mono">{ &algorithm.player_id }</td>
            <td>{ optional(algorithm.round_pushed) }</td>
            <td>{ format_adoption(algorithm.adoption) }</td>
            <td>{ optional(algorithm.merge_points) }</td>
        </tr>
    }
}

#[function_component(MainnetInfoPage)]
pub fn mainnet_info_page() -> Html {
    let view = use_data_page::<MainnetInfoTopic>();

    html! {
        <section class="page mainnet-info-page">
            <h1>{ "Mainnet" }</h1>
            <StreamStatus error={view.last_error.clone()} completed={view.completed} />
            { match view.state.value() {
                None => html! { <p class="loading">{ "Loading…" }</p> },
                Some(info) => html! {
                    <>
                        <div class="card">
                            <div class="card-title">{ "Block height" }</div>
                            <div class="card-value">{ info.block_height }</div>
                        </div>
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>{ "Algorithm" }</th>
                                    <th>{ "Challenge" }</th>
                                    <th>{ "Player" }</th>
                                    <th>{ "Round pushed" }</th>
                                    <th>{ "Adoption" }</th>
                                    <th>{ "Merge points" }</th>
                                </tr>
                            </thead>
                            <tbody>
                                { if info.algorithms.is_empty() {
                                    html! { <tr><td colspan="6" class="empty">{ "No algorithms" }</td></tr> }
                                } else {
                                    html! { <>{ for info.algorithms.iter().map(algorithm_row) }</> }
                                }}
                            </tbody>
                        </table>
                    </>
                },
            }}
        </section>
    }
}
