//! Banner for stream errors and completion.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StreamStatusProps {
    #[prop_or_default]
    pub error: Option<String>,
    #[prop_or_default]
    pub completed: bool,
}

#[function_component(StreamStatus)]
pub fn stream_status(props: &StreamStatusProps) -> Html {
    html! {
        <>
            { if let Some(error) = &props.error {
                html! { <div class="stream-status error">{ format!("Update failed: {error}") }</div> }
            } else {
                html! {}
            }}
            { if props.completed {
                html! { <div class="stream-status closed">{ "No further updates" }</div> }
            } else {
                html! {}
            }}
        </>
    }
}
