//! Configuration page for the master API address.

use dashboard_core::ServiceConfig;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::ConfigContext;

#[function_component(ConfigPage)]
pub fn config_page() -> Html {
    let config = use_context::<ConfigContext>().expect("ConfigContext not found");
    let draft = use_state(|| config.api_base_url.clone());
    let message = use_state(|| None::<Result<String, String>>);

    let oninput = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            draft.set(input.value());
        })
    };

    let onsubmit = {
        let config = config.clone();
        let draft = draft.clone();
        let message = message.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let candidate = ServiceConfig {
                api_base_url: (*draft).clone(),
                ..(*config).clone()
            };
            match candidate.validate() {
                Ok(valid) => {
                    tracing::info!(api = %valid.api_base_url, "config updated");
                    draft.set(valid.api_base_url.clone());
                    config.set(valid);
                    message.set(Some(Ok("Saved".to_string())));
                }
                Err(err) => message.set(Some(Err(err.to_string()))),
            }
        })
    };

    let onreset = {
        let config = config.clone();
        let draft = draft.clone();
        Callback::from(move |_: MouseEvent| {
            let defaults = ServiceConfig::default();
            draft.set(defaults.api_base_url.clone());
            config.set(defaults);
        })
    };

    html! {
        <section class="page config-page">
            <h1>{ "Configuration" }</h1>
            <form class="config-form" {onsubmit}>
                <label>
                    { "Master API URL" }
                    <input
                        type="text"
                        value={(*draft).clone()}
                        {oninput}
                    />
                </label>
                <button type="submit">{ "Save" }</button>
                <button type="button" onclick={onreset}>{ "Reset" }</button>
            </form>
            { match &*message {
                Some(Ok(text)) => html! { <p class="config-message ok">{ text }</p> },
                Some(Err(text)) => html! { <p class="config-message error">{ text }</p> },
                None => html! {},
            }}
        </section>
    }
}
