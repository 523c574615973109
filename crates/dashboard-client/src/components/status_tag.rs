use dashboard_core::SlaveStatus;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatusTagProps {
    pub status: SlaveStatus,
}

/// CSS severity class for a slave status.
pub fn severity(status: SlaveStatus) -> &'static str {
    match status {
        SlaveStatus::Online => "success",
        SlaveStatus::Busy => "warning",
        SlaveStatus::Offline => "danger",
    }
}

/// Colored tag showing a slave's status.
#[function_component(StatusTag)]
pub fn status_tag(props: &StatusTagProps) -> Html {
    html! {
        <span class={classes!("tag", severity(props.status))}>
            { props.status.label() }
        </span>
    }
}
