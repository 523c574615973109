//! Slave monitor page.

use dashboard_core::{SlaveInfo, SlaveStatsTopic, SlaveStatus};
use yew::prelude::*;

use crate::components::{StatusTag, StreamStatus};
use crate::hooks::use_data_page;

/// Number of slaves with the given status.
pub fn count_status(slaves: &[SlaveInfo], status: SlaveStatus) -> usize {
    slaves.iter().filter(|slave| slave.status == status).count()
}

/// Age of a heartbeat relative to `now_ms`, as a short human string.
pub fn format_last_seen(last_seen: Option<u64>, now_ms: u64) -> String {
    let Some(last_seen) = last_seen else {
        return "never".to_string();
    };
    let secs = now_ms.saturating_sub(last_seen) / 1000;
    match secs {
        0..=59 => format!("{secs}s ago"),
        60..=3599 => format!("{}m ago", secs / 60),
        _ => format!("{}h ago", secs / 3600),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn now_ms() -> u64 {
    js_sys::Date::now().max(0.0) as u64
}

fn slave_row(slave: &SlaveInfo, now_ms: u64) -> Html {
    html! {
        <tr key={slave.name.clone()}>
            <td>{ &slave.name }</td>
            <td class="mono">{ slave.ip.clone().unwrap_or_else(|| "-".to_string()) }</td>
            <td><StatusTag status={slave.status} /></td>
            <td>{ slave.num_benchmarks }</td>
            <td>{ slave.num_solutions }</td>
            <td>{ format_last_seen(slave.last_seen, now_ms) }</td>
        </tr>
    }
}

#[function_component(SlaveMonitorPage)]
pub fn slave_monitor_page() -> Html {
    let view = use_data_page::<SlaveStatsTopic>();

    html! {
        <section class="page slave-monitor-page">
            <h1>{ "Slaves" }</h1>
            <StreamStatus error={view.last_error.clone()} completed={view.completed} />
            { match view.state.value() {
                None => html! { <p class="loading">{ "Loading…" }</p> },
                Some(slaves) => {
                    let now = now_ms();
                    html! {
                        <>
                            <div class="slave-summary">
                                <span>{ format!("{} online", count_status(slaves, SlaveStatus::Online)) }</span>
                                <span>{ format!("{} busy", count_status(slaves, SlaveStatus::Busy)) }</span>
                                <span>{ format!("{} offline", count_status(slaves, SlaveStatus::Offline)) }</span>
                            </div>
                            <table class="data-table">
                                <thead>
                                    <tr>
                                        <th>{ "Name" }</th>
                                        <th>{ "IP" }</th>
                                        <th>{ "Status" }</th>
                                        <th>{ "Benchmarks" }</th>
                                        <th>{ "Solutions" }</th>
                                        <th>{ "Last seen" }</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    { if slaves.is_empty() {
                                        html! { <tr><td colspan="6" class="empty">{ "No slaves connected" }</td></tr> }
                                    } else {
                                        html! { <>{ for slaves.iter().map(|slave| slave_row(slave, now)) }</> }
                                    }}
                                </tbody>
                            </table>
                        </>
                    }
                }
            }}
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slave(name: &str, status: SlaveStatus) -> SlaveInfo {
        SlaveInfo {
            name: name.to_string(),
            ip: None,
            status,
            num_solutions: 0,
            num_benchmarks: 0,
            last_seen: None,
        }
    }

    #[test]
    fn test_count_status() {
        let slaves = vec![
            slave("a", SlaveStatus::Online),
            slave("b", SlaveStatus::Busy),
            slave("c", SlaveStatus::Online),
        ];
        assert_eq!(count_status(&slaves, SlaveStatus::Online), 2);
        assert_eq!(count_status(&slaves, SlaveStatus::Busy), 1);
        assert_eq!(count_status(&slaves, SlaveStatus::Offline), 0);
    }

    #[test]
    fn test_format_last_seen() {
        assert_eq!(format_last_seen(None, 10_000), "never");
        assert_eq!(format_last_seen(Some(5_000), 10_000), "5s ago");
        assert_eq!(format_last_seen(Some(0), 125_000), "2m ago");
        assert_eq!(format_last_seen(Some(0), 7_200_000), "2h ago");
        // Clock skew never underflows.
        assert_eq!(format_last_seen(Some(20_000), 10_000), "0s ago");
    }
}
