//! Hook binding a `DataPage` to the component lifecycle.

use dashboard_core::{DataPage, PageView, Topic};
use yew::prelude::*;

use super::use_api_service;
use crate::services::ApiService;

/// Subscribe to topic `T` while the component is mounted.
///
/// The page is activated once per service (one subscription, one
/// trigger) and dropped in the effect teardown, which releases the
/// subscription. Every pushed event re-renders the caller.
#[hook]
pub fn use_data_page<T: Topic>() -> PageView<T::Payload> {
    let api = use_api_service();
    let view = use_state(PageView::<T::Payload>::default);

    {
        let view = view.clone();
        use_effect_with(api, move |api| {
            view.set(PageView::default());

            let setter = view.setter();
            let mut page = DataPage::<T, ApiService>::new(api.service().clone())
                .on_change(move |snapshot| setter.set(snapshot.clone()));
            if let Err(e) = page.activate() {
                tracing::warn!(topic = T::NAME, "failed to activate page: {e}");
            }

            move || drop(page)
        });
    }

    (*view).clone()
}
