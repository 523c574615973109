use yew::prelude::*;

use crate::services::ApiHandle;

#[hook]
pub fn use_api_service() -> ApiHandle {
    use_context::<ApiHandle>().expect("ApiHandle not found")
}
