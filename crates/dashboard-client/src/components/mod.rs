//! Shared UI components.

mod layout;
mod status_tag;
mod stream_status;

pub use layout::Layout;
pub use status_tag::StatusTag;
pub use stream_status::StreamStatus;
