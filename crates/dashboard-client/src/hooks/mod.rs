mod use_api_service;
mod use_config;
mod use_data_page;

pub use use_api_service::use_api_service;
pub use use_config::*;
pub use use_data_page::use_data_page;
