//! Page components.

mod config;
mod home;
mod mainnet_info;
mod slave_monitor;

pub use config::ConfigPage;
pub use home::HomePage;
pub use mainnet_info::MainnetInfoPage;
pub use slave_monitor::SlaveMonitorPage;
