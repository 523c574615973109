//! TIG Benchmarker Dashboard Core
//!
//! Framework-free reactive core shared by the dashboard frontend:
//! - typed topics and their payloads
//! - a single-threaded stream hub with behavior-subject replay
//! - the data service boundary (subscribe / unsubscribe / trigger)
//! - the `DataPage` lifecycle holding the latest pushed value
//! - the route table resolving navigation paths to pages

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod hub;
pub mod model;
pub mod page;
pub mod route;
pub mod service;
pub mod topic;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{ConfigError, ServiceConfig};
pub use hub::{StreamEvent, StreamHub, SubscriptionId};
pub use model::{AlgorithmInfo, MainnetInfo, SlaveInfo, SlaveStats, SlaveStatus};
pub use page::{DataPage, PageError, PagePhase, PageState, PageView};
pub use route::{
    normalize_path, Resolution, RouteError, RouteTable, RouteTableBuilder, RouteTarget, CATCH_ALL,
};
pub use service::{
    Completion, DataService, ServiceError, Spawner, Subscription, TigApiService, Transport,
    TriggerCompletion,
};
pub use topic::{MainnetInfoTopic, SlaveStatsTopic, Topic};
