//! Typed stream names.
//!
//! A topic ties a stream name to the path it is fetched from and to the
//! payload type every value on that stream must decode into.

use std::fmt::Debug;

use serde::de::DeserializeOwned;

use crate::model::{MainnetInfo, SlaveStats};
use crate::service::ServiceError;

/// A named logical stream with a fixed payload schema.
pub trait Topic: 'static {
    /// Stream name used in logs and errors.
    const NAME: &'static str;
    /// Path of the endpoint, relative to the API base URL.
    const PATH: &'static str;

    type Payload: DeserializeOwned + Clone + PartialEq + Debug + 'static;

    /// Validate a raw JSON payload against the topic schema.
    fn decode(value: serde_json::Value) -> Result<Self::Payload, ServiceError> {
        serde_json::from_value(value).map_err(|source| ServiceError::Payload {
            topic: Self::NAME,
            source,
        })
    }
}

/// Mainnet block height and algorithm list.
#[derive(Debug, Clone, Copy)]
pub struct MainnetInfoTopic;

impl Topic for MainnetInfoTopic {
    const NAME: &'static str = "mainnet-info";
    const PATH: &'static str = "mainnet-info";
    type Payload = MainnetInfo;
}

/// Statistics for every slave attached to the master.
#[derive(Debug, Clone, Copy)]
pub struct SlaveStatsTopic;

impl Topic for SlaveStatsTopic {
    const NAME: &'static str = "slave-stats";
    const PATH: &'static str = "slave-stats";
    type Payload = SlaveStats;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_rejects_malformed_payload() {
        let err = MainnetInfoTopic::decode(json!({ "block_height": "tall" })).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Payload {
                topic: "mainnet-info",
                ..
            }
        ));
    }

    #[test]
    fn test_decode_slave_stats() {
        let stats = SlaveStatsTopic::decode(json!([
            { "name": "a", "status": "online", "num_solutions": 3 },
        ]))
        .unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].num_solutions, 3);
    }
}
