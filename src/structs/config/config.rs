use serde::{Deserialize, Serialize};
use crate::structs::config::gateway_config::GatewayConfig;
use crate::structs::config::stream_config::StreamConfig;

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub stream: StreamConfig,
}
