use std::collections::HashMap;

use remote_card::DeviceState;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Message {
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Message {
    pub fn new(type_: &str, value: Option<Value>) -> Self {
        Self {
            type_: type_.to_string(),
            value,
        }
    }
}

/// Entity id -> state, in the shape the host exposes as `hass.states`.
pub type States = HashMap<String, DeviceState>;
