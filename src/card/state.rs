use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A device's current state as the host reports it. Display only.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct DeviceState {
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl DeviceState {
    pub fn app_name(&self) -> Option<&str> {
        self.attributes.get("app_name").and_then(Value::as_str)
    }
}

pub trait StateLookup {
    fn lookup_state(&self, entity_id: &str) -> Option<&DeviceState>;
}

impl StateLookup for HashMap<String, DeviceState> {
    fn lookup_state(&self, entity_id: &str) -> Option<&DeviceState> {
        self.get(entity_id)
    }
}
