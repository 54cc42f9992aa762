use std::fs;

use log::{error, warn};
use remote_card::{normalize, CardConfig, DeviceState, InteractionKind};
use serde_json::Value;

use super::models::States;

pub fn read_json(path: &str) -> Option<Value> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => {
            warn!("Failed to read {}", path);
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Failed to parse {}: {}", path, e);
            None
        }
    }
}

pub fn read_and_parse_config(config_path: &str) -> Option<CardConfig> {
    let raw = read_json(config_path)?;

    match normalize(&raw) {
        Ok(config) => Some(config),
        Err(e) => {
            error!("{}", e);
            None
        }
    }
}

/// Loads a states file, or pretends the configured entity is available when
/// no file is given.
pub fn read_states(states_path: Option<&str>, config: &CardConfig) -> Option<States> {
    let Some(states_path) = states_path else {
        let mut states = States::new();
        if let Some(entity) = &config.entity {
            states.insert(entity.clone(), DeviceState::default());
        }
        return Some(states);
    };

    let raw = read_json(states_path)?;
    match serde_json::from_value(raw) {
        Ok(states) => Some(states),
        Err(e) => {
            warn!("Invalid states file {}: {}", states_path, e);
            None
        }
    }
}

pub fn parse_kind(s: &str) -> Result<InteractionKind, String> {
    match s {
        "tap" => Ok(InteractionKind::Tap),
        "hold" => Ok(InteractionKind::Hold),
        "double_tap" | "double-tap" => Ok(InteractionKind::DoubleTap),
        _ => Err(format!("Unknown action: {} (expected tap, hold or double_tap)", s)),
    }
}
