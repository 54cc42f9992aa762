use log::warn;
use remote_card::{
    card::visibility::resolve_button_visibility, resolve_action, ControlRef, InteractionKind,
};

use super::tools::read_and_parse_config;

pub fn resolve(config_path: String, control: ControlRef, kind: InteractionKind) {
    let config = match read_and_parse_config(&config_path) {
        Some(config) => config,
        None => {
            eprintln!("Invalid configuration: {}", config_path);
            return;
        }
    };

    if !resolve_button_visibility(&config, &control) {
        warn!("[{}] Control is not visible with this configuration", control);
    }

    let action = match resolve_action(&config, &control, kind) {
        Some(action) => action,
        None => {
            eprintln!("No such control: {}", control);
            return;
        }
    };

    match serde_json::to_string_pretty(&action) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize action: {}", e),
    }
}
