use remote_card::render;

use super::tools::{read_and_parse_config, read_states};

pub fn layout(config_path: String, states_path: Option<String>) {
    let config = match read_and_parse_config(&config_path) {
        Some(config) => config,
        None => {
            eprintln!("Invalid configuration: {}", config_path);
            return;
        }
    };

    let states = match read_states(states_path.as_deref(), &config) {
        Some(states) => states,
        None => {
            eprintln!("Failed to load states");
            return;
        }
    };

    let view = render(&config, &states);
    match serde_json::to_string_pretty(&view) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize layout: {}", e),
    }
}
