use remote_card::card::{
    config::{ButtonSlot, Layout},
    view::card_size,
};

use super::tools::read_and_parse_config;

pub fn check(config_path: String) {
    let config = match read_and_parse_config(&config_path) {
        Some(config) => config,
        None => {
            eprintln!("Invalid configuration: {}", config_path);
            return;
        }
    };

    println!("Valid {} configuration:", config.variant());
    if let Some(entity) = &config.entity {
        println!("- entity: {}", entity);
    }
    if let Some(target) = config.remote_target() {
        println!("- remote: {}", target);
    }
    println!("- theme: {}", config.theme);
    println!("- haptic: {}", config.haptic);

    match &config.layout {
        Layout::Remote(layout) => {
            if let Some(device) = &layout.device {
                println!("- device: {}", device);
            }
            println!("- rows: {}", layout.rows.len());
            for (index, row) in layout.rows.iter().enumerate() {
                let empty = row
                    .row
                    .iter()
                    .filter(|slot| **slot == ButtonSlot::Empty)
                    .count();
                println!("  {}: {} buttons, {} empty", index, row.row.len(), empty);
            }
        }
        Layout::Roku(layout) => {
            println!("- tv: {}", layout.tv);
            for (button, over) in &layout.buttons {
                match over.show {
                    Some(show) => println!("- {}: show = {}", button.key(), show),
                    None => println!("- {}: overridden", button.key()),
                }
            }
            for app in &layout.apps {
                println!("- app: {}", app.app);
            }
            for extra in &layout.extra_buttons {
                println!("- extra button: {}", extra.title);
            }
        }
    }

    println!("- card size: {}", card_size(&config));
}
