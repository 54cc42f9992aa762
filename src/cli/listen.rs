use std::{
    cell::RefCell,
    io::{self, BufRead, Write},
};

use log::{debug, info, warn};
use remote_card::{ActionSpec, Card, InteractionEvent};
use serde_json::json;

use super::{
    models::Message,
    tools::{read_json, read_states},
};

fn write_message<W: Write>(writer: &mut W, msg: &Message) {
    let json = match serde_json::to_string(msg) {
        Ok(json) => json,
        Err(e) => {
            warn!("Failed to serialize message: {}", e);
            return;
        }
    };

    if writeln!(writer, "{}", json).and_then(|_| writer.flush()).is_err() {
        warn!("Failed to write message");
    }
}

fn load_config(card: &mut Card, config_path: &str) -> bool {
    match read_json(config_path) {
        Some(raw) => card.set_config(&raw),
        None => false,
    }
}

/// Reads one JSON message per line and answers on `writer`.
///
/// * `action` carries an interaction event; the resolved action is written
///   back as an `execute` message.
/// * `reload` replaces the configuration, from the given path or the
///   original one.
/// * `render` writes the current view as a `view` message.
/// * `stop` ends the loop.
pub fn serve<R: BufRead, W: Write>(card: &mut Card, config_path: &str, reader: R, writer: W) {
    let writer = RefCell::new(writer);
    let executor = |action: &ActionSpec, hold: bool, double_tap: bool| {
        let msg = Message::new(
            "execute",
            Some(json!({
                "action": action,
                "hold": hold,
                "double_tap": double_tap,
            })),
        );
        write_message(&mut *writer.borrow_mut(), &msg);
    };

    for line in reader.lines() {
        let json_str = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Error reading input: {}", e);
                break;
            }
        };
        if json_str.trim().is_empty() {
            continue;
        }

        let msg: Message = match serde_json::from_str(&json_str) {
            Ok(message) => message,
            Err(e) => {
                warn!("Failed to parse JSON: {}", e);
                continue;
            }
        };

        debug!("Received Command: {:?}", msg.type_);
        match msg.type_.as_str() {
            "action" => {
                let Some(value) = msg.value else {
                    warn!("No event provided");
                    continue;
                };

                let event: InteractionEvent = match serde_json::from_value(value) {
                    Ok(event) => event,
                    Err(e) => {
                        warn!("Invalid event: {}", e);
                        continue;
                    }
                };

                card.handle_action(&event, &executor);
            }
            "reload" => {
                let path = match &msg.value {
                    Some(value) => match value.as_str() {
                        Some(path) => path.to_string(),
                        None => {
                            warn!("Invalid config path");
                            continue;
                        }
                    },
                    None => config_path.to_string(),
                };

                debug!("Reloading configuration from {}", path);
                load_config(card, &path);
            }
            "render" => {
                let view = match card.config() {
                    Some(config) => {
                        let states = read_states(None, config).unwrap_or_default();
                        card.render(&states)
                    }
                    None => remote_card::CardView::Blank,
                };

                let value = match serde_json::to_value(&view) {
                    Ok(value) => value,
                    Err(e) => {
                        warn!("Failed to serialize view: {}", e);
                        continue;
                    }
                };
                write_message(&mut *writer.borrow_mut(), &Message::new("view", Some(value)));
            }
            "stop" => {
                debug!("Stopping...");
                break;
            }
            _ => {
                warn!("Unknown command: {}", msg.type_);
            }
        }
    }
}

pub fn listen(config_path: String) {
    info!("Loading configuration...");
    let mut card = Card::new();
    if !load_config(&mut card, &config_path) {
        eprintln!("Invalid configuration: {}", config_path);
        return;
    }

    info!("Start listening to stdin");
    let stdin = io::stdin();
    serve(&mut card, &config_path, stdin.lock(), io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::NamedTempFile;

    fn write_config(content: serde_json::Value) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    fn run(card: &mut Card, config_path: &str, input: &str) -> Vec<Message> {
        let mut output = Vec::new();
        serve(card, config_path, Cursor::new(input), &mut output);

        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn executes_actions_and_stops() {
        let file = write_config(json!({"type": "custom:remote-card", "entity": "remote.tv",
            "buttons": [{"row": [{"name": "up"}]}]}));
        let path = file.path().to_str().unwrap();
        let mut card = Card::new();
        assert!(load_config(&mut card, path));

        let input = concat!(
            r#"{"type": "action", "value": {"control": {"grid": {"row": 0, "column": 0}}, "action": "hold"}}"#,
            "\n",
            "garbage\n",
            r#"{"type": "stop"}"#,
            "\n",
            r#"{"type": "action", "value": {"control": {"grid": {"row": 0, "column": 0}}}}"#,
            "\n",
        );
        let messages = run(&mut card, path, input);

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].type_, "execute");
        let value = messages[0].value.as_ref().unwrap();
        assert_eq!(value["hold"], true);
        assert_eq!(value["double_tap"], false);
        assert_eq!(value["action"]["target"], "remote.send_command");
        assert_eq!(value["action"]["parameters"]["command"], "up");
    }

    #[test]
    fn reload_replaces_configuration() {
        let first = write_config(json!({"type": "custom:roku-card", "entity": "media_player.roku"}));
        let second = write_config(json!({"type": "custom:roku-card", "entity": "media_player.roku",
            "remote": "remote.other"}));
        let mut card = Card::new();
        assert!(load_config(&mut card, first.path().to_str().unwrap()));

        let input = format!(
            "{}\n{}\n",
            json!({"type": "reload", "value": second.path().to_str().unwrap()}),
            json!({"type": "action", "value": {"control": {"button": "home"}}}),
        );
        let messages = run(&mut card, first.path().to_str().unwrap(), &input);

        let value = messages[0].value.as_ref().unwrap();
        assert_eq!(value["action"]["parameters"]["entity_id"], "remote.other");
    }

    #[test]
    fn renders_blank_after_invalid_reload() {
        let valid = write_config(json!({"type": "custom:remote-card", "entity": "remote.tv"}));
        let invalid = write_config(json!({"type": "custom:remote-card"}));
        let mut card = Card::new();
        assert!(load_config(&mut card, valid.path().to_str().unwrap()));

        let input = format!(
            "{}\n{}\n",
            json!({"type": "reload", "value": invalid.path().to_str().unwrap()}),
            json!({"type": "render"}),
        );
        let messages = run(&mut card, valid.path().to_str().unwrap(), &input);

        assert_eq!(messages, vec![Message::new("view", Some(json!({"view": "blank"})))]);
    }
}
