use log::{debug, warn};
use serde_json::{Map, Value};

use super::{
    action::{
        merge_action, ActionKind, ActionOverride, ActionSpec, SELECT_SOURCE_SERVICE,
        SEND_COMMAND_SERVICE,
    },
    config::{AppSlot, ButtonSlot, CardConfig, Layout},
    dispatch::{ControlRef, InteractionKind},
    error::CardError,
    roku::RokuButton,
};

fn command_action(config: &CardConfig, command: Option<&str>) -> ActionSpec {
    let mut parameters = Map::new();
    if let Some(target) = config.remote_target() {
        parameters.insert("entity_id".to_string(), Value::String(target));
    }
    if let Layout::Remote(layout) = &config.layout {
        if let Some(device) = &layout.device {
            parameters.insert("device".to_string(), Value::String(device.clone()));
        }
    }
    if let Some(command) = command {
        parameters.insert("command".to_string(), Value::String(command.to_string()));
    }

    ActionSpec::service_call(SEND_COMMAND_SERVICE, parameters, &config.haptic)
}

fn source_action(config: &CardConfig, app: &AppSlot) -> ActionSpec {
    let mut parameters = Map::new();
    if let Some(entity) = &config.entity {
        parameters.insert("entity_id".to_string(), Value::String(entity.clone()));
    }
    parameters.insert("source".to_string(), Value::String(app.app.clone()));

    ActionSpec::service_call(SELECT_SOURCE_SERVICE, parameters, &config.haptic)
}

fn with_override(default: ActionSpec, action: Option<&ActionOverride>) -> ActionSpec {
    match action {
        Some(action) => merge_action(default, action),
        None => default,
    }
}

/// App slots stay service calls. An override may call a different service or
/// change data and haptics. Command and custom actions are dropped.
fn source_override(control: &ControlRef, action: &ActionOverride) -> ActionOverride {
    let mut action = action.clone();
    if action.action.is_some() && action.kind() != Some(ActionKind::ServiceCall) {
        debug!(
            "[{}] Ignoring {:?} action on an app slot",
            control,
            action.action.as_deref().unwrap_or_default()
        );
        action.action = None;
        action.service = None;
    }
    action
}

fn warn_missing_command(control: &ControlRef) {
    warn!(
        "{}",
        CardError::MalformedButtonEntry {
            control: control.to_string(),
            reason: "no command to send".to_string(),
        }
    );
}

/// Resolves the action for an interaction of `kind` on `control`.
///
/// The computed default (a source switch for app slots, a raw remote command
/// for everything else) is built first; the control's override for the same
/// kind is then merged over it field by field. Returns `None` when the
/// control does not exist in this card's layout.
pub fn resolve_action(
    config: &CardConfig,
    control: &ControlRef,
    kind: InteractionKind,
) -> Option<ActionSpec> {
    match (&config.layout, control) {
        (Layout::Roku(layout), ControlRef::App(index)) => {
            let app = layout.apps.get(*index)?;
            let action = app.actions.get(kind).map(|a| source_override(control, a));
            let mut resolved = with_override(source_action(config, app), action.as_ref());
            resolved.parameters.remove("command");
            Some(resolved)
        }
        (Layout::Roku(layout), ControlRef::Button(name)) => {
            let button = RokuButton::from_key(name)?;
            let action = layout.button(button).and_then(|o| o.actions.get(kind));
            Some(with_override(
                command_action(config, Some(button.key())),
                action,
            ))
        }
        (Layout::Roku(layout), ControlRef::Extra(index)) => {
            let extra = layout.extra_buttons.get(*index)?;
            if extra.command().is_none() {
                warn_missing_command(control);
            }
            Some(with_override(
                command_action(config, extra.command()),
                extra.actions.get(kind),
            ))
        }
        (Layout::Remote(layout), ControlRef::Grid { row, column }) => {
            match layout.rows.get(*row)?.row.get(*column)? {
                ButtonSlot::Empty => None,
                ButtonSlot::Action(button) => {
                    if button.command().is_none() {
                        warn_missing_command(control);
                    }
                    Some(with_override(
                        command_action(config, button.command()),
                        button.actions.get(kind),
                    ))
                }
            }
        }
        _ => None,
    }
}
