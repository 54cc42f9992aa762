use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const SEND_COMMAND_SERVICE: &str = "remote.send_command";
pub const SELECT_SOURCE_SERVICE: &str = "media_player.select_source";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    Command,
    ServiceCall,
    Custom,
}

/// A fully resolved action, ready to hand to an executor.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ActionSpec {
    pub kind: ActionKind,
    pub target: String,
    pub parameters: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub haptic: Option<String>,
}

impl ActionSpec {
    pub fn service_call(service: &str, parameters: Map<String, Value>, haptic: &str) -> Self {
        Self {
            kind: ActionKind::ServiceCall,
            target: service.to_string(),
            parameters,
            haptic: Some(haptic.to_string()),
        }
    }
}

/// A user supplied action in the host's action-config format, e.g.
/// `{"action": "call-service", "service": "media_player.volume_up"}`.
///
/// Every field is optional. Whatever is set is laid over the computed
/// default by [`merge_action`].
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ActionOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_data: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub haptic: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ActionOverride {
    pub fn kind(&self) -> Option<ActionKind> {
        match self.action.as_deref()? {
            "call-service" | "service-call" | "perform-action" => Some(ActionKind::ServiceCall),
            "command" => Some(ActionKind::Command),
            _ => Some(ActionKind::Custom),
        }
    }

    /// Custom actions are addressed by their action name, everything else by
    /// the service it names.
    pub fn target(&self) -> Option<&str> {
        match self.kind() {
            Some(ActionKind::Custom) => self.action.as_deref(),
            _ => self.service.as_deref(),
        }
    }

    pub fn parameters(&self) -> Map<String, Value> {
        let mut parameters = self.extra.clone();
        for data in [&self.data, &self.service_data].into_iter().flatten() {
            parameters.extend(data.clone());
        }
        if let Some(command) = &self.command {
            parameters.insert("command".to_string(), Value::String(command.clone()));
        }
        parameters
    }
}

/// Mirrors the host's `hasAction`: an action is present unless it is missing
/// or explicitly `none`.
pub fn has_action(action: Option<&ActionOverride>) -> bool {
    match action {
        Some(action) => action.action.as_deref() != Some("none"),
        None => false,
    }
}

// Field precedence when an override is laid over a computed default:
//
// | field      | winner                                                  |
// |------------|---------------------------------------------------------|
// | kind       | override `action`, else default                         |
// | target     | override service/action name if non-empty, else default |
// | parameters | key by key; override keys win, default keys are kept    |
// | haptic     | override `haptic`, else default                         |

pub fn merge_action(default: ActionSpec, action: &ActionOverride) -> ActionSpec {
    ActionSpec {
        kind: merge_kind(default.kind, action),
        target: merge_target(default.target, action),
        parameters: merge_parameters(default.parameters, action),
        haptic: merge_haptic(default.haptic, action),
    }
}

pub fn merge_kind(default: ActionKind, action: &ActionOverride) -> ActionKind {
    action.kind().unwrap_or(default)
}

pub fn merge_target(default: String, action: &ActionOverride) -> String {
    match action.target() {
        Some(target) if !target.is_empty() => target.to_string(),
        _ => default,
    }
}

pub fn merge_parameters(
    mut default: Map<String, Value>,
    action: &ActionOverride,
) -> Map<String, Value> {
    default.extend(action.parameters());
    default
}

pub fn merge_haptic(default: Option<String>, action: &ActionOverride) -> Option<String> {
    action.haptic.clone().or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn default_command() -> ActionSpec {
        let parameters = json!({"entity_id": "remote.tv", "command": "up"});
        ActionSpec::service_call(
            SEND_COMMAND_SERVICE,
            parameters.as_object().cloned().unwrap(),
            "success",
        )
    }

    fn parse(value: Value) -> ActionOverride {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn haptic_only_override_keeps_command() {
        let merged = merge_action(default_command(), &parse(json!({"haptic": "light"})));

        assert_eq!(merged.kind, ActionKind::ServiceCall);
        assert_eq!(merged.target, SEND_COMMAND_SERVICE);
        assert_eq!(merged.parameters["command"], "up");
        assert_eq!(merged.haptic.as_deref(), Some("light"));
    }

    #[test]
    fn service_override_replaces_target_and_merges_data() {
        let action = parse(json!({
            "action": "call-service",
            "service": "media_player.volume_up",
            "service_data": {"entity_id": "media_player.tv"}
        }));
        let merged = merge_action(default_command(), &action);

        assert_eq!(merged.target, "media_player.volume_up");
        assert_eq!(merged.parameters["entity_id"], "media_player.tv");
        assert_eq!(merged.parameters["command"], "up");
        assert_eq!(merged.haptic.as_deref(), Some("success"));
    }

    #[test]
    fn empty_service_keeps_default_target() {
        let merged = merge_action(
            default_command(),
            &parse(json!({"action": "call-service", "service": ""})),
        );
        assert_eq!(merged.target, SEND_COMMAND_SERVICE);
    }

    #[test]
    fn custom_action_is_targeted_by_name() {
        let action = parse(json!({"action": "navigate", "navigation_path": "/lovelace/1"}));
        let merged = merge_action(default_command(), &action);

        assert_eq!(merged.kind, ActionKind::Custom);
        assert_eq!(merged.target, "navigate");
        assert_eq!(merged.parameters["navigation_path"], "/lovelace/1");
    }

    #[test]
    fn command_override_replaces_command_parameter() {
        let action = parse(json!({"action": "command", "command": "netflix"}));
        let merged = merge_action(default_command(), &action);

        assert_eq!(merged.kind, ActionKind::Command);
        assert_eq!(merged.target, SEND_COMMAND_SERVICE);
        assert_eq!(merged.parameters["command"], "netflix");
        assert_eq!(merged.parameters["entity_id"], "remote.tv");
    }

    #[test]
    fn none_is_not_an_action() {
        assert!(!has_action(None));
        assert!(!has_action(Some(&parse(json!({"action": "none"})))));
        assert!(has_action(Some(&parse(json!({"action": "toggle"})))));
    }
}
