use std::{fmt, str::FromStr, sync::LazyLock};

use log::debug;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use super::{action::ActionSpec, error::CardError};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    #[default]
    Tap,
    Hold,
    #[serde(alias = "double-tap")]
    DoubleTap,
}

impl InteractionKind {
    /// Anything that is not a hold or a double tap is treated as a tap.
    pub fn from_detail(action: &str) -> Self {
        match action {
            "hold" => InteractionKind::Hold,
            "double_tap" | "double-tap" => InteractionKind::DoubleTap,
            _ => InteractionKind::Tap,
        }
    }

    pub fn is_hold(self) -> bool {
        self == InteractionKind::Hold
    }

    pub fn is_double_tap(self) -> bool {
        self == InteractionKind::DoubleTap
    }
}

/// The control an interaction came from.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ControlRef {
    /// A named button of the streaming-media remote.
    Button(String),
    /// An app image slot, by position.
    App(usize),
    /// A user-defined extra button, by position.
    Extra(usize),
    /// A button of the generic remote's grid.
    Grid { row: usize, column: usize },
}

impl fmt::Display for ControlRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlRef::Button(name) => write!(f, "button:{}", name),
            ControlRef::App(index) => write!(f, "app:{}", index),
            ControlRef::Extra(index) => write!(f, "extra:{}", index),
            ControlRef::Grid { row, column } => write!(f, "grid:{},{}", row, column),
        }
    }
}

static CONTROL_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(button|app|extra|grid):)?([A-Za-z0-9_]+|\d+\s*,\s*\d+)$").unwrap()
});

impl FromStr for ControlRef {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| CardError::InvalidControl {
            control: s.to_string(),
            reason,
        };
        let caps = CONTROL_REF
            .captures(s.trim())
            .ok_or_else(|| invalid("expected [button|app|extra|grid:]<value>".to_string()))?;
        let value = &caps[2];
        let index = || {
            value
                .parse::<usize>()
                .map_err(|_| invalid(format!("invalid index {}", value)))
        };

        match caps.get(1).map(|m| m.as_str()) {
            Some("app") => Ok(ControlRef::App(index()?)),
            Some("extra") => Ok(ControlRef::Extra(index()?)),
            Some("button") => Ok(ControlRef::Button(value.to_string())),
            None if !value.contains(',') => Ok(ControlRef::Button(value.to_string())),
            _ => {
                let (row, column) = value
                    .split_once(',')
                    .ok_or_else(|| invalid(format!("invalid grid position {}", value)))?;
                let row = row
                    .trim()
                    .parse()
                    .map_err(|_| invalid(format!("invalid row {}", row)))?;
                let column = column
                    .trim()
                    .parse()
                    .map_err(|_| invalid(format!("invalid column {}", column)))?;
                Ok(ControlRef::Grid { row, column })
            }
        }
    }
}

fn kind_from_detail<'de, D>(deserializer: D) -> Result<InteractionKind, D::Error>
where
    D: Deserializer<'de>,
{
    let detail = Option::<String>::deserialize(deserializer)?;
    Ok(detail
        .as_deref()
        .map(InteractionKind::from_detail)
        .unwrap_or_default())
}

/// A raw interaction as reported by an interactive control.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct InteractionEvent {
    pub control: ControlRef,
    #[serde(rename = "action", default, deserialize_with = "kind_from_detail")]
    pub kind: InteractionKind,
}

impl InteractionEvent {
    pub fn new(control: ControlRef, kind: InteractionKind) -> Self {
        Self { control, kind }
    }
}

/// Performs a resolved action. Owns reporting success or failure to the user.
pub trait ActionExecutor {
    fn execute(&self, action: &ActionSpec, hold: bool, double_tap: bool);
}

impl<F> ActionExecutor for F
where
    F: Fn(&ActionSpec, bool, bool),
{
    fn execute(&self, action: &ActionSpec, hold: bool, double_tap: bool) {
        self(action, hold, double_tap)
    }
}

/// Fire and forget. Nothing is awaited, retried or remembered.
pub fn dispatch(event: &InteractionEvent, action: ActionSpec, executor: &dyn ActionExecutor) {
    debug!(
        "[{}] Dispatching {:?} -> {}",
        event.control, event.kind, action.target
    );
    executor.execute(&action, event.kind.is_hold(), event.kind.is_double_tap());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::action::{ActionKind, SEND_COMMAND_SERVICE};
    use serde_json::{json, Map};
    use std::cell::RefCell;

    fn parse(s: &str) -> ControlRef {
        s.parse().unwrap()
    }

    #[test]
    fn parses_control_refs() {
        assert_eq!(parse("up"), ControlRef::Button("up".to_string()));
        assert_eq!(parse("button:volume_up"), ControlRef::Button("volume_up".to_string()));
        assert_eq!(parse("app:2"), ControlRef::App(2));
        assert_eq!(parse("extra:0"), ControlRef::Extra(0));
        assert_eq!(parse("grid:1, 3"), ControlRef::Grid { row: 1, column: 3 });
    }

    #[test]
    fn rejects_malformed_controls() {
        for input in ["app:x", "nope:1", "grid:1", "extra:", ""] {
            let result = input.parse::<ControlRef>();
            assert!(
                matches!(&result, Err(CardError::InvalidControl { control, .. }) if control == input),
                "{:?}",
                result
            );
        }

        let error = "app:x".parse::<ControlRef>().unwrap_err();
        assert_eq!(error.to_string(), "Invalid control [app:x]: invalid index x");
    }

    #[test]
    fn control_ref_display_parses_back() {
        let control = ControlRef::Grid { row: 0, column: 2 };
        assert_eq!(parse(&control.to_string()), control);
        assert_eq!(parse("2,1"), ControlRef::Grid { row: 2, column: 1 });
    }

    #[test]
    fn event_wire_format() {
        let event: InteractionEvent =
            serde_json::from_value(json!({"control": {"app": 1}, "action": "double_tap"})).unwrap();
        assert_eq!(event, InteractionEvent::new(ControlRef::App(1), InteractionKind::DoubleTap));

        let event: InteractionEvent =
            serde_json::from_value(json!({"control": {"button": "up"}})).unwrap();
        assert_eq!(event.kind, InteractionKind::Tap);
    }

    #[test]
    fn unknown_event_actions_are_taps() {
        for (action, kind) in [
            (json!("wiggle"), InteractionKind::Tap),
            (json!(null), InteractionKind::Tap),
            (json!("double-tap"), InteractionKind::DoubleTap),
            (json!("hold"), InteractionKind::Hold),
        ] {
            let event: InteractionEvent =
                serde_json::from_value(json!({"control": {"button": "up"}, "action": action}))
                    .unwrap();
            assert_eq!(event.kind, kind);
        }
    }

    #[test]
    fn detail_falls_back_to_tap() {
        assert_eq!(InteractionKind::from_detail("hold"), InteractionKind::Hold);
        assert_eq!(InteractionKind::from_detail("double_tap"), InteractionKind::DoubleTap);
        assert_eq!(InteractionKind::from_detail("tap"), InteractionKind::Tap);
        assert_eq!(InteractionKind::from_detail("wiggle"), InteractionKind::Tap);
    }

    #[test]
    fn dispatch_classifies_kind() {
        let calls = RefCell::new(Vec::new());
        let executor = |action: &ActionSpec, hold: bool, double_tap: bool| {
            calls.borrow_mut().push((action.target.clone(), hold, double_tap));
        };
        let action = ActionSpec {
            kind: ActionKind::ServiceCall,
            target: SEND_COMMAND_SERVICE.to_string(),
            parameters: Map::new(),
            haptic: None,
        };

        for kind in [InteractionKind::Tap, InteractionKind::Hold, InteractionKind::DoubleTap] {
            let event = InteractionEvent::new(ControlRef::Button("up".to_string()), kind);
            dispatch(&event, action.clone(), &executor);
        }

        assert_eq!(
            calls.into_inner(),
            vec![
                (SEND_COMMAND_SERVICE.to_string(), false, false),
                (SEND_COMMAND_SERVICE.to_string(), true, false),
                (SEND_COMMAND_SERVICE.to_string(), false, true),
            ]
        );
    }
}
