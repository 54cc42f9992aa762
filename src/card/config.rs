use std::collections::BTreeMap;

use log::{debug, warn};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{
    action::ActionOverride,
    dispatch::InteractionKind,
    entity::{domain, sibling_remote},
    error::CardError,
    roku::RokuButton,
};

pub const DEFAULT_THEME: &str = "default";
pub const DEFAULT_HAPTIC: &str = "success";
pub const MAX_APPS: usize = 4;
pub const MAX_EXTRA_BUTTONS: usize = 3;

/// Per-kind action overrides attached to a control.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct ButtonActions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tap_action: Option<ActionOverride>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hold_action: Option<ActionOverride>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub double_tap_action: Option<ActionOverride>,
}

impl ButtonActions {
    pub fn get(&self, kind: InteractionKind) -> Option<&ActionOverride> {
        match kind {
            InteractionKind::Tap => self.tap_action.as_ref(),
            InteractionKind::Hold => self.hold_action.as_ref(),
            InteractionKind::DoubleTap => self.double_tap_action.as_ref(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ActionButton {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show: Option<bool>,
    #[serde(default)]
    pub actions: ButtonActions,
}

impl ActionButton {
    /// The command a plain tap sends.
    pub fn command(&self) -> Option<&str> {
        self.remote_command
            .as_deref()
            .or(self.name.as_deref())
            .or(self.title.as_deref())
            .filter(|command| !command.is_empty())
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ButtonSlot {
    Empty,
    Action(ActionButton),
}

#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct RowSpec {
    pub row: Vec<ButtonSlot>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ButtonOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(flatten)]
    pub actions: ButtonActions,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct AppSlot {
    #[serde(default)]
    pub app: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(flatten)]
    pub actions: ButtonActions,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtraButtonSpec {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default = "default_show")]
    pub show: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(flatten)]
    pub actions: ButtonActions,
}

impl Default for ExtraButtonSpec {
    fn default() -> Self {
        Self {
            title: String::new(),
            icon: None,
            show: true,
            command: None,
            actions: ButtonActions::default(),
        }
    }
}

impl ExtraButtonSpec {
    pub fn command(&self) -> Option<&str> {
        self.command
            .as_deref()
            .or(Some(self.title.as_str()))
            .filter(|command| !command.is_empty())
    }
}

fn default_show() -> bool {
    true
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RemoteLayout {
    pub device: Option<String>,
    pub rows: Vec<RowSpec>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RokuLayout {
    pub tv: bool,
    pub buttons: BTreeMap<RokuButton, ButtonOverride>,
    pub apps: Vec<AppSlot>,
    pub extra_buttons: Vec<ExtraButtonSpec>,
}

impl RokuLayout {
    pub fn button(&self, button: RokuButton) -> Option<&ButtonOverride> {
        self.buttons.get(&button)
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum Layout {
    Remote(RemoteLayout),
    Roku(RokuLayout),
}

/// A normalized card configuration. Built once per configuration load and
/// never modified afterwards.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CardConfig {
    pub entity: Option<String>,
    pub remote: Option<String>,
    pub title: Option<String>,
    pub theme: String,
    pub haptic: String,
    pub layout: Layout,
}

impl CardConfig {
    /// Entity that receives `remote.send_command`.
    pub fn remote_target(&self) -> Option<String> {
        match &self.layout {
            Layout::Remote(_) => self.entity.clone(),
            Layout::Roku(_) => self
                .remote
                .clone()
                .or_else(|| self.entity.as_deref().map(sibling_remote)),
        }
    }

    pub fn variant(&self) -> &'static str {
        match self.layout {
            Layout::Remote(_) => "remote-card",
            Layout::Roku(_) => "roku-card",
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(tag = "type")]
enum RawConfig {
    #[serde(rename = "custom:remote-card")]
    Remote(RawRemoteConfig),
    #[serde(rename = "custom:roku-card")]
    Roku(RawRokuConfig),
}

#[derive(Deserialize, Debug)]
struct RawRemoteConfig {
    entity: Option<String>,
    title: Option<String>,
    name: Option<String>,
    device: Option<String>,
    theme: Option<String>,
    haptic: Option<String>,
    buttons: Option<Value>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct RawRow {
    row: Option<Value>,
}

#[derive(Deserialize, Debug)]
struct RawRokuConfig {
    entity: Option<String>,
    remote: Option<String>,
    title: Option<String>,
    name: Option<String>,
    theme: Option<String>,
    haptic: Option<String>,
    #[serde(default)]
    tv: bool,
    apps: Option<Value>,
    extra_buttons: Option<Value>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn parse_entry<T: DeserializeOwned + Default>(value: Value, control: &str) -> T {
    match serde_json::from_value(value) {
        Ok(entry) => entry,
        Err(e) => {
            warn!(
                "{}",
                CardError::MalformedButtonEntry {
                    control: control.to_string(),
                    reason: e.to_string(),
                }
            );
            T::default()
        }
    }
}

/// Entries of a list field. A missing or null field is an empty list, and
/// anything other than an array is logged and treated the same way.
fn list_entries(value: Option<Value>, what: &str) -> Vec<Value> {
    match value {
        Some(Value::Array(entries)) => entries,
        None | Some(Value::Null) => Vec::new(),
        Some(other) => {
            warn!("Expected a list of {}, got {}", what, other);
            Vec::new()
        }
    }
}

fn parse_slot(value: Value, control: &str) -> ButtonSlot {
    let is_empty = value
        .get("empty")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if is_empty {
        ButtonSlot::Empty
    } else {
        ButtonSlot::Action(parse_entry(value, control))
    }
}

fn truncate<T>(mut entries: Vec<T>, max: usize, what: &str) -> Vec<T> {
    if entries.len() > max {
        warn!(
            "Only {} {} are supported, ignoring {}",
            max,
            what,
            entries.len() - max
        );
        entries.truncate(max);
    }
    entries
}

fn normalize_remote(raw: RawRemoteConfig) -> Result<CardConfig, CardError> {
    let entity = non_empty(raw.entity).ok_or_else(|| {
        CardError::InvalidConfig("You'll need to provide a remote entity".to_string())
    })?;
    if domain(&entity) != Some("remote") {
        return Err(CardError::InvalidConfig(format!(
            "{} is not a remote entity",
            entity
        )));
    }

    let rows = list_entries(raw.buttons, "rows")
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            let raw_row: RawRow = parse_entry(value, &format!("row:{}", row));
            RowSpec {
                row: list_entries(raw_row.row, "buttons")
                    .into_iter()
                    .enumerate()
                    .map(|(column, value)| {
                        parse_slot(value, &format!("grid:{},{}", row, column))
                    })
                    .collect(),
            }
        })
        .collect();

    Ok(CardConfig {
        entity: Some(entity),
        remote: None,
        title: raw.title.or(raw.name),
        theme: raw.theme.unwrap_or_else(|| DEFAULT_THEME.to_string()),
        haptic: raw.haptic.unwrap_or_else(|| DEFAULT_HAPTIC.to_string()),
        layout: Layout::Remote(RemoteLayout {
            device: raw.device,
            rows,
        }),
    })
}

fn normalize_roku(mut raw: RawRokuConfig) -> Result<CardConfig, CardError> {
    let entity = non_empty(raw.entity);
    let remote = non_empty(raw.remote);
    if entity.is_none() && remote.is_none() {
        return Err(CardError::InvalidConfig(
            "You'll need to provide an entity or a remote".to_string(),
        ));
    }

    let mut buttons = BTreeMap::new();
    for button in RokuButton::ALL {
        if let Some(value) = raw.rest.remove(button.key()) {
            buttons.insert(button, parse_entry(value, button.key()));
        }
    }
    for key in raw.rest.keys() {
        debug!("Ignoring unknown key: {}", key);
    }

    let apps = truncate(list_entries(raw.apps, "apps"), MAX_APPS, "apps")
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let control = format!("app:{}", index);
            let app: AppSlot = parse_entry(value, &control);
            if app.app.is_empty() {
                warn!(
                    "{}",
                    CardError::MalformedButtonEntry {
                        control,
                        reason: "missing app".to_string(),
                    }
                );
            }
            app
        })
        .collect();

    let extra_buttons = truncate(
        list_entries(raw.extra_buttons, "extra buttons"),
        MAX_EXTRA_BUTTONS,
        "extra buttons",
    )
    .into_iter()
    .enumerate()
    .map(|(index, value)| parse_entry(value, &format!("extra:{}", index)))
    .collect();

    Ok(CardConfig {
        entity,
        remote,
        title: raw.title.or(raw.name),
        theme: raw.theme.unwrap_or_else(|| DEFAULT_THEME.to_string()),
        haptic: raw.haptic.unwrap_or_else(|| DEFAULT_HAPTIC.to_string()),
        layout: Layout::Roku(RokuLayout {
            tv: raw.tv,
            buttons,
            apps,
            extra_buttons,
        }),
    })
}

/// Merges a raw card configuration with the variant's defaults.
///
/// Only the identifying fields are validated. Broken button entries are
/// logged and kept with their defaults so that one bad button does not take
/// the whole card down.
pub fn normalize(raw: &Value) -> Result<CardConfig, CardError> {
    match RawConfig::deserialize(raw)? {
        RawConfig::Remote(raw) => normalize_remote(raw),
        RawConfig::Roku(raw) => normalize_roku(raw),
    }
}
