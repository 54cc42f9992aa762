use log::debug;
use serde::Serialize;

use super::{
    action::has_action,
    config::{ButtonActions, ButtonSlot, CardConfig, Layout, RemoteLayout, RokuLayout},
    dispatch::ControlRef,
    error::CardError,
    roku::{RokuCell, RokuRow},
    state::StateLookup,
    visibility::{
        resolve_app_slot, resolve_button_visibility, resolve_extra_slot, resolve_row_visibility,
        RowId,
    },
};

pub const DEFAULT_ICON: &str = "mdi:radiobox-marked";
const ROKU_CARD_SIZE: usize = 7;
pub const EMPTY_CARD_SIZE: usize = 3;

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControlView {
    Placeholder,
    Icon {
        control: ControlRef,
        icon: String,
        title: String,
        has_hold: bool,
        has_double_tap: bool,
    },
    Image {
        control: ControlRef,
        image: String,
        title: String,
        has_hold: bool,
        has_double_tap: bool,
    },
}

impl ControlView {
    fn icon(control: ControlRef, icon: &str, title: &str, actions: &ButtonActions) -> Self {
        ControlView::Icon {
            control,
            icon: icon.to_string(),
            title: title.to_string(),
            has_hold: has_action(actions.hold_action.as_ref()),
            has_double_tap: has_action(actions.double_tap_action.as_ref()),
        }
    }

    fn image(control: ControlRef, image: &str, title: &str, actions: &ButtonActions) -> Self {
        ControlView::Image {
            control,
            image: image.to_string(),
            title: title.to_string(),
            has_hold: has_action(actions.hold_action.as_ref()),
            has_double_tap: has_action(actions.double_tap_action.as_ref()),
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RowView {
    pub id: RowId,
    pub controls: Vec<ControlView>,
}

/// What a renderer should draw for one render pass.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum CardView {
    /// No usable configuration. Nothing interactive is shown.
    Blank,
    Warning {
        message: String,
    },
    Card {
        header: Option<String>,
        theme: String,
        app_name: Option<String>,
        rows: Vec<RowView>,
    },
}

fn render_grid(config: &CardConfig, layout: &RemoteLayout) -> Vec<RowView> {
    layout
        .rows
        .iter()
        .enumerate()
        .filter(|(row, _)| resolve_row_visibility(config, RowId::Grid(*row)))
        .map(|(row, spec)| RowView {
            id: RowId::Grid(row),
            controls: spec
                .row
                .iter()
                .enumerate()
                .map(|(column, slot)| {
                    let control = ControlRef::Grid { row, column };
                    if !resolve_button_visibility(config, &control) {
                        return ControlView::Placeholder;
                    }
                    let ButtonSlot::Action(button) = slot else {
                        return ControlView::Placeholder;
                    };

                    let title = button.title.as_deref().unwrap_or_default();
                    match (&button.image, &button.icon) {
                        (Some(image), None) => {
                            ControlView::image(control, image, title, &button.actions)
                        }
                        (_, icon) => ControlView::icon(
                            control,
                            icon.as_deref().unwrap_or(DEFAULT_ICON),
                            title,
                            &button.actions,
                        ),
                    }
                })
                .collect(),
        })
        .collect()
}

fn render_roku_cell(config: &CardConfig, layout: &RokuLayout, cell: RokuCell) -> ControlView {
    match cell {
        RokuCell::Button(button) => {
            let control = ControlRef::Button(button.key().to_string());
            if !resolve_button_visibility(config, &control) {
                return ControlView::Placeholder;
            }

            let icon = layout
                .button(button)
                .and_then(|o| o.icon.as_deref())
                .unwrap_or(button.icon());
            let actions = layout
                .button(button)
                .map(|o| o.actions.clone())
                .unwrap_or_default();
            ControlView::icon(control, icon, button.title(), &actions)
        }
        RokuCell::App(index) => match resolve_app_slot(config, index) {
            Some(app) => match (&app.image, &app.icon) {
                (Some(image), _) => {
                    ControlView::image(ControlRef::App(index), image, &app.app, &app.actions)
                }
                (None, icon) => ControlView::icon(
                    ControlRef::App(index),
                    icon.as_deref().unwrap_or(DEFAULT_ICON),
                    &app.app,
                    &app.actions,
                ),
            },
            None => ControlView::Placeholder,
        },
        RokuCell::Extra(index) => {
            if !resolve_button_visibility(config, &ControlRef::Extra(index)) {
                return ControlView::Placeholder;
            }
            match resolve_extra_slot(config, index) {
                Some(extra) => ControlView::icon(
                    ControlRef::Extra(index),
                    extra.icon.as_deref().unwrap_or(DEFAULT_ICON),
                    &extra.title,
                    &extra.actions,
                ),
                None => ControlView::Placeholder,
            }
        }
    }
}

fn render_roku(config: &CardConfig, layout: &RokuLayout) -> Vec<RowView> {
    RokuRow::ALL
        .into_iter()
        .filter(|row| resolve_row_visibility(config, RowId::Roku(*row)))
        .map(|row| RowView {
            id: RowId::Roku(row),
            controls: row
                .cells()
                .iter()
                .map(|cell| render_roku_cell(config, layout, *cell))
                .collect(),
        })
        .collect()
}

/// Builds the view for one render pass. Never resolves an action.
pub fn render(config: &CardConfig, states: &dyn StateLookup) -> CardView {
    let state = match &config.entity {
        Some(entity) => match states.lookup_state(entity) {
            Some(state) => Some(state),
            None => {
                debug!("No state for {}", entity);
                return CardView::Warning {
                    message: CardError::EntityUnavailable(entity.clone()).to_string(),
                };
            }
        },
        None => None,
    };

    let (app_name, rows) = match &config.layout {
        Layout::Remote(layout) => (None, render_grid(config, layout)),
        Layout::Roku(layout) => (
            state.and_then(|s| s.app_name()).map(str::to_string),
            render_roku(config, layout),
        ),
    };

    CardView::Card {
        header: config.title.clone(),
        theme: config.theme.clone(),
        app_name,
        rows,
    }
}

/// Height hint for the host's masonry layout.
pub fn card_size(config: &CardConfig) -> usize {
    match &config.layout {
        Layout::Remote(layout) => layout
            .rows
            .iter()
            .map(|row| row.row.len())
            .max()
            .unwrap_or(EMPTY_CARD_SIZE),
        Layout::Roku(_) => ROKU_CARD_SIZE,
    }
}
