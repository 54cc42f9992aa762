use serde::{Deserialize, Serialize};

use super::{
    config::{AppSlot, ButtonSlot, CardConfig, ExtraButtonSpec, Layout, RokuLayout},
    dispatch::ControlRef,
    roku::{RokuButton, RokuRow},
};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RowId {
    Roku(RokuRow),
    Grid(usize),
}

fn is_shown(layout: &RokuLayout, button: RokuButton) -> bool {
    layout.button(button).and_then(|o| o.show) != Some(false)
}

fn opted_in(layout: &RokuLayout, button: RokuButton) -> bool {
    layout.button(button).and_then(|o| o.show) == Some(true)
}

fn roku_row_visible(layout: &RokuLayout, row: RokuRow) -> bool {
    if row.is_opt_in() {
        return layout.tv || row.buttons().any(|button| opted_in(layout, button));
    }

    // Image rows also carry the up/down buttons.
    if let Some(first_app) = row.app_pair() {
        return layout.apps.len() > first_app
            || row.buttons().any(|button| is_shown(layout, button));
    }

    if row == RokuRow::Extra {
        return !layout.extra_buttons.is_empty();
    }

    true
}

pub fn resolve_row_visibility(config: &CardConfig, row: RowId) -> bool {
    match (&config.layout, row) {
        (Layout::Roku(layout), RowId::Roku(row)) => roku_row_visible(layout, row),
        (Layout::Remote(layout), RowId::Grid(index)) => index < layout.rows.len(),
        _ => false,
    }
}

/// Whether a control renders as something interactive. A `false` here means
/// a placeholder, and no action is ever resolved for it.
pub fn resolve_button_visibility(config: &CardConfig, control: &ControlRef) -> bool {
    match (&config.layout, control) {
        (Layout::Roku(layout), ControlRef::Button(name)) => match RokuButton::from_key(name) {
            Some(button) => roku_row_visible(layout, button.row()) && is_shown(layout, button),
            None => false,
        },
        (Layout::Roku(_), ControlRef::App(index)) => resolve_app_slot(config, *index).is_some(),
        (Layout::Roku(layout), ControlRef::Extra(index)) => {
            roku_row_visible(layout, RokuRow::Extra) && resolve_extra_slot(config, *index).is_some()
        }
        (Layout::Remote(layout), ControlRef::Grid { row, column }) => {
            match layout.rows.get(*row).and_then(|r| r.row.get(*column)) {
                Some(ButtonSlot::Action(button)) => button.show != Some(false),
                Some(ButtonSlot::Empty) | None => false,
            }
        }
        _ => false,
    }
}

pub fn resolve_app_slot(config: &CardConfig, index: usize) -> Option<&AppSlot> {
    match &config.layout {
        Layout::Roku(layout) => layout.apps.get(index),
        Layout::Remote(_) => None,
    }
}

pub fn resolve_extra_slot(config: &CardConfig, index: usize) -> Option<&ExtraButtonSpec> {
    match &config.layout {
        Layout::Roku(layout) => layout.extra_buttons.get(index).filter(|extra| extra.show),
        Layout::Remote(_) => None,
    }
}
