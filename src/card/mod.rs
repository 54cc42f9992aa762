pub mod action;
pub mod config;
pub mod dispatch;
pub mod entity;
pub mod error;
pub mod resolver;
pub mod roku;
pub mod state;
pub mod view;
pub mod visibility;

use log::{debug, error, info, warn};
use serde_json::Value;

use self::{
    config::{normalize, CardConfig},
    dispatch::{dispatch, ActionExecutor, InteractionEvent},
    resolver::resolve_action,
    state::StateLookup,
    view::{card_size, render, CardView, EMPTY_CARD_SIZE},
    visibility::resolve_button_visibility,
};

/// A remote card instance. Holds the current normalized configuration, if
/// any, and never lets a configuration problem escape to the host.
#[derive(Debug, Default)]
pub struct Card {
    config: Option<CardConfig>,
}

impl Card {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration wholesale. An invalid configuration leaves
    /// the card without one, so it renders blank.
    pub fn set_config(&mut self, raw: &Value) -> bool {
        match normalize(raw) {
            Ok(config) => {
                info!(
                    "Loaded {} for {}",
                    config.variant(),
                    config
                        .entity
                        .as_deref()
                        .or(config.remote.as_deref())
                        .unwrap_or_default()
                );
                self.config = Some(config);
                true
            }
            Err(e) => {
                error!("{}", e);
                self.config = None;
                false
            }
        }
    }

    pub fn config(&self) -> Option<&CardConfig> {
        self.config.as_ref()
    }

    pub fn render(&self, states: &dyn StateLookup) -> CardView {
        match &self.config {
            Some(config) => render(config, states),
            None => CardView::Blank,
        }
    }

    pub fn card_size(&self) -> usize {
        self.config.as_ref().map(card_size).unwrap_or(EMPTY_CARD_SIZE)
    }

    /// Resolves and dispatches one interaction. Returns whether anything was
    /// handed to the executor. Controls that render as placeholders never
    /// dispatch.
    pub fn handle_action(&self, event: &InteractionEvent, executor: &dyn ActionExecutor) -> bool {
        let Some(config) = &self.config else {
            warn!("[{}] Ignoring interaction, no configuration", event.control);
            return false;
        };
        if !resolve_button_visibility(config, &event.control) {
            debug!("[{}] Ignoring interaction on hidden control", event.control);
            return false;
        }

        match resolve_action(config, &event.control, event.kind) {
            Some(action) => {
                dispatch(event, action, executor);
                true
            }
            None => {
                warn!("[{}] Unknown control", event.control);
                false
            }
        }
    }
}
