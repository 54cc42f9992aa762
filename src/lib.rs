pub mod card;

pub use card::{
    action::{ActionKind, ActionOverride, ActionSpec},
    config::{normalize, CardConfig},
    dispatch::{dispatch, ActionExecutor, ControlRef, InteractionEvent, InteractionKind},
    error::CardError,
    resolver::resolve_action,
    state::{DeviceState, StateLookup},
    view::{render, CardView, ControlView},
    Card,
};
