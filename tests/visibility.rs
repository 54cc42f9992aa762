use remote_card::{
    card::{
        roku::RokuRow,
        visibility::{
            resolve_app_slot, resolve_button_visibility, resolve_extra_slot,
            resolve_row_visibility, RowId,
        },
    },
    normalize, CardConfig, ControlRef,
};
use serde_json::{json, Value};

fn roku(extra: Value) -> CardConfig {
    let mut raw = json!({"type": "custom:roku-card", "entity": "media_player.roku"});
    if let (Some(raw), Some(extra)) = (raw.as_object_mut(), extra.as_object()) {
        raw.extend(extra.clone());
    }
    normalize(&raw).unwrap()
}

fn button(name: &str) -> ControlRef {
    ControlRef::Button(name.to_string())
}

#[test]
fn hidden_power_on_non_tv() {
    let config = roku(json!({"power": {"show": false}}));

    assert!(!resolve_button_visibility(&config, &button("power")));
    assert!(!resolve_row_visibility(&config, RowId::Roku(RokuRow::Power)));
}

#[test]
fn power_row_defaults_to_hidden() {
    let config = roku(json!({}));

    assert!(!resolve_row_visibility(&config, RowId::Roku(RokuRow::Power)));
    assert!(!resolve_button_visibility(&config, &button("power")));
    assert!(resolve_button_visibility(&config, &button("home")));
}

#[test]
fn tv_shows_opt_in_rows() {
    let config = roku(json!({"tv": true, "volume_mute": {"show": false}}));

    assert!(resolve_row_visibility(&config, RowId::Roku(RokuRow::Power)));
    assert!(resolve_row_visibility(&config, RowId::Roku(RokuRow::Volume)));
    assert!(resolve_button_visibility(&config, &button("power")));
    assert!(resolve_button_visibility(&config, &button("volume_up")));
    assert!(!resolve_button_visibility(&config, &button("volume_mute")));
}

#[test]
fn any_member_opts_a_row_in() {
    let config = roku(json!({
        "volume_up": {"show": true},
        "volume_down": {"show": false}
    }));

    assert!(resolve_row_visibility(&config, RowId::Roku(RokuRow::Volume)));
    assert!(resolve_button_visibility(&config, &button("volume_up")));
    assert!(resolve_button_visibility(&config, &button("volume_mute")));
    assert!(!resolve_button_visibility(&config, &button("volume_down")));
}

#[test]
fn row_visibility_law_holds() {
    let cases = [
        (json!({}), false),
        (json!({"tv": true}), true),
        (json!({"volume_mute": {}}), false),
        (json!({"volume_mute": {"show": false}}), false),
        (json!({"volume_down": {"show": true}}), true),
        (json!({"tv": true, "volume_down": {"show": false}}), true),
    ];

    for (extra, expected) in cases {
        let config = roku(extra.clone());
        let row = RowId::Roku(RokuRow::Volume);
        assert_eq!(resolve_row_visibility(&config, row), expected, "{}", extra);
        assert_eq!(
            resolve_row_visibility(&config, row),
            resolve_row_visibility(&config, row),
            "{}",
            extra
        );
    }
}

#[test]
fn fixed_rows_always_show() {
    let config = roku(json!({"back": {"show": false}, "info": {"show": false}, "home": {"show": false}}));

    for row in [RokuRow::Navigation, RokuRow::Dpad, RokuRow::Transport] {
        assert!(resolve_row_visibility(&config, RowId::Roku(row)));
    }
    assert!(!resolve_button_visibility(&config, &button("back")));
}

#[test]
fn app_rows_follow_apps() {
    let config = roku(json!({
        "up": {"show": false},
        "down": {"show": false},
        "apps": [{"app": "Netflix"}]
    }));

    assert!(resolve_row_visibility(&config, RowId::Roku(RokuRow::AppsTop)));
    assert!(!resolve_row_visibility(&config, RowId::Roku(RokuRow::AppsBottom)));
    assert!(resolve_button_visibility(&config, &ControlRef::App(0)));
    assert!(!resolve_button_visibility(&config, &ControlRef::App(1)));
    assert_eq!(resolve_app_slot(&config, 0).map(|a| a.app.as_str()), Some("Netflix"));
    assert!(resolve_app_slot(&config, 1).is_none());
}

#[test]
fn extra_row_and_slots() {
    let empty = roku(json!({}));
    assert!(!resolve_row_visibility(&empty, RowId::Roku(RokuRow::Extra)));

    let config = roku(json!({
        "extra_buttons": [
            {"title": "Search", "icon": "mdi:magnify"},
            {"title": "Hidden", "icon": "mdi:eye-off", "show": false}
        ]
    }));
    assert!(resolve_row_visibility(&config, RowId::Roku(RokuRow::Extra)));
    assert!(resolve_button_visibility(&config, &ControlRef::Extra(0)));
    assert!(!resolve_button_visibility(&config, &ControlRef::Extra(1)));
    assert!(!resolve_button_visibility(&config, &ControlRef::Extra(2)));
    assert!(resolve_extra_slot(&config, 1).is_none());
}

#[test]
fn generic_rows_and_buttons() {
    let config = normalize(&json!({
        "type": "custom:remote-card",
        "entity": "remote.tv",
        "buttons": [
            {"row": [{"empty": true}, {"name": "up"}, {"name": "menu", "show": false}]},
            {"row": []}
        ]
    }))
    .unwrap();

    assert!(resolve_row_visibility(&config, RowId::Grid(0)));
    assert!(resolve_row_visibility(&config, RowId::Grid(1)));
    assert!(!resolve_row_visibility(&config, RowId::Grid(2)));

    let grid = |row, column| ControlRef::Grid { row, column };
    assert!(!resolve_button_visibility(&config, &grid(0, 0)));
    assert!(resolve_button_visibility(&config, &grid(0, 1)));
    assert!(!resolve_button_visibility(&config, &grid(0, 2)));
    assert!(!resolve_button_visibility(&config, &grid(0, 3)));
    assert!(!resolve_button_visibility(&config, &button("up")));
}
