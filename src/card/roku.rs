use serde::{Deserialize, Serialize};

/// The named buttons of the streaming-media remote.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RokuButton {
    Power,
    Back,
    Info,
    Home,
    Up,
    Left,
    Select,
    Right,
    Down,
    Reverse,
    Play,
    Forward,
    VolumeMute,
    VolumeDown,
    VolumeUp,
}

impl RokuButton {
    pub const ALL: [RokuButton; 15] = [
        RokuButton::Power,
        RokuButton::Back,
        RokuButton::Info,
        RokuButton::Home,
        RokuButton::Up,
        RokuButton::Left,
        RokuButton::Select,
        RokuButton::Right,
        RokuButton::Down,
        RokuButton::Reverse,
        RokuButton::Play,
        RokuButton::Forward,
        RokuButton::VolumeMute,
        RokuButton::VolumeDown,
        RokuButton::VolumeUp,
    ];

    /// Config key, and the command sent to the remote.
    pub fn key(self) -> &'static str {
        match self {
            RokuButton::Power => "power",
            RokuButton::Back => "back",
            RokuButton::Info => "info",
            RokuButton::Home => "home",
            RokuButton::Up => "up",
            RokuButton::Left => "left",
            RokuButton::Select => "select",
            RokuButton::Right => "right",
            RokuButton::Down => "down",
            RokuButton::Reverse => "reverse",
            RokuButton::Play => "play",
            RokuButton::Forward => "forward",
            RokuButton::VolumeMute => "volume_mute",
            RokuButton::VolumeDown => "volume_down",
            RokuButton::VolumeUp => "volume_up",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|button| button.key() == key)
    }

    pub fn icon(self) -> &'static str {
        match self {
            RokuButton::Power => "mdi:power",
            RokuButton::Back => "mdi:arrow-left",
            RokuButton::Info => "mdi:asterisk",
            RokuButton::Home => "mdi:home",
            RokuButton::Up => "mdi:chevron-up",
            RokuButton::Left => "mdi:chevron-left",
            RokuButton::Select => "mdi:checkbox-blank-circle",
            RokuButton::Right => "mdi:chevron-right",
            RokuButton::Down => "mdi:chevron-down",
            RokuButton::Reverse => "mdi:rewind",
            RokuButton::Play => "mdi:play-pause",
            RokuButton::Forward => "mdi:fast-forward",
            RokuButton::VolumeMute => "mdi:volume-mute",
            RokuButton::VolumeDown => "mdi:volume-minus",
            RokuButton::VolumeUp => "mdi:volume-plus",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            RokuButton::Power => "Power",
            RokuButton::Back => "Back",
            RokuButton::Info => "Info",
            RokuButton::Home => "Home",
            RokuButton::Up => "Up",
            RokuButton::Left => "Left",
            RokuButton::Select => "Select",
            RokuButton::Right => "Right",
            RokuButton::Down => "Down",
            RokuButton::Reverse => "Rewind",
            RokuButton::Play => "Play/Pause",
            RokuButton::Forward => "Fast-Forward",
            RokuButton::VolumeMute => "Volume Mute",
            RokuButton::VolumeDown => "Volume Down",
            RokuButton::VolumeUp => "Volume Up",
        }
    }

    pub fn row(self) -> RokuRow {
        match self {
            RokuButton::Power => RokuRow::Power,
            RokuButton::Back | RokuButton::Info | RokuButton::Home => RokuRow::Navigation,
            RokuButton::Up => RokuRow::AppsTop,
            RokuButton::Left | RokuButton::Select | RokuButton::Right => RokuRow::Dpad,
            RokuButton::Down => RokuRow::AppsBottom,
            RokuButton::Reverse | RokuButton::Play | RokuButton::Forward => RokuRow::Transport,
            RokuButton::VolumeMute | RokuButton::VolumeDown | RokuButton::VolumeUp => {
                RokuRow::Volume
            }
        }
    }
}

/// One cell of a fixed row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RokuCell {
    Button(RokuButton),
    App(usize),
    Extra(usize),
}

/// Rows of the streaming-media remote, top to bottom.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RokuRow {
    Power,
    Navigation,
    AppsTop,
    Dpad,
    AppsBottom,
    Transport,
    Volume,
    Extra,
}

impl RokuRow {
    pub const ALL: [RokuRow; 8] = [
        RokuRow::Power,
        RokuRow::Navigation,
        RokuRow::AppsTop,
        RokuRow::Dpad,
        RokuRow::AppsBottom,
        RokuRow::Transport,
        RokuRow::Volume,
        RokuRow::Extra,
    ];

    pub fn cells(self) -> &'static [RokuCell] {
        use RokuButton::*;
        use RokuCell::{App, Button, Extra};

        match self {
            RokuRow::Power => &[Button(Power)],
            RokuRow::Navigation => &[Button(Back), Button(Info), Button(Home)],
            RokuRow::AppsTop => &[App(0), Button(Up), App(1)],
            RokuRow::Dpad => &[Button(Left), Button(Select), Button(Right)],
            RokuRow::AppsBottom => &[App(2), Button(Down), App(3)],
            RokuRow::Transport => &[Button(Reverse), Button(Play), Button(Forward)],
            RokuRow::Volume => &[Button(VolumeMute), Button(VolumeDown), Button(VolumeUp)],
            RokuRow::Extra => &[Extra(0), Extra(1), Extra(2)],
        }
    }

    pub fn buttons(self) -> impl Iterator<Item = RokuButton> {
        self.cells().iter().filter_map(|cell| match cell {
            RokuCell::Button(button) => Some(*button),
            _ => None,
        })
    }

    /// Rows that only show up when the device is a TV or a member opted in.
    pub fn is_opt_in(self) -> bool {
        matches!(self, RokuRow::Power | RokuRow::Volume)
    }

    /// Index of the first app slot of an image row.
    pub fn app_pair(self) -> Option<usize> {
        match self {
            RokuRow::AppsTop => Some(0),
            RokuRow::AppsBottom => Some(2),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_button_lives_in_its_row() {
        for button in RokuButton::ALL {
            assert!(button.row().buttons().any(|b| b == button), "{:?}", button);
        }
    }

    #[test]
    fn keys_round_trip() {
        for button in RokuButton::ALL {
            assert_eq!(RokuButton::from_key(button.key()), Some(button));
        }
        assert_eq!(RokuButton::from_key("search"), None);
    }
}
