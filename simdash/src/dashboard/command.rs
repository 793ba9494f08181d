use crate::dashboard::position::Direction;
use serde::Deserialize;
use strum_macros::{Display, EnumString};

/// The six tokens the control layer emits. `A` and `B` are reserved and have no behavior beyond being reported.
#[derive(Clone, Copy, Debug, Deserialize, Display, EnumString, Eq, Hash, PartialEq)]
pub enum ControlToken {
    #[serde(rename = "up")]
    #[strum(serialize = "up")]
    Up,

    #[serde(rename = "down")]
    #[strum(serialize = "down")]
    Down,

    #[serde(rename = "left")]
    #[strum(serialize = "left")]
    Left,

    #[serde(rename = "right")]
    #[strum(serialize = "right")]
    Right,

    A,
    B,
}

impl ControlToken {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::Up => Some(Direction::Up),
            Self::Down => Some(Direction::Down),
            Self::Left => Some(Direction::Left),
            Self::Right => Some(Direction::Right),
            Self::A | Self::B => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Up => "↑",
            Self::Down => "↓",
            Self::Left => "←",
            Self::Right => "→",
            Self::A => "A",
            Self::B => "B",
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case", tag = "command", content = "args")]
pub enum Command {
    Control(ControlToken),
    Quit,
}
