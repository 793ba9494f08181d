use crate::{error::Error, utils::any::Any};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumIter};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Width and height of a viewport in logical units; never negative.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(0),
            height: height.max(0),
        }
    }

    pub fn at_least(self, min: Self) -> Self {
        Self::new(self.width.max(min.width), self.height.max(min.height))
    }
}

#[derive(Clone, Copy, Debug, Display, EnumIter, Eq, Hash, PartialEq)]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn delta(self, step_size: i32) -> (i32, i32) {
        match self {
            Self::Up => (0, -step_size),
            Self::Down => (0, step_size),
            Self::Left => (-step_size, 0),
            Self::Right => (step_size, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Movement {
    Moved(Position),
    Unchanged(Position),
}

/// The simulated agent's position within the map viewport.
///
/// The position always satisfies `0 <= x <= width - size` and `top_margin <= y <= height - size`. When the viewport
/// is too small to fit the marker, the lower bound wins.
#[derive(Clone, Debug)]
pub struct PositionModel {
    position: Position,
    size: i32,
    step_size: i32,
    top_margin: i32,
    bounds: Size,
}

impl PositionModel {
    pub fn new(size: i32, step_size: i32, top_margin: i32, bounds: Size) -> Self {
        let centered = Position::new((bounds.width - size) / 2, (bounds.height - size) / 2);

        Self::with_position(centered, size, step_size, top_margin, bounds)
    }

    pub fn with_position(position: Position, size: i32, step_size: i32, top_margin: i32, bounds: Size) -> Self {
        let mut position_model = Self {
            position,
            size,
            step_size,
            top_margin,
            bounds,
        };

        position_model.position = position_model.clamp(position);

        position_model
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    fn max_x(&self) -> i32 {
        (self.bounds.width - self.size).max(0)
    }

    fn max_y(&self) -> i32 {
        (self.bounds.height - self.size).max(self.top_margin)
    }

    fn clamp(&self, position: Position) -> Position {
        Position::new(
            position.x.clamp(0, self.max_x()),
            position.y.clamp(self.top_margin, self.max_y()),
        )
    }

    pub fn step(&mut self, direction: Direction) -> Movement {
        let (dx, dy) = direction.delta(self.step_size);
        let target = Position::new(self.position.x.saturating_add(dx), self.position.y.saturating_add(dy));
        let clamped = self.clamp(target);

        if clamped == self.position {
            return Movement::Unchanged(clamped);
        }

        self.position = clamped;

        Movement::Moved(clamped)
    }

    pub fn set_bounds(&mut self, bounds: Size) -> Movement {
        self.bounds = bounds;

        let clamped = self.clamp(self.position);

        if clamped == self.position {
            Movement::Unchanged(clamped)
        } else {
            self.position = clamped;

            Movement::Moved(clamped)
        }
    }
}

impl FromStr for Position {
    type Err = Error;

    // NOTE: accepts "x,y" as used by the replay command's --start flag
    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidPosition(string.to_owned());
        let (x, y) = string.split_once(',').ok_or_else(invalid)?;
        let x = x.trim().parse().map_err(|_parse_err| invalid())?;
        let y = y.trim().parse().map_err(|_parse_err| invalid())?;

        Self::new(x, y).ok()
    }
}
