//! Throw directions and drag-vector classification.
//!
//! A drag offset is classified by its dominant axis: whichever of `|x|` and
//! `|y|` is larger decides between the horizontal and vertical directions,
//! and the sign of that axis picks the side. Screen coordinates are used, so
//! a negative `y` is [`Direction::Up`].
//!
//! An exact tie between the two magnitudes (including the zero vector) has no
//! dominant axis and classifies as [`Direction::Invalid`].

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    /// No dominant axis, or a direction outside the allowed set.
    Invalid,
}

impl Direction {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Sign of the displacement along the direction's axis.
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left | Direction::Up => -1.0,
            Direction::Right | Direction::Down => 1.0,
            Direction::Invalid => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Invalid => "invalid",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "invalid" => Ok(Direction::Invalid),
            _ => Err(Error::UnknownDirection(s.to_string())),
        }
    }
}

bitflags! {
    /// Set of directions a card may be thrown out in.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Directions: u8 {
        const UP    = 0b0001;
        const DOWN  = 0b0010;
        const LEFT  = 0b0100;
        const RIGHT = 0b1000;
        const HORIZONTAL = Self::LEFT.bits() | Self::RIGHT.bits();
        const VERTICAL = Self::UP.bits() | Self::DOWN.bits();
    }
}

impl Directions {
    /// Whether `direction` is a member. [`Direction::Invalid`] never is.
    pub fn allows(self, direction: Direction) -> bool {
        self.contains(Directions::from(direction)) && direction != Direction::Invalid
    }
}

impl Default for Directions {
    fn default() -> Self {
        Directions::all()
    }
}

impl From<Direction> for Directions {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Directions::UP,
            Direction::Down => Directions::DOWN,
            Direction::Left => Directions::LEFT,
            Direction::Right => Directions::RIGHT,
            Direction::Invalid => Directions::empty(),
        }
    }
}

impl FromIterator<Direction> for Directions {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Directions::empty(), |set, d| set | Directions::from(d))
    }
}

/// Classify a drag offset by its dominant axis.
pub fn classify(offset_x: f32, offset_y: f32) -> Direction {
    let abs_x = offset_x.abs();
    let abs_y = offset_y.abs();

    if abs_x > abs_y {
        if offset_x < 0.0 {
            Direction::Left
        } else {
            Direction::Right
        }
    } else if abs_y > abs_x {
        if offset_y < 0.0 {
            Direction::Up
        } else {
            Direction::Down
        }
    } else {
        // Equal magnitudes, zero vector, or NaN input
        Direction::Invalid
    }
}

/// Classify a drag offset, reporting [`Direction::Invalid`] when the dominant
/// direction is not in `allowed`.
pub fn classify_allowed(offset_x: f32, offset_y: f32, allowed: Directions) -> Direction {
    let direction = classify(offset_x, offset_y);
    if allowed.allows(direction) {
        direction
    } else {
        Direction::Invalid
    }
}
