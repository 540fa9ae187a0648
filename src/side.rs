// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use nalgebra::Vector2;

use crate::ConfigError;

pub const LEFT_SIDE_INDEX: usize = 0;
pub const RIGHT_SIDE_INDEX: usize = 1;
pub const TOP_SIDE_INDEX: usize = 2;
pub const BOTTOM_SIDE_INDEX: usize = 3;

/// One of the four edges of the icon body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

    /// Index used by stored preferences (0: left, 1: right, 2: top, 3:
    /// bottom).
    pub fn index(&self) -> usize {
        match self {
            Side::Left => LEFT_SIDE_INDEX,
            Side::Right => RIGHT_SIDE_INDEX,
            Side::Top => TOP_SIDE_INDEX,
            Side::Bottom => BOTTOM_SIDE_INDEX,
        }
    }

    pub fn from_index(index: i64) -> Result<Side, ConfigError> {
        match index {
            0 => Ok(Side::Left),
            1 => Ok(Side::Right),
            2 => Ok(Side::Top),
            3 => Ok(Side::Bottom),
            _ => Err(ConfigError::InvalidSide(index)),
        }
    }

    pub fn opposite(&self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
        }
    }

    /// Unit vector pointing away from the body through this side.
    pub fn outward(&self) -> Vector2<f64> {
        match self {
            Side::Left => Vector2::new(-1.0, 0.0),
            Side::Right => Vector2::new(1.0, 0.0),
            Side::Top => Vector2::new(0.0, 1.0),
            Side::Bottom => Vector2::new(0.0, -1.0),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Top => "top",
            Side::Bottom => "bottom",
        };
        write!(f, "{name}")
    }
}

/// Number of ports on each side of the icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SideCounts {
    pub left: usize,
    pub right: usize,
    pub top: usize,
    pub bottom: usize,
}

impl SideCounts {
    pub fn get(&self, side: Side) -> usize {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
            Side::Top => self.top,
            Side::Bottom => self.bottom,
        }
    }

    pub(crate) fn get_mut(&mut self, side: Side) -> &mut usize {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
            Side::Top => &mut self.top,
            Side::Bottom => &mut self.bottom,
        }
    }

    pub fn total(&self) -> usize {
        self.left + self.right + self.top + self.bottom
    }

    /// Ports in the taller of the left and right columns.
    pub fn max_vertical(&self) -> usize {
        self.left.max(self.right)
    }

    /// Ports in the wider of the top and bottom rows.
    pub fn max_horizontal(&self) -> usize {
        self.top.max(self.bottom)
    }

    /// Returns `true` when `side` holds fewer than half the ports of the
    /// opposite side.
    pub fn is_crowded_out(&self, side: Side) -> bool {
        self.get(side) * 2 < self.get(side.opposite())
    }
}
