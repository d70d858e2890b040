use std::fmt;

use serde::{Deserialize, Serialize};

/// Orientation of a move through waypoint space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// No movement
    #[serde(rename = "none")]
    None,
    /// Towards the upper right
    #[serde(rename = "bimodal")]
    Bimodal,
    /// Towards the lower right
    #[serde(rename = "near-0")]
    Near0,
    /// Towards the upper left
    #[serde(rename = "near-1")]
    Near1,
    /// Towards the origin
    #[serde(rename = "middle")]
    Middle,
}

impl Direction {
    /// Classifies a delta. The branches are checked in order, so a move along
    /// an axis (one delta exactly 0) falls into the first matching quadrant.
    pub fn classify(delta_x: f64, delta_y: f64) -> Self {
        if delta_x == 0.0 && delta_y == 0.0 {
            Direction::None
        } else if delta_x > 0.0 && delta_y > 0.0 {
            Direction::Bimodal
        } else if delta_x > 0.0 {
            Direction::Near0
        } else if delta_y > 0.0 {
            Direction::Near1
        } else {
            Direction::Middle
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Direction::None => "none",
            Direction::Bimodal => "bimodal",
            Direction::Near0 => "near-0",
            Direction::Near1 => "near-1",
            Direction::Middle => "middle",
        }
    }

    /// LaTeX arrow for plot annotations, empty for no movement.
    pub fn arrow(&self) -> &'static str {
        match self {
            Direction::None => "",
            Direction::Bimodal => r"$\nearrow$",
            Direction::Near0 => r"$\searrow$",
            Direction::Near1 => r"$\nwarrow$",
            Direction::Middle => r"$\swarrow$",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
