use serde::{Deserialize, Serialize};
use std::fmt;

/// Cardinal direction, used both as a move request and as a recorded path step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    South,
    North,
    East,
    West,
}

impl Direction {
    /// Default priority order used when no modifier is active
    pub const PRIORITIES: [Direction; 4] = [
        Direction::South,
        Direction::East,
        Direction::North,
        Direction::West,
    ];

    /// Unit offset (dx, dy); y grows downwards like the maze rows
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::South => (0, 1),
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::South => "SOUTH",
            Direction::North => "NORTH",
            Direction::East => "EAST",
            Direction::West => "WEST",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
