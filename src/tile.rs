use serde::{Deserialize, Serialize};

use crate::direction::Direction;

/// A single maze cell. Each variant maps to exactly one symbol of the maze text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    Empty,
    Start,
    /// Terminal tile: entering it ends the run
    Booth,
    /// Breakable in breaker mode, a wall otherwise
    Obstacle,
    Breaker,
    Teleport,
    Inverter,
    /// Forces a direction until the next obstacle
    Modifier(Direction),
}

impl Tile {
    /// Parse a maze symbol. Returns None for characters outside the alphabet.
    pub fn from_symbol(symbol: char) -> Option<Tile> {
        let tile = match symbol {
            '#' => Tile::Wall,
            ' ' => Tile::Empty,
            '@' => Tile::Start,
            '$' => Tile::Booth,
            'X' => Tile::Obstacle,
            'B' => Tile::Breaker,
            'T' => Tile::Teleport,
            'I' => Tile::Inverter,
            'S' => Tile::Modifier(Direction::South),
            'N' => Tile::Modifier(Direction::North),
            'E' => Tile::Modifier(Direction::East),
            'W' => Tile::Modifier(Direction::West),
            _ => return None,
        };
        Some(tile)
    }

    pub fn symbol(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Empty => ' ',
            Tile::Start => '@',
            Tile::Booth => '$',
            Tile::Obstacle => 'X',
            Tile::Breaker => 'B',
            Tile::Teleport => 'T',
            Tile::Inverter => 'I',
            Tile::Modifier(Direction::South) => 'S',
            Tile::Modifier(Direction::North) => 'N',
            Tile::Modifier(Direction::East) => 'E',
            Tile::Modifier(Direction::West) => 'W',
        }
    }
}
