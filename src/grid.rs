use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GridError;
use crate::tile::Tile;

/// A cell address on the grid: x is the column, y the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Neighbor reached by moving (dx, dy)
    pub fn offset(&self, (dx, dy): (i32, i32)) -> Position {
        Position::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Grid structure for storing maze tiles, row-major
#[derive(Clone, Debug)]
pub struct Grid {
    pub rows: i32,
    pub cols: i32,
    pub cells: Vec<Tile>,
    /// Revision number - incremented whenever a tile changes
    pub revision: u64,
}

impl Grid {
    /// Create a new grid with all cells set to empty
    pub fn new(rows: i32, cols: i32) -> Self {
        Grid {
            rows,
            cols,
            cells: vec![Tile::Empty; (rows * cols) as usize],
            revision: 0,
        }
    }

    /// Create a walled frame of the given size with an empty interior
    pub fn framed(rows: i32, cols: i32) -> Self {
        let mut grid = Self::new(rows, cols);
        for y in 0..rows {
            for x in 0..cols {
                if x == 0 || y == 0 || x == cols - 1 || y == rows - 1 {
                    let id = grid.get_id(x, y);
                    grid.cells[id as usize] = Tile::Wall;
                }
            }
        }
        grid
    }

    /// Parse maze rows into a grid.
    ///
    /// The maze must be rectangular, hold exactly one start tile and either
    /// zero or two teleports.
    pub fn parse<S: AsRef<str>>(plan: &[S]) -> Result<Self, GridError> {
        let first = plan.first().ok_or(GridError::Empty)?;
        let cols = first.as_ref().chars().count();
        if cols == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(cols * plan.len());
        let mut starts = 0;
        let mut teleports = 0;

        for (y, row) in plan.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != cols {
                return Err(GridError::Ragged {
                    row: y,
                    expected: cols,
                    found,
                });
            }

            for (x, symbol) in row.chars().enumerate() {
                let tile = Tile::from_symbol(symbol).ok_or(GridError::UnknownSymbol { symbol, x, y })?;
                match tile {
                    Tile::Start => starts += 1,
                    Tile::Teleport => teleports += 1,
                    _ => {}
                }
                cells.push(tile);
            }
        }

        if starts != 1 {
            return Err(GridError::StartCount(starts));
        }
        if teleports != 0 && teleports != 2 {
            return Err(GridError::TeleportCount(teleports));
        }

        Ok(Grid {
            rows: plan.len() as i32,
            cols: cols as i32,
            cells,
            revision: 0,
        })
    }

    /// Parse a maze from text, one row per line. Blank lines are skipped.
    pub fn from_text(text: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty())
            .collect();
        Self::parse(&rows)
    }

    /// Render the grid back into maze rows
    pub fn render(&self) -> Vec<String> {
        (0..self.rows)
            .map(|y| (0..self.cols).map(|x| self.get_cell(x, y).symbol()).collect())
            .collect()
    }

    /// Check if (x, y) lies on the grid
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.cols && y >= 0 && y < self.rows
    }

    /// Convert (x, y) coordinates to cell ID
    pub fn get_id(&self, x: i32, y: i32) -> i32 {
        x + y * self.cols
    }

    /// Convert cell ID to (x, y) coordinates
    pub fn get_coords(&self, id: i32) -> (i32, i32) {
        (id % self.cols, id / self.cols)
    }

    /// Get the tile at (x, y)
    pub fn get_cell(&self, x: i32, y: i32) -> Tile {
        if !self.in_bounds(x, y) {
            return Tile::Wall; // Out of bounds is treated as wall
        }
        self.cells[self.get_id(x, y) as usize]
    }

    /// Set the tile at (x, y)
    pub fn set_cell(&mut self, x: i32, y: i32, tile: Tile) {
        if self.in_bounds(x, y) {
            let id = self.get_id(x, y);
            let old_tile = self.cells[id as usize];
            if old_tile != tile {
                self.cells[id as usize] = tile;
                self.revision += 1;
            }
        }
    }

    /// Positions of every tile of the given kind, row-major
    pub fn find_all(&self, tile: Tile) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &t)| t == tile)
            .map(|(id, _)| {
                let (x, y) = self.get_coords(id as i32);
                Position::new(x, y)
            })
            .collect()
    }

    /// Get current grid revision number
    pub fn get_revision(&self) -> u64 {
        self.revision
    }
}
