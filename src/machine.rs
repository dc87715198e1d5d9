//! Grid state machine.
//!
//! Every cell of the grid is a state and the four cardinal directions are the
//! transitions between neighboring cells:
//!
//! ```text
//! (1,1) SOUTH -> (1,2)
//! (1,1) NORTH -> (1,0)
//! (1,1) EAST  -> (2,1)
//! (1,1) WEST  -> (0,1)
//! ```
//!
//! A [`TransitionHooks`] implementor is consulted before the destination is
//! entered (it may cancel the move) and after it has been entered.

use tracing::{trace, warn};

use crate::direction::Direction;
use crate::error::MachineError;
use crate::grid::{Grid, Position};
use crate::tile::Tile;

/// Identifies a visited state: the tile seen on entry plus where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateKey {
    pub tile: Tile,
    pub position: Position,
}

/// Callbacks run around every accepted move.
pub trait TransitionHooks {
    /// Runs before the destination is entered. Cancelling the event keeps the
    /// machine where it is and skips [`TransitionHooks::enter`].
    fn before(&mut self, event: &mut Transition<'_>) -> Result<(), MachineError>;

    /// Runs once the machine stands on the destination.
    fn enter(&mut self, event: &mut Transition<'_>) -> Result<(), MachineError>;
}

/// One proposed move. Only lives for the duration of a single
/// [`Machine::transition`] call.
#[derive(Debug)]
pub struct Transition<'m> {
    pub direction: Direction,
    /// Destination tile as it was when the move was proposed
    pub dst: Tile,
    pub dst_pos: Position,
    cancelled: bool,
    grid: &'m mut Grid,
    position: &'m mut Position,
    teleports: &'m [Position],
}

impl<'m> Transition<'m> {
    /// Reject the move. Only meaningful from [`TransitionHooks::before`].
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn state_key(&self) -> StateKey {
        StateKey {
            tile: self.dst,
            position: self.dst_pos,
        }
    }

    pub fn position(&self) -> Position {
        *self.position
    }

    pub fn tile_at(&self, pos: Position) -> Tile {
        self.grid.get_cell(pos.x, pos.y)
    }

    /// Overwrite a single tile in place
    pub fn mutate_tile(&mut self, pos: Position, tile: Tile) {
        self.grid.set_cell(pos.x, pos.y, tile);
    }

    /// Relocate the machine without running any hook
    pub fn force_position(&mut self, pos: Position) {
        *self.position = pos;
    }

    pub fn teleport_destination(&self, from: Position) -> Result<Position, MachineError> {
        paired_teleport(self.teleports, from)
    }
}

/// 2D grid finite state machine
#[derive(Debug, Clone)]
pub struct Machine {
    grid: Grid,
    position: Position,
    teleports: Vec<Position>,
}

impl Machine {
    /// Build a machine standing on the grid's start tile.
    ///
    /// Teleports are collected in row-major order; a bad teleport count is
    /// only reported when a teleport is actually used.
    pub fn new(grid: Grid) -> Result<Self, MachineError> {
        let position = grid
            .find_all(Tile::Start)
            .first()
            .copied()
            .ok_or(MachineError::MissingStart)?;
        let teleports = grid.find_all(Tile::Teleport);
        if !teleports.is_empty() && teleports.len() != 2 {
            warn!(count = teleports.len(), "grid does not hold a teleport pair");
        }

        Ok(Machine {
            grid,
            position,
            teleports,
        })
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn teleports(&self) -> &[Position] {
        &self.teleports
    }

    /// Move one cell in `direction`, running the hooks around the move.
    ///
    /// Stepping off the grid is the only failure of the machine itself; a
    /// cancelled move is a normal outcome and returns `Ok`.
    pub fn transition<H>(&mut self, direction: Direction, hooks: &mut H) -> Result<(), MachineError>
    where
        H: TransitionHooks + ?Sized,
    {
        let dst_pos = self.position.offset(direction.offset());
        if !self.grid.in_bounds(dst_pos.x, dst_pos.y) {
            return Err(MachineError::OutOfBounds {
                x: dst_pos.x,
                y: dst_pos.y,
            });
        }

        let dst = self.grid.get_cell(dst_pos.x, dst_pos.y);
        let mut event = Transition {
            direction,
            dst,
            dst_pos,
            cancelled: false,
            grid: &mut self.grid,
            position: &mut self.position,
            teleports: &self.teleports,
        };

        hooks.before(&mut event)?;
        if event.cancelled {
            trace!(%direction, at = %dst_pos, "transition cancelled");
            return Ok(());
        }

        *event.position = dst_pos;
        hooks.enter(&mut event)
    }

    /// Overwrite a single tile in place
    pub fn mutate_tile(&mut self, pos: Position, tile: Tile) {
        self.grid.set_cell(pos.x, pos.y, tile);
    }

    /// Relocate the machine without running any hook
    pub fn force_position(&mut self, pos: Position) {
        self.position = pos;
    }

    /// Destination of the teleport standing at `from`
    pub fn teleport_destination(&self, from: Position) -> Result<Position, MachineError> {
        paired_teleport(&self.teleports, from)
    }
}

fn paired_teleport(teleports: &[Position], from: Position) -> Result<Position, MachineError> {
    match teleports {
        [first, second] if *first == from => Ok(*second),
        [first, _] => Ok(*first),
        _ => Err(MachineError::TeleportsMisconfigured {
            found: teleports.len(),
        }),
    }
}
