//! Tile effects: how the agent reacts to the machine's transitions.
//!
//! `before` only filters obstacles, `enter` applies the effect of the tile
//! that was just entered and records the move.

use tracing::debug;

use crate::agent::Agent;
use crate::error::MachineError;
use crate::machine::{Transition, TransitionHooks};
use crate::tile::Tile;

impl Agent {
    fn bounce(&mut self, event: &mut Transition<'_>) {
        self.hit_obstacle();
        self.advance_priority();
        event.cancel();
    }
}

impl TransitionHooks for Agent {
    fn before(&mut self, event: &mut Transition<'_>) -> Result<(), MachineError> {
        match event.dst {
            Tile::Wall => self.bounce(event),
            Tile::Obstacle if self.breaker() => {
                debug!(at = %event.dst_pos, "obstacle destroyed");
                event.mutate_tile(event.dst_pos, Tile::Empty);
            }
            Tile::Obstacle => self.bounce(event),
            _ => {}
        }
        Ok(())
    }

    fn enter(&mut self, event: &mut Transition<'_>) -> Result<(), MachineError> {
        if self.is_hurt() {
            self.back_on_track();
        }

        match event.dst {
            Tile::Breaker => self.toggle_breaker(),
            Tile::Modifier(dir) => self.set_modifier(dir),
            Tile::Inverter => self.toggle_inversion(),
            Tile::Teleport => {
                let target = event.teleport_destination(event.dst_pos)?;
                debug!(from = %event.dst_pos, to = %target, "teleported");
                event.force_position(target);
            }
            Tile::Booth => self.reach_booth(),
            _ => {}
        }

        self.remember(event.direction, event.state_key());
        Ok(())
    }
}
