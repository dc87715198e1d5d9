use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::direction::Direction;
use crate::error::Result;
use crate::grid::Position;
use crate::tile::Tile;

/// Outcome of a single transition attempt
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunEvent {
    /// Plain move onto the destination
    Moved { direction: Direction, from: Position, to: Position },
    /// Move cancelled by a wall or an intact obstacle
    Blocked { direction: Direction, at: Position, tile: Tile },
    /// Obstacle smashed in breaker mode, the agent now stands on it
    Destroyed { direction: Direction, at: Position },
    /// Entered a teleport and landed on its twin
    Teleported { direction: Direction, from: Position, to: Position },
    /// Booth reached
    Finished,
    /// Revisit threshold exceeded
    LoopDetected,
}

/// Logged event with its transition number
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// 1-based index of the transition attempt
    pub step: u64,
    pub event: RunEvent,
}

/// Event recorder for a single run
#[derive(Clone, Debug, Default)]
pub struct RunLog {
    events: Vec<LoggedEvent>,
}

impl RunLog {
    pub fn new() -> Self {
        RunLog { events: Vec::new() }
    }

    pub fn log(&mut self, step: u64, event: RunEvent) {
        self.events.push(LoggedEvent { step, event });
    }

    /// Get all logged events
    pub fn events(&self) -> &[LoggedEvent] {
        &self.events
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.events)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a log saved by `save_to_file`
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let events: Vec<LoggedEvent> = serde_json::from_str(&json)?;
        Ok(RunLog { events })
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut moves = 0;
        let mut blocked = 0;
        let mut destroyed = 0;
        let mut teleports = 0;
        let mut outcome = "unfinished";

        for logged in &self.events {
            match &logged.event {
                RunEvent::Moved { .. } => moves += 1,
                RunEvent::Blocked { .. } => blocked += 1,
                RunEvent::Destroyed { .. } => {
                    moves += 1;
                    destroyed += 1;
                }
                RunEvent::Teleported { .. } => {
                    moves += 1;
                    teleports += 1;
                }
                RunEvent::Finished => outcome = "booth reached",
                RunEvent::LoopDetected => outcome = "loop detected",
            }
        }

        let steps = self.events.last().map(|e| e.step).unwrap_or(0);

        format!(
            "Transitions: {} ({} moves, {} blocked)\n\
             Obstacles destroyed: {}, teleports taken: {}\n\
             Outcome: {}",
            steps, moves, blocked, destroyed, teleports, outcome
        )
    }
}
