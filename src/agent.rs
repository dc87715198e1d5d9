use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::direction::Direction;
use crate::machine::StateKey;

/// What a finished run reports: the recorded moves, or the loop sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Path(Vec<Direction>),
    Loop,
}

impl fmt::Display for Route {
    /// One entry per line, `LOOP` for an endless run
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Loop => f.write_str("LOOP"),
            Route::Path(steps) => {
                for (i, step) in steps.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}", step)?;
                }
                Ok(())
            }
        }
    }
}

/// Agent walking the maze with fixed priorities
///
/// The agent never looks at the grid itself: it is told about obstacles and
/// entered tiles through the machine's hooks (see `effects`) and answers with
/// the direction it wants to take next.
#[derive(Clone, Debug)]
pub struct Agent {
    done: bool,
    breaker: bool,
    /// Set when the last attempted move ran into an obstacle
    hurt: bool,
    /// Restart from the first priority on the next obstacle
    reset_dir: bool,
    invert_pending: bool,
    current: usize,
    priorities: [Direction; 4],
    modifier: Option<Direction>,
    path: Vec<Direction>,
    visited: HashSet<StateKey>,
    loop_count: usize,
    max_states: usize,
}

impl Agent {
    /// Create an agent for a maze with `max_states` walkable cells (frame excluded)
    pub fn new(max_states: usize) -> Self {
        Agent {
            done: false,
            breaker: false,
            hurt: false,
            reset_dir: false,
            invert_pending: false,
            current: 0,
            priorities: Direction::PRIORITIES,
            modifier: None,
            path: Vec::new(),
            visited: HashSet::new(),
            loop_count: 0,
            max_states,
        }
    }

    /// True once the booth has been entered
    pub fn done(&self) -> bool {
        self.done
    }

    /// True once more consecutive revisits than walkable cells were seen
    pub fn looped(&self) -> bool {
        self.loop_count > self.max_states
    }

    /// Direction the agent wants to take next
    pub fn direction(&self) -> Direction {
        self.modifier.unwrap_or(self.priorities[self.current])
    }

    pub fn priorities(&self) -> &[Direction; 4] {
        &self.priorities
    }

    pub fn path(&self) -> &[Direction] {
        &self.path
    }

    pub fn route(&self) -> Route {
        if self.looped() {
            Route::Loop
        } else {
            Route::Path(self.path.clone())
        }
    }

    pub fn breaker(&self) -> bool {
        self.breaker
    }

    pub fn toggle_breaker(&mut self) {
        self.breaker = !self.breaker;
    }

    pub fn reach_booth(&mut self) {
        self.done = true;
    }

    /// Arm (or disarm, when already armed) the priority inversion. It only
    /// takes effect at the next obstacle hit.
    pub fn toggle_inversion(&mut self) {
        self.invert_pending = !self.invert_pending;
    }

    pub fn inversion_pending(&self) -> bool {
        self.invert_pending
    }

    pub fn set_modifier(&mut self, dir: Direction) {
        self.modifier = Some(dir);
    }

    pub fn modifier(&self) -> Option<Direction> {
        self.modifier
    }

    /// Pick the next priority after an obstacle
    pub fn advance_priority(&mut self) {
        if self.reset_dir {
            self.current = 0;
            self.reset_dir = false;
        } else {
            self.current = (self.current + 1) % self.priorities.len();
        }
    }

    /// Register a hit against an obstacle
    pub fn hit_obstacle(&mut self) {
        self.hurt = true;
        self.modifier = None;
        if self.invert_pending {
            self.priorities.reverse();
            self.invert_pending = false;
            self.reset_dir = true;
        }
    }

    pub fn is_hurt(&self) -> bool {
        self.hurt
    }

    /// The agent got past the obstacle it was stuck on
    pub fn back_on_track(&mut self) {
        self.hurt = false;
        self.reset_dir = true;
    }

    /// Record a committed move and update the revisit counter
    pub fn remember(&mut self, dir: Direction, state: StateKey) {
        self.path.push(dir);
        if self.visited.insert(state) {
            self.loop_count = 0;
        } else {
            self.loop_count += 1;
        }
    }

    pub fn loop_count(&self) -> usize {
        self.loop_count
    }
}
