//! Driver loop: ask the agent where to go, feed that to the machine, repeat
//! until the booth is reached or the agent is caught in a loop.

use serde::Serialize;
use tracing::{debug, info};

use crate::agent::{Agent, Route};
use crate::error::{Result, SimError};
use crate::grid::{Grid, Position};
use crate::machine::Machine;
use crate::run_log::{RunEvent, RunLog};
use crate::tile::Tile;

/// Number of walkable states of a maze framed by a one-cell wall
pub fn interior_cells(rows: i32, cols: i32) -> usize {
    let rows = (rows - 2).max(0) as usize;
    let cols = (cols - 2).max(0) as usize;
    rows * cols
}

/// Final state of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub finished: bool,
    pub looped: bool,
    pub route: Route,
    /// Transition attempts, cancelled ones included
    pub steps: u64,
    pub final_position: Position,
}

pub struct Simulation {
    machine: Machine,
    agent: Agent,
    steps: u64,
    /// 0 means unlimited
    max_steps: u64,
    log: Option<RunLog>,
}

impl Simulation {
    pub fn new(grid: Grid) -> Result<Self> {
        let agent = Agent::new(interior_cells(grid.rows, grid.cols));
        let machine = Machine::new(grid)?;
        Ok(Simulation {
            machine,
            agent,
            steps: 0,
            max_steps: 0,
            log: None,
        })
    }

    /// Abort with `SimError::StepLimit` after this many transitions (0 = never)
    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Record every transition into a `RunLog`
    pub fn with_run_log(mut self) -> Self {
        self.log = Some(RunLog::new());
        self
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn run_log(&self) -> Option<&RunLog> {
        self.log.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.agent.done() || self.agent.looped()
    }

    /// Perform a single transition and describe what happened
    pub fn step(&mut self) -> Result<RunEvent> {
        let direction = self.agent.direction();
        let from = self.machine.position();
        let dst = from.offset(direction.offset());
        let tile = self.machine.grid().get_cell(dst.x, dst.y);
        let recorded = self.agent.path().len();

        self.machine.transition(direction, &mut self.agent)?;
        self.steps += 1;

        let now = self.machine.position();
        let event = if self.agent.path().len() == recorded {
            RunEvent::Blocked { direction, at: dst, tile }
        } else if tile == Tile::Obstacle {
            RunEvent::Destroyed { direction, at: dst }
        } else if now != dst {
            RunEvent::Teleported { direction, from: dst, to: now }
        } else {
            RunEvent::Moved { direction, from, to: dst }
        };
        debug!(step = self.steps, ?event, "transition");

        if let Some(log) = self.log.as_mut() {
            log.log(self.steps, event.clone());
            if self.agent.done() {
                log.log(self.steps, RunEvent::Finished);
            } else if self.agent.looped() {
                log.log(self.steps, RunEvent::LoopDetected);
            }
        }

        Ok(event)
    }

    /// Drive the agent until it stops
    pub fn run(&mut self) -> Result<RunReport> {
        while !self.is_over() {
            if self.max_steps > 0 && self.steps >= self.max_steps {
                return Err(SimError::StepLimit(self.max_steps));
            }
            self.step()?;
        }

        let report = self.report();
        info!(
            steps = report.steps,
            finished = report.finished,
            looped = report.looped,
            "run complete"
        );
        Ok(report)
    }

    pub fn report(&self) -> RunReport {
        RunReport {
            finished: self.agent.done(),
            looped: self.agent.looped(),
            route: self.agent.route(),
            steps: self.steps,
            final_position: self.machine.position(),
        }
    }
}

/// Parse `plan` and run it to completion
pub fn simulate<S: AsRef<str>>(plan: &[S]) -> Result<RunReport> {
    let grid = Grid::parse(plan)?;
    Simulation::new(grid)?.run()
}
