pub mod agent;
pub mod config;
pub mod direction;
mod effects;
pub mod error;
pub mod grid;
pub mod logging;
pub mod machine;
pub mod run_log;
pub mod simulation;
pub mod tile;

pub use agent::{Agent, Route};
pub use direction::Direction;
pub use grid::{Grid, Position};
pub use machine::{Machine, StateKey, Transition, TransitionHooks};
pub use simulation::{simulate, RunReport, Simulation};
pub use tile::Tile;
