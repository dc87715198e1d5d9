/// Errors raised while turning maze text into a grid.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GridError {
    #[error("maze has no rows")]
    Empty,

    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown symbol {symbol:?} at ({x}, {y})")]
    UnknownSymbol { symbol: char, x: usize, y: usize },

    #[error("maze needs exactly one start tile, found {0}")]
    StartCount(usize),

    #[error("maze needs zero or two teleport tiles, found {0}")]
    TeleportCount(usize),
}

/// Fatal conditions of the grid state machine.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MachineError {
    #[error("transition leaves the grid at ({x}, {y})")]
    OutOfBounds { x: i32, y: i32 },

    #[error("grid has no start tile")]
    MissingStart,

    #[error("teleports badly set up: expected 2, found {found}")]
    TeleportsMisconfigured { found: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Top-level error of a simulation run.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Machine(#[from] MachineError),

    #[error("step limit of {0} transitions reached")]
    StepLimit(u64),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = SimError> = std::result::Result<T, E>;
