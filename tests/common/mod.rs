#![allow(dead_code)]

use bender::error::MachineError;
use bender::{Direction, Position, Route, Tile, Transition, TransitionHooks};
use std::fs;
use std::path::{Path, PathBuf};

/// A maze fixture from `test_data/mazes`
///
/// Format: the maze rows, a `---` separator line, then the expected route,
/// one entry per line (`LOOP` for an endless maze).
#[derive(Debug, Clone)]
pub struct MazeCase {
    pub name: String,
    pub plan: Vec<String>,
    pub expected: Vec<String>,
}

/// Load a fixture file
pub fn load_case(path: &Path) -> Result<MazeCase, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    let (plan, expected) = contents
        .split_once("\n---\n")
        .ok_or("missing '---' separator")?;

    let name = path
        .file_stem()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string();

    Ok(MazeCase {
        name,
        plan: plan.lines().map(str::to_string).collect(),
        expected: expected
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect(),
    })
}

pub fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data").join("mazes")
}

/// Load every fixture, sorted by file name
pub fn load_all_cases() -> Vec<MazeCase> {
    let mut entries: Vec<_> = fs::read_dir(fixture_dir())
        .expect("test_data/mazes must exist")
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("txt"))
        .collect();
    entries.sort();

    entries
        .iter()
        .map(|path| load_case(path).unwrap_or_else(|e| panic!("{}: {}", path.display(), e)))
        .collect()
}

pub fn load_named_case(name: &str) -> MazeCase {
    let path = fixture_dir().join(format!("{}.txt", name));
    load_case(&path).unwrap_or_else(|e| panic!("{}: {}", path.display(), e))
}

/// Route rendered the way fixtures store it
pub fn route_lines(route: &Route) -> Vec<String> {
    route.to_string().lines().map(str::to_string).collect()
}

/// Snapshot of a transition as seen by a hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seen {
    pub direction: Direction,
    pub dst: Tile,
    pub dst_pos: Position,
}

impl Seen {
    pub fn new(direction: Direction, symbol: char, x: i32, y: i32) -> Self {
        Seen {
            direction,
            dst: Tile::from_symbol(symbol).expect("known symbol"),
            dst_pos: Position::new(x, y),
        }
    }

    fn of(event: &Transition<'_>) -> Self {
        Seen {
            direction: event.direction,
            dst: event.dst,
            dst_pos: event.dst_pos,
        }
    }
}

/// Hooks recording every event, optionally cancelling the n-th `before` call (1-based)
#[derive(Debug, Default)]
pub struct Recorder {
    pub before: Vec<Seen>,
    pub enter: Vec<Seen>,
    pub cancel_at: Option<usize>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancelling(index: usize) -> Self {
        Recorder {
            cancel_at: Some(index),
            ..Self::default()
        }
    }
}

impl TransitionHooks for Recorder {
    fn before(&mut self, event: &mut Transition<'_>) -> Result<(), MachineError> {
        self.before.push(Seen::of(event));
        if self.cancel_at == Some(self.before.len()) {
            event.cancel();
        }
        Ok(())
    }

    fn enter(&mut self, event: &mut Transition<'_>) -> Result<(), MachineError> {
        self.enter.push(Seen::of(event));
        Ok(())
    }
}
