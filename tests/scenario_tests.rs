mod common;

use bender::{simulate, Direction, Grid, Position, Route, Simulation, Tile};
use common::{load_all_cases, load_named_case, route_lines};

use Direction::{East, North, South, West};

#[test]
fn maze_fixture_tests() {
    let cases = load_all_cases();
    assert!(!cases.is_empty(), "no maze fixtures found");

    for case in &cases {
        let report = simulate(&case.plan).unwrap_or_else(|e| panic!("Maze '{}' failed: {}", case.name, e));
        assert_eq!(
            route_lines(&report.route),
            case.expected,
            "Maze '{}' produced the wrong route",
            case.name
        );
        assert_eq!(report.looped, report.route == Route::Loop, "Maze '{}'", case.name);
        assert_eq!(report.finished, !report.looped, "Maze '{}'", case.name);
    }

    println!("All {} maze fixtures passed", cases.len());
}

#[test]
fn test_breaker_destroys_obstacle_on_later_pass() {
    let case = load_named_case("10_breaker_detour");
    let grid = Grid::parse(&case.plan).unwrap();
    let mut sim = Simulation::new(grid).unwrap();
    let report = sim.run().unwrap();

    assert!(report.finished);
    assert_eq!(
        report.route,
        Route::Path(vec![East, East, East, South, South, West, West, West])
    );
    assert!(sim.agent().breaker(), "breaker tile was entered once");

    let grid = sim.machine().grid();
    // the obstacle next to the start was met before the breaker and survives
    assert_eq!(grid.get_cell(1, 2), Tile::Obstacle);
    // the one on the way back was smashed
    assert_eq!(grid.get_cell(2, 3), Tile::Empty);
    assert_eq!(grid.get_revision(), 1);
}

#[test]
fn test_detour_without_breaker_loops() {
    let case = load_named_case("11_detour_without_breaker");
    let grid = Grid::parse(&case.plan).unwrap();
    let mut sim = Simulation::new(grid).unwrap();
    let report = sim.run().unwrap();

    assert!(!report.finished);
    assert!(report.looped);
    assert_eq!(report.route, Route::Loop);
    assert!(sim.agent().loop_count() > 12);
    // the recorded moves are still there, only the report hides them
    assert!(!sim.agent().path().is_empty());
    assert_eq!(sim.machine().grid().get_cell(2, 3), Tile::Obstacle);
}

#[test]
fn test_inverter_applies_on_next_obstacle() {
    let case = load_named_case("07_inverter");
    let grid = Grid::parse(&case.plan).unwrap();
    let mut sim = Simulation::new(grid).unwrap();

    // walk through the first inverter without hitting anything
    for _ in 0..3 {
        sim.step().unwrap();
    }
    assert_eq!(sim.machine().position(), Position::new(8, 7));
    assert!(sim.agent().inversion_pending());
    assert_eq!(sim.agent().priorities(), &Direction::PRIORITIES);
    assert_eq!(sim.agent().direction(), South);

    sim.step().unwrap(); // (8, 8)
    sim.step().unwrap(); // wall
    assert!(!sim.agent().inversion_pending());
    assert_eq!(sim.agent().priorities(), &[West, North, East, South]);
    assert_eq!(sim.agent().direction(), West);
}

#[test]
fn test_modifier_cleared_by_obstacle() {
    let report = simulate(&["#####", "#@  #", "#E  #", "#  $#", "#####"]).unwrap();
    // EAST is forced until the wall; priorities then resume from their own
    // index (EAST again, blocked, then NORTH) instead of the modifier
    assert_eq!(
        report.route,
        Route::Path(vec![South, East, East, North, South, South])
    );
}

#[test]
fn test_teleport_lands_on_twin() {
    let case = load_named_case("06_teleport");
    let grid = Grid::parse(&case.plan).unwrap();
    let mut sim = Simulation::new(grid).unwrap();
    let report = sim.run().unwrap();

    assert!(report.finished);
    assert_eq!(report.final_position, Position::new(5, 3));
    assert_eq!(sim.machine().teleports(), &[Position::new(3, 1), Position::new(3, 3)]);
}

#[test]
fn test_loop_reports_sentinel() {
    let report = simulate(&["####", "#@ #", "####"]).unwrap();
    assert!(report.looped);
    assert!(!report.finished);
    assert_eq!(report.route.to_string(), "LOOP");
}
