use anyhow::{Context, Result};
use bender::config::Config;
use bender::{logging, Grid, Simulation};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Maze used when neither the command line nor the config points at an existing file
const DEMO_PLAN: [&str; 8] = [
    "########",
    "#     $#",
    "#      #",
    "#      #",
    "#  @   #",
    "#      #",
    "#      #",
    "########",
];

#[derive(Parser)]
#[command(name = "bender", version, about = "Walk a maze with a priority-driven agent")]
struct Cli {
    /// Maze file, one row per line (defaults to the configured maze)
    maze: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, default_value = "bender.toml")]
    config: PathBuf,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,

    /// Do not print the plan before the route
    #[arg(short, long)]
    quiet: bool,

    /// Write the run log to this file
    #[arg(long)]
    run_log: Option<PathBuf>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn load_grid(cli_path: Option<&Path>, config: &Config) -> Result<Grid> {
    let path = match cli_path {
        Some(path) => path.to_path_buf(),
        None => {
            let configured = PathBuf::from(&config.maze.default_path);
            if !configured.exists() {
                warn!(path = %configured.display(), "maze file not found, using the demo maze");
                return Ok(Grid::parse(&DEMO_PLAN)?);
            }
            configured
        }
    };

    let text = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let grid = Grid::from_text(&text).with_context(|| format!("parse {}", path.display()))?;
    info!(path = %path.display(), rows = grid.rows, cols = grid.cols, "loaded maze");
    Ok(grid)
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config).with_context(|| format!("load {}", cli.config.display()))?;
    logging::init(&config.logging.filter);

    let grid = load_grid(cli.maze.as_deref(), &config)?;
    let plan = grid.render();

    let run_log_path = cli
        .run_log
        .clone()
        .or_else(|| config.logging.enable_run_log.then(|| PathBuf::from(&config.logging.run_log_path)));

    let mut sim = Simulation::new(grid)?.with_max_steps(config.simulation.max_steps);
    if run_log_path.is_some() {
        sim = sim.with_run_log();
    }
    let report = sim.run()?;

    if let (Some(path), Some(log)) = (&run_log_path, sim.run_log()) {
        log.save_to_file(path)
            .with_context(|| format!("write run log {}", path.display()))?;
        info!(path = %path.display(), events = log.events().len(), "run log saved");
    }

    if cli.json || config.output.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if config.output.show_plan && !cli.quiet {
        println!("Plan:");
        for row in &plan {
            println!("{}", row);
        }
    }
    println!("{}", report.route);

    Ok(())
}
