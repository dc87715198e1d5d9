use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::ConfigError;

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub maze: MazeConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct MazeConfig {
    #[serde(default = "default_maze_path")]
    pub default_path: String,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct SimulationConfig {
    /// Abort after this many transitions; 0 disables the limit
    #[serde(default)]
    pub max_steps: u64,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub json: bool,
    #[serde(default = "default_show_plan")]
    pub show_plan: bool,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_run_log: bool,
    #[serde(default = "default_run_log_path")]
    pub run_log_path: String,
    /// tracing filter used when RUST_LOG is not set
    #[serde(default = "default_filter")]
    pub filter: String,
}

// Default values
fn default_maze_path() -> String { "mazes/demo.txt".to_string() }
fn default_show_plan() -> bool { true }
fn default_run_log_path() -> String { "run_log.json".to_string() }
fn default_filter() -> String { "warn".to_string() }

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            default_path: default_maze_path(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json: false,
            show_plan: default_show_plan(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_run_log: false,
            run_log_path: default_run_log_path(),
            filter: default_filter(),
        }
    }
}

impl Config {
    /// Load configuration from file, or use defaults if the file doesn't exist.
    ///
    /// A file that exists but fails to parse is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("bender.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.maze.default_path, "mazes/demo.txt");
        assert!(config.output.show_plan);
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bender.toml");
        fs::write(&path, "[simulation]\nmax_steps = 500\n\n[logging]\nenable_run_log = true\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.simulation.max_steps, 500);
        assert!(config.logging.enable_run_log);
        assert_eq!(config.logging.run_log_path, "run_log.json");
        assert!(!config.output.json);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bender.toml");
        fs::write(&path, "[simulation]\nmax_steps = \"lots\"\n").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Toml(_))));
    }
}
