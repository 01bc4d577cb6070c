use crate::reachability::{ClosureOptions, Strategy};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub maze: MazeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_rows")]
    pub rows: i32,
    #[serde(default = "default_cols")]
    pub cols: i32,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
}

#[derive(Debug, Deserialize)]
pub struct SolverConfig {
    /// "matrix" or "components"
    #[serde(default = "default_strategy")]
    pub strategy: String,
    #[serde(default)]
    pub parallel: bool,
    #[serde(default = "default_early_exit")]
    pub early_exit: bool,
}

#[derive(Debug, Deserialize, Default)]
pub struct MazeConfig {
    /// Maze file (JSON) loaded at startup instead of an empty grid
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_enable_action_log")]
    pub enable_action_log: bool,
    #[serde(default = "default_action_log_path")]
    pub action_log_path: String,
    /// Print every closure round
    #[serde(default)]
    pub trace_closure: bool,
}

// Default values
fn default_rows() -> i32 { 9 }
fn default_cols() -> i32 { 13 }
fn default_cell_size() -> f32 { 40.0 }
fn default_strategy() -> String { "matrix".to_string() }
fn default_early_exit() -> bool { true }
fn default_enable_action_log() -> bool { true }
fn default_action_log_path() -> String { "action_log.json".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            cell_size: default_cell_size(),
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            parallel: false,
            early_exit: default_early_exit(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_action_log: default_enable_action_log(),
            action_log_path: default_action_log_path(),
            trace_closure: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            solver: SolverConfig::default(),
            maze: MazeConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl SolverConfig {
    /// Configured strategy, falling back to the matrix closure
    pub fn strategy(&self) -> Strategy {
        self.strategy.parse().unwrap_or_else(|e| {
            eprintln!("Warning: {}, using matrix", e);
            Strategy::Matrix
        })
    }
}

impl Config {
    /// Load configuration from config.toml, or use defaults if it doesn't exist
    pub fn load() -> Self {
        Self::load_from(Path::new("config.toml"))
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => {
                    println!("Loaded configuration from {}", path.display());
                    config
                }
                Err(e) => {
                    eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                    eprintln!("Using default configuration");
                    Config::default()
                }
            },
            Err(_) => {
                println!("No {} found, using default configuration", path.display());
                Config::default()
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn closure_options(&self) -> ClosureOptions {
        ClosureOptions {
            max_rounds: None,
            early_exit: self.solver.early_exit,
            parallel: self.solver.parallel,
            trace: self.logging.trace_closure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.grid.rows, 9);
        assert_eq!(config.grid.cols, 13);
        assert_eq!(config.solver.strategy(), Strategy::Matrix);
        assert!(config.maze.path.is_none());
        assert_eq!(config.closure_options(), ClosureOptions::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::parse(
            r#"
            [solver]
            strategy = "components"
            parallel = true

            [maze]
            path = "test_data/reference_9x13.json"

            [logging]
            trace_closure = true
            "#,
        )
        .unwrap();

        assert_eq!(config.solver.strategy(), Strategy::Components);
        assert!(config.solver.early_exit);
        assert_eq!(config.maze.path.as_deref(), Some("test_data/reference_9x13.json"));
        assert!(config.closure_options().parallel);
        assert!(config.closure_options().trace);
        assert_eq!(config.logging.action_log_path, "action_log.json");
    }

    #[test]
    fn test_unknown_strategy_falls_back() {
        let config = Config::parse("[solver]\nstrategy = \"bfs\"\n").unwrap();
        assert_eq!(config.solver.strategy(), Strategy::Matrix);
    }

    #[test]
    fn test_bad_types_are_errors() {
        assert!(Config::parse("[grid]\nrows = \"many\"\n").is_err());
    }
}
