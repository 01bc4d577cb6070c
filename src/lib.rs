pub mod action_log;
pub mod adjacency;
pub mod config;
pub mod error;
pub mod grid;
pub mod layout;
pub mod matrix;
pub mod reachability;
pub mod samples;
pub mod solver;

pub use error::MazeError;
pub use grid::Grid;
pub use reachability::{ClosureOptions, Reachability, Strategy};
pub use solver::{solve_many, MazeSolver};
