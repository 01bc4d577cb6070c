use crate::error::MazeError;
use crate::grid::Grid;
use crate::reachability::{
    ClosureOptions, ComponentReachability, MatrixReachability, Reachability, Strategy,
};
use rayon::prelude::*;

/// Answers "can I walk from A to B?" for one fixed maze.
///
/// All the work happens in the constructor; afterwards every query is a
/// constant-time lookup. The grid is snapshotted, so later edits to the
/// caller's grid need a new solver.
pub struct MazeSolver {
    rows: i32,
    cols: i32,
    strategy: Strategy,
    reachability: Box<dyn Reachability>,
}

impl MazeSolver {
    /// Build a solver with the dense matrix closure and default options
    pub fn new(grid: &Grid) -> Result<Self, MazeError> {
        Self::with_strategy(grid, Strategy::Matrix, ClosureOptions::default())
    }

    pub fn with_strategy(
        grid: &Grid,
        strategy: Strategy,
        options: ClosureOptions,
    ) -> Result<Self, MazeError> {
        grid.validate()?;

        let reachability: Box<dyn Reachability> = match strategy {
            Strategy::Matrix => Box::new(MatrixReachability::build(grid, options)?),
            Strategy::Components => Box::new(ComponentReachability::build(grid)?),
        };

        Ok(MazeSolver {
            rows: grid.rows,
            cols: grid.cols,
            strategy,
            reachability,
        })
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    fn node(&self, row: i32, col: i32) -> Option<usize> {
        if row >= 0 && row < self.rows && col >= 0 && col < self.cols {
            Some(row as usize * self.cols as usize + col as usize)
        } else {
            None
        }
    }

    /// True iff (a_row, a_col) and (b_row, b_col) are joined by a chain of
    /// 8-adjacent open cells. Coordinates outside the grid are never
    /// connected to anything.
    pub fn is_connected(&self, a_row: i32, a_col: i32, b_row: i32, b_col: i32) -> bool {
        match (self.node(a_row, a_col), self.node(b_row, b_col)) {
            (Some(a), Some(b)) => self.reachability.is_connected_nodes(a, b),
            _ => false,
        }
    }

    /// Cell IDs reachable from (row, col), itself included when open
    pub fn reachable_from(&self, row: i32, col: i32) -> Vec<i32> {
        let Some(start) = self.node(row, col) else {
            return Vec::new();
        };
        (0..self.reachability.node_count())
            .filter(|&other| self.reachability.is_connected_nodes(start, other))
            .map(|other| other as i32)
            .collect()
    }
}

/// Build independent solvers for several mazes on the rayon pool
pub fn solve_many(
    grids: &[Grid],
    strategy: Strategy,
    options: ClosureOptions,
) -> Vec<Result<MazeSolver, MazeError>> {
    grids
        .par_iter()
        .map(|grid| MazeSolver::with_strategy(grid, strategy, options))
        .collect()
}
