use crate::adjacency::{build_adjacency, NEIGHBOR_OFFSETS};
use crate::error::MazeError;
use crate::grid::Grid;
use crate::matrix::BoolMatrix;
use std::fmt;
use std::str::FromStr;

/// Reachability relation over node indices of one grid
pub trait Reachability: Send + Sync {
    /// Number of nodes (grid cells) covered
    fn node_count(&self) -> usize;

    /// True iff a chain of adjacent open cells joins `a` and `b`.
    /// Nodes outside `[0, node_count)` are never connected.
    fn is_connected_nodes(&self, a: usize, b: usize) -> bool;

    /// Short label for logs
    fn name(&self) -> &'static str;
}

/// Which closure algorithm backs a solver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Dense matrix, repeated boolean squaring
    #[default]
    Matrix,
    /// Union-find over open cells
    Components,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "matrix" | "dense" => Ok(Strategy::Matrix),
            "components" | "union_find" | "union-find" => Ok(Strategy::Components),
            other => Err(format!("unknown strategy '{}'", other)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Matrix => write!(f, "matrix"),
            Strategy::Components => write!(f, "components"),
        }
    }
}

/// Tuning for the repeated-squaring closure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosureOptions {
    /// Upper bound on squaring rounds; `None` means one round per grid cell
    pub max_rounds: Option<usize>,
    /// Stop as soon as a round leaves the matrix unchanged
    pub early_exit: bool,
    /// Multiply rows on the rayon pool
    pub parallel: bool,
    /// Print per-round progress
    pub trace: bool,
}

impl Default for ClosureOptions {
    fn default() -> Self {
        ClosureOptions {
            max_rounds: None,
            early_exit: true,
            parallel: false,
            trace: false,
        }
    }
}

/// One closure round: T := boolean(T * Tᵗ)
pub fn closure_step(relation: &BoolMatrix, parallel: bool) -> BoolMatrix {
    relation.mul_transpose(parallel)
}

/// Dense transitive closure of the adjacency relation
#[derive(Debug, Clone)]
pub struct MatrixReachability {
    closure: BoolMatrix,
    rounds: usize,
}

impl MatrixReachability {
    pub fn build(grid: &Grid, options: ClosureOptions) -> Result<Self, MazeError> {
        let adjacency = build_adjacency(grid)?;
        Ok(Self::from_adjacency(adjacency, options))
    }

    /// Close an already-built adjacency relation
    pub fn from_adjacency(adjacency: BoolMatrix, options: ClosureOptions) -> Self {
        let max_rounds = options.max_rounds.unwrap_or(adjacency.size());
        let mut closure = adjacency;
        let mut rounds = 0;

        while rounds < max_rounds {
            let next = closure_step(&closure, options.parallel);
            rounds += 1;

            let stable = next == closure;
            if options.trace {
                println!(
                    "[closure] round {:3}: {} reachable pairs{}",
                    rounds,
                    next.count_ones(),
                    if stable { " (fixed point)" } else { "" }
                );
            }

            closure = next;
            if stable && options.early_exit {
                break;
            }
        }

        MatrixReachability { closure, rounds }
    }

    /// Squaring rounds actually performed
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn closure(&self) -> &BoolMatrix {
        &self.closure
    }
}

impl Reachability for MatrixReachability {
    fn node_count(&self) -> usize {
        self.closure.size()
    }

    fn is_connected_nodes(&self, a: usize, b: usize) -> bool {
        self.closure.get(a, b)
    }

    fn name(&self) -> &'static str {
        "matrix"
    }
}

/// Connected components of open cells, labelled with a union-find forest
#[derive(Debug, Clone)]
pub struct ComponentReachability {
    /// Component label per node; walls have none
    labels: Vec<Option<u32>>,
    component_count: usize,
}

impl ComponentReachability {
    pub fn build(grid: &Grid) -> Result<Self, MazeError> {
        grid.validate()?;

        let mut forest = DisjointSet::new(grid.node_count());
        for row in 0..grid.rows {
            for col in 0..grid.cols {
                let node = match grid.node_index(row, col) {
                    Some(node) if grid.is_open(row, col) => node,
                    _ => continue,
                };
                for &(d_row, d_col) in &NEIGHBOR_OFFSETS {
                    if !grid.is_open(row + d_row, col + d_col) {
                        continue;
                    }
                    if let Some(neighbor) = grid.node_index(row + d_row, col + d_col) {
                        forest.union(node, neighbor);
                    }
                }
            }
        }

        // Compact roots into dense labels 0..k
        let mut root_label: Vec<Option<u32>> = vec![None; grid.node_count()];
        let mut labels = vec![None; grid.node_count()];
        let mut component_count = 0;

        for (node, &wall) in grid.cells.iter().enumerate() {
            if wall {
                continue;
            }
            let root = forest.find(node);
            let label = *root_label[root].get_or_insert_with(|| {
                component_count += 1;
                (component_count - 1) as u32
            });
            labels[node] = Some(label);
        }

        Ok(ComponentReachability {
            labels,
            component_count,
        })
    }

    pub fn component_count(&self) -> usize {
        self.component_count
    }

    /// Component label of a node, `None` for walls and unknown nodes
    pub fn component_of(&self, node: usize) -> Option<u32> {
        self.labels.get(node).copied().flatten()
    }
}

impl Reachability for ComponentReachability {
    fn node_count(&self) -> usize {
        self.labels.len()
    }

    fn is_connected_nodes(&self, a: usize, b: usize) -> bool {
        match (self.component_of(a), self.component_of(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    fn name(&self) -> &'static str {
        "components"
    }
}

/// Union by size with path halving
struct DisjointSet {
    parents: Vec<usize>,
    sizes: Vec<u32>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        DisjointSet {
            parents: (0..n).collect(),
            sizes: vec![1; n],
        }
    }

    fn find(&mut self, mut node: usize) -> usize {
        while self.parents[node] != node {
            let grandparent = self.parents[self.parents[node]];
            self.parents[node] = grandparent;
            node = grandparent;
        }
        node
    }

    fn union(&mut self, a: usize, b: usize) {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        if self.sizes[ra] < self.sizes[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parents[rb] = ra;
        self.sizes[ra] += self.sizes[rb];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_grid() -> Grid {
        // □■□
        // □■□
        // □■□
        Grid::with_walls(3, 3, &[1, 4, 7])
    }

    #[test]
    fn test_matrix_closure_split_grid() {
        let reach = MatrixReachability::build(&split_grid(), ClosureOptions::default()).unwrap();

        assert!(reach.is_connected_nodes(0, 6));
        assert!(reach.is_connected_nodes(2, 8));
        assert!(!reach.is_connected_nodes(0, 8));
        assert!(!reach.is_connected_nodes(4, 4));
        assert!(!reach.is_connected_nodes(0, 9));
    }

    #[test]
    fn test_fixed_rounds_match_early_exit() {
        let grid = Grid::with_walls(4, 5, &[1, 6, 11, 13, 8]);
        let fast = MatrixReachability::build(&grid, ClosureOptions::default()).unwrap();
        let full = MatrixReachability::build(
            &grid,
            ClosureOptions {
                early_exit: false,
                ..ClosureOptions::default()
            },
        )
        .unwrap();

        assert_eq!(full.rounds(), 20);
        assert!(fast.rounds() < full.rounds());
        assert_eq!(fast.closure(), full.closure());
    }

    #[test]
    fn test_closure_is_fixed_point() {
        let reach = MatrixReachability::build(&split_grid(), ClosureOptions::default()).unwrap();
        let again = closure_step(reach.closure(), false);
        assert_eq!(&again, reach.closure());
    }

    #[test]
    fn test_parallel_closure_matches_serial() {
        let grid = Grid::with_walls(6, 6, &[2, 8, 14, 20, 26, 21, 22]);
        let serial = MatrixReachability::build(&grid, ClosureOptions::default()).unwrap();
        let parallel = MatrixReachability::build(
            &grid,
            ClosureOptions {
                parallel: true,
                ..ClosureOptions::default()
            },
        )
        .unwrap();
        assert_eq!(serial.closure(), parallel.closure());
    }

    #[test]
    fn test_components_split_grid() {
        let reach = ComponentReachability::build(&split_grid()).unwrap();

        assert_eq!(reach.component_count(), 2);
        assert_eq!(reach.component_of(4), None);
        assert_eq!(reach.component_of(0), reach.component_of(6));
        assert_ne!(reach.component_of(0), reach.component_of(2));
        assert!(!reach.is_connected_nodes(7, 7));
        assert!(!reach.is_connected_nodes(0, 100));
    }

    #[test]
    fn test_strategies_agree() {
        let grid = Grid::with_walls(5, 7, &[3, 10, 17, 24, 8, 9, 15, 29, 30]);
        let matrix = MatrixReachability::build(&grid, ClosureOptions::default()).unwrap();
        let components = ComponentReachability::build(&grid).unwrap();

        for a in 0..grid.node_count() {
            for b in 0..grid.node_count() {
                assert_eq!(
                    matrix.is_connected_nodes(a, b),
                    components.is_connected_nodes(a, b),
                    "nodes {} and {}",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("Matrix".parse::<Strategy>(), Ok(Strategy::Matrix));
        assert_eq!("union-find".parse::<Strategy>(), Ok(Strategy::Components));
        assert!("bfs".parse::<Strategy>().is_err());
        assert_eq!(Strategy::Components.to_string(), "components");
    }
}
