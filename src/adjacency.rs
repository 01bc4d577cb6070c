use crate::error::MazeError;
use crate::grid::Grid;
use crate::matrix::BoolMatrix;

/// The 8 surrounding positions as (Δrow, Δcol): below, below-left,
/// below-right, above, above-right, above-left, right, left
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (1, 0),
    (1, -1),
    (1, 1),
    (-1, 0),
    (-1, 1),
    (-1, -1),
    (0, 1),
    (0, -1),
];

/// Build the 1-hop adjacency relation of a grid.
///
/// Open cells get a self-loop and an edge to every open cell among their
/// 8 neighbours. Wall cells keep an all-false row and column, diagonal
/// included. The result is symmetric.
pub fn build_adjacency(grid: &Grid) -> Result<BoolMatrix, MazeError> {
    grid.validate()?;

    let mut adjacency = BoolMatrix::new(grid.node_count());

    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let node = match grid.node_index(row, col) {
                Some(node) if grid.is_open(row, col) => node,
                _ => continue,
            };
            adjacency.set(node, node);

            for &(d_row, d_col) in &NEIGHBOR_OFFSETS {
                // Outside the grid get_cell yields the sentinel, never 0
                if grid.is_open(row + d_row, col + d_col) {
                    if let Some(neighbor) = grid.node_index(row + d_row, col + d_col) {
                        adjacency.set_symmetric(node, neighbor);
                    }
                }
            }
        }
    }

    Ok(adjacency)
}

/// Open neighbours of an open cell, as cell IDs
pub fn open_neighbors(grid: &Grid, row: i32, col: i32) -> Vec<i32> {
    if !grid.is_open(row, col) {
        return Vec::new();
    }
    NEIGHBOR_OFFSETS
        .iter()
        .filter(|(d_row, d_col)| grid.is_open(row + d_row, col + d_col))
        .map(|(d_row, d_col)| grid.get_id(row + d_row, col + d_col))
        .collect()
}
