//! Reference mazes used by the console demo, the tests and the benchmark.

use crate::grid::Grid;

/// 3x3 grid split by a wall down the middle column.
/// With `bottom_open` the bottom wall cell (2, 1) is opened.
pub fn split_3x3(bottom_open: bool) -> Grid {
    let mut grid = Grid::new(3, 3);
    for row in 0..3 {
        grid.set_cell(row, 1, true);
    }
    if bottom_open {
        grid.set_cell(2, 1, false);
    }
    grid
}

/// Wall cells of the 9x13 reference maze as (row, col)
#[rustfmt::skip]
pub const REFERENCE_WALLS: [(i32, i32); 51] = [
    (0, 0), (1, 0), (5, 0),
    (3, 1), (5, 1), (6, 1), (7, 1),
    (1, 2), (2, 2), (3, 2), (5, 2),
    (1, 3), (5, 3), (7, 3), (8, 3),
    (1, 4), (2, 4), (3, 4), (5, 4), (7, 4),
    (3, 5), (5, 5), (6, 5), (7, 5),
    (1, 6), (3, 6), (4, 6), (5, 6),
    (1, 7), (7, 7), (8, 7),
    (1, 8), (3, 8), (4, 8), (5, 8), (6, 8), (7, 8),
    (0, 9), (1, 9), (3, 9), (5, 9),
    (1, 10), (3, 10), (7, 10),
    (1, 11), (2, 11), (3, 11), (4, 11), (5, 11), (6, 11), (7, 11),
];

/// The 9x13 reference maze; (3, 3) and (4, 9) are separated while the
/// wall at (8, 7) stands
pub fn reference_9x13() -> Grid {
    let mut grid = Grid::new(9, 13);
    for &(row, col) in &REFERENCE_WALLS {
        grid.set_cell(row, col, true);
    }
    grid
}

/// The reference maze with (8, 7) opened, which joins (3, 3) and (4, 9)
pub fn reference_9x13_opened() -> Grid {
    let mut grid = reference_9x13();
    grid.set_cell(8, 7, false);
    grid
}
