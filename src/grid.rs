use crate::error::MazeError;

/// Value returned by [`Grid::get_cell`] for coordinates outside the grid
pub const OUT_OF_GRID: i32 = -1;

/// Cells in a rows x cols grid, counted in usize so large sides cannot overflow.
/// Negative sides count as zero.
pub fn cell_count(rows: i32, cols: i32) -> usize {
    (rows.max(0) as usize) * (cols.max(0) as usize)
}

/// Grid structure for storing cell states
/// Cell values: false=open/walkable, true=wall
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    pub rows: i32,
    pub cols: i32,
    pub cells: Vec<bool>,
    /// Revision number - incremented whenever grid cells change
    pub revision: u64,
}

impl Grid {
    /// Create a new grid with all cells open
    pub fn new(rows: i32, cols: i32) -> Self {
        Grid {
            rows,
            cols,
            cells: vec![false; cell_count(rows, cols)],
            revision: 0,
        }
    }

    /// Create a grid with specific wall cells (given as cell IDs)
    pub fn with_walls(rows: i32, cols: i32, walls: &[i32]) -> Self {
        let mut grid = Self::new(rows, cols);
        for &cell_id in walls {
            if cell_id >= 0 && (cell_id as usize) < grid.node_count() {
                grid.cells[cell_id as usize] = true;
            }
        }
        grid
    }

    /// Create a grid from nested rows, `true` meaning wall
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self, MazeError> {
        let cols = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut cells = Vec::with_capacity(rows.len() * cols);

        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(MazeError::RaggedRows {
                    row: i,
                    expected: cols,
                    found: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }

        let grid = Grid {
            rows: rows.len() as i32,
            cols: cols as i32,
            cells,
            revision: 0,
        };
        grid.validate()?;
        Ok(grid)
    }

    /// Reject grids an engine cannot be built from
    pub fn validate(&self) -> Result<(), MazeError> {
        if self.rows <= 0
            || self.cols <= 0
            || self.cells.len() != cell_count(self.rows, self.cols)
        {
            return Err(MazeError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    /// Number of cells, i.e. the side length of the adjacency matrix
    pub fn node_count(&self) -> usize {
        self.cells.len()
    }

    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && row < self.rows && col >= 0 && col < self.cols
    }

    /// Convert (row, col) coordinates to cell ID
    pub fn get_id(&self, row: i32, col: i32) -> i32 {
        row * self.cols + col
    }

    /// Convert cell ID to (row, col) coordinates
    pub fn get_coords(&self, id: i32) -> (i32, i32) {
        (id / self.cols, id % self.cols)
    }

    /// Cell ID for in-bounds coordinates, `None` otherwise
    pub fn node_index(&self, row: i32, col: i32) -> Option<usize> {
        if self.in_bounds(row, col) {
            Some(row as usize * self.cols as usize + col as usize)
        } else {
            None
        }
    }

    /// Get cell value at (row, col): 0 open, 1 wall, [`OUT_OF_GRID`] outside
    pub fn get_cell(&self, row: i32, col: i32) -> i32 {
        match self.node_index(row, col) {
            Some(id) => self.cells[id] as i32,
            None => OUT_OF_GRID,
        }
    }

    /// Only an in-bounds open cell counts; the sentinel never does
    pub fn is_open(&self, row: i32, col: i32) -> bool {
        self.get_cell(row, col) == 0
    }

    /// Check if a cell at (row, col) is a wall (out of bounds counts as wall)
    pub fn is_wall(&self, row: i32, col: i32) -> bool {
        !self.is_open(row, col)
    }

    /// Set cell state at (row, col)
    pub fn set_cell(&mut self, row: i32, col: i32, wall: bool) {
        if let Some(id) = self.node_index(row, col) {
            if self.cells[id] != wall {
                self.cells[id] = wall;
                self.revision += 1;
            }
        }
    }

    pub fn toggle_cell(&mut self, row: i32, col: i32) {
        if let Some(id) = self.node_index(row, col) {
            self.cells[id] = !self.cells[id];
            self.revision += 1;
        }
    }

    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|&&wall| !wall).count()
    }

    /// All wall cells as cell IDs, in ascending order
    pub fn wall_ids(&self) -> Vec<i32> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &wall)| wall)
            .map(|(id, _)| id as i32)
            .collect()
    }

    /// Get current grid revision number
    pub fn get_revision(&self) -> u64 {
        self.revision
    }
}
