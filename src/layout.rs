use crate::error::MazeError;
use crate::grid::Grid;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A parsed text layout: the grid plus optional query endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub grid: Grid,
    /// Cell marked `A`, as (row, col)
    pub a: Option<(i32, i32)>,
    /// Cell marked `B`, as (row, col)
    pub b: Option<(i32, i32)>,
}

/// Parse a text layout
/// Format:
/// - ■, # or 1: wall
/// - □, ., 0 or space: open cell
/// - A / B: open query endpoints
///
/// Blank lines before the grid are skipped. The grid ends at the first empty
/// line or at the first line whose width differs from the first row, so
/// trailing notes are allowed. A row of spaces inside the grid is a row of
/// open cells.
pub fn parse_layout(text: &str) -> Result<Layout, MazeError> {
    let lines: Vec<&str> = text
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .skip_while(|line| line.trim().is_empty())
        .take_while(|line| !line.is_empty())
        .collect();

    let Some(first) = lines.first() else {
        return Err(MazeError::Parse("no grid rows found".to_string()));
    };
    let cols = first.chars().count();

    let mut rows: Vec<Vec<bool>> = Vec::new();
    let mut a = None;
    let mut b = None;

    for line in lines {
        if line.chars().count() != cols {
            break;
        }

        let row = rows.len() as i32;
        let mut cells = Vec::with_capacity(cols);
        for (col, ch) in line.chars().enumerate() {
            let wall = match ch {
                '■' | '#' | '1' => true,
                '□' | '.' | '0' | ' ' => false,
                'A' => {
                    a = Some((row, col as i32));
                    false
                }
                'B' => {
                    b = Some((row, col as i32));
                    false
                }
                other => {
                    return Err(MazeError::Parse(format!(
                        "unexpected '{}' at row {}, col {}",
                        other, row, col
                    )))
                }
            };
            cells.push(wall);
        }
        rows.push(cells);
    }

    let grid = Grid::from_rows(&rows)?;
    Ok(Layout { grid, a, b })
}

/// Render a grid as text, marking the given endpoints
pub fn format_layout(grid: &Grid, a: Option<(i32, i32)>, b: Option<(i32, i32)>) -> String {
    let mut result = String::new();

    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let symbol = if a == Some((row, col)) {
                'A'
            } else if b == Some((row, col)) {
                'B'
            } else if grid.is_wall(row, col) {
                '■'
            } else {
                '□'
            };
            result.push(symbol);
        }
        result.push('\n');
    }

    result
}

/// A reachability question about a maze, optionally with its answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryCase {
    /// (row, col) of the first cell
    pub a: [i32; 2],
    /// (row, col) of the second cell
    pub b: [i32; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<bool>,
}

/// Maze file on disk (JSON)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MazeFile {
    pub name: String,
    #[serde(rename = "gridRows")]
    pub rows: i32,
    #[serde(rename = "gridCols")]
    pub cols: i32,
    /// Wall cells stored as cell IDs
    #[serde(rename = "wallCells")]
    pub walls: Vec<i32>,
    #[serde(default)]
    pub queries: Vec<QueryCase>,
}

impl MazeFile {
    /// Create a maze file from a grid
    pub fn from_grid(name: &str, grid: &Grid) -> Self {
        MazeFile {
            name: name.to_string(),
            rows: grid.rows,
            cols: grid.cols,
            walls: grid.wall_ids(),
            queries: Vec::new(),
        }
    }

    /// Restore the grid; the dimensions must describe a non-empty grid
    pub fn to_grid(&self) -> Result<Grid, MazeError> {
        let grid = Grid::with_walls(self.rows, self.cols, &self.walls);
        grid.validate()?;
        Ok(grid)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), MazeError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self, MazeError> {
        let json = fs::read_to_string(path)?;
        let maze: MazeFile = serde_json::from_str(&json)?;
        Ok(maze)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_layout_with_endpoints() {
        let text = "\nA■□\n□■□\n□■B\n\nnotes below\n";
        let layout = parse_layout(text).unwrap();

        assert_eq!(layout.grid.rows, 3);
        assert_eq!(layout.grid.cols, 3);
        assert_eq!(layout.grid.wall_ids(), vec![1, 4, 7]);
        assert_eq!(layout.a, Some((0, 0)));
        assert_eq!(layout.b, Some((2, 2)));
    }

    #[test]
    fn test_space_row_is_open_row() {
        let layout = parse_layout("A#.\n   \n.#B\n").unwrap();

        assert_eq!(layout.grid.rows, 3);
        assert_eq!(layout.grid.cols, 3);
        assert_eq!(layout.grid.wall_ids(), vec![1, 7]);
        assert_eq!(layout.a, Some((0, 0)));
        assert_eq!(layout.b, Some((2, 2)));
    }

    #[test]
    fn test_notes_as_wide_as_grid_are_not_rows() {
        // "separated" has the same width as the grid
        let layout = parse_layout("A........\n#########\n........B\n\nseparated\n").unwrap();

        assert_eq!(layout.grid.rows, 3);
        assert_eq!(layout.grid.cols, 9);
        assert_eq!(layout.b, Some((2, 8)));
    }

    #[test]
    fn test_parse_ascii_layout() {
        let layout = parse_layout("#..\n.#.\r\n").unwrap();
        assert_eq!(layout.grid.wall_ids(), vec![0, 4]);
        assert_eq!(layout.a, None);
    }

    #[test]
    fn test_parse_layout_errors() {
        assert!(matches!(parse_layout("  \n\n"), Err(MazeError::Parse(_))));
        assert!(matches!(parse_layout("□x□"), Err(MazeError::Parse(_))));
    }

    #[test]
    fn test_format_then_parse_keeps_walls() {
        let grid = Grid::with_walls(2, 4, &[1, 6]);
        let text = format_layout(&grid, Some((0, 0)), Some((1, 3)));
        assert_eq!(text, "A■□□\n□□■B\n");

        let layout = parse_layout(&text).unwrap();
        assert_eq!(layout.grid.cells, grid.cells);
        assert_eq!(layout.b, Some((1, 3)));
    }

    #[test]
    fn test_maze_file_json_names() {
        let mut maze = MazeFile::from_grid("tiny", &Grid::with_walls(1, 3, &[1]));
        maze.queries.push(QueryCase { a: [0, 0], b: [0, 2], expected: Some(false) });

        let json = serde_json::to_string(&maze).unwrap();
        assert!(json.contains("\"gridRows\":1"));
        assert!(json.contains("\"wallCells\":[1]"));

        let back: MazeFile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.queries, maze.queries);
        assert_eq!(back.to_grid().unwrap().wall_ids(), vec![1]);
    }

    #[test]
    fn test_maze_file_rejects_empty_grid() {
        let maze: MazeFile =
            serde_json::from_str(r#"{"name":"empty","gridRows":0,"gridCols":3,"wallCells":[]}"#)
                .unwrap();
        assert!(maze.queries.is_empty());
        assert_eq!(
            maze.to_grid(),
            Err(MazeError::InvalidDimensions { rows: 0, cols: 3 })
        );
    }
}
