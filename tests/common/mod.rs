#![allow(dead_code)]

use mazereach::layout::{parse_layout, MazeFile, QueryCase};
use mazereach::Grid;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// JSON maze files in a directory, sorted by name
pub fn json_files(dir: &str) -> Vec<PathBuf> {
    files_with_extension(dir, "json")
}

/// Text layout files in a directory, sorted by name
pub fn text_files(dir: &str) -> Vec<PathBuf> {
    files_with_extension(dir, "txt")
}

fn files_with_extension(dir: &str, ext: &str) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.extension().and_then(|s| s.to_str()) == Some(ext))
            .collect(),
        Err(_) => Vec::new(),
    };
    paths.sort();
    paths
}

pub fn load_maze(path: &Path) -> (MazeFile, Grid) {
    let maze = MazeFile::load_from_file(path)
        .unwrap_or_else(|e| panic!("failed to load {}: {}", path.display(), e));
    let grid = maze
        .to_grid()
        .unwrap_or_else(|e| panic!("bad grid in {}: {}", path.display(), e));
    (maze, grid)
}

/// A standard test: layout with A and B, followed by "connected" or "separated"
pub struct StandardTest {
    pub grid: Grid,
    pub a: (i32, i32),
    pub b: (i32, i32),
    pub expected: bool,
}

pub fn parse_standard_test(path: &Path) -> Result<StandardTest, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    let lines: Vec<&str> = contents.lines().collect();

    // The verdict is the last non-empty line; everything above it is the layout
    let verdict_at = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .ok_or("empty test file")?;

    let expected = match lines[verdict_at].trim() {
        "connected" => true,
        "separated" => false,
        other => return Err(format!("unknown verdict '{}'", other).into()),
    };

    let layout = parse_layout(&lines[..verdict_at].join("\n"))?;

    Ok(StandardTest {
        grid: layout.grid,
        a: layout.a.ok_or("no 'A' in layout")?,
        b: layout.b.ok_or("no 'B' in layout")?,
        expected,
    })
}

/// Reachability by plain flood fill, used as an oracle
pub fn bfs_connected(grid: &Grid, a: (i32, i32), b: (i32, i32)) -> bool {
    if !grid.is_open(a.0, a.1) || !grid.is_open(b.0, b.1) {
        return false;
    }

    let mut seen = HashSet::new();
    let mut stack = vec![a];
    seen.insert(a);

    while let Some((row, col)) = stack.pop() {
        if (row, col) == b {
            return true;
        }
        for d_row in -1..=1 {
            for d_col in -1..=1 {
                let next = (row + d_row, col + d_col);
                if grid.is_open(next.0, next.1) && seen.insert(next) {
                    stack.push(next);
                }
            }
        }
    }

    false
}

/// Every in-bounds cell of a grid
pub fn all_cells(grid: &Grid) -> Vec<(i32, i32)> {
    (0..grid.rows)
        .flat_map(|row| (0..grid.cols).map(move |col| (row, col)))
        .collect()
}

/// Mirror a (row, col) pair inside a rows x cols grid
pub fn flip_coords(pos: (i32, i32), rows: i32, cols: i32, horizontal: bool, vertical: bool) -> (i32, i32) {
    let row = if vertical { rows - 1 - pos.0 } else { pos.0 };
    let col = if horizontal { cols - 1 - pos.1 } else { pos.1 };
    (row, col)
}

pub fn flip_grid(grid: &Grid, horizontal: bool, vertical: bool) -> Grid {
    let mut flipped = Grid::new(grid.rows, grid.cols);
    for (row, col) in all_cells(grid) {
        if grid.is_wall(row, col) {
            let (r, c) = flip_coords((row, col), grid.rows, grid.cols, horizontal, vertical);
            flipped.set_cell(r, c, true);
        }
    }
    flipped
}

/// The 4 mirror variants (original, h_flip, v_flip, hv_flip) of a grid
/// and a list of query cases
pub fn flip_variants(grid: &Grid, queries: &[QueryCase]) -> Vec<(&'static str, Grid, Vec<QueryCase>)> {
    [
        ("original", false, false),
        ("h_flip", true, false),
        ("v_flip", false, true),
        ("hv_flip", true, true),
    ]
    .iter()
    .map(|&(name, h, v)| {
        let flip = |p: [i32; 2]| {
            // Out-of-grid cells stay where they are so they remain out of grid
            if grid.in_bounds(p[0], p[1]) {
                let (r, c) = flip_coords((p[0], p[1]), grid.rows, grid.cols, h, v);
                [r, c]
            } else {
                p
            }
        };
        let cases = queries
            .iter()
            .map(|q| QueryCase { a: flip(q.a), b: flip(q.b), expected: q.expected })
            .collect();
        (name, flip_grid(grid, h, v), cases)
    })
    .collect()
}
