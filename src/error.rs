use std::fmt;

/// Errors raised while building a maze or a reachability engine.
///
/// Out-of-bounds queries are not errors: they simply answer "not connected".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// Grid has zero (or negative) rows or columns, or a cell buffer that
    /// does not match its dimensions
    InvalidDimensions { rows: i32, cols: i32 },
    /// A row of a nested grid has a different length than the first one
    RaggedRows { row: usize, expected: usize, found: usize },
    /// Text layout or JSON maze could not be parsed
    Parse(String),
    /// Reading or writing a maze file failed
    Io(String),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeError::InvalidDimensions { rows, cols } => {
                write!(f, "invalid grid dimensions: {}x{}", rows, cols)
            }
            MazeError::RaggedRows { row, expected, found } => write!(
                f,
                "row {} has {} cells, expected {}",
                row, found, expected
            ),
            MazeError::Parse(msg) => write!(f, "parse error: {}", msg),
            MazeError::Io(msg) => write!(f, "io error: {}", msg),
        }
    }
}

impl std::error::Error for MazeError {}

impl From<std::io::Error> for MazeError {
    fn from(e: std::io::Error) -> Self {
        MazeError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for MazeError {
    fn from(e: serde_json::Error) -> Self {
        MazeError::Parse(e.to_string())
    }
}
