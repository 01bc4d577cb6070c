use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Things that happen in a demo session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Toggle a wall at (row, col); `wall` is the new state
    ToggleWall { row: i32, col: i32, wall: bool },
    /// Place query endpoint A or B
    SetEndpoint { label: char, row: i32, col: i32 },
    /// Reachability query and its answer
    Query { a: (i32, i32), b: (i32, i32), connected: bool },
    /// Solver rebuilt after a grid change
    Rebuild { strategy: String, nodes: usize, millis: u64 },
    /// Maze loaded from a file
    LoadMaze { path: String, rows: i32, cols: i32 },
    /// Maze saved to a file
    SaveMaze { path: String },
    /// Layout pasted from the clipboard (rows, cols)
    PasteLayout { rows: i32, cols: i32 },
    /// Layout copied to the clipboard
    CopyLayout,
    /// Grid cleared back to all open
    Reset,
}

/// Logged action with timestamp
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedAction {
    /// Milliseconds since start
    pub timestamp_ms: u64,
    pub action: Action,
}

/// Action logger
pub struct ActionLog {
    start_time: Instant,
    actions: Vec<LoggedAction>,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionLog {
    pub fn new() -> Self {
        ActionLog {
            start_time: Instant::now(),
            actions: Vec::new(),
        }
    }

    /// Log an action with current timestamp
    pub fn log(&mut self, action: Action) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.actions.push(LoggedAction { timestamp_ms, action });
    }

    pub fn get_actions(&self) -> &[LoggedAction] {
        &self.actions
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(&self.actions)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut walls_added = 0;
        let mut walls_removed = 0;
        let mut queries = 0;
        let mut connected = 0;
        let mut rebuilds = 0;
        let mut rebuild_ms = 0;

        for logged in &self.actions {
            match &logged.action {
                Action::ToggleWall { wall: true, .. } => walls_added += 1,
                Action::ToggleWall { wall: false, .. } => walls_removed += 1,
                Action::Query { connected: c, .. } => {
                    queries += 1;
                    if *c {
                        connected += 1;
                    }
                }
                Action::Rebuild { millis, .. } => {
                    rebuilds += 1;
                    rebuild_ms += millis;
                }
                _ => {}
            }
        }

        let duration = self.actions.last().map(|last| last.timestamp_ms).unwrap_or(0);

        format!(
            "Session Duration: {}ms\n\
             Total Events: {}\n\
             Grid Modifications: {} walls added, {} walls removed\n\
             Queries: {} ({} connected)\n\
             Rebuilds: {} ({}ms total)",
            duration,
            self.actions.len(),
            walls_added,
            walls_removed,
            queries,
            connected,
            rebuilds,
            rebuild_ms
        )
    }
}
