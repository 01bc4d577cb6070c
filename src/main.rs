use arboard::Clipboard;
use macroquad::prelude::*;
use mazereach::action_log::{Action, ActionLog};
use mazereach::config::Config;
use mazereach::layout::{format_layout, parse_layout, MazeFile, QueryCase};
use mazereach::{samples, ClosureOptions, Grid, MazeSolver, Strategy};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Run the reference scenarios and print each maze with its answer.
/// Returns false if any answer differs from the expected one.
fn run_demo(strategy: Strategy, options: ClosureOptions) -> bool {
    let scenarios = [
        ("split 3x3", samples::split_3x3(false), (0, 0), (2, 2), false),
        ("split 3x3, bottom open", samples::split_3x3(true), (0, 0), (2, 2), true),
        ("reference 9x13", samples::reference_9x13(), (3, 3), (4, 9), false),
        ("reference 9x13, (8,7) open", samples::reference_9x13_opened(), (3, 3), (4, 9), true),
    ];

    let mut all_passed = true;

    for (name, grid, a, b, expected) in scenarios {
        println!("Maze '{}':\n{}", name, format_layout(&grid, Some(a), Some(b)));

        let start = Instant::now();
        let solver = match MazeSolver::with_strategy(&grid, strategy, options) {
            Ok(solver) => solver,
            Err(e) => {
                println!("✗ {} (construction failed: {})", name, e);
                all_passed = false;
                continue;
            }
        };
        let connected = solver.is_connected(a.0, a.1, b.0, b.1);

        println!(
            "Coordinates {:?} and {:?} are connected: {} ({} in {:.2?})",
            a,
            b,
            connected,
            strategy,
            start.elapsed()
        );

        if connected == expected {
            println!("✓ {}\n", name);
        } else {
            println!("✗ {} (expected {})\n", name, expected);
            all_passed = false;
        }
    }

    all_passed
}

/// Run the query cases of every JSON maze file in a directory
fn run_checks(dir: &Path, strategy: Strategy, options: ClosureOptions) -> bool {
    let mut passed = 0;
    let mut failures = Vec::new();

    println!("Running maze files from {}\n", dir.display());

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Failed to read maze directory {}: {}", dir.display(), e);
            return false;
        }
    };
    let mut entries: Vec<_> = entries.filter_map(Result::ok).collect();
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }

        let maze = match MazeFile::load_from_file(&path) {
            Ok(maze) => maze,
            Err(e) => {
                println!("✗ {} ({})", path.display(), e);
                failures.push(path.display().to_string());
                continue;
            }
        };

        let solver = match maze
            .to_grid()
            .and_then(|grid| MazeSolver::with_strategy(&grid, strategy, options))
        {
            Ok(solver) => solver,
            Err(e) => {
                println!("✗ {} ({})", maze.name, e);
                failures.push(maze.name.clone());
                continue;
            }
        };

        let wrong: Vec<&QueryCase> = maze
            .queries
            .iter()
            .filter(|q| {
                let actual = solver.is_connected(q.a[0], q.a[1], q.b[0], q.b[1]);
                q.expected.map_or(false, |expected| expected != actual)
            })
            .collect();

        if wrong.is_empty() {
            passed += 1;
            println!("✓ {} ({} queries)", maze.name, maze.queries.len());
        } else {
            println!("✗ {} ({} of {} queries wrong)", maze.name, wrong.len(), maze.queries.len());
            for q in wrong {
                println!("    {:?} -> {:?}, expected {:?}", q.a, q.b, q.expected);
            }
            failures.push(maze.name.clone());
        }
    }

    println!("\n========================================");
    println!("Maze Results: {} passed, {} failed", passed, failures.len());
    println!("========================================");

    if !failures.is_empty() {
        println!("\nFailed mazes:");
        for name in &failures {
            println!("  - {}", name);
        }
    }

    failures.is_empty()
}

/// Visualization state
struct VisState {
    grid: Grid,
    solver: Option<MazeSolver>,
    endpoint_a: Option<(i32, i32)>,
    endpoint_b: Option<(i32, i32)>,
    /// Cells reachable from endpoint A
    reachable: HashSet<i32>,
    cell_size: f32,
    strategy: Strategy,
    options: ClosureOptions,
    action_log: ActionLog,
}

impl VisState {
    fn new(config: &Config) -> Self {
        let mut grid = Grid::new(config.grid.rows, config.grid.cols);
        let mut action_log = ActionLog::new();

        if let Some(path) = &config.maze.path {
            match MazeFile::load_from_file(Path::new(path)).and_then(|maze| maze.to_grid()) {
                Ok(loaded) => {
                    println!("Loaded maze from {}", path);
                    action_log.log(Action::LoadMaze {
                        path: path.clone(),
                        rows: loaded.rows,
                        cols: loaded.cols,
                    });
                    grid = loaded;
                }
                Err(e) => eprintln!("Warning: Failed to load maze {}: {}", path, e),
            }
        }

        let mut state = VisState {
            grid,
            solver: None,
            endpoint_a: None,
            endpoint_b: None,
            reachable: HashSet::new(),
            cell_size: config.grid.cell_size,
            strategy: config.solver.strategy(),
            options: config.closure_options(),
            action_log,
        };
        state.rebuild();
        state
    }

    /// Grids are fixed per solver, so every edit builds a fresh one
    fn rebuild(&mut self) {
        let start = Instant::now();
        match MazeSolver::with_strategy(&self.grid, self.strategy, self.options) {
            Ok(solver) => {
                self.action_log.log(Action::Rebuild {
                    strategy: self.strategy.to_string(),
                    nodes: self.grid.node_count(),
                    millis: start.elapsed().as_millis() as u64,
                });
                self.solver = Some(solver);
            }
            Err(e) => {
                eprintln!("Failed to build solver: {}", e);
                self.solver = None;
            }
        }
        self.update_reachable();
    }

    fn update_reachable(&mut self) {
        self.reachable = match (&self.solver, self.endpoint_a) {
            (Some(solver), Some((row, col))) => solver.reachable_from(row, col).into_iter().collect(),
            _ => HashSet::new(),
        };
    }

    fn query(&self) -> Option<bool> {
        let solver = self.solver.as_ref()?;
        let (a, b) = (self.endpoint_a?, self.endpoint_b?);
        Some(solver.is_connected(a.0, a.1, b.0, b.1))
    }

    fn log_query(&mut self) {
        if let (Some(connected), Some(a), Some(b)) = (self.query(), self.endpoint_a, self.endpoint_b) {
            self.action_log.log(Action::Query { a, b, connected });
        }
    }

    fn handle_click(&mut self, mouse_x: f32, mouse_y: f32) {
        let col = (mouse_x / self.cell_size) as i32;
        let row = (mouse_y / self.cell_size) as i32;

        if !self.grid.in_bounds(row, col) {
            return;
        }

        // Left click: toggle wall
        if is_mouse_button_pressed(MouseButton::Left) {
            self.grid.toggle_cell(row, col);
            self.action_log.log(Action::ToggleWall {
                row,
                col,
                wall: self.grid.is_wall(row, col),
            });
            self.rebuild();
            self.log_query();
        }
        // Right click: place A, then B, then start over with A
        else if is_mouse_button_pressed(MouseButton::Right) {
            let label = if self.endpoint_a.is_none() || self.endpoint_b.is_some() {
                self.endpoint_a = Some((row, col));
                self.endpoint_b = None;
                'A'
            } else {
                self.endpoint_b = Some((row, col));
                'B'
            };
            self.action_log.log(Action::SetEndpoint { label, row, col });
            self.update_reachable();
            self.log_query();
        }
    }

    fn reset(&mut self) {
        self.grid = Grid::new(self.grid.rows, self.grid.cols);
        self.endpoint_a = None;
        self.endpoint_b = None;
        self.action_log.log(Action::Reset);
        self.rebuild();
    }

    fn copy_to_clipboard(&mut self) {
        let text = format_layout(&self.grid, self.endpoint_a, self.endpoint_b);
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(&text) {
                    println!("Failed to copy to clipboard: {}", e);
                } else {
                    println!("Maze layout copied to clipboard!");
                    self.action_log.log(Action::CopyLayout);
                    // Keep clipboard alive for a moment so clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => println!("Failed to access clipboard: {}", e),
        }
    }

    fn paste_from_clipboard(&mut self) {
        let text = match Clipboard::new().and_then(|mut clipboard| clipboard.get_text()) {
            Ok(text) => text,
            Err(e) => {
                println!("Failed to read clipboard: {}", e);
                return;
            }
        };

        match parse_layout(&text) {
            Ok(layout) => {
                println!("Pasted {}x{} maze", layout.grid.rows, layout.grid.cols);
                self.action_log.log(Action::PasteLayout {
                    rows: layout.grid.rows,
                    cols: layout.grid.cols,
                });
                self.grid = layout.grid;
                self.endpoint_a = layout.a;
                self.endpoint_b = layout.b;
                self.rebuild();
                self.log_query();
            }
            Err(e) => println!("Clipboard does not hold a maze layout: {}", e),
        }
    }

    fn save_maze(&mut self, path: &str) {
        let mut maze = MazeFile::from_grid("saved", &self.grid);
        if let (Some(a), Some(b)) = (self.endpoint_a, self.endpoint_b) {
            maze.queries.push(QueryCase {
                a: [a.0, a.1],
                b: [b.0, b.1],
                expected: self.query(),
            });
        }

        match maze.save_to_file(Path::new(path)) {
            Ok(()) => {
                println!("Maze saved to {}", path);
                self.action_log.log(Action::SaveMaze { path: path.to_string() });
            }
            Err(e) => println!("Failed to save maze: {}", e),
        }
    }

    fn draw(&self) {
        clear_background(Color::from_rgba(30, 30, 30, 255));

        for row in 0..self.grid.rows {
            for col in 0..self.grid.cols {
                let cell_id = self.grid.get_id(row, col);
                let px = col as f32 * self.cell_size;
                let py = row as f32 * self.cell_size;

                let color = if self.endpoint_a == Some((row, col)) {
                    BLUE
                } else if self.endpoint_b == Some((row, col)) {
                    ORANGE
                } else if self.grid.is_wall(row, col) {
                    RED
                } else if self.reachable.contains(&cell_id) {
                    Color::from_rgba(100, 200, 100, 255)
                } else {
                    Color::from_rgba(60, 60, 60, 255)
                };

                draw_rectangle(px, py, self.cell_size - 1.0, self.cell_size - 1.0, color);
            }
        }

        let answer = match self.query() {
            Some(true) => "A and B are connected".to_string(),
            Some(false) => "A and B are NOT connected".to_string(),
            None => "Right click to place A and B".to_string(),
        };
        let info = format!(
            "{} [{}]\nLeft click: toggle wall  Right click: place A/B\nC: copy  V: paste  S: save  R: reset  Esc: close",
            answer, self.strategy
        );

        let text_y = self.grid.rows as f32 * self.cell_size + 20.0;
        for (i, line) in info.lines().enumerate() {
            draw_text(line, 10.0, text_y + i as f32 * 20.0, 20.0, WHITE);
        }
    }
}

#[macroquad::main("MazeReach - Reachability Demo")]
async fn main() {
    let config = Config::load();
    let strategy = config.solver.strategy();
    let options = config.closure_options();

    // Check command line arguments
    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("--demo") => {
            if !run_demo(strategy, options) {
                std::process::exit(1);
            }
            return;
        }
        Some("--check") => {
            let dir = args.get(2).map(String::as_str).unwrap_or("./test_data");
            if !run_checks(Path::new(dir), strategy, options) {
                std::process::exit(1);
            }
            return;
        }
        _ => {}
    }

    let mut state = VisState::new(&config);

    loop {
        if is_mouse_button_pressed(MouseButton::Left) || is_mouse_button_pressed(MouseButton::Right) {
            let (mouse_x, mouse_y) = mouse_position();
            state.handle_click(mouse_x, mouse_y);
        }

        if is_key_pressed(KeyCode::C) {
            state.copy_to_clipboard();
        }
        if is_key_pressed(KeyCode::V) {
            state.paste_from_clipboard();
        }
        if is_key_pressed(KeyCode::S) {
            state.save_maze("maze.json");
        }
        if is_key_pressed(KeyCode::R) {
            state.reset();
        }
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        state.draw();

        next_frame().await
    }

    if config.logging.enable_action_log {
        println!("{}", state.action_log.summary());
        match state.action_log.save_to_file(&config.logging.action_log_path) {
            Ok(()) => println!("Action log saved to {}", config.logging.action_log_path),
            Err(e) => eprintln!("Failed to save action log: {}", e),
        }
    }
}
