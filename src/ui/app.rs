//! Main TUI application state and logic

use crate::interpreter::constants::AUTOPLAY_INTERVAL_MS;
use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::ui::panes::{
    render_grid_pane, render_stack_pane, render_status_bar, render_terminal_pane, GridRenderData,
    GridScrollState, StackScrollState, StatusRenderData,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Grid,
    Stack,
    Terminal,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: grid -> terminal -> stack)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Grid => FocusedPane::Terminal,
            FocusedPane::Terminal => FocusedPane::Stack,
            FocusedPane::Stack => FocusedPane::Grid,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Grid => FocusedPane::Stack,
            FocusedPane::Terminal => FocusedPane::Grid,
            FocusedPane::Stack => FocusedPane::Terminal,
        }
    }
}

/// The main application state
pub struct App {
    /// The interpreter instance, positioned somewhere in its history
    pub interpreter: Interpreter,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll state
    pub grid_scroll: GridScrollState,
    pub stack_scroll: StackScrollState,
    pub terminal_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app around an interpreter that has recorded its history
    pub fn new(interpreter: Interpreter) -> Self {
        let an_interval_ago = Instant::now()
            .checked_sub(Duration::from_secs(1))
            .unwrap_or_else(Instant::now);

        App {
            interpreter,
            focused_pane: FocusedPane::Grid,
            grid_scroll: GridScrollState::default(),
            stack_scroll: StackScrollState::default(),
            terminal_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            is_playing: false,
            last_play_time: Instant::now(),
            last_space_press: an_interval_ago,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Handle auto-play mode
            if self.is_playing
                && self.last_play_time.elapsed() >= Duration::from_millis(AUTOPLAY_INTERVAL_MS)
            {
                match self.interpreter.step_forward() {
                    Ok(()) => {
                        self.status_message = "Playing...".to_string();
                        self.terminal_scroll = usize::MAX;
                    }
                    Err(_) => {
                        self.is_playing = false;
                        self.status_message = "Playback complete".to_string();
                    }
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // 3 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(pane_area);

        // Left column: Grid (top) | Terminal (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        let interpreter = &self.interpreter;

        render_grid_pane(
            frame,
            left_rows[0],
            GridRenderData {
                grid: interpreter.grid(),
                cursor: interpreter.cursor(),
                modified_cells: interpreter.modified_cells(),
                steps: interpreter.steps(),
                is_halted: interpreter.is_halted(),
                is_string_mode: interpreter.is_string_mode(),
            },
            self.focused_pane == FocusedPane::Grid,
            &mut self.grid_scroll,
        );

        render_terminal_pane(
            frame,
            left_rows[1],
            interpreter.output_buffer(),
            interpreter.steps(),
            self.focused_pane == FocusedPane::Terminal,
            &mut self.terminal_scroll,
        );

        render_stack_pane(
            frame,
            columns[1],
            interpreter.stack(),
            self.focused_pane == FocusedPane::Stack,
            &mut self.stack_scroll,
        );

        render_status_bar(
            frame,
            status_area,
            StatusRenderData {
                message: &self.status_message,
                current_step: interpreter.history_position(),
                total_steps: interpreter.total_snapshots(),
                snapshot_memory: interpreter.snapshot_memory(),
                is_halted: interpreter.is_halted(),
                is_string_mode: interpreter.is_string_mode(),
                is_playing: self.is_playing,
            },
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let mut stepped = 0;
                for _ in 0..n {
                    if self.interpreter.step_forward().is_ok() {
                        stepped += 1;
                    } else {
                        break;
                    }
                }
                self.status_message = format!("Stepped forward {} step(s)", stepped);
                self.terminal_scroll = usize::MAX;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.step_backward();
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.step_forward();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Grid => {
                    // Scrolling up makes the cursor row move down visually
                    if let Some(row) = self.grid_scroll.target_row {
                        self.grid_scroll.target_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Stack => {
                    self.stack_scroll.offset = self.stack_scroll.offset.saturating_sub(1);
                }
                FocusedPane::Terminal => {
                    self.terminal_scroll = self.terminal_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Grid => {
                    if let Some(row) = self.grid_scroll.target_row {
                        self.grid_scroll.target_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Stack => {
                    self.stack_scroll.offset = self.stack_scroll.offset.saturating_add(1);
                }
                FocusedPane::Terminal => {
                    self.terminal_scroll = self.terminal_scroll.saturating_add(1);
                }
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(Duration::from_secs(1))
                            .unwrap_or_else(Instant::now);
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.status_message = match self.interpreter.jump_to_end() {
                    Ok(()) => "Jumped to end".to_string(),
                    Err(e) => e.to_string(),
                };
                self.terminal_scroll = usize::MAX;
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.status_message = match self.interpreter.rewind_to_start() {
                    Ok(()) => "Jumped to start".to_string(),
                    Err(e) => e.to_string(),
                };
                self.terminal_scroll = usize::MAX;
            }
            _ => {}
        }
    }

    /// Step forward in execution
    fn step_forward(&mut self) {
        match self.interpreter.step_forward() {
            Ok(()) => {
                self.status_message = "Stepped forward".to_string();
                // Auto-scroll terminal to bottom
                self.terminal_scroll = usize::MAX;
            }
            Err(RuntimeError::HistoryOperationFailed { message }) => {
                self.status_message = format!("Cannot step forward: {}", message);
            }
            Err(e) => {
                self.status_message = format!("Error: {}", e);
            }
        }
    }

    /// Step backward in execution
    fn step_backward(&mut self) {
        match self.interpreter.step_backward() {
            Ok(()) => {
                self.status_message = "Stepped backward".to_string();
                self.terminal_scroll = usize::MAX;
            }
            Err(RuntimeError::HistoryOperationFailed { message }) => {
                self.status_message = format!("Cannot step backward: {}", message);
            }
            Err(e) => {
                self.status_message = format!("Error: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn recorded(source: &str) -> App {
        let mut interpreter = Interpreter::with_seed(source, 1).unwrap();
        interpreter.record(100).unwrap();
        interpreter.rewind_to_start().unwrap();
        App::new(interpreter)
    }

    #[test]
    fn test_focus_cycles() {
        let mut focus = FocusedPane::Grid;
        for _ in 0..3 {
            focus = focus.next();
        }
        assert_eq!(focus, FocusedPane::Grid);
        assert_eq!(FocusedPane::Grid.next().prev(), FocusedPane::Grid);
    }

    #[test]
    fn test_arrow_keys_navigate_history() {
        let mut app = recorded("12+.@");

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.interpreter.history_position(), 2);

        press(&mut app, KeyCode::Left);
        assert_eq!(app.interpreter.history_position(), 1);
        assert_eq!(app.status_message, "Stepped backward");
    }

    #[test]
    fn test_number_key_steps_n() {
        let mut app = recorded("12+.@");
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.interpreter.history_position(), 3);
        assert_eq!(app.status_message, "Stepped forward 3 step(s)");
    }

    #[test]
    fn test_enter_and_backspace_jump() {
        let mut app = recorded("12+.@");

        press(&mut app, KeyCode::Enter);
        assert!(app.interpreter.is_halted());
        assert_eq!(app.interpreter.output(), "3");

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.interpreter.history_position(), 0);
        assert_eq!(app.interpreter.output(), "");
    }

    #[test]
    fn test_step_backward_at_start_reports() {
        let mut app = recorded("@");
        press(&mut app, KeyCode::Left);
        assert!(app.status_message.starts_with("Cannot step backward"));
    }

    #[test]
    fn test_quit() {
        let mut app = recorded("@");
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
