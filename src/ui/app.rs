//! Main TUI application state and logic

use crate::drivers::{random_values, Algorithm, DriverParams, Session};
use crate::engine::RunStatus;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Fastest and slowest allowed pacing
const MIN_SPEED_MS: u64 = 25;
const MAX_SPEED_MS: u64 = 2000;
const SPEED_STEP_MS: u64 = 50;

/// The main application state
pub struct App {
    /// Which algorithm is being animated
    pub algorithm: Algorithm,

    /// Input the current session started from (restored on reset/replay)
    pub initial_values: Vec<i64>,

    /// Target / window parameters handed to the driver
    pub params: DriverParams,

    /// The live playback session (replaced wholesale on reset/new array)
    pub session: Session,

    /// Base step duration in milliseconds
    pub speed_ms: u64,

    /// Step log scroll offset (usize::MAX snaps to the bottom)
    pub log_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,

    /// Seed for generating fresh random arrays
    seed: u64,
}

impl App {
    /// Create a new app for the given prepared input
    pub fn new(
        algorithm: Algorithm,
        values: Vec<i64>,
        params: DriverParams,
        speed_ms: u64,
        seed: u64,
    ) -> Self {
        let session = Session::new(
            algorithm,
            values.clone(),
            params,
            Duration::from_millis(speed_ms),
        );
        App {
            algorithm,
            initial_values: values,
            params,
            session,
            speed_ms,
            log_scroll: usize::MAX,
            should_quit: false,
            status_message: String::from("Ready! Press space to play."),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
            seed: seed | 1, // xorshift needs a non-zero seed
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.advance();

            // Use poll with timeout so playback advances without input
            if event::poll(Duration::from_millis(30))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Poll the driver one tick and react to completion
    fn advance(&mut self) {
        let was_running = self.session.exec.status() == RunStatus::Running;
        self.session.poll();
        if was_running {
            // Follow the newest step while playing
            self.log_scroll = usize::MAX;
            if self.session.exec.status() == RunStatus::Completed {
                self.status_message = String::from("Playback complete");
            }
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes above, one-line status bar below
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
            .split(main_chunks[0]);

        // Left column: array (top) | step log (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[0]);

        let vis = self.session.vis.borrow();
        super::panes::render_array_pane(frame, left_rows[0], &vis, self.algorithm);
        super::panes::render_log_pane(frame, left_rows[1], &vis, &mut self.log_scroll);
        super::panes::render_info_pane(
            frame,
            columns[1],
            &vis,
            self.algorithm,
            self.params,
            self.speed_ms,
            self.session.exec.status(),
        );
        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            vis.steps(),
            self.session.exec.status(),
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                // Toggle play/pause (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.toggle_play();
                }
            }
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Right => {
                self.step_once();
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                let values = self.initial_values.clone();
                self.restart(values, "Reset");
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                let values = random_values(
                    &mut self.seed,
                    self.initial_values.len().clamp(4, 64),
                    self.algorithm,
                );
                self.initial_values = values.clone();
                self.restart(values, "New array");
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.adjust_speed(true);
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                self.adjust_speed(false);
            }
            KeyCode::Up => {
                self.log_scroll = self.log_scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                self.log_scroll = self.log_scroll.saturating_add(1);
            }
            _ => {}
        }
    }

    /// Start, pause, resume, or (from a finished session) replay
    fn toggle_play(&mut self) {
        match self.session.exec.status() {
            RunStatus::Idle | RunStatus::Paused => {
                self.session.exec.play();
                self.status_message = String::from("Playing...");
            }
            RunStatus::Running => {
                self.session.exec.pause();
                self.status_message = String::from("Paused");
            }
            RunStatus::Completed | RunStatus::Cancelled => {
                let values = self.initial_values.clone();
                self.restart(values, "Replaying...");
                self.session.exec.play();
            }
        }
    }

    /// Advance exactly one checkpoint, pausing first if needed
    fn step_once(&mut self) {
        match self.session.exec.status() {
            RunStatus::Idle => {
                // Begin the driver but freeze before its first wait elapses
                self.session.exec.play();
                self.session.exec.pause();
                self.status_message = String::from("Stepped (paused)");
            }
            RunStatus::Running => {
                self.session.exec.pause();
                self.status_message = String::from("Paused");
            }
            RunStatus::Paused => {
                self.session.exec.nudge();
                self.status_message = String::from("Stepped");
            }
            _ => return,
        }
        self.session.poll();
        self.log_scroll = usize::MAX;
    }

    /// Replace the session wholesale; the old controller and driver future
    /// are dropped, so nothing from the old run can fire into the new one
    fn restart(&mut self, values: Vec<i64>, message: &str) {
        self.session.exec.reset();
        self.session = Session::new(
            self.algorithm,
            values,
            self.params,
            Duration::from_millis(self.speed_ms),
        );
        self.log_scroll = usize::MAX;
        self.status_message = String::from(message);
    }

    /// Adjust pacing; speed changes apply while idle, paused, or between runs
    fn adjust_speed(&mut self, faster: bool) {
        if self.session.exec.status() == RunStatus::Running {
            self.status_message = String::from("Pause to change speed");
            return;
        }
        self.speed_ms = if faster {
            self.speed_ms.saturating_sub(SPEED_STEP_MS).max(MIN_SPEED_MS)
        } else {
            (self.speed_ms + SPEED_STEP_MS).min(MAX_SPEED_MS)
        };
        self.session
            .exec
            .set_speed(Duration::from_millis(self.speed_ms));
        self.status_message = format!("Speed: {} ms/step", self.speed_ms);
    }
}
