use crate::game::{format_time, HostSession};
use crate::stats::StatsManager;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::Duration;
use wirehack_core::HackConfig;

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// Current screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// Normal gameplay
    Playing,
    /// Access-granted screen
    Win,
}

/// The main application state
pub struct App {
    /// Current host session
    pub session: HostSession,
    /// Selected wire
    pub cursor_wire: usize,
    /// Selected row within the wire
    pub cursor_row: usize,
    /// Selected column
    pub cursor_col: usize,
    /// Color theme
    pub theme: Theme,
    /// Current screen state
    pub screen_state: ScreenState,
    /// Statistics manager
    pub stats: StatsManager,
    /// Message to display
    pub message: Option<String>,
    /// Message timer (ticks)
    message_timer: u32,
}

impl App {
    pub fn new(config: HackConfig, seed: u64) -> Self {
        Self {
            session: HostSession::new(config, seed),
            cursor_wire: 0,
            cursor_row: 0,
            cursor_col: 0,
            theme: Theme::dark(),
            screen_state: ScreenState::Playing,
            stats: StatsManager::load(),
            message: None,
            message_timer: 0,
        }
    }

    pub fn get_tick_rate(&self) -> Duration {
        Duration::from_millis(33)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match self.screen_state {
            ScreenState::Playing => self.handle_playing_key(key),
            ScreenState::Win => self.handle_win_key(key),
        }
    }

    fn handle_playing_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return AppAction::Quit,
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, 1),
            KeyCode::Char(' ') | KeyCode::Enter => self.rotate_at_cursor(),
            KeyCode::Char('r') => {
                self.session.reset();
                self.set_message("Panel re-locked".to_string());
            }
            KeyCode::Char('n') => self.new_session(),
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_win_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return AppAction::Quit,
            KeyCode::Char('n') | KeyCode::Enter => self.new_session(),
            KeyCode::Char('r') => {
                self.session.reset();
                self.screen_state = ScreenState::Playing;
            }
            _ => {}
        }
        AppAction::Continue
    }

    /// Cursor moves through all wires' grids as one vertical stack.
    fn move_cursor(&mut self, dr: isize, dc: isize) {
        let config = self.session.config();
        let rows = config.rows();
        let total_rows = rows * config.wires();

        let global_row = self.cursor_wire * rows + self.cursor_row;
        let new_row = (global_row as isize + dr).clamp(0, total_rows as isize - 1) as usize;
        self.cursor_wire = new_row / rows;
        self.cursor_row = new_row % rows;

        let new_col =
            (self.cursor_col as isize + dc).clamp(0, config.columns() as isize - 1) as usize;
        self.cursor_col = new_col;
    }

    fn rotate_at_cursor(&mut self) {
        let config = self.session.config();
        let flat = self.cursor_wire * config.cells_per_wire()
            + self.cursor_row * config.columns()
            + self.cursor_col;
        if self.session.select(flat) {
            self.on_completed();
        }
    }

    fn on_completed(&mut self) {
        let secs = self.session.elapsed().as_secs_f32();
        let fast = self.session.is_fast_hack();
        self.stats.record_hack(
            self.session.config(),
            secs,
            fast,
            self.session.moves(),
        );
        self.screen_state = ScreenState::Win;
        if fast {
            self.set_message(format!("Fast hack! {}", format_time(secs)));
        }
    }

    fn new_session(&mut self) {
        let config = self.session.config();
        self.session = HostSession::new(config, rand::random());
        self.cursor_wire = 0;
        self.cursor_row = 0;
        self.cursor_col = 0;
        self.screen_state = ScreenState::Playing;
        self.message = None;
        self.message_timer = 0;
    }

    fn set_message(&mut self, text: String) {
        self.message = Some(text);
        self.message_timer = 90; // ~3 seconds at the 33ms tick
    }

    /// Tick animations and the session clock
    pub fn tick(&mut self) {
        self.session.tick(self.get_tick_rate());
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }
    }
}
