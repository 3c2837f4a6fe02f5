use std::time::Instant;

use blockfall_engine::{SessionState, TickOutcome};
use blockfall_store::{JsonFileStore, PersistentSession};
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Line,
};

use crate::{
    command::play::PlayContext,
    tui::{Runtime, Screen, ScreenTransition},
    view::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay, style},
};

const PLAYING_KEYS: &[KeyBinding] = &[
    (&["←", "a"], "Left"),
    (&["→", "d"], "Right"),
    (&["↑", "w"], "Rotate"),
    (&["↓", "s"], "Drop"),
    (&["Space"], "Pause"),
    (&["Esc"], "Menu"),
];
const PAUSED_KEYS: &[KeyBinding] = &[(&["Space"], "Resume"), (&["Esc"], "Menu")];
const GAME_OVER_KEYS: &[KeyBinding] = &[(&["any key"], "Menu")];

/// A game in progress. Leaving it suspends the game so it can be resumed.
///
/// Once the game is over, any key returns to the menu.
#[derive(Debug)]
pub(crate) struct GameScreen<'a> {
    ctx: &'a PlayContext,
    session: PersistentSession<JsonFileStore>,
    clock: Instant,
    status: Option<String>,
}

impl<'a> GameScreen<'a> {
    pub(crate) fn new(ctx: &'a PlayContext, session: PersistentSession<JsonFileStore>) -> Self {
        Self {
            ctx,
            session,
            clock: Instant::now(),
            status: None,
        }
    }

    /// Adds the time since the last call to the session's play time.
    fn sync_clock(&mut self) {
        let now = Instant::now();
        self.session.advance_time(now.saturating_duration_since(self.clock));
        self.clock = now;
    }

    /// Runs gravity at the current level's speed while playing, and not at all otherwise.
    fn arm_ticks(&self, runtime: &mut Runtime) {
        let interval = self
            .session
            .session_state()
            .is_playing()
            .then(|| self.session.tick_interval());
        runtime.set_tick_interval(interval);
    }

    fn collect_store_error(&mut self) {
        if let Some(error) = self.session.take_store_error() {
            self.status = Some(format!("Could not save: {error}"));
            self.ctx.report_store_error(error);
        }
    }
}

impl<'a> Screen<'a> for GameScreen<'a> {
    fn on_active(&mut self, runtime: &mut Runtime) {
        self.clock = Instant::now();
        self.arm_ticks(runtime);
    }

    fn on_close(&mut self, _runtime: &mut Runtime) {
        self.sync_clock();
        if let Err(error) = self.session.suspend() {
            self.ctx.report_store_error(error);
        }
        if let Some(error) = self.session.take_store_error() {
            self.ctx.report_store_error(error);
        }
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) -> ScreenTransition<'a> {
        let Some(event) = event.as_key_event() else {
            return ScreenTransition::Stay;
        };
        self.sync_clock();

        if self.session.session_state().is_game_over() {
            return ScreenTransition::Pop;
        }
        let is_playing = self.session.session_state().is_playing();
        match event.code {
            KeyCode::Left | KeyCode::Char('a') if is_playing => _ = self.session.try_move_left(),
            KeyCode::Right | KeyCode::Char('d') if is_playing => {
                _ = self.session.try_move_right();
            }
            KeyCode::Up | KeyCode::Char('w') if is_playing => _ = self.session.try_rotate(),
            KeyCode::Down | KeyCode::Char('s') if is_playing => _ = self.session.try_soft_drop(),
            KeyCode::Char(' ') => {
                self.session.toggle_pause();
                self.arm_ticks(runtime);
            }
            KeyCode::Esc => return ScreenTransition::Pop,
            _ => {}
        }
        ScreenTransition::Stay
    }

    fn update(&mut self, runtime: &mut Runtime) {
        self.sync_clock();
        let level = self.session.stats().level();
        let outcome = self.session.tick();
        self.collect_store_error();
        match outcome {
            TickOutcome::GameOver => runtime.set_tick_interval(None),
            TickOutcome::Locked { .. } if self.session.stats().level() != level => {
                self.arm_ticks(runtime);
            }
            _ => {}
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let key_bindings = match self.session.session_state() {
            SessionState::Playing => PLAYING_KEYS,
            SessionState::Paused => PAUSED_KEYS,
            SessionState::GameOver => GAME_OVER_KEYS,
        };

        let [main_area, status_area, help_area] = Layout::vertical([
            Constraint::Length(22),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        frame.render_widget(SessionDisplay::new(&self.session), main_area);
        if let Some(status) = &self.status {
            frame.render_widget(
                Line::styled(status.as_str(), style::HIGHLIGHT).centered(),
                status_area,
            );
        }
        frame.render_widget(KeyBindingDisplay::new(key_bindings), help_area);
    }
}
