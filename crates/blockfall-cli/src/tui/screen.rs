use std::fmt;

use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::{App, Runtime};

/// One screen of the application: menu, game, high scores, ...
///
/// Only the screen on top of the [`ScreenStack`] receives events, ticks and
/// draw calls.
///
/// ```text
/// on_active() <----------+
///   |                    | screen above pops
/// (foreground)           |
///   |                    |
/// on_inactive() ---------+ (a screen is pushed on top)
///   |
/// on_close()     (popped, replaced, or the app exits)
/// ```
///
/// A screen sets the runtime's tick interval in [`on_active`](Self::on_active);
/// every screen does so, since the previous one may have left ticks running.
pub trait Screen<'a>: fmt::Debug {
    /// Called when the screen reaches the top of the stack.
    fn on_active(&mut self, runtime: &mut Runtime);

    /// Called when the screen leaves the top of the stack, before
    /// [`on_close`](Self::on_close) if it is being removed.
    fn on_inactive(&mut self, _runtime: &mut Runtime) {}

    /// Called once when the screen is removed from the stack.
    fn on_close(&mut self, _runtime: &mut Runtime) {}

    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) -> ScreenTransition<'a>;

    /// Called on every tick.
    fn update(&mut self, _runtime: &mut Runtime) {}

    fn draw(&self, frame: &mut Frame);
}

/// What to do after a screen has handled an event.
#[derive(Debug)]
pub enum ScreenTransition<'a> {
    Stay,
    /// Puts a new screen on top; the current one returns when it pops.
    Push(Box<dyn Screen<'a> + 'a>),
    /// Removes the current screen.
    Pop,
    /// Removes every screen and ends the application.
    Exit,
}

/// Stack of screens, run as an [`App`]. The application ends when the stack is empty.
#[derive(Debug)]
pub struct ScreenStack<'a> {
    screens: Vec<Box<dyn Screen<'a> + 'a>>,
    should_exit: bool,
}

impl<'a> ScreenStack<'a> {
    #[must_use]
    pub fn new(initial: Box<dyn Screen<'a> + 'a>) -> Self {
        Self {
            screens: vec![initial],
            should_exit: false,
        }
    }

    fn apply_transition(&mut self, runtime: &mut Runtime, transition: ScreenTransition<'a>) {
        match transition {
            ScreenTransition::Stay => {}
            ScreenTransition::Push(mut screen) => {
                if let Some(current) = self.screens.last_mut() {
                    current.on_inactive(runtime);
                }
                screen.on_active(runtime);
                self.screens.push(screen);
            }
            ScreenTransition::Pop => {
                self.close_top(runtime);
                if let Some(previous) = self.screens.last_mut() {
                    previous.on_active(runtime);
                }
            }
            ScreenTransition::Exit => {
                while !self.screens.is_empty() {
                    self.close_top(runtime);
                }
                self.should_exit = true;
            }
        }
    }

    fn close_top(&mut self, runtime: &mut Runtime) {
        if let Some(mut screen) = self.screens.pop() {
            screen.on_inactive(runtime);
            screen.on_close(runtime);
        }
    }
}

impl<'a> App for ScreenStack<'a> {
    fn init(&mut self, runtime: &mut Runtime) {
        if let Some(screen) = self.screens.last_mut() {
            screen.on_active(runtime);
        }
    }

    fn should_exit(&self) -> bool {
        self.should_exit || self.screens.is_empty()
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: Event) {
        let Some(current) = self.screens.last_mut() else {
            return;
        };
        let transition = current.handle_event(runtime, &event);
        self.apply_transition(runtime, transition);
    }

    fn draw(&self, frame: &mut Frame) {
        if let Some(current) = self.screens.last() {
            current.draw(frame);
        }
    }

    fn update(&mut self, runtime: &mut Runtime) {
        if let Some(current) = self.screens.last_mut() {
            current.update(runtime);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, mem};

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;

    #[derive(Debug)]
    struct TestScreen<'a> {
        name: &'static str,
        log: &'a RefCell<Vec<String>>,
        transition: Option<ScreenTransition<'a>>,
    }

    impl<'a> TestScreen<'a> {
        fn new(name: &'static str, log: &'a RefCell<Vec<String>>) -> Self {
            Self {
                name,
                log,
                transition: None,
            }
        }

        fn on_event(mut self, transition: ScreenTransition<'a>) -> Self {
            self.transition = Some(transition);
            self
        }

        fn record(&self, call: &str) {
            self.log.borrow_mut().push(format!("{}: {call}", self.name));
        }
    }

    impl<'a> Screen<'a> for TestScreen<'a> {
        fn on_active(&mut self, _runtime: &mut Runtime) {
            self.record("on_active");
        }

        fn on_inactive(&mut self, _runtime: &mut Runtime) {
            self.record("on_inactive");
        }

        fn on_close(&mut self, _runtime: &mut Runtime) {
            self.record("on_close");
        }

        fn handle_event(&mut self, _runtime: &mut Runtime, _event: &Event) -> ScreenTransition<'a> {
            self.record("handle_event");
            self.transition.take().unwrap_or(ScreenTransition::Stay)
        }

        fn update(&mut self, _runtime: &mut Runtime) {
            self.record("update");
        }

        fn draw(&self, _frame: &mut Frame) {}
    }

    fn key_event() -> Event {
        Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
    }

    fn drain(log: &RefCell<Vec<String>>) -> Vec<String> {
        mem::take(&mut *log.borrow_mut())
    }

    #[test]
    fn test_init_activates_initial_screen() {
        let log = RefCell::new(vec![]);
        let mut stack = ScreenStack::new(Box::new(TestScreen::new("menu", &log)));
        stack.init(&mut Runtime::new());
        assert_eq!(drain(&log), ["menu: on_active"]);
    }

    #[test]
    fn test_push_then_pop_returns_to_previous() {
        let log = RefCell::new(vec![]);
        let game = TestScreen::new("game", &log).on_event(ScreenTransition::Pop);
        let menu = TestScreen::new("menu", &log).on_event(ScreenTransition::Push(Box::new(game)));
        let mut stack = ScreenStack::new(Box::new(menu));
        let mut runtime = Runtime::new();
        stack.init(&mut runtime);
        drain(&log);

        stack.handle_event(&mut runtime, key_event());
        assert_eq!(
            drain(&log),
            ["menu: handle_event", "menu: on_inactive", "game: on_active"]
        );

        stack.update(&mut runtime);
        assert_eq!(drain(&log), ["game: update"]);

        stack.handle_event(&mut runtime, key_event());
        assert_eq!(
            drain(&log),
            [
                "game: handle_event",
                "game: on_inactive",
                "game: on_close",
                "menu: on_active"
            ]
        );
        assert!(!stack.should_exit());
    }

    #[test]
    fn test_exit_closes_every_screen_top_first() {
        let log = RefCell::new(vec![]);
        let game = TestScreen::new("game", &log).on_event(ScreenTransition::Exit);
        let menu = TestScreen::new("menu", &log).on_event(ScreenTransition::Push(Box::new(game)));
        let mut stack = ScreenStack::new(Box::new(menu));
        let mut runtime = Runtime::new();
        stack.init(&mut runtime);
        stack.handle_event(&mut runtime, key_event());
        drain(&log);

        stack.handle_event(&mut runtime, key_event());
        assert_eq!(
            drain(&log),
            [
                "game: handle_event",
                "game: on_inactive",
                "game: on_close",
                "menu: on_inactive",
                "menu: on_close"
            ]
        );
        assert!(stack.should_exit());
    }

    #[test]
    fn test_popping_last_screen_exits() {
        let log = RefCell::new(vec![]);
        let menu = TestScreen::new("menu", &log).on_event(ScreenTransition::Pop);
        let mut stack = ScreenStack::new(Box::new(menu));
        let mut runtime = Runtime::new();
        stack.init(&mut runtime);
        assert!(!stack.should_exit());

        stack.handle_event(&mut runtime, key_event());
        assert!(stack.should_exit());
    }

    #[test]
    fn test_stay_keeps_screen() {
        let log = RefCell::new(vec![]);
        let mut stack = ScreenStack::new(Box::new(TestScreen::new("menu", &log)));
        let mut runtime = Runtime::new();
        stack.init(&mut runtime);
        drain(&log);

        stack.handle_event(&mut runtime, key_event());
        stack.update(&mut runtime);
        assert_eq!(drain(&log), ["menu: handle_event", "menu: update"]);
    }
}
