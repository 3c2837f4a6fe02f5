use blockfall_store::GameStore as _;
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, List, ListItem, ListState},
};

use crate::{
    command::play::{
        PlayContext,
        screens::{
            game::GameScreen, high_scores::HighScoresScreen, instructions::InstructionsScreen,
        },
    },
    tui::{Runtime, Screen, ScreenTransition},
    view::widgets::{KeyBinding, KeyBindingDisplay, color, style},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    NewGame,
    ResumeGame,
    HighScores,
    Instructions,
    Quit,
}

impl MenuItem {
    fn label(self) -> &'static str {
        match self {
            Self::NewGame => "New Game",
            Self::ResumeGame => "Resume Game",
            Self::HighScores => "High Scores",
            Self::Instructions => "Instructions",
            Self::Quit => "Quit",
        }
    }
}

const KEY_BINDINGS: &[KeyBinding] = &[
    (&["↑", "w"], "Up"),
    (&["↓", "s"], "Down"),
    (&["Enter"], "Select"),
    (&["Esc", "q"], "Quit"),
];

#[derive(Debug)]
pub(crate) struct MenuScreen<'a> {
    ctx: &'a PlayContext,
    items: Vec<MenuItem>,
    selected: usize,
    status: Option<String>,
}

impl<'a> MenuScreen<'a> {
    pub(crate) fn new(ctx: &'a PlayContext) -> Self {
        let mut screen = Self {
            ctx,
            items: vec![],
            selected: 0,
            status: None,
        };
        screen.refresh_items();
        screen
    }

    /// Offers "Resume Game" only while a suspended game exists.
    fn refresh_items(&mut self) {
        let selected = self.items.get(self.selected).copied();
        let has_save = self.ctx.store().has_save();
        self.items = [
            MenuItem::NewGame,
            MenuItem::ResumeGame,
            MenuItem::HighScores,
            MenuItem::Instructions,
            MenuItem::Quit,
        ]
        .into_iter()
        .filter(|item| *item != MenuItem::ResumeGame || has_save)
        .collect();
        self.selected = selected
            .and_then(|selected| self.items.iter().position(|item| *item == selected))
            .unwrap_or(0);
    }

    fn select_previous(&mut self) {
        self.selected = self
            .selected
            .checked_sub(1)
            .unwrap_or(self.items.len() - 1);
    }

    fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.items.len();
    }

    fn activate(&mut self) -> ScreenTransition<'a> {
        self.status = None;
        match self.items[self.selected] {
            MenuItem::NewGame => ScreenTransition::Push(Box::new(GameScreen::new(
                self.ctx,
                self.ctx.new_game(),
            ))),
            MenuItem::ResumeGame => {
                if let Some(session) = self.ctx.resume_game() {
                    ScreenTransition::Push(Box::new(GameScreen::new(self.ctx, session)))
                } else {
                    self.status = Some("The saved game could not be loaded.".to_owned());
                    ScreenTransition::Stay
                }
            }
            MenuItem::HighScores => ScreenTransition::Push(Box::new(HighScoresScreen::new(
                &self.ctx.store().high_scores(),
            ))),
            MenuItem::Instructions => ScreenTransition::Push(Box::new(InstructionsScreen)),
            MenuItem::Quit => ScreenTransition::Exit,
        }
    }
}

impl<'a> Screen<'a> for MenuScreen<'a> {
    fn on_active(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_interval(None);
        self.refresh_items();
        let errors = self.ctx.store_error_count();
        if errors > 0 && self.status.is_none() {
            self.status = Some(format!(
                "{errors} storage error(s); details are printed on exit."
            ));
        }
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: &Event) -> ScreenTransition<'a> {
        let Some(event) = event.as_key_event() else {
            return ScreenTransition::Stay;
        };
        match event.code {
            KeyCode::Up | KeyCode::Char('w') => self.select_previous(),
            KeyCode::Down | KeyCode::Char('s') => self.select_next(),
            KeyCode::Enter => return self.activate(),
            KeyCode::Esc | KeyCode::Char('q') => return ScreenTransition::Exit,
            _ => {}
        }
        ScreenTransition::Stay
    }

    #[expect(clippy::cast_possible_truncation)]
    fn draw(&self, frame: &mut Frame) {
        let [main_area, status_area, help_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let menu_area = main_area.centered(
            Constraint::Length(30),
            Constraint::Length(self.items.len() as u16 + 2),
        );

        let items = self
            .items
            .iter()
            .map(|item| ListItem::new(item.label()))
            .collect::<Vec<_>>();
        let list = List::new(items)
            .block(
                Block::bordered()
                    .title(Line::from("BLOCKFALL").centered())
                    .style(style::DEFAULT),
            )
            .highlight_style(
                Style::default()
                    .fg(color::YELLOW)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");
        let mut list_state = ListState::default();
        list_state.select(Some(self.selected));
        frame.render_stateful_widget(list, menu_area, &mut list_state);

        if let Some(status) = &self.status {
            frame.render_widget(
                Line::styled(status.as_str(), style::HIGHLIGHT).centered(),
                status_area,
            );
        }
        frame.render_widget(KeyBindingDisplay::new(KEY_BINDINGS), help_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::play::screens::test_util::{key, unwritable_context};

    #[test]
    fn test_resume_hidden_without_save() {
        let ctx = unwritable_context();
        let menu = MenuScreen::new(&ctx);
        assert_eq!(
            menu.items,
            [
                MenuItem::NewGame,
                MenuItem::HighScores,
                MenuItem::Instructions,
                MenuItem::Quit
            ]
        );
    }

    #[test]
    fn test_selection_wraps() {
        let ctx = unwritable_context();
        let mut runtime = Runtime::new();
        let mut menu = MenuScreen::new(&ctx);
        menu.on_active(&mut runtime);

        _ = menu.handle_event(&mut runtime, &key(KeyCode::Up));
        assert_eq!(menu.items[menu.selected], MenuItem::Quit);
        _ = menu.handle_event(&mut runtime, &key(KeyCode::Char('s')));
        assert_eq!(menu.items[menu.selected], MenuItem::NewGame);
    }

    #[test]
    fn test_select_transitions() {
        let ctx = unwritable_context();
        let mut runtime = Runtime::new();
        let mut menu = MenuScreen::new(&ctx);

        let transition = menu.handle_event(&mut runtime, &key(KeyCode::Enter));
        assert!(matches!(transition, ScreenTransition::Push(_)));

        _ = menu.handle_event(&mut runtime, &key(KeyCode::Up));
        let transition = menu.handle_event(&mut runtime, &key(KeyCode::Enter));
        assert!(matches!(transition, ScreenTransition::Exit));

        let transition = menu.handle_event(&mut runtime, &key(KeyCode::Esc));
        assert!(matches!(transition, ScreenTransition::Exit));
    }
}
