use blockfall_engine::{MAX_LEVEL, SCORE_PER_LEVEL, SCORE_TABLE};
use crossterm::event::Event;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::{Line, Text},
    widgets::{Block, Paragraph},
};

use crate::{
    tui::{Runtime, Screen, ScreenTransition},
    view::widgets::{KeyBinding, KeyBindingDisplay, style},
};

const KEY_BINDINGS: &[KeyBinding] = &[(&["any key"], "Back")];

#[derive(Debug)]
pub(crate) struct InstructionsScreen;

impl InstructionsScreen {
    fn lines() -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::raw("Fill whole rows to clear them."),
            Line::raw("The game ends when a new piece has no room."),
            Line::raw(""),
            Line::raw("  ← / a    move left"),
            Line::raw("  → / d    move right"),
            Line::raw("  ↑ / w    rotate"),
            Line::raw("  ↓ / s    drop faster"),
            Line::raw("  Space    pause / resume"),
            Line::raw("  Esc      save and return to the menu"),
            Line::raw(""),
            Line::raw("Points per clear, times the level:"),
        ];
        for (name, points) in ["single", "double", "triple", "tetris"]
            .into_iter()
            .zip(&SCORE_TABLE[1..])
        {
            lines.push(Line::raw(format!("  {name:<8} {points:>4}")));
        }
        lines.extend([
            Line::raw(""),
            Line::raw(format!(
                "A new level every {SCORE_PER_LEVEL} points, up to level {MAX_LEVEL}."
            )),
        ]);
        lines
    }
}

impl<'a> Screen<'a> for InstructionsScreen {
    fn on_active(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_interval(None);
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: &Event) -> ScreenTransition<'a> {
        if event.is_key_press() {
            ScreenTransition::Pop
        } else {
            ScreenTransition::Stay
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    fn draw(&self, frame: &mut Frame) {
        let lines = Self::lines();
        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        let area = main_area.centered(
            Constraint::Length(48),
            Constraint::Length(lines.len() as u16 + 2),
        );

        let paragraph = Paragraph::new(Text::from(lines)).block(
            Block::bordered()
                .title(Line::from("INSTRUCTIONS").centered())
                .style(style::DEFAULT),
        );
        frame.render_widget(paragraph, area);
        frame.render_widget(KeyBindingDisplay::new(KEY_BINDINGS), help_area);
    }
}
