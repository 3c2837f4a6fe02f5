use blockfall_store::{HighScoreLedger, HighScoreRecord};
use chrono::Local;
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

const SHOWN_RECORDS: usize = 10;

const KEY_BINDINGS: &[KeyBinding] = &[(&["any key"], "Back")];

#[derive(Debug)]
pub(crate) struct HighScoresScreen {
    records: Vec<HighScoreRecord>,
}

impl HighScoresScreen {
    pub(crate) fn new(ledger: &HighScoreLedger) -> Self {
        Self {
            records: ledger.top(SHOWN_RECORDS).copied().collect(),
        }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        if self.records.is_empty() {
            return vec![Line::raw("No games played yet.").centered()];
        }
        self.records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let date = record.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M");
                Line::raw(format!("{:>2}. {:>8}  {date}", i + 1, record.score))
            })
            .collect()
    }
}

impl<'a> Screen<'a> for HighScoresScreen {
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
        let lines = self.lines();
        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        let area = main_area.centered(
            Constraint::Length(36),
            Constraint::Length(lines.len() as u16 + 2),
        );

        let paragraph = Paragraph::new(Text::from(lines)).block(
            Block::bordered()
                .title(Line::from("HIGH SCORES").centered())
                .style(style::DEFAULT),
        );
        frame.render_widget(paragraph, area);
        frame.render_widget(KeyBindingDisplay::new(KEY_BINDINGS), help_area);
    }
}
