use std::time::Duration;

use blockfall_engine::GameSession;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Paragraph, Widget},
};

use crate::view::widgets::style;

/// Inner width of the panel, in terminal columns.
const CONTENT_WIDTH: u16 = 20;

/// Score and time headlines, then level progress, then the line-clear tally.
const CONTENT_HEIGHT: u16 = 4 + 1 + 3 + 1 + 4;

pub struct SessionStatsDisplay<'a> {
    session: &'a GameSession,
    block: Option<BlockWidget<'a>>,
}

impl<'a> SessionStatsDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        CONTENT_WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        CONTENT_HEIGHT + super::block_vertical_margin(self.block.as_ref())
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let stats = self.session.stats();
        let [_, singles, doubles, triples, tetrises] = *stats.line_cleared_counter();

        let mut lines = vec![];
        for (label, value) in [
            ("SCORE", stats.score().to_string()),
            ("TIME", format_elapsed(self.session.elapsed())),
        ] {
            lines.push(Line::raw(format!("{label}:")));
            lines.push(Line::raw(value).right_aligned());
        }
        lines.push(Line::default());
        lines.extend(
            [
                ("LEVEL", stats.level()),
                ("LINES", stats.total_cleared_lines()),
                ("PIECES", stats.completed_pieces()),
            ]
            .map(|(label, value)| counter_line(label, value)),
        );
        lines.push(Line::default());
        lines.extend(
            [
                ("SINGLES", singles),
                ("DOUBLES", doubles),
                ("TRIPLES", triples),
                ("TETRIS", tetrises),
            ]
            .map(|(label, value)| counter_line(label, value)),
        );
        lines
    }
}

/// Formats play time as `m:ss`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}:{:0>2}", secs / 60, secs % 60)
}

/// `LABEL:` on the left and the value flush right, filling the panel width.
fn counter_line(label: &str, value: usize) -> Line<'static> {
    let value_width = usize::from(CONTENT_WIDTH).saturating_sub(label.len() + 1);
    Line::raw(format!("{label}:{value:>value_width$}"))
}

impl Widget for SessionStatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);
        Paragraph::new(self.lines())
            .style(style::DEFAULT)
            .render(area, buf);
    }
}
