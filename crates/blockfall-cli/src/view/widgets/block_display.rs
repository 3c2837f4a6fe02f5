use blockfall_engine::{Block, PieceColor};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::view::widgets::style;

/// One board cell, two terminal columns wide.
#[derive(Debug)]
pub struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn width() -> u16 {
        2
    }

    pub fn height() -> u16 {
        1
    }

    pub fn from_block(block: Block, show_dots: bool) -> Self {
        match block {
            Block::Empty if show_dots => Self::new(style::EMPTY_DOT, "."),
            Block::Empty => Self::new(style::EMPTY, ""),
            Block::Filled(color) => Self::new(color_style(color), ""),
        }
    }
}

fn color_style(color: PieceColor) -> Style {
    match color {
        PieceColor::Red => style::RED_BLOCK,
        PieceColor::Blue => style::BLUE_BLOCK,
        PieceColor::Green => style::GREEN_BLOCK,
        PieceColor::Yellow => style::YELLOW_BLOCK,
        PieceColor::Purple => style::PURPLE_BLOCK,
        PieceColor::Cyan => style::CYAN_BLOCK,
        PieceColor::Orange => style::ORANGE_BLOCK,
    }
}

impl Widget for BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // a Paragraph fills the whole area, not just the cells holding the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
