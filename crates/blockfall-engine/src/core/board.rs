use super::{
    BOARD_HEIGHT, BOARD_WIDTH,
    piece::{FallingPiece, PieceColor},
};

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Block {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell occupied by a locked piece of the given color.
    Filled(PieceColor),
}

impl Block {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Block::Empty
    }

    /// Returns the cell value used by the save format (`0` for empty, `1..=7` otherwise).
    #[must_use]
    pub fn color_id(self) -> u8 {
        match self {
            Block::Empty => 0,
            Block::Filled(color) => color.id(),
        }
    }

    /// Parses a cell value of the save format.
    #[must_use]
    pub fn from_color_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Block::Empty),
            _ => PieceColor::from_id(id).map(Block::Filled),
        }
    }
}

/// One row of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardRow {
    cells: [Block; BOARD_WIDTH],
}

impl BoardRow {
    pub const EMPTY: Self = Self {
        cells: [Block::Empty; BOARD_WIDTH],
    };

    #[must_use]
    pub fn cells(&self) -> &[Block; BOARD_WIDTH] {
        &self.cells
    }

    /// Returns whether every cell of the row is occupied.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.cells.iter().all(|b| !b.is_empty())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|b| b.is_empty())
    }
}

/// The grid of locked cells.
///
/// Row 0 is the top of the board and gravity increases the row index.
/// Coordinates are signed so that piece cells outside the board can be tested
/// without wrapping; every access is bounds-checked before indexing.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, FallingPiece, Piece, PieceColor, PiecePosition, ShapeKind};
///
/// let mut board = Board::INITIAL;
/// let piece = FallingPiece::new(
///     Piece::new(ShapeKind::O, PieceColor::Yellow),
///     PiecePosition::new(0, 18),
/// );
/// assert!(!board.is_colliding(&piece));
///
/// board.fill_piece(&piece);
/// assert!(board.is_occupied(1, 19));
/// assert!(board.is_colliding(&piece));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [BoardRow; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const INITIAL: Self = Self {
        rows: [BoardRow::EMPTY; BOARD_HEIGHT],
    };

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Block; BOARD_WIDTH]> {
        self.rows.iter().map(BoardRow::cells)
    }

    /// Returns the cell at `(x, y)`, or `None` if it lies outside the board.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<Block> {
        let (x, y) = (column_index(x)?, row_index(y)?);
        Some(self.rows[y].cells[x])
    }

    /// Returns whether `(x, y)` is inside the board and occupied.
    #[must_use]
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).is_some_and(|b| !b.is_empty())
    }

    /// Fills a single cell.
    pub fn fill_block_at(&mut self, x: usize, y: usize, block: Block) {
        self.rows[y].cells[x] = block;
    }

    /// Returns whether the piece may not stand at its position.
    ///
    /// A filled cell collides when its column is outside the board, when its row
    /// is at or below the bottom, or when it lands on an occupied cell. Cells
    /// above row 0 are only checked against the side walls.
    #[must_use]
    pub fn is_colliding(&self, piece: &FallingPiece) -> bool {
        piece.occupied_positions().any(|(x, y)| {
            let Some(x) = column_index(x) else {
                return true;
            };
            if y < 0 {
                return false;
            }
            let Some(y) = row_index(y) else {
                return true;
            };
            !self.rows[y].cells[x].is_empty()
        })
    }

    /// Writes the piece's color into every filled cell that lies on the board.
    ///
    /// Cells above row 0 are dropped.
    pub fn fill_piece(&mut self, piece: &FallingPiece) {
        let block = Block::Filled(piece.piece().color());
        for (x, y) in piece.occupied_positions() {
            if let (Some(x), Some(y)) = (column_index(x), row_index(y)) {
                self.rows[y].cells[x] = block;
            }
        }
    }

    /// Clears filled lines and returns the number of lines cleared.
    ///
    /// Remaining rows keep their order and move down; the same number of empty
    /// rows are inserted at the top.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        for y in (0..BOARD_HEIGHT).rev() {
            if self.rows[y].is_filled() {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill(BoardRow::EMPTY);
        count
    }
}

fn column_index(x: i32) -> Option<usize> {
    usize::try_from(x).ok().filter(|&x| x < BOARD_WIDTH)
}

fn row_index(y: i32) -> Option<usize> {
    usize::try_from(y).ok().filter(|&y| y < BOARD_HEIGHT)
}

#[cfg(test)]
mod tests {
    use crate::core::{
        piece::{Piece, PiecePosition},
        shape::ShapeKind,
    };

    use super::*;

    const RED: Block = Block::Filled(PieceColor::Red);

    fn falling(shape: ShapeKind, x: i32, y: i32) -> FallingPiece {
        FallingPiece::new(
            Piece::new(shape, PieceColor::Blue),
            PiecePosition::new(x, y),
        )
    }

    fn fill_row(board: &mut Board, y: usize) {
        for x in 0..BOARD_WIDTH {
            board.fill_block_at(x, y, RED);
        }
    }

    #[test]
    fn test_initial_board_is_empty() {
        let board = Board::INITIAL;
        assert_eq!(board.rows().count(), BOARD_HEIGHT);
        for row in board.rows() {
            assert!(row.iter().all(|b| b.is_empty()));
        }
    }

    #[test]
    fn test_is_occupied_out_of_bounds() {
        let mut board = Board::INITIAL;
        board.fill_block_at(0, 0, RED);
        assert!(board.is_occupied(0, 0));
        assert!(!board.is_occupied(-1, 0));
        assert!(!board.is_occupied(0, -1));
        assert!(!board.is_occupied(10, 0));
        assert!(!board.is_occupied(0, 20));
    }

    #[test]
    fn test_collides_with_side_walls() {
        let board = Board::INITIAL;
        assert!(!board.is_colliding(&falling(ShapeKind::I, 0, 5)));
        assert!(!board.is_colliding(&falling(ShapeKind::I, 6, 5)));
        assert!(board.is_colliding(&falling(ShapeKind::I, -1, 5)));
        assert!(board.is_colliding(&falling(ShapeKind::I, 7, 5)));
    }

    #[test]
    fn test_collides_with_bottom() {
        let board = Board::INITIAL;
        assert!(!board.is_colliding(&falling(ShapeKind::O, 4, 18)));
        assert!(board.is_colliding(&falling(ShapeKind::O, 4, 19)));
    }

    #[test]
    fn test_collides_with_occupied_cell() {
        let mut board = Board::INITIAL;
        board.fill_block_at(5, 10, RED);
        assert!(board.is_colliding(&falling(ShapeKind::O, 4, 9)));
        assert!(board.is_colliding(&falling(ShapeKind::O, 5, 10)));
        assert!(!board.is_colliding(&falling(ShapeKind::O, 6, 10)));
        assert!(!board.is_colliding(&falling(ShapeKind::O, 4, 11)));
    }

    #[test]
    fn test_rows_above_board_skip_occupancy_but_not_walls() {
        let mut board = Board::INITIAL;
        fill_row(&mut board, 0);
        // O at y = -2 sits entirely above the board
        assert!(!board.is_colliding(&falling(ShapeKind::O, 4, -2)));
        // half of it reaches the occupied top row
        assert!(board.is_colliding(&falling(ShapeKind::O, 4, -1)));
        // above the board, but poking through the left wall
        assert!(board.is_colliding(&falling(ShapeKind::O, -1, -3)));
    }

    #[test]
    fn test_collision_uses_rotated_dimensions() {
        let board = Board::INITIAL;
        let lying = falling(ShapeKind::I, 0, 17);
        assert!(!board.is_colliding(&lying));
        // standing up, the I-piece no longer fits above the floor
        assert!(board.is_colliding(&lying.rotated_right()));
        let standing = falling(ShapeKind::I, 9, 0).rotated_right();
        assert!(!board.is_colliding(&standing));
        assert!(board.is_colliding(&standing.rotated_right()));
    }

    #[test]
    fn test_fill_piece_writes_color() {
        let mut board = Board::INITIAL;
        board.fill_piece(&falling(ShapeKind::T, 0, 18));
        let blue = Block::Filled(PieceColor::Blue);
        assert_eq!(board.cell(0, 18), Some(blue));
        assert_eq!(board.cell(1, 18), Some(blue));
        assert_eq!(board.cell(2, 18), Some(blue));
        assert_eq!(board.cell(1, 19), Some(blue));
        assert_eq!(board.cell(0, 19), Some(Block::Empty));
    }

    #[test]
    fn test_fill_piece_drops_cells_above_board() {
        let mut board = Board::INITIAL;
        let standing = falling(ShapeKind::I, 3, -2).rotated_right();
        board.fill_piece(&standing);
        let filled: usize = board
            .rows()
            .map(|row| row.iter().filter(|b| !b.is_empty()).count())
            .sum();
        assert_eq!(filled, 2);
        assert!(board.is_occupied(3, 0));
        assert!(board.is_occupied(3, 1));
    }

    #[test]
    fn test_clear_lines_none() {
        let mut board = Board::INITIAL;
        for x in 0..BOARD_WIDTH - 1 {
            board.fill_block_at(x, 19, RED);
        }
        let before = board.clone();
        assert_eq!(board.clear_lines(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_clear_lines_one_to_four() {
        for lines in 1..=4 {
            let mut board = Board::INITIAL;
            for y in BOARD_HEIGHT - lines..BOARD_HEIGHT {
                fill_row(&mut board, y);
            }
            assert_eq!(board.clear_lines(), lines);
            assert_eq!(board, Board::INITIAL);
        }
    }

    #[test]
    fn test_clear_lines_keeps_order_of_remaining_rows() {
        let mut board = Board::INITIAL;
        // distinct marker rows interleaved with full rows
        board.fill_block_at(0, 14, Block::Filled(PieceColor::Green));
        fill_row(&mut board, 15);
        board.fill_block_at(1, 16, Block::Filled(PieceColor::Yellow));
        fill_row(&mut board, 17);
        fill_row(&mut board, 18);
        board.fill_block_at(2, 19, Block::Filled(PieceColor::Cyan));

        assert_eq!(board.clear_lines(), 3);

        assert_eq!(board.cell(0, 17), Some(Block::Filled(PieceColor::Green)));
        assert_eq!(board.cell(1, 18), Some(Block::Filled(PieceColor::Yellow)));
        assert_eq!(board.cell(2, 19), Some(Block::Filled(PieceColor::Cyan)));
        for row in board.rows().take(17) {
            assert!(row.iter().all(|b| b.is_empty()));
        }
    }

    #[test]
    fn test_block_color_ids() {
        assert_eq!(Block::Empty.color_id(), 0);
        assert_eq!(RED.color_id(), 1);
        assert_eq!(Block::from_color_id(0), Some(Block::Empty));
        assert_eq!(Block::from_color_id(7), Some(Block::Filled(PieceColor::Orange)));
        assert_eq!(Block::from_color_id(8), None);
    }
}
