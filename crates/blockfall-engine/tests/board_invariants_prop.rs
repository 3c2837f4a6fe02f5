//! Property tests for board geometry and session bookkeeping.
//!
//! - `clear_lines` keeps the board height, keeps non-full rows in order and
//!   refills the top with empty rows.
//! - `is_colliding` agrees with a direct bounds-and-occupancy predicate for any
//!   shape, rotation and position, including positions off the board.
//! - Any command sequence keeps the level equal to the one derived from the
//!   score and never leaves a full row on the board.

use blockfall_engine::{
    BOARD_HEIGHT, BOARD_WIDTH, Block, Board, FallingPiece, GameSession, Piece, PieceColor,
    PiecePosition, PieceRotation, PieceSeed, ShapeKind, TickOutcome, level_for_score,
};
use proptest::{collection::vec, prelude::*};

fn row_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        vec(1u8..=7, BOARD_WIDTH),
        vec(0u8..=7, BOARD_WIDTH),
        Just(vec![0; BOARD_WIDTH]),
    ]
}

fn board_strategy() -> impl Strategy<Value = Vec<Vec<u8>>> {
    vec(row_strategy(), BOARD_HEIGHT)
}

fn build_board(rows: &[Vec<u8>]) -> Board {
    let mut board = Board::INITIAL;
    for (y, row) in rows.iter().enumerate() {
        for (x, &value) in row.iter().enumerate() {
            board.fill_block_at(x, y, Block::from_color_id(value).unwrap());
        }
    }
    board
}

fn board_values(board: &Board) -> Vec<Vec<u8>> {
    board
        .rows()
        .map(|row| row.iter().map(|block| block.color_id()).collect())
        .collect()
}

fn falling_piece_strategy() -> impl Strategy<Value = FallingPiece> {
    (0u8..7, 1u8..=7, 0u8..4, -4i32..14, -5i32..24).prop_map(|(shape, color, rotation, x, y)| {
        let piece = Piece::new(
            ShapeKind::from_id(shape).unwrap(),
            PieceColor::from_id(color).unwrap(),
        )
        .with_rotation(PieceRotation::new(rotation).unwrap());
        FallingPiece::new(piece, PiecePosition::new(x, y))
    })
}

fn reference_collision(board: &Board, piece: &FallingPiece) -> bool {
    let position = piece.position();
    piece.piece().matrix().filled_cells().any(|(dx, dy)| {
        let x = position.x() + i32::try_from(dx).unwrap();
        let y = position.y() + i32::try_from(dy).unwrap();
        if x < 0 || x >= i32::try_from(BOARD_WIDTH).unwrap() {
            return true;
        }
        if y >= i32::try_from(BOARD_HEIGHT).unwrap() {
            return true;
        }
        y >= 0 && board.cell(x, y).is_some_and(|block| !block.is_empty())
    })
}

#[derive(Debug, Clone, Copy)]
enum Command {
    Left,
    Right,
    Rotate,
    SoftDrop,
    Tick,
}

fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        1 => Just(Command::Left),
        1 => Just(Command::Right),
        1 => Just(Command::Rotate),
        1 => Just(Command::SoftDrop),
        4 => Just(Command::Tick),
    ]
}

proptest! {
    #[test]
    fn clear_lines_keeps_remaining_rows_in_order(rows in board_strategy()) {
        let mut board = build_board(&rows);
        let cleared = board.clear_lines();

        let remaining: Vec<_> = rows
            .iter()
            .filter(|row| row.iter().any(|&value| value == 0))
            .cloned()
            .collect();
        prop_assert_eq!(cleared, BOARD_HEIGHT - remaining.len());

        let mut expected = vec![vec![0; BOARD_WIDTH]; cleared];
        expected.extend(remaining);
        prop_assert_eq!(board_values(&board), expected);
    }

    #[test]
    fn is_colliding_matches_reference(
        rows in board_strategy(),
        piece in falling_piece_strategy(),
    ) {
        let board = build_board(&rows);
        prop_assert_eq!(board.is_colliding(&piece), reference_collision(&board, &piece));
    }

    #[test]
    fn level_tracks_score_under_any_commands(
        seed in any::<u64>(),
        commands in vec(command_strategy(), 1..400),
    ) {
        let mut session = GameSession::with_seed(PieceSeed::from(seed));
        for command in commands {
            match command {
                Command::Left => _ = session.try_move_left(),
                Command::Right => _ = session.try_move_right(),
                Command::Rotate => _ = session.try_rotate(),
                Command::SoftDrop => _ = session.try_soft_drop(),
                Command::Tick => {
                    if session.tick() == TickOutcome::GameOver {
                        prop_assert!(session.session_state().is_game_over());
                    }
                }
            }
            let stats = session.stats();
            prop_assert_eq!(stats.level(), level_for_score(stats.score()));
            prop_assert!(session.board().rows().all(|row| !row.iter().all(|block| !block.is_empty())));
        }
    }
}
