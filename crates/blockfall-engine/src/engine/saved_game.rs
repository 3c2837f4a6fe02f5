use serde::{Deserialize, Serialize};

use crate::{
    BOARD_HEIGHT, BOARD_WIDTH, Block, Board, Piece, PieceColor, PieceRotation, RestoreError,
    ShapeKind,
};

/// Serializable snapshot of a game in progress.
///
/// Written as camelCase JSON. The snake_case keys of older saves
/// (`current_piece`, `current_x`, `elapsed_time`, ...) are read as well.
///
/// Convert with [`GameSession::to_saved`](crate::GameSession::to_saved) and
/// `GameSession::try_from`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGame {
    /// Cell values, top row first: `0` for empty, `1..=7` for a color.
    pub board: Vec<Vec<u8>>,
    #[serde(alias = "current_piece")]
    pub current_piece: Option<SavedPiece>,
    #[serde(alias = "next_piece")]
    pub next_piece: Option<SavedPiece>,
    #[serde(alias = "current_x")]
    pub current_x: i32,
    #[serde(alias = "current_y")]
    pub current_y: i32,
    pub score: usize,
    pub level: usize,
    /// Play time in seconds.
    #[serde(alias = "elapsed_time")]
    pub elapsed_time: f64,
}

/// Serializable piece instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPiece {
    #[serde(alias = "shape")]
    pub shape_id: u8,
    #[serde(alias = "color")]
    pub color_id: u8,
    pub rotation: u8,
}

impl From<Piece> for SavedPiece {
    fn from(piece: Piece) -> Self {
        Self {
            shape_id: piece.shape().id(),
            color_id: piece.color().id(),
            rotation: piece.rotation().quarter_turns(),
        }
    }
}

impl TryFrom<SavedPiece> for Piece {
    type Error = RestoreError;

    fn try_from(saved: SavedPiece) -> Result<Self, Self::Error> {
        let SavedPiece {
            shape_id,
            color_id,
            rotation,
        } = saved;
        let shape = ShapeKind::from_id(shape_id).ok_or(RestoreError::ShapeId { id: shape_id })?;
        let color = PieceColor::from_id(color_id).ok_or(RestoreError::ColorId { id: color_id })?;
        let rotation = PieceRotation::new(rotation).ok_or(RestoreError::Rotation { rotation })?;
        Ok(Piece::new(shape, color).with_rotation(rotation))
    }
}

pub(crate) fn board_to_rows(board: &Board) -> Vec<Vec<u8>> {
    board
        .rows()
        .map(|row| row.iter().map(|block| block.color_id()).collect())
        .collect()
}

pub(crate) fn board_from_rows(rows: &[Vec<u8>]) -> Result<Board, RestoreError> {
    if rows.len() != BOARD_HEIGHT || rows.iter().any(|row| row.len() != BOARD_WIDTH) {
        return Err(RestoreError::BoardDimensions);
    }
    let mut board = Board::INITIAL;
    for (y, row) in rows.iter().enumerate() {
        for (x, &value) in row.iter().enumerate() {
            let block = Block::from_color_id(value).ok_or(RestoreError::CellValue { x, y, value })?;
            board.fill_block_at(x, y, block);
        }
    }
    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_conversion() {
        let piece = Piece::new(ShapeKind::J, PieceColor::Cyan).rotated_right();
        let saved = SavedPiece::from(piece);
        assert_eq!(
            saved,
            SavedPiece {
                shape_id: 3,
                color_id: 6,
                rotation: 1
            }
        );
        assert_eq!(Piece::try_from(saved).unwrap(), piece);
    }

    #[test]
    fn test_piece_conversion_rejects_out_of_range_ids() {
        let valid = SavedPiece {
            shape_id: 0,
            color_id: 1,
            rotation: 0,
        };
        assert!(matches!(
            Piece::try_from(SavedPiece { shape_id: 7, ..valid }),
            Err(RestoreError::ShapeId { id: 7 })
        ));
        assert!(matches!(
            Piece::try_from(SavedPiece { color_id: 0, ..valid }),
            Err(RestoreError::ColorId { id: 0 })
        ));
        assert!(matches!(
            Piece::try_from(SavedPiece { rotation: 4, ..valid }),
            Err(RestoreError::Rotation { rotation: 4 })
        ));
    }

    #[test]
    fn test_piece_json_keys() {
        let saved = SavedPiece {
            shape_id: 4,
            color_id: 2,
            rotation: 3,
        };
        let json = serde_json::to_string(&saved).unwrap();
        assert_eq!(json, r#"{"shapeId":4,"colorId":2,"rotation":3}"#);

        let legacy: SavedPiece =
            serde_json::from_str(r#"{"shape": 4, "color": 2, "rotation": 3}"#).unwrap();
        assert_eq!(legacy, saved);
    }

    #[test]
    fn test_board_rows_roundtrip() {
        let mut board = Board::INITIAL;
        board.fill_block_at(0, 19, Block::Filled(PieceColor::Red));
        board.fill_block_at(9, 0, Block::Filled(PieceColor::Orange));
        let rows = board_to_rows(&board);
        assert_eq!(rows.len(), BOARD_HEIGHT);
        assert_eq!(rows[19][0], 1);
        assert_eq!(rows[0][9], 7);
        assert_eq!(board_from_rows(&rows).unwrap(), board);
    }

    #[test]
    fn test_board_rows_rejects_bad_input() {
        let mut rows = vec![vec![0; BOARD_WIDTH]; BOARD_HEIGHT];
        assert!(board_from_rows(&rows[1..]).is_err());

        rows[3].push(0);
        assert!(matches!(
            board_from_rows(&rows),
            Err(RestoreError::BoardDimensions)
        ));
        rows[3].pop();

        rows[5][2] = 8;
        assert!(matches!(
            board_from_rows(&rows),
            Err(RestoreError::CellValue {
                x: 2,
                y: 5,
                value: 8
            })
        ));
    }
}
