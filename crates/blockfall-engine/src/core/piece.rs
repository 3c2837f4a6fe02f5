use arrayvec::ArrayVec;
use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};

use super::{
    PIECE_SPAWN_X, PIECE_SPAWN_Y,
    shape::{ShapeKind, ShapeMatrix},
};

/// Color of a piece and of the board cells it locks into.
///
/// The discriminant is the color id used by the save format; `0` is reserved
/// for empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceColor {
    Red = 1,
    Blue = 2,
    Green = 3,
    Yellow = 4,
    Purple = 5,
    Cyan = 6,
    Orange = 7,
}

impl Distribution<PieceColor> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceColor {
        PieceColor::ALL[rng.random_range(0..PieceColor::LEN)]
    }
}

impl PieceColor {
    /// Number of piece colors (7).
    pub const LEN: usize = 7;

    /// Every color, ordered by id.
    pub const ALL: [Self; Self::LEN] = [
        Self::Red,
        Self::Blue,
        Self::Green,
        Self::Yellow,
        Self::Purple,
        Self::Cyan,
        Self::Orange,
    ];

    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Parses a color id (`1..=7`).
    ///
    /// ```
    /// use blockfall_engine::PieceColor;
    ///
    /// assert_eq!(PieceColor::from_id(1), Some(PieceColor::Red));
    /// assert_eq!(PieceColor::from_id(0), None);
    /// assert_eq!(PieceColor::from_id(8), None);
    /// ```
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[id as usize - 1]),
            _ => None,
        }
    }
}

/// Rotation state of a piece, in clockwise quarter turns from spawn (`0..=3`).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PieceRotation(u8);

impl PieceRotation {
    #[must_use]
    pub const fn new(quarter_turns: u8) -> Option<Self> {
        if quarter_turns < 4 {
            Some(Self(quarter_turns))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn rotated_right(self) -> Self {
        Self((self.0 + 1) % 4)
    }
}

/// A piece instance: shape, color and rotation, without a position.
///
/// Pieces are immutable; [`Piece::rotated_right`] returns a new instance.
///
/// ```
/// use blockfall_engine::{Piece, PieceColor, ShapeKind};
///
/// let piece = Piece::new(ShapeKind::T, PieceColor::Purple);
/// let rotated = piece.rotated_right();
/// assert_eq!(rotated.rotation().quarter_turns(), 1);
/// assert_eq!(rotated.color(), PieceColor::Purple);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    shape: ShapeKind,
    color: PieceColor,
    rotation: PieceRotation,
}

impl Distribution<Piece> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Piece {
        Piece::new(rng.random(), rng.random())
    }
}

impl Piece {
    #[must_use]
    pub const fn new(shape: ShapeKind, color: PieceColor) -> Self {
        Self {
            shape,
            color,
            rotation: PieceRotation(0),
        }
    }

    #[must_use]
    pub const fn with_rotation(self, rotation: PieceRotation) -> Self {
        Self { rotation, ..self }
    }

    #[must_use]
    pub const fn shape(&self) -> ShapeKind {
        self.shape
    }

    #[must_use]
    pub const fn color(&self) -> PieceColor {
        self.color
    }

    #[must_use]
    pub const fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    /// Returns the shape matrix in the current rotation.
    #[must_use]
    pub fn matrix(&self) -> ShapeMatrix {
        self.shape.matrix(self.rotation)
    }

    #[must_use]
    pub const fn rotated_right(&self) -> Self {
        self.with_rotation(self.rotation.rotated_right())
    }
}

/// Board-space offset of a piece matrix's top-left corner.
///
/// Signed, since a piece may poke out of the board while a move is being
/// tested, and its top rows may sit above row 0.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PiecePosition {
    x: i32,
    y: i32,
}

impl PiecePosition {
    pub const SPAWN_POSITION: Self = Self::new(PIECE_SPAWN_X, PIECE_SPAWN_Y);

    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn x(self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> i32 {
        self.y
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// The active piece together with its position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallingPiece {
    piece: Piece,
    position: PiecePosition,
}

impl FallingPiece {
    #[must_use]
    pub const fn new(piece: Piece, position: PiecePosition) -> Self {
        Self { piece, position }
    }

    /// Places `piece` at the spawn position, unrotated.
    #[must_use]
    pub const fn spawn(piece: Piece) -> Self {
        Self::new(
            piece.with_rotation(PieceRotation(0)),
            PiecePosition::SPAWN_POSITION,
        )
    }

    #[must_use]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    #[must_use]
    pub const fn position(&self) -> PiecePosition {
        self.position
    }

    /// Iterates the board-space `(x, y)` of every filled cell.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let PiecePosition { x: x0, y: y0 } = self.position;
        self.piece
            .matrix()
            .filled_cells()
            .map(move |(dx, dy)| (x0 + offset(dx), y0 + offset(dy)))
            .collect::<ArrayVec<_, 4>>()
            .into_iter()
    }

    #[must_use]
    pub const fn moved(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.piece, self.position.offset(dx, dy))
    }

    #[must_use]
    pub const fn rotated_right(&self) -> Self {
        Self::new(self.piece.rotated_right(), self.position)
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const fn offset(cell: usize) -> i32 {
    // shape matrices are at most 4x4
    cell as i32
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_rotation_wraps() {
        let mut rotation = PieceRotation::default();
        for expected in [1, 2, 3, 0, 1] {
            rotation = rotation.rotated_right();
            assert_eq!(rotation.quarter_turns(), expected);
        }
        assert_eq!(PieceRotation::new(4), None);
    }

    #[test]
    fn test_color_ids() {
        for (i, color) in PieceColor::ALL.into_iter().enumerate() {
            assert_eq!(usize::from(color.id()), i + 1);
            assert_eq!(PieceColor::from_id(color.id()), Some(color));
        }
    }

    #[test]
    fn test_spawn_position() {
        let falling = FallingPiece::spawn(Piece::new(ShapeKind::O, PieceColor::Yellow));
        assert_eq!(falling.position(), PiecePosition::new(4, 0));
        let cells: Vec<_> = falling.occupied_positions().collect();
        assert_eq!(cells, vec![(4, 0), (5, 0), (4, 1), (5, 1)]);
    }

    #[test]
    fn test_spawn_resets_rotation() {
        let piece = Piece::new(ShapeKind::L, PieceColor::Orange).rotated_right();
        let falling = FallingPiece::spawn(piece);
        assert_eq!(falling.piece().rotation(), PieceRotation::default());
    }

    #[test]
    fn test_occupied_positions_follow_rotation() {
        let falling = FallingPiece::new(
            Piece::new(ShapeKind::I, PieceColor::Cyan),
            PiecePosition::new(3, -2),
        )
        .rotated_right();
        let cells: Vec<_> = falling.occupied_positions().collect();
        assert_eq!(cells, vec![(3, -2), (3, -1), (3, 0), (3, 1)]);
    }

    #[test]
    fn test_random_pieces_never_use_empty_color() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen_shapes = [false; ShapeKind::LEN];
        let mut seen_colors = [false; PieceColor::LEN];
        for _ in 0..1000 {
            let piece: Piece = rng.random();
            assert_ne!(piece.color().id(), 0);
            assert_eq!(piece.rotation(), PieceRotation::default());
            seen_shapes[usize::from(piece.shape().id())] = true;
            seen_colors[usize::from(piece.color().id() - 1)] = true;
        }
        assert!(seen_shapes.iter().all(|&seen| seen));
        assert!(seen_colors.iter().all(|&seen| seen));
    }
}
