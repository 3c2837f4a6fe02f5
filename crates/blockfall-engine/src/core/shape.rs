use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};

use super::piece::PieceRotation;

/// Largest extent of a shape matrix along either axis.
pub const MAX_SHAPE_SIZE: usize = 4;

/// One of the seven tetromino shapes.
///
/// The discriminant is the shape id used by the save format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ShapeKind {
    /// I-piece.
    I = 0,
    /// T-piece.
    T = 1,
    /// L-piece.
    L = 2,
    /// J-piece.
    J = 3,
    /// O-piece.
    O = 4,
    /// S-piece.
    S = 5,
    /// Z-piece.
    Z = 6,
}

impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        ShapeKind::ALL[rng.random_range(0..ShapeKind::LEN)]
    }
}

impl ShapeKind {
    /// Number of shapes (7).
    pub const LEN: usize = 7;

    /// Every shape, ordered by id.
    pub const ALL: [Self; Self::LEN] = [
        Self::I,
        Self::T,
        Self::L,
        Self::J,
        Self::O,
        Self::S,
        Self::Z,
    ];

    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        if (id as usize) < Self::LEN {
            Some(Self::ALL[id as usize])
        } else {
            None
        }
    }

    /// Returns the single character name of this shape.
    ///
    /// ```
    /// use blockfall_engine::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::S.as_char(), 'S');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            ShapeKind::I => 'I',
            ShapeKind::T => 'T',
            ShapeKind::L => 'L',
            ShapeKind::J => 'J',
            ShapeKind::O => 'O',
            ShapeKind::S => 'S',
            ShapeKind::Z => 'Z',
        }
    }

    /// Returns the unrotated matrix of this shape.
    #[must_use]
    pub const fn base_matrix(self) -> ShapeMatrix {
        SHAPE_CATALOG[self as usize]
    }

    /// Returns the matrix of this shape in the given rotation.
    #[must_use]
    pub fn matrix(self, rotation: PieceRotation) -> ShapeMatrix {
        self.base_matrix().rotated(rotation)
    }
}

/// Rectangular boolean matrix of a shape, at most 4×4.
///
/// Cells are addressed as `(column, row)` with `(0, 0)` at the top-left.
///
/// ```
/// use blockfall_engine::{PieceRotation, ShapeKind};
///
/// let matrix = ShapeKind::I.matrix(PieceRotation::default());
/// assert_eq!((matrix.width(), matrix.height()), (4, 1));
///
/// let standing = ShapeKind::I.matrix(PieceRotation::default().rotated_right());
/// assert_eq!((standing.width(), standing.height()), (1, 4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeMatrix {
    width: u8,
    height: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl ShapeMatrix {
    #[expect(clippy::cast_possible_truncation)]
    const fn from_rows<const W: usize, const H: usize>(rows: [[u8; W]; H]) -> Self {
        assert!(W > 0 && W <= MAX_SHAPE_SIZE);
        assert!(H > 0 && H <= MAX_SHAPE_SIZE);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < H {
            let mut x = 0;
            while x < W {
                cells[y][x] = rows[y][x] != 0;
                x += 1;
            }
            y += 1;
        }
        Self {
            width: W as u8,
            height: H as u8,
            cells,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        usize::from(self.width)
    }

    #[must_use]
    pub fn height(&self) -> usize {
        usize::from(self.height)
    }

    /// Returns whether the cell at `(x, y)` is filled. Out-of-range cells are empty.
    #[must_use]
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height() && self.cells[y][x]
    }

    /// Iterates the filled cells as `(x, y)` in row-major order.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height())
            .flat_map(move |y| (0..self.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| self.cells[y][x])
    }

    /// Rotates the matrix a quarter turn clockwise.
    ///
    /// Takes the transpose of the matrix with its rows reversed, so a `W×H`
    /// matrix becomes `H×W`.
    #[must_use]
    pub const fn rotated_cw(self) -> Self {
        let width = self.height as usize;
        let height = self.width as usize;
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < height {
            let mut x = 0;
            while x < width {
                cells[y][x] = self.cells[width - 1 - x][y];
                x += 1;
            }
            y += 1;
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }

    /// Returns this matrix rotated clockwise by `rotation` quarter turns.
    ///
    /// Always derived from `self`, never from a previously rotated matrix.
    #[must_use]
    pub fn rotated(self, rotation: PieceRotation) -> Self {
        (0..rotation.quarter_turns()).fold(self, |matrix, _| matrix.rotated_cw())
    }
}

const SHAPE_CATALOG: [ShapeMatrix; ShapeKind::LEN] = [
    // I-piece
    ShapeMatrix::from_rows([[1, 1, 1, 1]]),
    // T-piece
    ShapeMatrix::from_rows([[1, 1, 1], [0, 1, 0]]),
    // L-piece
    ShapeMatrix::from_rows([[1, 1, 1], [1, 0, 0]]),
    // J-piece
    ShapeMatrix::from_rows([[1, 1, 1], [0, 0, 1]]),
    // O-piece
    ShapeMatrix::from_rows([[1, 1], [1, 1]]),
    // S-piece
    ShapeMatrix::from_rows([[0, 1, 1], [1, 1, 0]]),
    // Z-piece
    ShapeMatrix::from_rows([[1, 1, 0], [0, 1, 1]]),
];
