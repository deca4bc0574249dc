//! Pieces module - tetromino shape matrices, colors and rotation
//!
//! Shapes are small rectangular 0/1 matrices kept in fixed 4x4 storage so that
//! copying and rotating a piece never allocates. The catalog is read-only;
//! active pieces hold their own (possibly rotated) copy.

use arrayvec::ArrayVec;

use crate::types::{Color, PieceKind, PIECE_COUNT};

/// Largest side of any shape matrix
pub const MAX_SHAPE_SIDE: usize = 4;

/// Filled cells of a shape, relative to its top-left corner
pub type ShapeCells = ArrayVec<(i32, i32), { MAX_SHAPE_SIDE * MAX_SHAPE_SIDE }>;

/// A rectangular 0/1 matrix of at most 4x4 cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    /// Row-major; entries outside `width x height` are always 0
    bits: [[u8; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE],
}

impl Shape {
    /// Build a shape from rows of 0/1 values (any non-zero counts as filled)
    pub const fn from_rows<const W: usize, const H: usize>(rows: [[u8; W]; H]) -> Self {
        assert!(W > 0 && H > 0 && W <= MAX_SHAPE_SIDE && H <= MAX_SHAPE_SIDE);
        let mut bits = [[0u8; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        let mut y = 0;
        while y < H {
            let mut x = 0;
            while x < W {
                bits[y][x] = if rows[y][x] != 0 { 1 } else { 0 };
                x += 1;
            }
            y += 1;
        }
        Self {
            width: W as u8,
            height: H as u8,
            bits,
        }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width as usize
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.height as usize
    }

    /// Whether the cell at column `dx`, row `dy` is filled
    pub fn is_filled(&self, dx: usize, dy: usize) -> bool {
        dx < self.width() && dy < self.height() && self.bits[dy][dx] != 0
    }

    /// Filled cells as `(dx, dy)`, row by row
    pub fn cells(&self) -> ShapeCells {
        let mut out = ShapeCells::new();
        for dy in 0..self.height() {
            for dx in 0..self.width() {
                if self.bits[dy][dx] != 0 {
                    out.push((dx as i32, dy as i32));
                }
            }
        }
        out
    }

    /// Rotate 90° clockwise.
    ///
    /// `rotated[i][j] = shape[h - 1 - j][i]`: the result has `width` rows and
    /// `height` columns.
    pub fn rotate_cw(&self) -> Self {
        let (w, h) = (self.width(), self.height());
        let mut bits = [[0u8; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for (i, row) in bits.iter_mut().enumerate().take(w) {
            for (j, bit) in row.iter_mut().enumerate().take(h) {
                *bit = self.bits[h - 1 - j][i];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            bits,
        }
    }

    /// Rows as nested vectors, for display and tests
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.height())
            .map(|y| self.bits[y][..self.width()].to_vec())
            .collect()
    }
}

/// Shape templates in catalog order
const SHAPES: [Shape; PIECE_COUNT] = [
    Shape::from_rows([[1, 1, 1, 1]]),
    Shape::from_rows([[1, 1, 1], [0, 1, 0]]),
    Shape::from_rows([[1, 1, 1], [1, 0, 0]]),
    Shape::from_rows([[1, 1, 1], [0, 0, 1]]),
    Shape::from_rows([[1, 1], [1, 1]]),
    Shape::from_rows([[1, 1, 0], [0, 1, 1]]),
    Shape::from_rows([[0, 1, 1], [1, 1, 0]]),
];

/// Colors in catalog order
const COLORS: [Color; PIECE_COUNT] = [
    Color::new(0x00, 0xf0, 0xf0),
    Color::new(0xa0, 0x00, 0xf0),
    Color::new(0xf0, 0xa0, 0x00),
    Color::new(0x00, 0x00, 0xf0),
    Color::new(0xf0, 0xf0, 0x00),
    Color::new(0xf0, 0x00, 0x00),
    Color::new(0x00, 0xf0, 0x00),
];

/// Spawn-orientation shape of a piece kind
pub fn get_shape(kind: PieceKind) -> Shape {
    SHAPES[kind.index()]
}

/// Color of a piece kind
pub fn get_color(kind: PieceKind) -> Color {
    COLORS[kind.index()]
}

/// Piece kind that owns a color, if any
pub fn kind_for_color(color: Color) -> Option<PieceKind> {
    COLORS
        .iter()
        .position(|c| *c == color)
        .and_then(PieceKind::from_index)
}

/// Column at which a shape spawns: `cols / 2 - width / 2`
pub fn spawn_x(cols: usize, shape: &Shape) -> i32 {
    (cols / 2) as i32 - (shape.width() / 2) as i32
}
