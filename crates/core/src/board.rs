//! Board module - manages the game grid
//!
//! The board is a `cols x rows` grid where each cell is empty or holds the color
//! of the piece that settled there. Storage is a flat row-major vector sized once
//! at construction; gameplay never reallocates it.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//! Negative y is the area above the visible board where freshly spawned pieces
//! may still hang; it is never stored.

use crate::error::ConfigError;
use crate::types::{Cell, Color, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_UNIT_SIZE};

/// Largest supported side of the grid, in cells
pub const MAX_BOARD_SIDE: u32 = 256;

/// Validated board geometry in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardDims {
    cols: u16,
    rows: u16,
}

impl BoardDims {
    /// Build from a cell count, rejecting empty or oversized grids
    pub fn new(cols: u32, rows: u32) -> Result<Self, ConfigError> {
        if cols == 0 {
            return Err(ConfigError::ZeroDimension { dimension: "width" });
        }
        if rows == 0 {
            return Err(ConfigError::ZeroDimension { dimension: "height" });
        }
        if cols > MAX_BOARD_SIDE || rows > MAX_BOARD_SIDE {
            return Err(ConfigError::TooLarge { cols, rows });
        }
        Ok(Self {
            cols: cols as u16,
            rows: rows as u16,
        })
    }

    /// Derive the grid from a pixel canvas and a block size.
    ///
    /// Both canvas sides must be exact multiples of `unit`; a fractional grid is
    /// rejected instead of rounded.
    pub fn from_canvas(width: u32, height: u32, unit: u32) -> Result<Self, ConfigError> {
        if unit == 0 {
            return Err(ConfigError::ZeroUnitSize);
        }
        for (dimension, value) in [("width", width), ("height", height)] {
            if value == 0 {
                return Err(ConfigError::ZeroDimension { dimension });
            }
            if value % unit != 0 {
                return Err(ConfigError::NotAMultiple {
                    dimension,
                    value,
                    unit,
                });
            }
        }
        Self::new(width / unit, height / unit)
    }

    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    pub fn rows(&self) -> usize {
        self.rows as usize
    }
}

impl Default for BoardDims {
    fn default() -> Self {
        Self {
            cols: (DEFAULT_CANVAS_WIDTH / DEFAULT_UNIT_SIZE) as u16,
            rows: (DEFAULT_CANVAS_HEIGHT / DEFAULT_UNIT_SIZE) as u16,
        }
    }
}

/// The game board using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    dims: BoardDims,
    /// Flat array of cells, row-major order (y * cols + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(dims: BoardDims) -> Self {
        Self {
            dims,
            cells: vec![None; dims.cols() * dims.rows()],
        }
    }

    /// Build a board from explicit rows (top to bottom)
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, ConfigError> {
        let cols = rows.first().map(|r| r.len()).unwrap_or(0);
        let dims = BoardDims::new(cols as u32, rows.len() as u32)?;
        let mut cells = Vec::with_capacity(cols * rows.len());
        for (row, cells_in_row) in rows.into_iter().enumerate() {
            if cells_in_row.len() != cols {
                return Err(ConfigError::RaggedRow {
                    row,
                    len: cells_in_row.len(),
                    cols,
                });
            }
            cells.extend(cells_in_row);
        }
        Ok(Self { dims, cells })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.dims.cols() || y as usize >= self.dims.rows() {
            return None;
        }
        Some((y as usize) * self.dims.cols() + (x as usize))
    }

    pub fn dims(&self) -> BoardDims {
        self.dims
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.dims.cols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.dims.rows()
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether a single piece cell may not sit at (x, y).
    ///
    /// Side walls and the floor block; cells above the top edge never do.
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        if x < 0 || x as usize >= self.dims.cols() {
            return true;
        }
        if y >= 0 && y as usize >= self.dims.rows() {
            return true;
        }
        y >= 0 && self.is_occupied(x, y)
    }

    /// Whether any of the absolute cells is blocked
    pub fn collides(&self, cells: &[(i32, i32)]) -> bool {
        cells.iter().any(|&(x, y)| self.is_blocked(x, y))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Cells of row `y`, if it exists
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.dims.rows() {
            return None;
        }
        let start = y * self.dims.cols();
        Some(&self.cells[start..start + self.dims.cols()])
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.dims.cols())
    }

    /// Remove row `y`, shift everything above it down by one and insert an
    /// empty row at the top.
    /// Returns false if `y` is out of bounds.
    pub fn clear_row(&mut self, y: usize) -> bool {
        if y >= self.dims.rows() {
            return false;
        }

        let width = self.dims.cols();

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells
                .copy_within(src_start..src_start + width, dst_start);
        }

        self.cells[..width].fill(None);
        true
    }

    /// Clear every full row and return how many were removed.
    ///
    /// Scans bottom to top. After a removal the same index holds the row that
    /// used to sit above it, so it is examined again before moving up.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = self.dims.rows();
        while y > 0 {
            if self.is_row_full(y - 1) {
                self.clear_row(y - 1);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Write `color` into every given cell.
    ///
    /// Returns false without touching the board if any cell is blocked. Cells
    /// above the top edge are legal but are not stored.
    pub fn lock_piece(&mut self, cells: &[(i32, i32)], color: Color) -> bool {
        if self.collides(cells) {
            return false;
        }

        for &(x, y) in cells {
            self.set(x, y, Some(color));
        }

        true
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_none())
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Convert to a 2D vector (top to bottom)
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows().map(|row| row.to_vec()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardDims::default())
    }
}
