//! Construction errors.
//!
//! Gameplay never fails: blocked moves are no-ops and a blocked spawn is the
//! game-over state. The only rejected input is a board geometry that does not
//! describe a whole number of cells.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum ConfigError {
    #[error("unit size must be positive")]
    ZeroUnitSize,

    #[error("canvas {dimension} must be positive")]
    ZeroDimension { dimension: &'static str },

    #[error("canvas {dimension} of {value}px is not a multiple of the {unit}px unit size")]
    NotAMultiple {
        dimension: &'static str,
        value: u32,
        unit: u32,
    },

    #[error("board of {cols}x{rows} cells exceeds the supported size")]
    TooLarge { cols: u32, rows: u32 },

    #[error("row {row} has {len} cells, expected {cols}")]
    RaggedRow { row: usize, len: usize, cols: usize },
}
