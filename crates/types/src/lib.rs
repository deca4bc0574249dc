//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used
//! by the simulation core, the terminal front end and the event journal alike.
//!
//! # Board Dimensions
//!
//! The board is derived from a canvas size and a unit (block) size:
//!
//! - **Canvas**: 300 x 600 pixels by default
//! - **Unit**: 30 pixels per block
//! - **Grid**: 10 columns x 20 rows
//!
//! # Timing and Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval of the runner (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `DROP_STEP_MS` | 100 | Gravity speed-up per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Gravity interval floor |
//! | `POINTS_PER_LINE` | 100 | Base points per cleared line |
//! | `POINTS_PER_LEVEL` | 1000 | Score needed per level |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Color, GameAction, PieceKind};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.index(), 1);
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(Color::from_hex("#a000f0"), Some(Color::new(0xa0, 0x00, 0xf0)));
//! ```

/// Default canvas width in pixels
pub const DEFAULT_CANVAS_WIDTH: u32 = 300;

/// Default canvas height in pixels
pub const DEFAULT_CANVAS_HEIGHT: u32 = 600;

/// Default size of one block in pixels
pub const DEFAULT_UNIT_SIZE: u32 = 30;

/// Frame interval used by the runner in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity interval reduction per level
pub const DROP_STEP_MS: u32 = 100;

/// Gravity interval floor
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Points per cleared line, multiplied by the current level
pub const POINTS_PER_LINE: u32 = 100;

/// Score needed to advance one level
pub const POINTS_PER_LEVEL: u32 = 1000;

/// Level of a fresh game
pub const START_LEVEL: u32 = 1;

/// Number of shapes in the piece catalog
pub const PIECE_COUNT: usize = 7;


/// The seven tetromino piece kinds, in catalog order
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **T**: Purple, T-shaped
/// - **L**: Orange, L-shaped
/// - **J**: Blue, J-shaped (mirror of L)
/// - **O**: Yellow, 2x2 square
/// - **Z**: Red, Z-shaped
/// - **S**: Green, S-shaped (mirror of Z)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    T,
    L,
    J,
    O,
    Z,
    S,
}

impl PieceKind {
    /// All kinds in catalog order (index 0..=6)
    pub const ALL: [PieceKind; PIECE_COUNT] = [
        PieceKind::I,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::O,
        PieceKind::Z,
        PieceKind::S,
    ];

    /// Catalog index of this kind
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::T => 1,
            PieceKind::L => 2,
            PieceKind::J => 3,
            PieceKind::O => 4,
            PieceKind::Z => 5,
            PieceKind::S => 6,
        }
    }

    /// Kind at a catalog index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "t" => Some(PieceKind::T),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "o" => Some(PieceKind::O),
            "z" => Some(PieceKind::Z),
            "s" => Some(PieceKind::S),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::T => "t",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::O => "o",
            PieceKind::Z => "z",
            PieceKind::S => "s",
        }
    }
}

/// 24-bit color identifier stored in board cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional)
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Format as lowercase `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Cell filled by a settled piece of that color
pub type Cell = Option<Color>;

/// Player commands understood by the engine
///
/// Everything except `Restart` is ignored once the game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Drop piece one row, locking it if blocked
    SoftDrop,
    /// Drop piece to the lowest legal row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise (no wall kicks)
    Rotate,
    /// Discard the current game and start a new one
    Restart,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Restart => "restart",
        }
    }
}

/// Core-side event emitted after a piece locks.
///
/// `score`, `level` and `drop_interval_ms` are the values after the lock was
/// scored. `game_over` reports whether spawning the following piece failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub piece_id: u32,
    pub lines_cleared: u32,
    pub line_clear_score: u32,
    pub score: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
    pub game_over: bool,
}

impl LockEvent {
    /// Whether this lock changed the score/level displays
    pub fn cleared_lines(&self) -> bool {
        self.lines_cleared > 0
    }
}
