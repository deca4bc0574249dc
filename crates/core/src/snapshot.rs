//! Read-only view of the engine for renderers and observers.

use crate::board::{Board, BoardDims};
use crate::game_state::Tetromino;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: Board,
    pub active: Option<Tetromino>,
    pub next: Option<Tetromino>,
    pub game_over: bool,
    pub episode_id: u32,
    pub piece_id: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    /// An empty snapshot for a board of the given size
    pub fn new(dims: BoardDims) -> Self {
        Self {
            board: Board::new(dims),
            active: None,
            next: None,
            game_over: false,
            episode_id: 0,
            piece_id: 0,
            score: 0,
            level: 0,
            lines: 0,
            drop_interval_ms: 0,
        }
    }

    pub fn playable(&self) -> bool {
        !self.game_over && self.active.is_some()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self::new(BoardDims::default())
    }
}
