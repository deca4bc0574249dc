//! Game state module - the simulation engine
//!
//! This module ties together the board, the piece catalog, piece selection and
//! scoring. It owns the active and next pieces, applies player commands and
//! advances gravity when the caller reports the current time.
//!
//! The engine is passive and single-threaded: every operation runs to
//! completion and nothing happens between calls. Once the game is over every
//! command is ignored until [`GameState::restart`].

use crate::board::{Board, BoardDims};
use crate::pieces::{get_color, get_shape, spawn_x, Shape, ShapeCells};
use crate::rng::{PieceSource, RandomPicker};
use crate::scoring::{calculate_score, get_drop_interval_ms};
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// A piece instance: a shape copy, its color and its board offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Color,
    pub x: i32,
    pub y: i32,
}

impl Tetromino {
    /// Create a piece at the spawn position of a board `cols` wide
    pub fn new(kind: PieceKind, cols: usize) -> Self {
        let shape = get_shape(kind);
        Self {
            kind,
            shape,
            color: get_color(kind),
            x: spawn_x(cols, &shape),
            y: 0,
        }
    }

    /// Absolute board cells covered by this piece
    pub fn cells(&self) -> ShapeCells {
        let mut cells = self.shape.cells();
        for cell in cells.iter_mut() {
            cell.0 += self.x;
            cell.1 += self.y;
        }
        cells
    }

    /// Lowest occupied row
    pub fn bottom(&self) -> i32 {
        self.cells().iter().map(|&(_, y)| y).max().unwrap_or(self.y)
    }

    /// Same piece moved by (dx, dy)
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same piece rotated 90° clockwise around its top-left corner
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotate_cw(),
            ..*self
        }
    }
}

/// Complete game state
#[derive(Debug)]
pub struct GameState {
    board: Board,
    source: Box<dyn PieceSource>,
    active: Option<Tetromino>,
    next: Option<Tetromino>,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// Monotonic id for spawned pieces (increments only on successful spawn).
    piece_id: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
    score: u32,
    level: u32,
    lines: u32,
    drop_interval_ms: u32,
    /// Timestamp of the last automatic drop.
    last_drop_ms: u64,
    /// Latest timestamp seen by `tick`.
    now_ms: u64,
    game_over: bool,
    started: bool,
}

impl GameState {
    /// Create a new game on the default board with a seeded random picker
    pub fn new(seed: u32) -> Self {
        Self::with_source(BoardDims::default(), RandomPicker::new(seed))
    }

    /// Create a new game on an empty board of the given size
    pub fn with_source(dims: BoardDims, source: impl PieceSource + 'static) -> Self {
        Self::with_board(Board::new(dims), source)
    }

    /// Create a new game on a prepared board
    pub fn with_board(board: Board, source: impl PieceSource + 'static) -> Self {
        Self {
            board,
            source: Box::new(source),
            active: None,
            next: None,
            episode_id: 0,
            piece_id: 0,
            last_event: None,
            score: 0,
            level: START_LEVEL,
            lines: 0,
            drop_interval_ms: get_drop_interval_ms(START_LEVEL),
            last_drop_ms: 0,
            now_ms: 0,
            game_over: false,
            started: false,
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.spawn_piece();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn last_drop_ms(&self) -> u64 {
        self.last_drop_ms
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    /// Preview of the piece that spawns after the active one
    pub fn next(&self) -> Option<Tetromino> {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board.clone_from(&self.board);
        out.active = self.active;
        out.next = self.next;
        out.game_over = self.game_over;
        out.episode_id = self.episode_id;
        out.piece_id = self.piece_id;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.drop_interval_ms = self.drop_interval_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::new(self.board.dims());
        self.snapshot_into(&mut s);
        s
    }

    /// Whether `piece` overlaps a wall, the floor or a settled cell
    pub fn check_collision(&self, piece: &Tetromino) -> bool {
        self.board.collides(&piece.cells())
    }

    /// Promote the next piece to active and draw a new preview.
    ///
    /// Returns false and ends the game when the promoted piece collides at its
    /// spawn position. The board is left untouched in that case.
    pub fn spawn_piece(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.started = true;

        let cols = self.board.width();
        let piece = match self.next.take() {
            Some(next) => next,
            None => Tetromino::new(self.source.pick(), cols),
        };
        self.active = Some(piece);
        self.next = Some(Tetromino::new(self.source.pick(), cols));

        if self.check_collision(&piece) {
            self.game_over = true;
            return false;
        }

        self.piece_id = self.piece_id.wrapping_add(1);
        true
    }

    /// Active piece, if commands are currently accepted
    fn controllable(&self) -> Option<Tetromino> {
        if self.game_over {
            return None;
        }
        self.active
    }

    /// Try to move the active piece; a blocked move leaves it in place
    pub(crate) fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        let Some(active) = self.controllable() else {
            return false;
        };

        let moved = active.shifted(dx, dy);
        if self.check_collision(&moved) {
            return false;
        }

        self.active = Some(moved);
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Descend one row, locking the piece in place if it cannot.
    ///
    /// Returns true if the piece moved down, false if it locked (or there was
    /// nothing to move).
    pub fn move_down(&mut self) -> bool {
        if self.controllable().is_none() {
            return false;
        }
        if self.try_move(0, 1) {
            return true;
        }
        self.lock_piece();
        false
    }

    /// Drop the active piece to the lowest legal row and lock it.
    ///
    /// Returns the number of rows dropped.
    pub fn hard_drop(&mut self) -> u32 {
        let Some(mut piece) = self.controllable() else {
            return 0;
        };

        let mut drop_distance: u32 = 0;
        while !self.check_collision(&piece.shifted(0, 1)) {
            piece = piece.shifted(0, 1);
            drop_distance += 1;
        }

        self.active = Some(piece);
        self.lock_piece();
        drop_distance
    }

    /// Rotate clockwise; a blocked rotation is silently dropped (no kicks)
    pub fn rotate(&mut self) -> bool {
        let Some(active) = self.controllable() else {
            return false;
        };

        let rotated = active.rotated();
        if self.check_collision(&rotated) {
            return false;
        }

        self.active = Some(rotated);
        true
    }

    /// Write the active piece's color into the board.
    ///
    /// Callers only merge a piece resting at a collision-free position; a
    /// colliding piece is refused and the board is left as it was.
    pub fn merge(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        self.board.lock_piece(&active.cells(), active.color)
    }

    /// Clear full rows and score them.
    ///
    /// Score, level and gravity only change when at least one row was cleared.
    pub fn clear_lines(&mut self) -> u32 {
        let lines_cleared = self.board.clear_full_rows();
        if let Some(result) = calculate_score(lines_cleared, self.score, self.level) {
            self.score = result.score;
            self.level = result.level;
            self.drop_interval_ms = result.drop_interval_ms;
            self.lines += lines_cleared;
        }
        lines_cleared
    }

    /// Lock the active piece: merge, clear lines, spawn the next piece
    pub fn lock_piece(&mut self) {
        if self.game_over {
            return;
        }
        let Some(active) = self.active else {
            return;
        };

        let piece_id = self.piece_id;
        let score_before = self.score;

        self.merge();
        self.active = None;
        let lines_cleared = self.clear_lines();
        self.spawn_piece();

        self.last_event = Some(LockEvent {
            kind: active.kind,
            piece_id,
            lines_cleared,
            line_clear_score: self.score - score_before,
            score: self.score,
            level: self.level,
            drop_interval_ms: self.drop_interval_ms,
            game_over: self.game_over,
        });
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Advance gravity.
    ///
    /// Performs one [`move_down`](Self::move_down) when more than the drop
    /// interval has passed since the last automatic drop. `now_ms` should be
    /// monotonic; a clock that goes backwards just delays the next drop.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.now_ms = now_ms;
        if self.game_over || !self.started {
            return false;
        }

        let elapsed = now_ms.saturating_sub(self.last_drop_ms);
        if elapsed <= self.drop_interval_ms as u64 {
            return false;
        }

        self.move_down();
        self.last_drop_ms = now_ms;
        true
    }

    /// Discard the current game and start a new one on an empty board of the
    /// same size. The piece source keeps its sequence.
    pub fn restart(&mut self) {
        self.board = Board::new(self.board.dims());
        self.active = None;
        self.next = None;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.piece_id = 0;
        self.last_event = None;
        self.score = 0;
        self.level = START_LEVEL;
        self.lines = 0;
        self.drop_interval_ms = get_drop_interval_ms(START_LEVEL);
        self.last_drop_ms = self.now_ms;
        self.game_over = false;
        self.started = false;
        self.start();
    }

    /// Apply a game action
    ///
    /// Returns true if the action changed the game. Everything but `Restart`
    /// is ignored once the game is over.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Restart => {
                self.restart();
                true
            }
            _ if self.controllable().is_none() => false,
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => {
                self.move_down();
                true
            }
            GameAction::HardDrop => {
                self.hard_drop();
                true
            }
            GameAction::Rotate => self.rotate(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
