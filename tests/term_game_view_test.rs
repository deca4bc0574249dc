use blockfall::core::{Board, BoardDims, FixedSequence, GameState};
use blockfall::term::{GameView, Viewport};
use blockfall::types::{Color, PieceKind};

fn game(kinds: &[PieceKind]) -> GameState {
    let mut state = GameState::with_source(
        BoardDims::default(),
        FixedSequence::new(kinds.to_vec()).unwrap(),
    );
    state.start();
    state
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();

    // 10x20 cells at 2x1 chars, plus the border => 22x22.
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_follows_board_size() {
    let dims = BoardDims::new(6, 8).unwrap();
    let state = GameState::with_source(dims, FixedSequence::repeat(PieceKind::O));
    let fb = GameView::default().render(&state.snapshot(), Viewport::new(14, 10));

    assert_eq!(fb.get(13, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 9).unwrap().ch, '└');
}

#[test]
fn term_view_renders_locked_cell_with_gap() {
    let mut state = game(&[PieceKind::O]);
    state.hard_drop();
    let fb = GameView::default().render(&state.snapshot(), Viewport::new(22, 22));

    // O locked at columns 4-5 of row 19. Inside the border, cell (x, y) starts
    // at terminal column 1 + 2x, row 1 + y.
    let yellow = Color::new(0xf0, 0xf0, 0x00);
    let cell = fb.get(9, 20).unwrap();
    assert_eq!(cell.ch, '█');
    assert_eq!(cell.style.fg, yellow);
    assert_eq!(fb.get(10, 20).unwrap().ch, '▌');
    assert_eq!(fb.get(11, 20).unwrap().ch, '█');
    assert_eq!(fb.get(12, 20).unwrap().ch, '▌');
    assert_eq!(fb.get(13, 20).unwrap().ch, '·');
}

#[test]
fn term_view_renders_active_piece() {
    let state = game(&[PieceKind::T]);
    let fb = GameView::default().render(&state.snapshot(), Viewport::new(22, 22));

    // T spawns at column 4: top row covers columns 4-6, stem at column 5.
    let purple = Color::new(0xa0, 0x00, 0xf0);
    for x in [9u16, 11, 13] {
        assert_eq!(fb.get(x, 1).unwrap().style.fg, purple);
    }
    assert_eq!(fb.get(11, 2).unwrap().style.fg, purple);
    assert_eq!(fb.get(9, 2).unwrap().ch, '·');
}

#[test]
fn term_view_skips_cells_above_board() {
    let state = game(&[PieceKind::I]);
    let mut snap = state.snapshot();
    if let Some(active) = snap.active.as_mut() {
        active.y = -1;
    }
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // The border row stays intact.
    assert_eq!(fb.row_text(0), format!("┌{}┐", "─".repeat(20)));
}

#[test]
fn term_view_side_panel_shows_stats_and_next() {
    let mut state = game(&[PieceKind::T, PieceKind::O]);
    state.hard_drop();
    let snap = state.snapshot();
    assert_eq!(snap.next.unwrap().kind, PieceKind::T);

    // Board frame at x=14..36, y=1; panel starts two columns to its right.
    let fb = GameView::default().render(&snap, Viewport::new(50, 24));
    let panel_x = 38;

    assert!(fb.row_text(1).contains("SCORE"));
    assert_eq!(fb.get(panel_x, 2).unwrap().ch, '0');
    assert!(fb.row_text(4).contains("LEVEL"));
    assert_eq!(fb.get(panel_x, 5).unwrap().ch, '1');
    assert!(fb.row_text(7).contains("LINES"));
    assert!(fb.row_text(10).contains("NEXT"));

    // T (3x2) centered in the 4x4 preview: half a cell (1 char) of padding
    // on the left, one row above.
    let purple = Color::new(0xa0, 0x00, 0xf0);
    let top = 11 + 1;
    assert_eq!(fb.get(panel_x + 1, top).unwrap().style.fg, purple);
    assert_eq!(fb.get(panel_x + 1, top).unwrap().ch, '█');
    assert_eq!(fb.get(panel_x + 5, top).unwrap().style.fg, purple);
    assert_eq!(fb.get(panel_x + 3, top + 1).unwrap().style.fg, purple);
    assert_eq!(fb.get(panel_x + 1, top + 1).unwrap().ch, ' ');
}

#[test]
fn term_view_game_over_scrim() {
    let mut board = Board::new(BoardDims::default());
    let grey = Color::new(0x80, 0x80, 0x80);
    board.set(4, 0, Some(grey));
    board.set(0, 19, Some(grey));
    let mut state = GameState::with_board(board, FixedSequence::repeat(PieceKind::O));
    state.start();
    assert!(state.game_over());

    let fb = GameView::default().render(&state.snapshot(), Viewport::new(22, 22));

    let text_row = fb.row_text(11);
    assert!(text_row.contains("GAME OVER"), "{:?}", text_row);

    let locked = fb.get(1, 20).unwrap();
    assert_eq!(locked.ch, '█');
    assert_eq!(locked.style.fg, Color::new(0x40, 0x40, 0x40));
}
