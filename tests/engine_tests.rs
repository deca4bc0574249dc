//! Engine properties: boundaries, merge, line clears, scoring, spawn and drops.

use blockfall::core::{Board, BoardDims, FixedSequence, GameState, RandomPicker};
use blockfall::types::{Cell, Color, GameAction, PieceKind};

const GREY: Color = Color::new(0x80, 0x80, 0x80);

fn started(board: Board, kinds: &[PieceKind]) -> GameState {
    let mut state = GameState::with_board(board, FixedSequence::new(kinds.to_vec()).unwrap());
    state.start();
    state
}

fn row(cols: usize, filled: impl Fn(usize) -> bool) -> Vec<Cell> {
    (0..cols).map(|x| filled(x).then_some(GREY)).collect()
}

#[test]
fn test_collision_at_every_boundary() {
    let state = started(Board::new(BoardDims::default()), &[PieceKind::O]);
    let piece = state.active().unwrap();

    assert!(!state.check_collision(&piece));
    assert!(state.check_collision(&piece.shifted(-5, 0)));
    assert!(state.check_collision(&piece.shifted(5, 0)));
    assert!(state.check_collision(&piece.shifted(0, 19)));
    // Above the top edge is open space.
    assert!(!state.check_collision(&piece.shifted(0, -3)));
}

#[test]
fn test_merge_never_overlaps() {
    let mut state = GameState::new(2024);
    state.start();

    let cols = state.board().width();
    let mut moves = [
        GameAction::MoveLeft,
        GameAction::Rotate,
        GameAction::MoveRight,
        GameAction::MoveRight,
    ]
    .iter()
    .cycle();

    for _ in 0..60 {
        if state.game_over() {
            break;
        }
        let before = state.board().filled_count();
        state.apply_action(*moves.next().unwrap());
        state.apply_action(GameAction::HardDrop);

        let ev = state.take_last_event().unwrap();
        let expected = before + 4 - cols * ev.lines_cleared as usize;
        assert_eq!(state.board().filled_count(), expected);

        if !ev.game_over {
            let active = state.active().unwrap();
            assert!(!state.check_collision(&active));
        }
    }
}

#[test]
fn test_line_clear_keeps_row_order() {
    let cols = 20;
    let mut rows: Vec<Vec<Cell>> = (0..10)
        .map(|y| {
            (0..cols)
                .map(|x| (x == y).then_some(Color::new(y as u8, 0, 0)))
                .collect()
        })
        .collect();
    rows[2] = row(cols, |_| true);
    rows[5] = row(cols, |_| true);
    let mut board = Board::from_rows(rows.clone()).unwrap();

    assert_eq!(board.clear_full_rows(), 2);

    let after = board.to_rows();
    assert!(after[0].iter().all(Option::is_none));
    assert!(after[1].iter().all(Option::is_none));
    let kept: Vec<&Vec<Cell>> = rows
        .iter()
        .enumerate()
        .filter(|(y, _)| *y != 2 && *y != 5)
        .map(|(_, r)| r)
        .collect();
    for (y, original) in kept.iter().enumerate() {
        assert_eq!(&after[y + 2], *original, "row {}", y + 2);
    }
}

#[test]
fn test_two_lines_at_level_one_score_200() {
    let cols = 4;
    let mut rows = vec![vec![None; cols]; 4];
    rows.push(row(cols, |x| x != 2));
    rows.push(row(cols, |x| x != 2));
    let board = Board::from_rows(rows).unwrap();
    let mut state = started(board, &[PieceKind::I]);

    assert!(state.apply_action(GameAction::Rotate));
    assert!(state.apply_action(GameAction::MoveRight));
    assert!(state.apply_action(GameAction::MoveRight));
    assert!(state.apply_action(GameAction::HardDrop));

    let ev = state.take_last_event().unwrap();
    assert_eq!(ev.lines_cleared, 2);
    assert_eq!(ev.line_clear_score, 200);
    assert_eq!(state.score(), 200);
    assert_eq!(state.level(), 1);
    assert_eq!(state.lines(), 2);

    // The upper half of the vertical I drops into the cleared rows.
    assert!(state.board().is_occupied(2, 4));
    assert!(state.board().is_occupied(2, 5));
    assert_eq!(state.board().filled_count(), 2);
}

#[test]
fn test_thousand_points_reaches_level_two() {
    let dims = BoardDims::new(4, 20).unwrap();
    let mut state = GameState::with_source(dims, FixedSequence::repeat(PieceKind::I));
    state.start();

    for n in 1..=10 {
        state.hard_drop();
        let ev = state.take_last_event().unwrap();
        assert_eq!(ev.lines_cleared, 1);
        assert_eq!(state.score(), n * 100);
    }

    assert_eq!(state.level(), 2);
    assert_eq!(state.drop_interval_ms(), 900);
    assert!(state.board().is_empty());

    // Points now count double.
    state.hard_drop();
    assert_eq!(state.score(), 1200);
}

#[test]
fn test_spawn_collision_is_game_over() {
    let mut board = Board::new(BoardDims::default());
    for x in 3..7 {
        board.set(x, 0, Some(GREY));
        board.set(x, 1, Some(GREY));
    }
    let pristine = board.clone();

    let state = started(board, &[PieceKind::T]);
    assert!(state.game_over());
    assert_eq!(state.board(), &pristine);
    assert_eq!(state.piece_id(), 0);
    assert!(state.active().is_some());
}

#[test]
fn test_commands_ignored_after_game_over() {
    let mut board = Board::new(BoardDims::default());
    board.set(4, 0, Some(GREY));
    let mut state = started(board, &[PieceKind::O]);
    assert!(state.game_over());

    let snap = state.snapshot();
    for action in [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::Rotate,
    ] {
        assert!(!state.apply_action(action));
    }
    assert!(!state.tick(10_000));
    assert_eq!(state.snapshot(), snap);

    assert!(state.apply_action(GameAction::Restart));
    assert!(!state.game_over());
    assert!(state.board().is_empty());
    assert_eq!(state.episode_id(), 1);
}

#[test]
fn test_hard_drop_lands_on_floor() {
    let mut state = started(Board::new(BoardDims::default()), &[PieceKind::T]);
    let before = state.active().unwrap();

    let mut probe = before;
    while !state.check_collision(&probe.shifted(0, 1)) {
        probe = probe.shifted(0, 1);
    }
    assert_eq!(probe.bottom(), 19);

    let rows = state.hard_drop();
    assert_eq!(rows, 18);
    for (x, y) in probe.cells() {
        assert!(state.board().is_occupied(x, y), "({}, {})", x, y);
    }
    assert_eq!(state.board().filled_count(), 4);
}

#[test]
fn test_soft_drop_locks_on_floor() {
    let mut state = started(Board::new(BoardDims::default()), &[PieceKind::O, PieceKind::I]);
    for _ in 0..18 {
        assert!(state.apply_action(GameAction::SoftDrop));
    }
    assert_eq!(state.piece_id(), 1);

    // Blocked step locks and spawns the next piece.
    state.apply_action(GameAction::SoftDrop);
    assert_eq!(state.piece_id(), 2);
    assert_eq!(state.active().unwrap().kind, PieceKind::I);
    assert!(state.board().is_occupied(4, 19));
}

#[test]
fn test_gravity_follows_interval() {
    let mut state = started(Board::new(BoardDims::default()), &[PieceKind::O]);
    let mut drops = 0;
    for now in (0..=5_000u64).step_by(16) {
        if state.tick(now) {
            drops += 1;
        }
    }
    // One drop per >1000 ms window.
    assert_eq!(drops, 4);
    assert_eq!(state.active().unwrap().y, 4);
}

#[test]
fn test_same_seed_same_pieces() {
    let mut a = GameState::with_source(BoardDims::default(), RandomPicker::new(99));
    let mut b = GameState::with_source(BoardDims::default(), RandomPicker::new(99));
    a.start();
    b.start();
    for _ in 0..20 {
        assert_eq!(a.active().map(|p| p.kind), b.active().map(|p| p.kind));
        assert_eq!(a.next().map(|p| p.kind), b.next().map(|p| p.kind));
        a.hard_drop();
        b.hard_drop();
    }
    assert_eq!(a.snapshot(), b.snapshot());
}
