//! Integration tests for the game state machine and loop driver

use blockfall::core::placement::lock_piece;
use blockfall::core::{on_lines_cleared, Board, GameState, Piece, SequenceSource};
use blockfall::engine::{parse_script, GameLoop};
use blockfall::types::{Color, Command, CoreEvent, Phase, PieceKind};

fn game_with(kinds: &[PieceKind]) -> GameState<SequenceSource> {
    GameState::with_source(SequenceSource::new(kinds.to_vec()))
}

/// Row 19 filled except columns 4..=7, where a flat I completes it.
fn board_missing_i_slot() -> Board {
    let mut board = Board::new();
    for x in (0..4).chain(8..10) {
        board.set(x, 19, Some(Color::Green));
    }
    board
}

fn assert_fresh(state: &GameState<SequenceSource>) {
    assert_eq!(state.board(), &Board::new());
    assert!(state.active().is_none());
    assert_eq!(state.score(), 0);
    assert_eq!(state.level(), 1);
    assert_eq!(state.drop_interval_ms(), 800.0);
    assert!(!state.paused());
    assert!(!state.started());
    assert!(!state.game_over());
    assert!(state.rows_pending_clear().is_empty());
}

#[test]
fn test_game_lifecycle() {
    let mut state = GameState::new(12345);
    assert_eq!(state.phase(), Phase::NotStarted);
    assert!(!state.started());

    assert!(state.dispatch(Command::Start));
    assert!(state.started());
    assert!(state.active().is_some());

    assert!(state.dispatch(Command::TogglePause));
    assert!(state.paused());
    assert!(state.started());

    assert!(state.dispatch(Command::TogglePause));
    assert_eq!(state.phase(), Phase::Running);
}

#[test]
fn test_movement_ignored_unless_running() {
    let mut state = game_with(&[PieceKind::T]);
    assert!(!state.dispatch(Command::MoveLeft));

    state.dispatch(Command::Start);
    state.dispatch(Command::TogglePause);
    let before = state.active();
    assert!(!state.dispatch(Command::MoveLeft));
    assert!(!state.dispatch(Command::Rotate));
    assert!(!state.dispatch(Command::SoftDrop));
    assert_eq!(state.active(), before);
}

#[test]
fn test_o_piece_drops_to_the_floor() {
    let mut state = game_with(&[PieceKind::O]);
    state.dispatch(Command::Start);
    assert_eq!(state.active().map(|p| (p.x, p.y)), Some((4, 0)));

    for i in 1..=18 {
        state.dispatch(Command::SoftDrop);
        assert_eq!(state.active().unwrap().y, i);
    }
    // Resting on the floor: the next drop locks it.
    state.dispatch(Command::SoftDrop);

    let board = state.board();
    for y in 0..20 {
        for x in 0..10 {
            let expected = (4..=5).contains(&x) && (18..=19).contains(&y);
            assert_eq!(board.is_occupied(x, y), expected, "cell ({x}, {y})");
        }
    }
    assert_eq!(board.get(4, 19), Some(Some(Color::Yellow)));

    // The next piece is already in play.
    assert_eq!(state.active().map(|p| (p.x, p.y)), Some((4, 0)));
}

#[test]
fn test_completed_bottom_row_shifts_board_down() {
    let mut board = Board::new();
    // Distinct, non-full markers on rows 0..=18.
    for y in 0..19 {
        board.set(y % 10, y, Some(Color::Red));
    }
    let expected_rows: Vec<Vec<bool>> = (0..19)
        .map(|y| board.row(y).unwrap().iter().map(|c| c.is_some()).collect())
        .collect();
    for x in (0..4).chain(8..10) {
        board.set(x, 19, Some(Color::Green));
    }

    let mut piece = Piece::spawn(PieceKind::I);
    piece.y = 19;
    let pending = lock_piece(&mut board, &piece, 500).unwrap();
    assert_eq!(pending.rows(), &[19]);
    assert!(board.is_row_full(19));

    assert_eq!(pending.commit(&mut board), 1);
    assert!(board.row(0).unwrap().iter().all(|c| c.is_none()));
    for (i, expected) in expected_rows.iter().enumerate() {
        let row: Vec<bool> = board
            .row(i + 1)
            .unwrap()
            .iter()
            .map(|c| c.is_some())
            .collect();
        assert_eq!(&row, expected, "row {}", i + 1);
    }
}

#[test]
fn test_staged_clear_through_game() {
    let mut state = game_with(&[PieceKind::I, PieceKind::O]).with_board(board_missing_i_slot());
    state.dispatch(Command::Start);
    for _ in 0..19 {
        assert!(state.dispatch(Command::SoftDrop));
    }
    assert_eq!(state.active().unwrap().y, 19);
    state.dispatch(Command::SoftDrop);

    // Marked but not yet removed.
    assert_eq!(state.rows_pending_clear(), &[19]);
    assert!(state.board().is_row_full(19));
    assert!(state.active().is_none());
    assert_eq!(state.score(), 0);

    state.tick(499);
    assert_eq!(state.rows_pending_clear(), &[19]);

    state.tick(1);
    assert!(state.rows_pending_clear().is_empty());
    assert_eq!(state.board(), &Board::new());
    assert_eq!(state.score(), 100);
    assert_eq!(state.active().map(|p| p.kind), Some(PieceKind::O));
}

#[test]
fn test_level_up_from_480() {
    let (score, level, interval) = on_lines_cleared(1, 480, 1, 800.0);
    assert_eq!(score, 580);
    assert_eq!(level, 2);
    assert!((interval - 800.0 * 0.95).abs() < 1e-9);
}

#[test]
fn test_fifth_clear_levels_up() {
    let mut state = game_with(&[PieceKind::I]).with_line_clear_delay_ms(0);
    state.dispatch(Command::Start);

    for round in 1..=5u32 {
        // Rebuild the slot under the falling I each round.
        let mut board = state.board().clone();
        for x in (0..4).chain(8..10) {
            board.set(x, 19, Some(Color::Green));
        }
        state = state.with_board(board);
        while state.active().is_some() && state.score() < round * 100 {
            state.dispatch(Command::SoftDrop);
        }
        assert_eq!(state.score(), round * 100);
    }

    assert_eq!(state.level(), 2);
    assert!((state.drop_interval_ms() - 760.0).abs() < 1e-9);
    let events = state.take_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, CoreEvent::LevelUp { level: 2, .. })));
}

#[test]
fn test_reset_mid_clear_cancels_everything() {
    let mut state = game_with(&[PieceKind::I]).with_board(board_missing_i_slot());
    state.dispatch(Command::Start);
    for _ in 0..20 {
        state.dispatch(Command::SoftDrop);
    }
    assert_eq!(state.rows_pending_clear(), &[19]);

    assert!(state.dispatch(Command::Reset));
    assert_fresh(&state);

    // The cancelled clear never fires.
    assert!(!state.tick(1000));
    assert_fresh(&state);
    assert_eq!(state.phase(), Phase::NotStarted);
}

#[test]
fn test_reset_from_every_phase() {
    for setup in [
        &[][..],
        &[Command::Start][..],
        &[Command::Start, Command::TogglePause][..],
    ] {
        let mut state = game_with(&[PieceKind::T]);
        for &command in setup {
            state.dispatch(command);
        }
        state.dispatch(Command::Reset);
        assert_fresh(&state);
    }
}

#[test]
fn test_stacking_ends_the_game() {
    let mut state = game_with(&[PieceKind::O]);
    state.dispatch(Command::Start);

    // O pieces stack in columns 4..=5; ten of them fill the column.
    let mut guard = 0;
    while !state.game_over() {
        state.dispatch(Command::SoftDrop);
        guard += 1;
        assert!(guard < 1000, "game never ended");
    }

    assert_eq!(state.phase(), Phase::GameOver);
    assert!(!state.started());
    assert!(state.active().is_none());
    assert!(!state.dispatch(Command::Start));
    assert!(!state.dispatch(Command::TogglePause));
    assert!(!state.tick(800));

    let snap = state.snapshot();
    assert!(snap.game_over);

    state.dispatch(Command::Reset);
    assert_eq!(state.phase(), Phase::NotStarted);
}

#[test]
fn test_gravity_only_while_running() {
    let mut state = game_with(&[PieceKind::T]);
    state.dispatch(Command::Start);
    state.tick(799);
    assert_eq!(state.active().unwrap().y, 0);
    state.tick(1);
    assert_eq!(state.active().unwrap().y, 1);

    state.dispatch(Command::TogglePause);
    state.tick(5000);
    assert_eq!(state.active().unwrap().y, 1);

    // Resuming restarts the interval from zero.
    state.dispatch(Command::TogglePause);
    state.tick(799);
    assert_eq!(state.active().unwrap().y, 1);
    state.tick(1);
    assert_eq!(state.active().unwrap().y, 2);
}

#[test]
fn test_script_replay_through_loop() {
    let script = "\
        start\n\
        moveLeft\n\
        moveLeft\n\
        tick 800\n\
        jump\n\
        rotate\n";
    let inputs = parse_script(script);
    assert_eq!(inputs.len(), 5);

    let mut game = GameLoop::with_state(game_with(&[PieceKind::O]));
    let report = game.run_inputs(inputs);
    assert_eq!(report.commands, 4);
    assert_eq!(report.ticks, 1);

    let active = game.state().active().unwrap();
    assert_eq!((active.x, active.y), (2, 1));
}

#[test]
fn test_long_scripted_tick_catches_up() {
    let inputs = parse_script("start\ntick 4000\n");
    let mut game = GameLoop::with_state(game_with(&[PieceKind::T]));
    game.run_inputs(inputs);
    assert_eq!(game.state().active().unwrap().y, 5);

    // 1200ms leaves 400ms banked; the next 400ms completes a step.
    let mut game = GameLoop::with_state(game_with(&[PieceKind::T]));
    game.run_inputs(parse_script("start\ntick 1200\n"));
    assert_eq!(game.state().active().unwrap().y, 1);
    game.run_inputs(parse_script("tick 400"));
    assert_eq!(game.state().active().unwrap().y, 2);
}
