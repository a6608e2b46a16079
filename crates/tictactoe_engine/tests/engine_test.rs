//! Tests for the game engine lifecycle.

use tictactoe_engine::{
    GameEngine, GameOutcome, Move, Placement, Player, Position, Rejection, Square,
};

fn pos(number: i64) -> Position {
    Position::from_number(number).expect("valid position")
}

/// Drives the engine the way the console does: submit, evaluate, advance.
fn play(engine: &mut GameEngine, number: i64) -> Option<GameOutcome> {
    let placement = engine.submit_move(pos(number));
    assert!(placement.is_accepted(), "move {number} rejected: {placement:?}");
    let outcome = engine.evaluate_outcome();
    if outcome.is_none() {
        engine.advance_turn();
    }
    outcome
}

#[test]
fn test_fresh_snapshot() {
    let snapshot = GameEngine::new().snapshot();
    assert!(
        snapshot
            .board()
            .rows()
            .iter()
            .flatten()
            .all(|s| *s == Square::Empty)
    );
    assert_eq!(*snapshot.current_player(), Player::X);
    assert_eq!(*snapshot.move_count(), 0);
    assert!(snapshot.moves().is_empty());
}

#[test]
fn test_accepted_move_logged() {
    let mut engine = GameEngine::new();
    let placement = engine.submit_move(pos(6));

    let expected = Move::new(Player::X, Position::MiddleRight);
    assert_eq!(placement, Placement::Accepted(expected));
    assert_eq!(engine.move_count(), 1);
    assert_eq!(engine.moves(), &[expected]);
    assert_eq!((expected.row(), expected.col()), (1, 2));
    assert_eq!(engine.board().get(Position::MiddleRight), Square::Occupied(Player::X));
}

#[test]
fn test_occupied_cell_rejected_without_change() {
    let mut engine = GameEngine::new();
    assert!(engine.submit_move(pos(1)).is_accepted());
    engine.advance_turn();
    let before = engine.snapshot();

    let placement = engine.submit_move(pos(1));

    assert_eq!(
        placement,
        Placement::Rejected(Rejection::OccupiedCell(Position::TopLeft))
    );
    assert_eq!(engine.snapshot(), before);
    assert_eq!(engine.move_count(), 1);
    assert_eq!(engine.moves().len(), 1);
    assert_eq!(engine.current_player(), Player::O);
}

#[test]
fn test_turns_alternate() {
    let mut engine = GameEngine::new();
    assert_eq!(play(&mut engine, 5), None);
    assert_eq!(engine.current_player(), Player::O);
    assert_eq!(play(&mut engine, 1), None);
    assert_eq!(engine.current_player(), Player::X);

    let players: Vec<_> = engine.moves().iter().map(Move::player).collect();
    assert_eq!(players, vec![Player::X, Player::O]);
}

#[test]
fn test_double_advance_keeps_alternation() {
    let mut engine = GameEngine::new();
    assert!(engine.submit_move(Position::TopLeft).is_accepted());
    engine.advance_turn();
    engine.advance_turn();
    assert_eq!(engine.current_player(), Player::O);

    assert!(engine.submit_move(Position::TopCenter).is_accepted());

    let players: Vec<_> = engine.moves().iter().map(Move::player).collect();
    assert_eq!(players, vec![Player::X, Player::O]);
}

#[test]
fn test_advance_before_first_move_keeps_x() {
    let mut engine = GameEngine::new();
    engine.advance_turn();
    assert_eq!(engine.current_player(), Player::X);
    assert_eq!(engine.snapshot(), GameEngine::new().snapshot());
}

#[test]
fn test_no_outcome_before_fifth_move() {
    let mut engine = GameEngine::new();
    // X holds 1 and 2, O holds 4 and 5: no line yet, and too early anyway
    for number in [1, 4, 2, 5] {
        assert_eq!(play(&mut engine, number), None);
        assert_eq!(engine.evaluate_outcome(), None);
    }
    assert_eq!(engine.move_count(), 4);
}

#[test]
fn test_top_row_win() {
    let mut engine = GameEngine::new();
    for number in [1, 4, 2, 5] {
        assert_eq!(play(&mut engine, number), None);
    }
    assert_eq!(play(&mut engine, 3), Some(GameOutcome::Win(Player::X)));

    let rows = engine.board().rows();
    assert_eq!(rows[0], [Square::Occupied(Player::X); 3]);
    assert!(engine.is_terminal());
}

#[test]
fn test_win_credited_to_player_who_moved() {
    let mut engine = GameEngine::new();
    // O completes the middle column
    for number in [1, 2, 3, 5, 7] {
        assert_eq!(play(&mut engine, number), None);
    }
    assert_eq!(play(&mut engine, 8), Some(GameOutcome::Win(Player::O)));
    assert_eq!(engine.current_player(), Player::O);
}

#[test]
fn test_draw_after_nine_moves() {
    let mut engine = GameEngine::new();
    // X O X / O O X / X X O
    let sequence = [1, 5, 3, 2, 8, 4, 6, 9, 7];
    for number in &sequence[..8] {
        assert_eq!(play(&mut engine, *number), None);
    }
    assert_eq!(play(&mut engine, 7), Some(GameOutcome::Draw));
    assert_eq!(engine.move_count(), 9);
}

#[test]
fn test_row_major_fill_order_wins_on_anti_diagonal() {
    let mut engine = GameEngine::new();
    for number in [1, 2, 3, 4, 5, 6] {
        assert_eq!(play(&mut engine, number), None);
    }
    // X holds 3, 5 and now 7
    assert_eq!(play(&mut engine, 7), Some(GameOutcome::Win(Player::X)));
}

#[test]
fn test_terminal_state_is_absorbing() {
    let mut engine = GameEngine::replay(&[pos(1), pos(4), pos(2), pos(5), pos(3)])
        .expect("valid replay");
    let before = engine.snapshot();

    assert_eq!(
        engine.submit_move(pos(9)),
        Placement::Rejected(Rejection::GameOver)
    );
    engine.advance_turn();

    assert_eq!(engine.snapshot(), before);
    assert_eq!(engine.evaluate_outcome(), Some(GameOutcome::Win(Player::X)));
}

#[test]
fn test_submit_number_guards_range() {
    let mut engine = GameEngine::new();
    assert!(engine.submit_number(0).is_err());
    assert!(engine.submit_number(10).is_err());
    assert_eq!(engine.move_count(), 0);

    let placement = engine.submit_number(9).expect("in range");
    assert!(placement.is_accepted());
}

#[test]
fn test_replay_reports_rejection() {
    let err = GameEngine::replay(&[pos(5), pos(1), pos(5)]).unwrap_err();
    assert_eq!(err.index, 2);
    assert_eq!(err.rejection, Rejection::OccupiedCell(Position::Center));
}

#[test]
fn test_snapshot_is_a_copy() {
    let mut engine = GameEngine::new();
    let snapshot = engine.snapshot();
    assert!(engine.submit_move(pos(5)).is_accepted());
    assert_eq!(*snapshot.move_count(), 0);
    assert!(snapshot.moves().is_empty());
}

#[test]
fn test_snapshot_serializes() {
    let engine = GameEngine::replay(&[pos(5), pos(1)]).expect("valid replay");
    let json = serde_json::to_string(&engine.snapshot()).expect("serialize");
    assert!(json.contains("\"move_count\":2"));
}

#[test]
fn test_open_positions_shrink() {
    let engine = GameEngine::replay(&[pos(1), pos(5)]).expect("valid replay");
    let open = engine.open_positions();
    assert_eq!(open.len(), 7);
    assert!(!open.contains(&Position::TopLeft));
    assert!(!open.contains(&Position::Center));
}
