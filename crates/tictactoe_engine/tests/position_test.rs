//! Tests for the position numbering.

use strum::IntoEnumIterator;
use tictactoe_engine::{Board, GameEngine, Position};

#[test]
fn test_position_numbers() {
    assert_eq!(Position::TopLeft.number(), 1);
    assert_eq!(Position::Center.number(), 5);
    assert_eq!(Position::BottomRight.number(), 9);
}

#[test]
fn test_position_from_number() {
    assert_eq!(Position::from_number(1), Ok(Position::TopLeft));
    assert_eq!(Position::from_number(5), Ok(Position::Center));
    assert_eq!(Position::from_number(9), Ok(Position::BottomRight));
    assert!(Position::from_number(10).is_err());
}

#[test]
fn test_every_position_round_trips() {
    for pos in Position::iter() {
        let (row, col) = pos.cell();
        assert_eq!(usize::from(pos.number()), row * 3 + col + 1);
        assert_eq!(Position::from_cell(row, col), Some(pos));
    }
}

#[test]
fn test_open_positions_empty_board() {
    assert_eq!(Position::open_positions(&Board::new()).len(), 9);
}

#[test]
fn test_open_positions_filters_occupied() {
    let engine = GameEngine::replay(&[Position::TopLeft, Position::Center]).expect("valid replay");
    let open = Position::open_positions(engine.board());
    assert_eq!(open.len(), 7);
    assert!(!open.contains(&Position::TopLeft));
    assert!(!open.contains(&Position::Center));
    assert!(open.contains(&Position::BottomRight));
}
