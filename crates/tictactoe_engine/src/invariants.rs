//! First-class invariants for the game engine.
//!
//! Invariants are logical properties that must hold after every accepted
//! move. The engine checks them in debug builds; they can also be tested
//! independently.

use std::collections::HashSet;

use crate::{GameEngine, Player, Square};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: the move log and the board describe the same marks.
///
/// The log has one entry per occupied square and every logged move's
/// square carries that move's mark. No orphan marks, no phantom moves.
pub struct HistoryMatchesBoardInvariant;

impl Invariant<GameEngine> for HistoryMatchesBoardInvariant {
    fn holds(engine: &GameEngine) -> bool {
        let board = engine.board();
        engine.moves().len() == board.occupied_count()
            && engine
                .moves()
                .iter()
                .all(|mv| board.get(mv.position()) == Square::Occupied(mv.player()))
    }

    fn description() -> &'static str {
        "Move log matches the occupied squares"
    }
}

/// Invariant: no position appears twice in the move log.
pub struct UniqueCellsInvariant;

impl Invariant<GameEngine> for UniqueCellsInvariant {
    fn holds(engine: &GameEngine) -> bool {
        let mut seen = HashSet::new();
        engine.moves().iter().all(|mv| seen.insert(mv.position()))
    }

    fn description() -> &'static str {
        "Each position is played at most once"
    }
}

/// Invariant: marks alternate X, O, X, O, ... starting with X.
///
/// The player to move is X until the first move is placed. Afterwards it is
/// either the latest mover (turn not yet advanced) or that mover's opponent.
pub struct AlternatingTurnInvariant;

impl Invariant<GameEngine> for AlternatingTurnInvariant {
    fn holds(engine: &GameEngine) -> bool {
        let moves = engine.moves();

        let Some(first) = moves.first() else {
            return engine.current_player() == Player::X;
        };

        if first.player() != Player::X {
            return false;
        }

        if moves
            .windows(2)
            .any(|pair| pair[0].player() == pair[1].player())
        {
            return false;
        }

        let last_mover = if moves.len() % 2 == 1 {
            Player::X
        } else {
            Player::O
        };
        engine.current_player() == last_mover || engine.current_player() == last_mover.opponent()
    }

    fn description() -> &'static str {
        "Players alternate turns (X, O, X, O, ...)"
    }
}

/// All engine invariants as a composable set.
pub type EngineInvariants = (
    AlternatingTurnInvariant,
    HistoryMatchesBoardInvariant,
    UniqueCellsInvariant,
);
