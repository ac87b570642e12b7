// Copyright 2026 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

use anyhow::Result;
use log::info;
#[cfg(feature = "random")]
use rand::{seq::SliceRandom, thread_rng, Rng};
use serde::{Deserialize, Serialize};

use crate::{Board, BoardResult, Color, Move, MoveError};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GameId(u64);

impl GameId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }
    #[cfg(feature = "random")]
    pub fn random() -> Self {
        Self(thread_rng().gen())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Win(Color, WinReason),
    Draw(DrawReason),
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum WinReason {
    CheckMate,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    StaleMate,
}

impl From<BoardResult> for GameResult {
    fn from(value: BoardResult) -> Self {
        match value {
            BoardResult::CheckMate(winner) => GameResult::Win(winner, WinReason::CheckMate),
            BoardResult::StaleMate => GameResult::Draw(DrawReason::StaleMate),
        }
    }
}

/// A game between two players sharing one board. Unlike `Board`, a game
/// hands the move to the other side after every accepted move and stops
/// accepting moves once it is over.
#[derive(Debug, Clone, Default)]
pub struct Game {
    id: GameId,
    board: Board,
    result: Option<GameResult>,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: GameId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Reconstruct a game by replaying a sequence of moves.
    pub fn replay(moves: &[Move]) -> Result<Self> {
        let mut game = Self::new();
        for mv in moves {
            game.submit_move(*mv)?;
        }
        Ok(game)
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Whether the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.board.is_in_check(self.board.turn())
    }

    /// Plays a move written as `"e2e4"`.
    pub fn submit(&mut self, notation: &str) -> Result<Option<GameResult>> {
        let mv: Move = notation.parse()?;
        self.submit_move(mv)
    }

    /// Plays `mv` for the side to move, passes the turn and reports the
    /// result if the game just ended.
    pub fn submit_move(&mut self, mv: Move) -> Result<Option<GameResult>> {
        if self.is_over() {
            return Err(MoveError::GameOver.into());
        }
        if !self.board.apply_move(mv) {
            return Err(MoveError::InvalidMove.into());
        }
        self.board.switch_turn();
        self.result = self.board.board_result().map(GameResult::from);
        if let Some(result) = self.result {
            info!("game {:?} over after {mv}: {result:?}", self.id);
        }
        Ok(self.result)
    }

    /// Takes back the last move. Not available once the game is over.
    pub fn undo(&mut self) -> bool {
        if self.is_over() {
            return false;
        }
        self.board.undo_move()
    }

    /// A legal move for the side to move, chosen uniformly at random.
    #[cfg(feature = "random")]
    pub fn random_move(&self) -> Option<Move> {
        if self.is_over() {
            return None;
        }
        let moves = self.board.legal_moves(self.board.turn());
        moves.choose(&mut thread_rng()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Square::*;

    #[test]
    fn test_game_passes_turn() {
        let mut game = Game::new();
        assert_eq!(game.submit("e2e4").unwrap(), None);
        assert_eq!(game.board().turn(), Color::Black);
        assert!(game.submit("d2d4").is_err());
        assert_eq!(game.board().turn(), Color::Black);
        assert_eq!(game.submit("e7e5").unwrap(), None);
        assert_eq!(game.board().turn(), Color::White);
    }
    #[test]
    fn test_invalid_move_error() {
        let mut game = Game::new();
        let err = game.submit_move(Move::new(E2, E5)).unwrap_err();
        assert_eq!(err.downcast_ref::<MoveError>(), Some(&MoveError::InvalidMove));
        let err = game.submit("e2-e4").unwrap_err();
        assert_eq!(
            err.downcast_ref::<MoveError>(),
            Some(&MoveError::InvalidNotation("e2-e4".to_string()))
        );
    }
    #[test]
    fn test_fools_mate_ends_game() {
        let mut game = Game::with_id(GameId::new(7));
        game.submit("f2f3").unwrap();
        game.submit("e7e5").unwrap();
        game.submit("g2g4").unwrap();
        let result = game.submit("d8h4").unwrap();
        assert_eq!(result, Some(GameResult::Win(Color::Black, WinReason::CheckMate)));
        assert!(game.is_over());
        assert!(game.is_check());
        assert_eq!(game.id(), GameId::new(7));
        let err = game.submit("a2a3").unwrap_err();
        assert_eq!(err.downcast_ref::<MoveError>(), Some(&MoveError::GameOver));
        assert!(!game.undo());
    }
    #[test]
    fn test_replay_and_undo() {
        let moves = [Move::new(E2, E4), Move::new(E7, E5), Move::new(G1, F3)];
        let mut game = Game::replay(&moves).unwrap();
        assert_eq!(game.board().move_log().move_count(), 3);
        assert_eq!(game.board().turn(), Color::Black);
        assert!(game.undo());
        assert_eq!(game.board().turn(), Color::White);
        assert!(game.board().get_piece(7, 6).is_some());
    }
    #[test]
    fn test_replay_rejects_illegal_sequence() {
        let moves = [Move::new(E2, E4), Move::new(E2, E4)];
        assert!(Game::replay(&moves).is_err());
    }
    #[cfg(feature = "random")]
    #[test]
    fn test_random_move_is_legal() {
        let mut game = Game::new();
        for _ in 0..10 {
            let Some(mv) = game.random_move() else {
                break;
            };
            game.submit_move(mv).unwrap();
        }
        assert!(game.board().history_len() > 0);
    }
}
