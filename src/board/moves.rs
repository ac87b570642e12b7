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

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::material::Color;
use super::square::Square;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("Not a legal move")]
    InvalidMove,
    #[error("Not a move in coordinate notation: {0:?}")]
    InvalidNotation(String),
    #[error("The game is already over")]
    GameOver,
}

/// A move from one square to another, written as the two square names
/// back to back (`"e2e4"`).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Both halves of the notation, e.g. `("e2", "e4")`.
    pub fn to_algebraic(&self) -> (String, String) {
        (self.from.to_string(), self.to.to_string())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MoveError::InvalidNotation(s.to_string());
        if !s.is_ascii() || s.len() != 4 {
            return Err(invalid());
        }
        let from = s[..2].parse().map_err(|_| invalid())?;
        let to = s[2..].parse().map_err(|_| invalid())?;
        Ok(Self { from, to })
    }
}

/// One line of the move history: white's move and black's reply.
/// A pair opened by black has no white move and shows `...` in its place.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MovePair {
    white: Option<Move>,
    black: Option<Move>,
}

impl MovePair {
    pub fn white(&self) -> Option<Move> {
        self.white
    }
    pub fn black(&self) -> Option<Move> {
        self.black
    }
    pub fn is_full(&self) -> bool {
        self.black.is_some()
    }
    /// The moves in this pair as strings, including the placeholder.
    pub fn to_strings(&self) -> Vec<String> {
        let mut result = vec![self
            .white
            .map_or_else(|| "...".to_string(), |mv| mv.to_string())];
        if let Some(mv) = self.black {
            result.push(mv.to_string());
        }
        result
    }
    fn move_count(&self) -> usize {
        self.white.is_some() as usize + self.black.is_some() as usize
    }
}

impl fmt::Display for MovePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_strings().join(" "))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct MoveLog {
    pairs: Vec<MovePair>,
}

impl MoveLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pairs(&self) -> &[MovePair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of moves recorded, not counting placeholders.
    pub fn move_count(&self) -> usize {
        self.pairs.iter().map(MovePair::move_count).sum()
    }

    pub fn push(&mut self, mover: Color, mv: Move) {
        match mover {
            Color::White => self.pairs.push(MovePair {
                white: Some(mv),
                black: None,
            }),
            Color::Black => match self.pairs.last_mut() {
                Some(pair) if !pair.is_full() => pair.black = Some(mv),
                _ => self.pairs.push(MovePair {
                    white: None,
                    black: Some(mv),
                }),
            },
        }
    }

    /// Removes the latest move: black's reply if the last pair has one,
    /// otherwise the whole last pair.
    pub fn pop(&mut self) {
        match self.pairs.last_mut() {
            Some(pair) if pair.is_full() => pair.black = None,
            Some(_) => {
                self.pairs.pop();
            }
            None => {}
        }
    }
}

impl fmt::Display for MoveLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pair) in self.pairs.iter().enumerate() {
            writeln!(f, "{}. {}", i + 1, pair)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Square::*;

    #[test]
    fn test_parse_move() {
        let mv: Move = "e2e4".parse().unwrap();
        assert_eq!(mv, Move::new(E2, E4));
        assert_eq!(mv.to_string(), "e2e4");
        assert_eq!(mv.to_algebraic(), ("e2".to_string(), "e4".to_string()));
    }
    #[test]
    fn test_parse_invalid_move() {
        for s in ["", "e2", "e2e", "e2e4q", "e9e4", "x2e4", "é2e4"] {
            assert_eq!(
                s.parse::<Move>(),
                Err(MoveError::InvalidNotation(s.to_string()))
            );
        }
    }
    #[test]
    fn test_log_pairs_moves() {
        let mut log = MoveLog::new();
        log.push(Color::White, Move::new(E2, E4));
        log.push(Color::Black, Move::new(E7, E5));
        log.push(Color::White, Move::new(G1, F3));
        assert_eq!(log.len(), 2);
        assert_eq!(log.move_count(), 3);
        assert_eq!(log.pairs()[0].to_strings(), vec!["e2e4", "e7e5"]);
        assert_eq!(log.pairs()[1].to_strings(), vec!["g1f3"]);
        assert_eq!(log.to_string(), "1. e2e4 e7e5\n2. g1f3\n");
    }
    #[test]
    fn test_log_black_without_open_pair() {
        let mut log = MoveLog::new();
        log.push(Color::Black, Move::new(E7, E5));
        assert_eq!(log.pairs()[0].to_strings(), vec!["...", "e7e5"]);
        log.push(Color::Black, Move::new(D7, D5));
        assert_eq!(log.len(), 2);
        assert_eq!(log.move_count(), 2);
    }
    #[test]
    fn test_log_pop() {
        let mut log = MoveLog::new();
        log.push(Color::White, Move::new(E2, E4));
        log.push(Color::Black, Move::new(E7, E5));
        log.pop();
        assert_eq!(log.len(), 1);
        assert_eq!(log.move_count(), 1);
        log.pop();
        assert!(log.is_empty());
        log.pop();
        assert!(log.is_empty());
    }
}
