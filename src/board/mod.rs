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

//! Chess board enforcing the rules of play for two sides
//!
//! A _board_ holds the pieces, whose turn it is, the pieces each side
//! has captured, a log of the moves played and enough history to take
//! moves back. The following features are supported:
//!
//! [x] Movement rules for all six kinds of piece
//! [x] Reject moves that leave the mover's king in check
//! [x] Recognize check, checkmate and stalemate
//! [x] Undo any number of moves
//! [x] Move log grouped into (white, black) pairs
//! [ ] Castling
//! [ ] En passant
//! [ ] Pawn promotion
//! [ ] Three-fold repetition and fifty-move rules
//!
//! Some of the key abstractions include:
//!
//! * A `Square` names one of the 64 squares. Row 0 is rank 8 (black's
//!   back rank) and column 0 is file a, so `"e2"` is row 6, column 4.
//!   `algebraic_to_coords` and `coords_to_algebraic` convert between
//!   the two forms.
//!
//! * `Material` is a piece of a specific color. A `Piece` has six
//!   variants: `King`, `Queen`, `Rook`, `Bishop`, `Knight` and `Pawn`.
//!   Each material remembers whether it has moved, which only matters
//!   to a pawn's opening double step. `Material::is_valid_move` checks
//!   the movement pattern of a piece on a given grid of `Squares`.
//!
//! * A `Position` is the grid, the side to move and both capture lists.
//!   It is also the snapshot pushed onto the `History` before every
//!   committed move, so undoing a move restores it verbatim.
//!
//! * The `Board` owns the current position, the `MoveLog` and the
//!   history. `move_piece` validates and commits a move but leaves the
//!   turn alone; the caller flips it with `switch_turn`. `Game` (see the
//!   `game` module) does that bookkeeping and tracks the result.

use log::{debug, trace};
use std::fmt;
use strum::IntoEnumIterator;

mod history;
mod material;
mod moves;
mod play;
mod position;
mod rules;
mod square;

pub use material::*;
pub use moves::*;
pub use play::*;
pub use position::*;
pub use square::*;

use history::{History, Snapshot};

pub trait Turn {
    fn turn(&self) -> Color;
}

#[derive(Debug, Clone, Default)]
pub struct Board {
    position: Position,
    move_log: MoveLog,
    history: History,
}

impl Board {
    /// The standard starting position with white to move.
    pub fn new() -> Self {
        Self::from_position(Position::standard())
    }

    pub fn from_position(position: Position) -> Self {
        Self {
            position,
            move_log: MoveLog::new(),
            history: History::new(),
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    pub fn switch_turn(&mut self) {
        self.position.switch_turn();
    }

    /// The piece at `(row, col)`, if any. Coordinates outside the board
    /// yield `None`.
    pub fn get_piece(&self, row: usize, col: usize) -> Option<&Material> {
        Square::from_coords(row, col).and_then(|square| self.contents(square).as_ref())
    }

    pub fn move_log(&self) -> &MoveLog {
        &self.move_log
    }

    /// Pieces captured by white (so, black pieces).
    pub fn white_captured(&self) -> &[Material] {
        self.position.captured(Color::White)
    }

    /// Pieces captured by black (so, white pieces).
    pub fn black_captured(&self) -> &[Material] {
        self.position.captured(Color::Black)
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Attempts to play `start` to `end` (e.g. `"e2"`, `"e4"`) for the
    /// side to move. Returns `false`, leaving the board untouched, if the
    /// move is illegal or the notation is not understood.
    pub fn move_piece(&mut self, start: &str, end: &str) -> bool {
        match (start.parse::<Square>(), end.parse::<Square>()) {
            (Ok(from), Ok(to)) => self.apply_move(Move::new(from, to)),
            _ => {
                trace!("{start}{end} rejected: not a pair of squares");
                false
            }
        }
    }

    /// Commits `mv` if it is legal for the side to move. The turn is not
    /// switched.
    pub fn apply_move(&mut self, mv: Move) -> bool {
        let mover = self.turn();
        if !is_legal(&self.position, mover, mv) {
            return false;
        }
        self.history.push(self.position.clone(), mv);
        self.position.commit(mv.from, mv.to);
        self.move_log.push(mover, mv);
        debug!("{mover} played {mv}");
        true
    }

    /// Restores the position from before the last committed move and
    /// drops that move from the log. The moved piece keeps its
    /// `has_moved` flag.
    pub fn undo_move(&mut self) -> bool {
        let Some(Snapshot { position, mv }) = self.history.pop() else {
            debug!("nothing to undo");
            return false;
        };
        self.position = position;
        if let Some(material) = self.position.squares_mut().get_mut(mv.from) {
            material.set_moved();
        }
        self.move_log.pop();
        debug!("took back {mv}");
        true
    }

    pub fn find_king(&self, color: Color) -> Option<(usize, usize)> {
        self.king(color).map(|square| square.coords())
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        self.in_check(color)
    }

    /// Every move of `color` that `move_piece` would accept right now.
    /// Ordered by origin square, then destination, from a8 to h1. Empty
    /// unless `color` is the side to move.
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        self.candidates(color)
            .filter(|&mv| is_legal(&self.position, self.turn(), mv))
            .collect()
    }

    /// `legal_moves` in string form: `("e2", "e4")`, ...
    pub fn get_all_possible_moves(&self, color: Color) -> Vec<(String, String)> {
        self.legal_moves(color)
            .iter()
            .map(Move::to_algebraic)
            .collect()
    }

    /// Legal destinations of the piece on `from` if it belongs to the
    /// side to move.
    pub fn destinations(&self, from: Square) -> Mask {
        match self.contents(from) {
            Some(material) if material.color() == self.turn() => Mask::from_squares(
                Square::iter().filter(|&to| is_legal(&self.position, self.turn(), Move::new(from, to))),
            ),
            _ => Mask::empty(),
        }
    }

    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.can_move(color)
    }

    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && !self.can_move(color)
    }

    fn can_move(&self, color: Color) -> bool {
        self.candidates(color)
            .any(|mv| is_legal(&self.position, self.turn(), mv))
    }

    fn candidates(&self, color: Color) -> impl Iterator<Item = Move> + '_ {
        self.position
            .squares()
            .occupied_by(color)
            .flat_map(|(from, _)| Square::iter().map(move |to| Move::new(from, to)))
    }
}

/// A move is legal for `mover` if a piece of that color stands on the
/// origin, its movement pattern allows the move and, once played, the
/// mover's king is not in check.
fn is_legal(position: &Position, mover: Color, mv: Move) -> bool {
    let Some(material) = position.contents(mv.from) else {
        trace!("{mv} rejected: no piece on {}", mv.from);
        return false;
    };
    if material.color() != mover {
        trace!("{mv} rejected: {material} does not belong to {mover}");
        return false;
    }
    let squares = position.squares();
    if !material.is_valid_move(squares, mv.from, mv.to) {
        trace!("{mv} rejected: {material} cannot move that way");
        return false;
    }
    if squares.simulate(mv.from, mv.to).is_in_check(mover) {
        trace!("{mv} rejected: leaves the {mover} king in check");
        return false;
    }
    true
}

impl Turn for Board {
    #[inline]
    fn turn(&self) -> Color {
        self.position.turn()
    }
}

impl AsRef<Position> for Board {
    fn as_ref(&self) -> &Position {
        &self.position
    }
}

impl Pos for Board {}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        for rank in Rank::iter() {
            write!(f, "{} ", rank)?;
            for file in File::iter() {
                match self.contents(Square::new(file, rank)) {
                    Some(material) => write!(f, "{} ", material.symbol())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "Turn: {}", self.turn())
    }
}
