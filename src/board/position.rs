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
use std::ops::Index;
use strum::IntoEnumIterator;

use super::material::{Color, Material, Pair, Piece};
use super::square::{File, Rank, Square};
use super::Turn;

use Color::*;
use Piece::*;
use Rank::*;

/// The 8x8 grid. Each cell owns at most one piece.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Squares([Option<Material>; 64]);

impl Squares {
    pub fn empty() -> Self {
        Self(std::array::from_fn(|_| None))
    }

    fn standard() -> Self {
        const BACK_RANK: [Piece; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        const PAWN_RANKS: Pair<Rank> = Pair::new(Rank2, Rank7);
        const BACK_RANKS: Pair<Rank> = Pair::new(Rank1, Rank8);
        let mut squares = Self::empty();
        for file in File::iter() {
            for color in Color::iter() {
                let square = Square::new(file, PAWN_RANKS[color]);
                squares.place(square, Material::new(color, Pawn));
                let square = Square::new(file, BACK_RANKS[color]);
                squares.place(square, Material::new(color, BACK_RANK[file.to_index()]));
            }
        }
        squares
    }

    #[inline]
    pub fn is_vacant(&self, square: Square) -> bool {
        self[square].is_none()
    }

    /// Squares holding pieces of `color`, in index order.
    pub fn occupied_by(&self, color: Color) -> impl Iterator<Item = (Square, &Material)> + '_ {
        Square::iter().filter_map(move |square| match &self[square] {
            Some(material) if material.color() == color => Some((square, material)),
            _ => None,
        })
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.occupied_by(color)
            .find(|(_, material)| material.piece().is_king())
            .map(|(square, _)| square)
    }

    /// True if any piece of the other color could move onto the king of
    /// `color`. A missing king is never in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        let Some(king) = self.find_king(color) else {
            return false;
        };
        self.occupied_by(!color)
            .any(|(from, material)| material.is_valid_move(self, from, king))
    }

    /// A copy of the grid with the contents of `from` moved onto `to`.
    /// Pieces in the copy are left untouched otherwise.
    pub fn simulate(&self, from: Square, to: Square) -> Self {
        let mut squares = self.clone();
        if let Some(material) = squares.take(from) {
            squares.place(to, material);
        }
        squares
    }

    pub(super) fn place(&mut self, square: Square, material: Material) -> Option<Material> {
        self.0[square.to_index()].replace(material)
    }

    pub(super) fn take(&mut self, square: Square) -> Option<Material> {
        self.0[square.to_index()].take()
    }

    pub(super) fn get_mut(&mut self, square: Square) -> Option<&mut Material> {
        self.0[square.to_index()].as_mut()
    }
}

impl Index<Square> for Squares {
    type Output = Option<Material>;
    fn index(&self, index: Square) -> &Self::Output {
        &self.0[index.to_index()]
    }
}

impl Serialize for Squares {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.0.iter())
    }
}

impl<'de> Deserialize<'de> for Squares {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let cells: Vec<Option<Material>> = Vec::deserialize(deserializer)?;
        let len = cells.len();
        let cells: [Option<Material>; 64] = cells
            .try_into()
            .map_err(|_| serde::de::Error::invalid_length(len, &"64 squares"))?;
        Ok(Self(cells))
    }
}

/// Everything needed to restore the board after an undo: the grid, the
/// side to move and the capture lists. `captured[color]` holds the pieces
/// taken *by* `color`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    squares: Squares,
    turn: Color,
    captured: Pair<Vec<Material>>,
}

impl Default for Position {
    fn default() -> Self {
        Self::standard()
    }
}

impl Position {
    pub fn standard() -> Self {
        Self {
            squares: Squares::standard(),
            turn: White,
            captured: Pair::default(),
        }
    }

    /// An empty board with white to move. Use `place` and `with_turn`
    /// to set up a position.
    pub fn empty() -> Self {
        Self {
            squares: Squares::empty(),
            turn: White,
            captured: Pair::default(),
        }
    }

    pub fn place(mut self, square: Square, material: Material) -> Self {
        self.squares.place(square, material);
        self
    }

    pub fn with_turn(mut self, turn: Color) -> Self {
        self.turn = turn;
        self
    }

    pub fn squares(&self) -> &Squares {
        &self.squares
    }

    pub fn captured(&self, by: Color) -> &[Material] {
        &self.captured[by]
    }

    pub(super) fn switch_turn(&mut self) {
        self.turn = !self.turn;
    }

    pub(super) fn squares_mut(&mut self) -> &mut Squares {
        &mut self.squares
    }

    /// Moves the piece on `from` to `to` and marks it as moved. A piece
    /// standing on `to` goes to its captor's list.
    pub(super) fn commit(&mut self, from: Square, to: Square) {
        let Some(mut material) = self.squares.take(from) else {
            return;
        };
        material.set_moved();
        if let Some(taken) = self.squares.place(to, material) {
            let captor = !taken.color();
            self.captured[captor].push(taken);
        }
    }
}

impl Turn for Position {
    #[inline]
    fn turn(&self) -> Color {
        self.turn
    }
}

impl Index<Square> for Position {
    type Output = Option<Material>;
    #[inline]
    fn index(&self, index: Square) -> &Self::Output {
        &self.squares[index]
    }
}

impl AsRef<Self> for Position {
    fn as_ref(&self) -> &Self {
        self
    }
}

impl Pos for Position {}

/// Read-only queries shared by everything that wraps a `Position`.
pub trait Pos: Turn + AsRef<Position> {
    #[inline]
    fn contents(&self, square: Square) -> &Option<Material> {
        let pos: &Position = self.as_ref();
        &pos.squares[square]
    }
    #[inline]
    fn is_vacant(&self, square: Square) -> bool {
        self.contents(square).is_none()
    }
    #[inline]
    fn king(&self, color: Color) -> Option<Square> {
        let pos: &Position = self.as_ref();
        pos.squares.find_king(color)
    }
    #[inline]
    fn in_check(&self, color: Color) -> bool {
        let pos: &Position = self.as_ref();
        pos.squares.is_in_check(color)
    }
}
