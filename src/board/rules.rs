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

//! Movement patterns for each kind of piece.
//!
//! `Material::is_valid_move` answers whether a piece may travel from one
//! square to another on a given grid: shape of the move, obstruction and
//! the occupant of the destination. It does not know whose turn it is and,
//! apart from the king, does not care whether the mover's king ends up in
//! check; the board engine verifies that separately.

use once_cell::sync::Lazy;
use strum::IntoEnumIterator;

use super::material::{Color, Material, Piece};
use super::position::Squares;
use super::square::{Mask, Offset, Square};

use Color::*;
use Piece::*;

impl Material {
    pub fn is_valid_move(&self, squares: &Squares, from: Square, to: Square) -> bool {
        if from == to {
            return false;
        }
        if let Some(target) = &squares[to] {
            if target.color() == self.color() {
                return false;
            }
        }
        match self.piece() {
            Pawn => self.is_valid_pawn_move(squares, from, to),
            Knight => KNIGHT_MOVES[from].contains(to),
            Bishop => DIAGONALS[from].contains(to) && is_path_clear(squares, from, to),
            Rook => HORIZONTALS[from].contains(to) && is_path_clear(squares, from, to),
            Queen => {
                (DIAGONALS[from] | HORIZONTALS[from]).contains(to)
                    && is_path_clear(squares, from, to)
            }
            King => {
                KING_MOVES[from].contains(to)
                    && !squares.simulate(from, to).is_in_check(self.color())
            }
        }
    }

    fn is_valid_pawn_move(&self, squares: &Squares, from: Square, to: Square) -> bool {
        let forward = match self.color() {
            White => -1,
            Black => 1,
        };
        let offset = to - from;
        match (offset.x, offset.y) {
            (0, y) if y == forward => squares.is_vacant(to),
            (0, y) if y == 2 * forward => {
                !self.has_moved()
                    && squares.is_vacant(to)
                    && (from + Offset::new(0, forward)).is_some_and(|step| squares.is_vacant(step))
            }
            (-1 | 1, y) if y == forward => squares[to]
                .as_ref()
                .is_some_and(|target| target.color() != self.color()),
            _ => false,
        }
    }
}

fn is_path_clear(squares: &Squares, from: Square, to: Square) -> bool {
    between(from, to).iter().all(|square| squares.is_vacant(square))
}

/// Squares strictly between `from` and `to` when they share a rank, file
/// or diagonal. Empty otherwise.
#[inline]
pub(super) fn between(from: Square, to: Square) -> Mask {
    SQUARES_BETWEEN[from.to_index() * 64 + to.to_index()]
}

static SQUARES_BETWEEN: Lazy<Vec<Mask>> = Lazy::new(|| {
    let mut table = vec![Mask::empty(); 64 * 64];
    for start in Square::iter() {
        for end in Square::iter() {
            let Some(step) = (end - start).to_unit() else {
                continue;
            };
            let mut mask = Mask::empty();
            // Safety: `step` is a unit from `start` toward `end`, so we
            // reach `end` before leaving the board
            let mut next = (start + step).unwrap();
            while next != end {
                mask |= next;
                next = (next + step).unwrap();
            }
            table[start.to_index() * 64 + end.to_index()] = mask;
        }
    }
    table
});

static HORIZONTALS: Lazy<[Mask; 64]> = Lazy::new(|| {
    let mut array = [Mask::empty(); 64];
    for square in Square::iter() {
        array[square] = Mask::from_squares(Square::iter().filter(|&other| {
            other != square && (other.row() == square.row() || other.col() == square.col())
        }));
    }
    array
});

static DIAGONALS: Lazy<[Mask; 64]> = Lazy::new(|| {
    let mut array = [Mask::empty(); 64];
    for square in Square::iter() {
        array[square] = Mask::from_squares(Square::iter().filter(|&other| {
            let offset = other - square;
            other != square && offset.x.abs() == offset.y.abs()
        }));
    }
    array
});

static KING_MOVES: Lazy<[Mask; 64]> = Lazy::new(|| {
    const OFFSETS: [Offset; 8] = [
        Offset::new(-1, -1),
        Offset::new(0, -1),
        Offset::new(1, -1),
        Offset::new(-1, 0),
        Offset::new(1, 0),
        Offset::new(-1, 1),
        Offset::new(0, 1),
        Offset::new(1, 1),
    ];
    let mut array = [Mask::empty(); 64];
    for square in Square::iter() {
        array[square] = Mask::from_squares(OFFSETS.into_iter().filter_map(|offset| square + offset));
    }
    array
});

static KNIGHT_MOVES: Lazy<[Mask; 64]> = Lazy::new(|| {
    const OFFSETS: [Offset; 8] = [
        Offset::new(-2, -1),
        Offset::new(-2, 1),
        Offset::new(2, -1),
        Offset::new(2, 1),
        Offset::new(-1, -2),
        Offset::new(-1, 2),
        Offset::new(1, -2),
        Offset::new(1, 2),
    ];
    let mut array = [Mask::empty(); 64];
    for square in Square::iter() {
        array[square] = Mask::from_squares(OFFSETS.into_iter().filter_map(|offset| square + offset));
    }
    array
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;
    use Square::*;

    fn grid(pieces: &[(Square, Material)]) -> Squares {
        pieces
            .iter()
            .fold(Position::empty(), |pos, (square, material)| pos.place(*square, material.clone()))
            .squares()
            .clone()
    }

    #[test]
    fn test_between() {
        assert_eq!(between(A3, E3), Mask::from_squares([B3, C3, D3]));
        assert_eq!(between(C2, C8).len(), 5);
        assert_eq!(between(A1, D4), Mask::from_squares([B2, C3]));
        assert_eq!(between(H3, F5), Mask::from_squares([G4]));
        assert!(between(G4, F5).is_empty());
        assert!(between(A1, H5).is_empty());
        assert!(between(B1, C3).is_empty());
    }
    #[test]
    fn test_pawn_single_and_double_advance() {
        let squares = grid(&[(E2, Material::WP), (D7, Material::BP)]);
        let pawn = Material::WP;
        assert!(pawn.is_valid_move(&squares, E2, E3));
        assert!(pawn.is_valid_move(&squares, E2, E4));
        assert!(!pawn.is_valid_move(&squares, E2, E5));
        assert!(!pawn.is_valid_move(&squares, E2, E1));
        let pawn = Material::BP;
        assert!(pawn.is_valid_move(&squares, D7, D6));
        assert!(pawn.is_valid_move(&squares, D7, D5));
        assert!(!pawn.is_valid_move(&squares, D7, D8));
    }
    #[test]
    fn test_pawn_double_advance_requires_unmoved() {
        let mut squares = grid(&[(E3, Material::WP)]);
        squares.get_mut(E3).unwrap().set_moved();
        let pawn = squares[E3].clone().unwrap();
        assert!(pawn.is_valid_move(&squares, E3, E4));
        assert!(!pawn.is_valid_move(&squares, E3, E5));
    }
    #[test]
    fn test_pawn_advance_blocked() {
        let squares = grid(&[(E2, Material::WP), (E3, Material::BB)]);
        assert!(!Material::WP.is_valid_move(&squares, E2, E3));
        assert!(!Material::WP.is_valid_move(&squares, E2, E4));
        let squares = grid(&[(E2, Material::WP), (E4, Material::BB)]);
        assert!(Material::WP.is_valid_move(&squares, E2, E3));
        assert!(!Material::WP.is_valid_move(&squares, E2, E4));
    }
    #[test]
    fn test_pawn_capture() {
        let squares = grid(&[
            (E2, Material::WP),
            (D3, Material::BB),
            (F3, Material::WN),
        ]);
        assert!(Material::WP.is_valid_move(&squares, E2, D3));
        assert!(!Material::WP.is_valid_move(&squares, E2, F3));
        let squares = grid(&[(E7, Material::BP), (D6, Material::WB)]);
        assert!(Material::BP.is_valid_move(&squares, E7, D6));
        assert!(!Material::BP.is_valid_move(&squares, E7, F6));
    }
    #[test]
    fn test_pawn_cannot_capture_straight_ahead() {
        let squares = grid(&[(E4, Material::WP), (E5, Material::BP)]);
        assert!(!Material::WP.is_valid_move(&squares, E4, E5));
        assert!(!Material::BP.is_valid_move(&squares, E5, E4));
    }
    #[test]
    fn test_rook_moves() {
        let squares = grid(&[(D4, Material::WR), (D7, Material::BP), (B4, Material::WP)]);
        let rook = Material::WR;
        assert!(rook.is_valid_move(&squares, D4, D1));
        assert!(rook.is_valid_move(&squares, D4, H4));
        assert!(rook.is_valid_move(&squares, D4, D7));
        assert!(!rook.is_valid_move(&squares, D4, D8));
        assert!(!rook.is_valid_move(&squares, D4, B4));
        assert!(!rook.is_valid_move(&squares, D4, A4));
        assert!(!rook.is_valid_move(&squares, D4, E5));
    }
    #[test]
    fn test_knight_jumps() {
        let squares = Position::standard().squares().clone();
        let knight = Material::WN;
        assert!(knight.is_valid_move(&squares, G1, F3));
        assert!(knight.is_valid_move(&squares, G1, H3));
        assert!(!knight.is_valid_move(&squares, G1, E2));
        assert!(!knight.is_valid_move(&squares, G1, G3));
    }
    #[test]
    fn test_bishop_moves() {
        let squares = grid(&[(C1, Material::WB), (E3, Material::BP)]);
        let bishop = Material::WB;
        assert!(bishop.is_valid_move(&squares, C1, A3));
        assert!(bishop.is_valid_move(&squares, C1, E3));
        assert!(!bishop.is_valid_move(&squares, C1, F4));
        assert!(!bishop.is_valid_move(&squares, C1, C3));
    }
    #[test]
    fn test_queen_moves() {
        let squares = grid(&[(D1, Material::WQ), (D2, Material::WP)]);
        let queen = Material::WQ;
        assert!(queen.is_valid_move(&squares, D1, H5));
        assert!(queen.is_valid_move(&squares, D1, A1));
        assert!(!queen.is_valid_move(&squares, D1, D2));
        assert!(!queen.is_valid_move(&squares, D1, D5));
        assert!(!queen.is_valid_move(&squares, D1, E3));
    }
    #[test]
    fn test_king_moves() {
        let squares = grid(&[(E1, Material::WK), (F2, Material::WP)]);
        let king = Material::WK;
        assert!(king.is_valid_move(&squares, E1, E2));
        assert!(king.is_valid_move(&squares, E1, D1));
        assert!(!king.is_valid_move(&squares, E1, F2));
        assert!(!king.is_valid_move(&squares, E1, E3));
    }
    #[test]
    fn test_king_cannot_step_into_check() {
        let squares = grid(&[(E1, Material::WK), (D8, Material::BR)]);
        let king = Material::WK;
        assert!(!king.is_valid_move(&squares, E1, D1));
        assert!(!king.is_valid_move(&squares, E1, D2));
        assert!(king.is_valid_move(&squares, E1, F2));
    }
    #[test]
    fn test_king_cannot_approach_king() {
        let squares = grid(&[(E1, Material::WK), (E3, Material::BK)]);
        assert!(!Material::WK.is_valid_move(&squares, E1, E2));
        assert!(Material::WK.is_valid_move(&squares, E1, D1));
    }
}
