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

use super::material::Color;
use super::Board;

/// How the game stands for the side to move, once it can no longer move.
/// `CheckMate` carries the winning color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardResult {
    CheckMate(Color),
    StaleMate,
}

impl Board {
    pub fn board_result(&self) -> Option<BoardResult> {
        let turn = self.turn();
        if self.is_checkmate(turn) {
            Some(BoardResult::CheckMate(!turn))
        } else if self.is_stalemate(turn) {
            Some(BoardResult::StaleMate)
        } else {
            None
        }
    }
}
