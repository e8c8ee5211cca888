//! Collision oracle - decides whether a piece placement is legal
//!
//! Rules, per occupied shape cell at board (x, y):
//! 1. outside the side walls or below the floor collides;
//! 2. above the top edge (`y < 0`) never collides;
//! 3. otherwise the cell collides when the board cell is occupied.

use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::{Board, Piece};

/// Whether `piece`, displaced by (dx, dy), would overlap a wall, the floor or a
/// settled cell. Never mutates its inputs.
pub fn collides(piece: &Piece, board: &Board, dx: i8, dy: i8) -> bool {
    let (dx, dy) = (dx as i16, dy as i16);
    piece.board_cells().iter().any(|&(x, y)| {
        let (bx, by) = (x + dx, y + dy);
        if bx < 0 || bx >= BOARD_WIDTH as i16 || by >= BOARD_HEIGHT as i16 {
            return true;
        }
        if by < 0 {
            return false;
        }
        board.is_occupied(bx as i8, by as i8)
    })
}

/// Whether `piece` fits where it is
pub fn fits(piece: &Piece, board: &Board) -> bool {
    !collides(piece, board, 0, 0)
}
