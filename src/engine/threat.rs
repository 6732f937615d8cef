use crate::base::{
    Square,
    board::{Board, MarkerKind},
    square::{BOARD_SIZE, NUM_SQUARES},
};
use log::{debug, trace};
use smallvec::SmallVec;

/// Square on the file index `x` and rank index `y`, identified through its flat index.
///
/// Both the scanned squares and the scanned-from square go through this, so self-exclusion never
/// depends on how the board itself maps squares to coordinates.
fn square_at(x: usize, y: usize) -> Square {
    Square::from_index(y * BOARD_SIZE + x)
}

fn occupied_except(board: &dyn Board, square: Square, target: Square) -> bool {
    if square == target {
        return false;
    }
    if board.piece(square).is_some() {
        trace!("{target} is threatened from {square}");
        return true;
    }
    false
}

/// Whether any piece other than the one on `square` shares a rank, file or diagonal with it.
///
/// Pieces in between do not block: any piece on the line counts.
pub fn is_threatened(board: &dyn Board, square: Square) -> bool {
    let (x, y) = board.square_to_coordinates(square);
    let target = square_at(x, y);

    // rank
    for sx in 0..BOARD_SIZE {
        if occupied_except(board, square_at(sx, y), target) {
            return true;
        }
    }
    // file
    for sy in 0..BOARD_SIZE {
        if occupied_except(board, square_at(x, sy), target) {
            return true;
        }
    }
    // diagonal, rising to the right
    for sy in 0..BOARD_SIZE {
        let Some(sx) = (x + sy).checked_sub(y).filter(|sx| *sx < BOARD_SIZE) else {
            continue;
        };
        if occupied_except(board, square_at(sx, sy), target) {
            return true;
        }
    }
    // diagonal, falling to the right
    for sy in 0..BOARD_SIZE {
        let Some(sx) = (x + y).checked_sub(sy).filter(|sx| *sx < BOARD_SIZE) else {
            continue;
        };
        if occupied_except(board, square_at(sx, sy), target) {
            return true;
        }
    }
    false
}

/// All occupied squares which are threatened, in flat-index order.
pub fn threatened_squares(board: &dyn Board) -> SmallVec<[Square; 8]> {
    (0..NUM_SQUARES)
        .map(|index| square_at(index % BOARD_SIZE, index / BOARD_SIZE))
        .filter(|square| board.piece(*square).is_some())
        .filter(|square| is_threatened(board, *square))
        .collect()
}

/// Drop every marker on the board and put a danger marker on each threatened piece.
///
/// Empty squares are never marked, even when a piece placed there would be attacked.
pub fn refresh_threat_markers(board: &mut dyn Board) {
    board.remove_markers(None);
    let threatened = threatened_squares(board);
    debug!("Refreshing threat markers: {} threatened", threatened.len());
    for square in threatened {
        board.add_marker(MarkerKind::CircleDanger, square);
    }
}
