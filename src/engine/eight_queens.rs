use super::threat;
use crate::base::{
    Square,
    board::Board,
    extension::{CancelReason, Extension, MoveInputEvent},
    piece::Piece,
};
use log::{debug, info, trace};

/// Most queens the puzzle lets the user place.
pub const MAX_PIECES: usize = 8;

/// Lets the user drop up to eight queens on empty squares and marks every queen that is attacked.
///
/// Nothing is listened to until the widget reports [`Extension::ready`].
#[derive(Debug, Clone, Default)]
pub struct EightQueens {
    attached: bool,
}

impl EightQueens {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Extension for EightQueens {
    fn ready(&mut self, board: &mut dyn Board) {
        if self.attached {
            return;
        }
        info!("Board ready, attaching eight queens");
        self.attached = true;
        threat::refresh_threat_markers(board);
    }

    fn square_clicked(&mut self, board: &mut dyn Board, square: Option<Square>) {
        if !self.attached {
            trace!("Click before board is ready, ignoring");
            return;
        }
        let Some(square) = square else {
            return;
        };
        if board.piece(square).is_some() {
            trace!("{square} is occupied, ignoring click");
            return;
        }
        let pieces = board.occupied_squares().len();
        if pieces >= MAX_PIECES {
            debug!("{pieces} pieces on the board, ignoring click on {square}");
            return;
        }
        debug!("Placing {} on {square}", Piece::BLACK_QUEEN);
        board.set_piece(square, Some(Piece::BLACK_QUEEN));
        threat::refresh_threat_markers(board);
    }

    fn move_input(&mut self, board: &mut dyn Board, event: &MoveInputEvent) -> bool {
        if !self.attached {
            trace!("Move input before board is ready: {:?}", event);
            return false;
        }
        trace!("Move input: {:?}", event);
        match event {
            MoveInputEvent::Started { .. } | MoveInputEvent::Validate { .. } => return true,
            MoveInputEvent::Canceled {
                square_from, reason, ..
            } => {
                if *reason == CancelReason::MovedOutOfBoard {
                    debug!("Piece dragged off the board, removing it from {square_from}");
                    board.set_piece(*square_from, None);
                }
                return true;
            },
            MoveInputEvent::MovingOverSquare { .. } | MoveInputEvent::Finished { .. } => {},
        }
        threat::refresh_threat_markers(board);
        true
    }
}
