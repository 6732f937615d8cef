use super::{Square, board::Board, piece::Piece};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CancelReason {
    /// The right mouse button was pressed while a piece was being moved.
    SecondaryClick,
    /// The piece was dropped outside the board.
    MovedOutOfBoard,
    /// The piece was dropped back onto its origin square.
    DraggedBack,
}

/// Lifecycle notifications of a piece being moved on the board widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveInputEvent {
    Started {
        square: Square,
        piece: Piece,
    },
    MovingOverSquare {
        square_from: Square,
        square_over: Option<Square>,
    },
    Validate {
        square_from: Square,
        square_to: Square,
        piece: Piece,
    },
    Canceled {
        square_from: Square,
        square_to: Option<Square>,
        reason: CancelReason,
    },
    Finished {
        square_from: Square,
        square_to: Option<Square>,
        legal: bool,
    },
}

/// Behaviour plugged into the board widget.
///
/// The widget owns the board and calls into the extension from its event handlers; the extension
/// only touches the board through the [`Board`] it is handed.
pub trait Extension {
    /// Called by the widget once it has finished its own setup.
    fn ready(&mut self, board: &mut dyn Board);

    /// A raw click on the board surface. `square` is `None` when the click hit no square.
    fn square_clicked(&mut self, board: &mut dyn Board, square: Option<Square>);

    /// Handle a move input notification.
    ///
    /// The return value only matters for [`MoveInputEvent::Started`] (whether the piece may be
    /// picked up) and [`MoveInputEvent::Validate`] (whether the move is carried out).
    fn move_input(&mut self, board: &mut dyn Board, event: &MoveInputEvent) -> bool;
}
