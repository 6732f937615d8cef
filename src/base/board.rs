use super::{
    Square, Vec2D,
    piece::Piece,
    square::{BOARD_SIZE, NUM_SQUARES},
};
use log::trace;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// A red circle around a square whose piece is attacked.
    CircleDanger,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Marker {
    pub kind: MarkerKind,
    pub square: Square,
}

pub trait Board {
    /// Get the piece standing on `square`, if any.
    fn piece(&self, square: Square) -> Option<Piece>;

    /// Put `piece` on `square`, or clear the square with `None`.
    ///
    /// *Note*: No validation is done here; piece limits are the caller's business.
    fn set_piece(&mut self, square: Square, piece: Option<Piece>);

    /// Get all occupied squares in flat-index order (`a1, b1, ..., h1, a2, ...`).
    fn occupied_squares(&self) -> Vec<Square>;

    /// Add a marker of `kind` on `square`.
    fn add_marker(&mut self, kind: MarkerKind, square: Square);

    /// Remove markers of `kind`, or every marker when `kind` is `None`.
    fn remove_markers(&mut self, kind: Option<MarkerKind>);

    /// Get all markers currently on the board.
    fn markers(&self) -> &[Marker];

    fn square_to_coordinates(&self, square: Square) -> (usize, usize) {
        square.coordinates()
    }

    /// *Note*: Coordinates outside `[0, 7]` are a bug in the caller and panic.
    fn coordinates_to_square(&self, coordinates: (usize, usize)) -> Square {
        Square::from_coordinates(coordinates)
    }
}

#[derive(Clone, Debug)]
pub struct StandardBoard {
    pieces: Vec2D<Option<Piece>>,
    markers: SmallVec<[Marker; 8]>,
}

impl StandardBoard {
    pub fn new() -> Self {
        Self {
            pieces: Vec2D::new(BOARD_SIZE, BOARD_SIZE),
            markers: SmallVec::new(),
        }
    }

    /// Remove every piece and marker.
    pub fn clear(&mut self) {
        self.pieces.fill(None);
        self.markers.clear();
    }

    pub fn has_marker(&self, kind: MarkerKind, square: Square) -> bool {
        self.markers.iter().any(|m| m.kind == kind && m.square == square)
    }
}

impl Default for StandardBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Board for StandardBoard {
    fn piece(&self, square: Square) -> Option<Piece> {
        self.pieces.get(square.x(), square.y()).copied().flatten()
    }

    fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        trace!("set_piece({square}, {piece:?})");
        if let Some(slot) = self.pieces.get_mut(square.x(), square.y()) {
            *slot = piece;
        }
    }

    fn occupied_squares(&self) -> Vec<Square> {
        debug_assert_eq!(self.pieces.len(), NUM_SQUARES);
        self.pieces
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| Square::from_index(index))
            .collect()
    }

    fn add_marker(&mut self, kind: MarkerKind, square: Square) {
        if !self.has_marker(kind, square) {
            self.markers.push(Marker { kind, square });
        }
    }

    fn remove_markers(&mut self, kind: Option<MarkerKind>) {
        match kind {
            Some(kind) => self.markers.retain(|m| m.kind != kind),
            None => self.markers.clear(),
        }
    }

    fn markers(&self) -> &[Marker] {
        &self.markers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    #[test]
    fn test_set_and_get_piece() {
        let mut board = StandardBoard::new();
        assert_eq!(board.piece(sq("e5")), None);
        board.set_piece(sq("e5"), Some(Piece::BLACK_QUEEN));
        assert_eq!(board.piece(sq("e5")), Some(Piece::BLACK_QUEEN));
        board.set_piece(sq("e5"), None);
        assert_eq!(board.piece(sq("e5")), None);
    }

    #[test]
    fn test_occupied_squares_in_flat_index_order() {
        let mut board = StandardBoard::new();
        for text in ["h8", "a2", "c1", "b1"] {
            board.set_piece(sq(text), Some(Piece::BLACK_QUEEN));
        }
        let occupied: Vec<String> = board.occupied_squares().iter().map(|s| s.to_string()).collect();
        assert_eq!(occupied, ["b1", "c1", "a2", "h8"]);
    }

    #[test]
    fn test_coordinate_conversion_is_inverse() {
        let board = StandardBoard::new();
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                let square = board.coordinates_to_square((x, y));
                assert_eq!(board.square_to_coordinates(square), (x, y));
            }
        }
    }

    #[test]
    fn test_markers_add_and_remove() {
        let mut board = StandardBoard::new();
        board.add_marker(MarkerKind::CircleDanger, sq("a1"));
        board.add_marker(MarkerKind::CircleDanger, sq("a1"));
        board.add_marker(MarkerKind::CircleDanger, sq("b2"));
        assert_eq!(board.markers().len(), 2);
        assert!(board.has_marker(MarkerKind::CircleDanger, sq("b2")));

        board.remove_markers(Some(MarkerKind::CircleDanger));
        assert!(board.markers().is_empty());

        board.add_marker(MarkerKind::CircleDanger, sq("c3"));
        board.remove_markers(None);
        assert!(board.markers().is_empty());
    }

    #[test]
    fn test_clear() {
        let mut board = StandardBoard::new();
        board.set_piece(sq("d4"), Some(Piece::BLACK_QUEEN));
        board.add_marker(MarkerKind::CircleDanger, sq("d4"));
        board.clear();
        assert!(board.occupied_squares().is_empty());
        assert!(board.markers().is_empty());
    }
}
