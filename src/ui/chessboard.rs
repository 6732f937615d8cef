use crate::{
    base::{
        Square,
        board::{Board, MarkerKind, StandardBoard},
        extension::{CancelReason, Extension, MoveInputEvent},
        square::BOARD_SIZE,
    },
    config::GlobalConfig,
    utils::color_from_rgb,
};
use iced::widget::canvas;
use log::{debug, info, trace};

#[derive(Debug, Clone, Copy)]
pub enum ChessboardMessage {
    /// The widget finished its setup; sent once by the app at startup.
    Ready,
    Pressed(Option<Square>),
    /// A square named from outside the canvas; treated like a raw click on it.
    Place(Square),
    DragOver(Option<Square>),
    Released(Option<Square>),
    SecondaryClick,
    Clear,
}

#[derive(Debug, Clone, Copy)]
struct Palette {
    light_square: iced::Color,
    dark_square: iced::Color,
    danger_marker: iced::Color,
    piece: iced::Color,
}

/// Cursor tracking of the canvas while a piece is dragged.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragState {
    cursor: Option<iced::Point>,
    over: Option<Square>,
}

pub struct Chessboard {
    board: StandardBoard,
    extension: Box<dyn Extension>,
    ready: bool,
    drag: Option<Square>,
    cell_size: u32,
    show_coordinates: bool,
    palette: Palette,
    cache: canvas::Cache,
}

impl Chessboard {
    pub fn new(extension: Box<dyn Extension>, config: &GlobalConfig) -> Self {
        Self {
            board: StandardBoard::new(),
            extension,
            ready: false,
            drag: None,
            cell_size: config.cell_size,
            show_coordinates: config.show_coordinates,
            palette: Palette {
                light_square: color_from_rgb(config.colors.light_square),
                dark_square: color_from_rgb(config.colors.dark_square),
                danger_marker: color_from_rgb(config.colors.danger_marker),
                piece: color_from_rgb(config.colors.piece),
            },
            cache: canvas::Cache::new(),
        }
    }

    pub fn board(&self) -> &dyn Board {
        &self.board
    }

    fn size(&self) -> f32 {
        self.cell_size as f32 * BOARD_SIZE as f32
    }

    /// Rank 8 is drawn at the top.
    fn square_at(&self, pos: iced::Point) -> Option<Square> {
        let x = (pos.x / self.cell_size as f32).floor() as isize;
        let row = (pos.y / self.cell_size as f32).floor() as isize;
        if x < 0 || row < 0 || row >= BOARD_SIZE as isize {
            return None;
        }
        Square::new(x as usize, BOARD_SIZE - 1 - row as usize)
    }

    fn square_position(&self, square: Square) -> iced::Point {
        iced::Point::new(
            square.x() as f32 * self.cell_size as f32,
            (BOARD_SIZE - 1 - square.y()) as f32 * self.cell_size as f32,
        )
    }

    fn square_center(&self, square: Square) -> iced::Point {
        let origin = self.square_position(square);
        let half = self.cell_size as f32 / 2.0;
        iced::Point::new(origin.x + half, origin.y + half)
    }

    fn finish_drag(&mut self, square_from: Square, square_to: Option<Square>, legal: bool) {
        self.extension.move_input(
            &mut self.board,
            &MoveInputEvent::Finished {
                square_from,
                square_to,
                legal,
            },
        );
    }

    fn cancel_drag(&mut self, square_from: Square, square_to: Option<Square>, reason: CancelReason) {
        debug!("Move from {square_from} canceled: {reason:?}");
        self.extension.move_input(
            &mut self.board,
            &MoveInputEvent::Canceled {
                square_from,
                square_to,
                reason,
            },
        );
        self.finish_drag(square_from, square_to, false);
    }

    fn drop_piece(&mut self, square_from: Square, square_to: Option<Square>) {
        let Some(piece) = self.board.piece(square_from) else {
            debug!("Dragged piece vanished from {square_from}");
            return self.finish_drag(square_from, square_to, false);
        };
        let Some(target) = square_to else {
            return self.cancel_drag(square_from, None, CancelReason::MovedOutOfBoard);
        };
        if target == square_from {
            return self.cancel_drag(square_from, square_to, CancelReason::DraggedBack);
        }
        let legal = self.extension.move_input(
            &mut self.board,
            &MoveInputEvent::Validate {
                square_from,
                square_to: target,
                piece,
            },
        );
        if legal {
            // one piece per square, so whatever stood on the target is replaced
            match self.board.piece(target) {
                Some(replaced) => debug!("{piece} from {square_from} replaces {replaced} on {target}"),
                None => debug!("Moving {piece} from {square_from} to {target}"),
            }
            self.board.set_piece(square_from, None);
            self.board.set_piece(target, Some(piece));
        }
        self.finish_drag(square_from, square_to, legal);
    }

    pub fn update(&mut self, message: ChessboardMessage) {
        trace!("ChessboardMessage received: {:?}", message);
        match message {
            ChessboardMessage::Ready => {
                if self.ready {
                    return;
                }
                info!("Chessboard initialized");
                self.ready = true;
                self.extension.ready(&mut self.board);
            },
            ChessboardMessage::Pressed(square) => {
                if self.drag.is_some() {
                    return;
                }
                match square.and_then(|s| self.board.piece(s).map(|piece| (s, piece))) {
                    Some((square, piece)) => {
                        if self
                            .extension
                            .move_input(&mut self.board, &MoveInputEvent::Started { square, piece })
                        {
                            debug!("Picked up {piece} from {square}");
                            self.drag = Some(square);
                        }
                    },
                    None => self.extension.square_clicked(&mut self.board, square),
                }
            },
            ChessboardMessage::Place(square) => {
                if self.drag.is_some() {
                    return;
                }
                self.extension.square_clicked(&mut self.board, Some(square));
            },
            ChessboardMessage::DragOver(square) => {
                let Some(square_from) = self.drag else {
                    return;
                };
                self.extension.move_input(
                    &mut self.board,
                    &MoveInputEvent::MovingOverSquare {
                        square_from,
                        square_over: square,
                    },
                );
            },
            ChessboardMessage::Released(square) => {
                let Some(square_from) = self.drag.take() else {
                    return;
                };
                self.drop_piece(square_from, square);
            },
            ChessboardMessage::SecondaryClick => {
                let Some(square_from) = self.drag.take() else {
                    return;
                };
                self.cancel_drag(square_from, None, CancelReason::SecondaryClick);
            },
            ChessboardMessage::Clear => {
                debug!("Clearing the board");
                self.drag = None;
                self.board.clear();
            },
        }
        self.cache.clear();
    }

    pub fn view(&self) -> iced::Element<'_, ChessboardMessage> {
        canvas::Canvas::new(self).width(self.size()).height(self.size()).into()
    }
}

impl canvas::Program<ChessboardMessage> for Chessboard {
    type State = DragState;

    fn update(
        &self,
        state: &mut Self::State,
        event: &iced::Event,
        bounds: iced::Rectangle,
        cursor: iced::mouse::Cursor,
    ) -> Option<canvas::Action<ChessboardMessage>> {
        let iced::Event::Mouse(mouse_event) = event else {
            return None;
        };
        let position = cursor.position_in(bounds);
        let square = position.and_then(|pos| self.square_at(pos));
        match mouse_event {
            iced::mouse::Event::ButtonPressed(iced::mouse::Button::Left) => {
                // Clicks elsewhere in the window are not ours.
                position?;
                trace!("Left button pressed on {:?}", square);
                state.cursor = position;
                state.over = square;
                Some(canvas::Action::publish(ChessboardMessage::Pressed(square)).and_capture())
            },
            iced::mouse::Event::ButtonPressed(iced::mouse::Button::Right) => {
                self.drag?;
                trace!("Right button pressed while dragging");
                state.cursor = None;
                Some(canvas::Action::publish(ChessboardMessage::SecondaryClick).and_capture())
            },
            iced::mouse::Event::ButtonReleased(iced::mouse::Button::Left) => {
                self.drag?;
                trace!("Left button released on {:?}", square);
                state.cursor = None;
                Some(canvas::Action::publish(ChessboardMessage::Released(square)).and_capture())
            },
            iced::mouse::Event::CursorMoved { .. } => {
                self.drag?;
                state.cursor = position;
                if state.over == square {
                    return Some(canvas::Action::request_redraw());
                }
                state.over = square;
                Some(canvas::Action::publish(ChessboardMessage::DragOver(square)).and_capture())
            },
            _ => None,
        }
    }

    fn draw(
        &self,
        state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: iced::Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let cell_size = self.cell_size as f32;
        let board = self.cache.draw(renderer, bounds.size(), |frame| {
            for square in Square::all() {
                let light = (square.x() + square.y()) % 2 == 1;
                frame.fill_rectangle(
                    self.square_position(square),
                    iced::Size::new(cell_size, cell_size),
                    if light {
                        self.palette.light_square
                    } else {
                        self.palette.dark_square
                    },
                );
            }

            if self.show_coordinates {
                let text_size = cell_size * 0.2;
                for square in Square::all() {
                    let origin = self.square_position(square);
                    let color = if (square.x() + square.y()) % 2 == 1 {
                        self.palette.dark_square
                    } else {
                        self.palette.light_square
                    };
                    if square.x() == 0 {
                        frame.fill_text(canvas::Text {
                            content: square.rank_char().to_string(),
                            position: iced::Point::new(origin.x + 2.0, origin.y + 1.0),
                            color,
                            size: text_size.into(),
                            ..Default::default()
                        });
                    }
                    if square.y() == 0 {
                        frame.fill_text(canvas::Text {
                            content: square.file_char().to_string(),
                            position: iced::Point::new(
                                origin.x + cell_size - text_size * 0.7,
                                origin.y + cell_size - text_size * 1.3,
                            ),
                            color,
                            size: text_size.into(),
                            ..Default::default()
                        });
                    }
                }
            }

            for marker in self.board.markers() {
                match marker.kind {
                    MarkerKind::CircleDanger => {
                        let circle = canvas::Path::circle(self.square_center(marker.square), cell_size * 0.42);
                        frame.stroke(
                            &circle,
                            canvas::Stroke::default()
                                .with_color(self.palette.danger_marker)
                                .with_width(cell_size * 0.06),
                        );
                    },
                }
            }

            for square in self.board.occupied_squares() {
                if self.drag == Some(square) && state.cursor.is_some() {
                    continue;
                }
                let Some(piece) = self.board.piece(square) else {
                    continue;
                };
                frame.fill_text(canvas::Text {
                    content: piece.glyph().to_string(),
                    position: self.square_center(square),
                    color: self.palette.piece,
                    size: (cell_size * 0.8).into(),
                    max_width: cell_size,
                    line_height: iced::widget::text::LineHeight::Relative(1.0),
                    align_x: iced::widget::text::Alignment::Center,
                    align_y: iced::alignment::Vertical::Center,
                    ..Default::default()
                });
            }
        });

        let (Some(square_from), Some(cursor)) = (self.drag, state.cursor) else {
            return vec![board];
        };
        let Some(piece) = self.board.piece(square_from) else {
            return vec![board];
        };
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        frame.fill_text(canvas::Text {
            content: piece.glyph().to_string(),
            position: cursor,
            color: self.palette.piece,
            size: (cell_size * 0.9).into(),
            line_height: iced::widget::text::LineHeight::Relative(1.0),
            align_x: iced::widget::text::Alignment::Center,
            align_y: iced::alignment::Vertical::Center,
            ..Default::default()
        });
        vec![board, frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: iced::Rectangle,
        cursor: iced::mouse::Cursor,
    ) -> iced::mouse::Interaction {
        if self.drag.is_some() {
            return iced::mouse::Interaction::Grabbing;
        }
        match cursor.position_in(bounds).and_then(|pos| self.square_at(pos)) {
            Some(square) if self.board.piece(square).is_some() => iced::mouse::Interaction::Grab,
            Some(_) => iced::mouse::Interaction::Pointer,
            None => iced::mouse::Interaction::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{base::piece::Piece, engine::EightQueens};

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    fn chessboard() -> Chessboard {
        let mut chessboard = Chessboard::new(Box::new(EightQueens::new()), &GlobalConfig::default());
        chessboard.update(ChessboardMessage::Ready);
        chessboard
    }

    fn marked(chessboard: &Chessboard) -> Vec<String> {
        let mut squares: Vec<String> = chessboard
            .board()
            .markers()
            .iter()
            .map(|m| m.square.to_string())
            .collect();
        squares.sort();
        squares
    }

    #[test]
    fn test_square_at_and_position_agree() {
        let chessboard = chessboard();
        let half = chessboard.cell_size as f32 / 2.0;
        for square in Square::all() {
            let origin = chessboard.square_position(square);
            let inside = iced::Point::new(origin.x + half, origin.y + half);
            assert_eq!(chessboard.square_at(inside), Some(square));
        }
        assert_eq!(chessboard.square_at(iced::Point::new(1.0, 1.0)), Some(sq("a8")));
        assert_eq!(chessboard.square_at(iced::Point::new(-1.0, 1.0)), None);
        assert_eq!(chessboard.square_at(iced::Point::new(1.0, chessboard.size() + 1.0)), None);
    }

    #[test]
    fn test_clicks_before_ready_are_ignored() {
        let mut chessboard = Chessboard::new(Box::new(EightQueens::new()), &GlobalConfig::default());
        chessboard.update(ChessboardMessage::Pressed(Some(sq("d4"))));
        assert_eq!(chessboard.board().piece(sq("d4")), None);
    }

    #[test]
    fn test_click_places_queens() {
        let mut chessboard = chessboard();
        chessboard.update(ChessboardMessage::Pressed(Some(sq("a1"))));
        chessboard.update(ChessboardMessage::Pressed(Some(sq("h8"))));
        assert_eq!(chessboard.board().occupied_squares(), vec![sq("a1"), sq("h8")]);
        assert_eq!(marked(&chessboard), ["a1", "h8"]);
    }

    #[test]
    fn test_drag_moves_piece_and_refreshes() {
        let mut chessboard = chessboard();
        chessboard.update(ChessboardMessage::Pressed(Some(sq("a1"))));
        chessboard.update(ChessboardMessage::Pressed(Some(sq("h8"))));

        chessboard.update(ChessboardMessage::Pressed(Some(sq("h8"))));
        assert_eq!(chessboard.drag, Some(sq("h8")));
        chessboard.update(ChessboardMessage::DragOver(Some(sq("g6"))));
        chessboard.update(ChessboardMessage::Released(Some(sq("g6"))));

        assert_eq!(chessboard.drag, None);
        assert_eq!(chessboard.board().piece(sq("h8")), None);
        assert_eq!(chessboard.board().piece(sq("g6")), Some(Piece::BLACK_QUEEN));
        assert!(marked(&chessboard).is_empty());
    }

    #[test]
    fn test_drag_off_board_removes_piece() {
        let mut chessboard = chessboard();
        chessboard.update(ChessboardMessage::Pressed(Some(sq("a1"))));
        chessboard.update(ChessboardMessage::Pressed(Some(sq("a8"))));
        assert_eq!(marked(&chessboard), ["a1", "a8"]);

        chessboard.update(ChessboardMessage::Pressed(Some(sq("a8"))));
        chessboard.update(ChessboardMessage::Released(None));

        assert_eq!(chessboard.board().occupied_squares(), vec![sq("a1")]);
        assert!(marked(&chessboard).is_empty());
    }

    #[test]
    fn test_drop_on_origin_or_secondary_click_keeps_board() {
        let mut chessboard = chessboard();
        chessboard.update(ChessboardMessage::Pressed(Some(sq("b1"))));
        chessboard.update(ChessboardMessage::Pressed(Some(sq("d2"))));

        chessboard.update(ChessboardMessage::Pressed(Some(sq("b1"))));
        chessboard.update(ChessboardMessage::Released(Some(sq("b1"))));
        chessboard.update(ChessboardMessage::Pressed(Some(sq("d2"))));
        chessboard.update(ChessboardMessage::SecondaryClick);

        assert_eq!(chessboard.drag, None);
        assert_eq!(chessboard.board().occupied_squares(), vec![sq("b1"), sq("d2")]);
        assert!(marked(&chessboard).is_empty());
    }

    #[test]
    fn test_drop_on_piece_replaces_it() {
        let mut chessboard = chessboard();
        chessboard.update(ChessboardMessage::Pressed(Some(sq("b1"))));
        chessboard.update(ChessboardMessage::Pressed(Some(sq("d2"))));
        chessboard.update(ChessboardMessage::Pressed(Some(sq("d8"))));
        assert_eq!(marked(&chessboard), ["d2", "d8"]);

        chessboard.update(ChessboardMessage::Pressed(Some(sq("b1"))));
        chessboard.update(ChessboardMessage::Released(Some(sq("d2"))));

        assert_eq!(chessboard.drag, None);
        assert_eq!(chessboard.board().occupied_squares(), vec![sq("d2"), sq("d8")]);
        assert_eq!(chessboard.board().piece(sq("b1")), None);
        assert_eq!(marked(&chessboard), ["d2", "d8"]);
    }

    #[test]
    fn test_place_clicks_named_square() {
        let mut chessboard = chessboard();
        chessboard.update(ChessboardMessage::Place(sq("e4")));
        assert_eq!(chessboard.board().occupied_squares(), vec![sq("e4")]);

        // a named occupied square is never picked up
        chessboard.update(ChessboardMessage::Place(sq("e4")));
        assert_eq!(chessboard.drag, None);
        assert_eq!(chessboard.board().occupied_squares(), vec![sq("e4")]);

        chessboard.update(ChessboardMessage::Pressed(Some(sq("e4"))));
        chessboard.update(ChessboardMessage::Place(sq("a1")));
        assert_eq!(chessboard.board().piece(sq("a1")), None);
    }

    #[test]
    fn test_clear() {
        let mut chessboard = chessboard();
        chessboard.update(ChessboardMessage::Pressed(Some(sq("c3"))));
        chessboard.update(ChessboardMessage::Pressed(Some(sq("c6"))));
        chessboard.update(ChessboardMessage::Clear);
        assert!(chessboard.board().occupied_squares().is_empty());
        assert!(chessboard.board().markers().is_empty());
    }
}
