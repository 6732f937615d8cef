use iced::Task;
use log::{debug, error, trace, warn};

use crate::{
    base::Square,
    config::GlobalConfig,
    engine::{EightQueens, eight_queens::MAX_PIECES, threat},
    ui::chessboard::{Chessboard, ChessboardMessage},
};

#[derive(Debug, Clone)]
pub enum AppMessage {
    Chessboard(ChessboardMessage),
    PlaceInputChanged(String),
    PlaceSubmit,
    CloseWindow(iced::window::Id),
}

impl From<ChessboardMessage> for AppMessage {
    fn from(message: ChessboardMessage) -> Self {
        AppMessage::Chessboard(message)
    }
}

pub struct App {
    config: GlobalConfig,
    theme: iced::Theme,
    chessboard: Chessboard,
    place_input: String,
}

/// Reads a square typed into the side panel, e.g. ` d4 `.
fn parse_square(text: &str) -> crate::error::Result<Square> {
    Ok(text.trim().to_ascii_lowercase().parse::<Square>()?)
}

impl App {
    pub fn new() -> (Self, Task<AppMessage>) {
        let config = GlobalConfig::load().unwrap_or_else(|err| {
            warn!("Failed to load config ({err}), using default config.");
            GlobalConfig::default()
        });
        let theme = if config.light_theme {
            iced::Theme::Light
        } else {
            iced::Theme::Dark
        };
        let chessboard = Chessboard::new(Box::new(EightQueens::new()), &config);
        (
            Self {
                config,
                theme,
                chessboard,
                place_input: String::new(),
            },
            // The extension attaches once the board has been set up.
            Task::done(AppMessage::Chessboard(ChessboardMessage::Ready)),
        )
    }

    pub fn update(&mut self, msg: AppMessage) -> Task<AppMessage> {
        trace!("AppMessage received: {:?}", msg);
        match msg {
            AppMessage::Chessboard(msg) => {
                self.chessboard.update(msg);
            },
            AppMessage::PlaceInputChanged(value) => {
                trace!("Place input changed: '{}'", value);
                self.place_input = value;
            },
            AppMessage::PlaceSubmit => match parse_square(&self.place_input) {
                Ok(square) => {
                    debug!("Placing on typed square {square}");
                    self.chessboard.update(ChessboardMessage::Place(square));
                    self.place_input.clear();
                },
                Err(e) => warn!("Ignoring place request: {e}"),
            },
            AppMessage::CloseWindow(id) => {
                debug!("Saving config on exit of window {:?}: {:?}", id, self.config);
                if let Err(e) = self.config.save() {
                    error!("Failed to save config: {}", e);
                }
                return iced::exit();
            },
        }
        Task::none()
    }

    pub fn view(&self) -> iced::Element<'_, AppMessage> {
        let board = self.chessboard.board();
        let queens = board.occupied_squares().len();
        let threatened = threat::threatened_squares(board).len();

        let status = if queens == 0 {
            "Click a square to place a queen.".to_string()
        } else if threatened == 0 {
            "No queen is attacked.".to_string()
        } else {
            format!("{threatened} of {queens} queens are attacked.")
        };

        let side_panel = iced::widget::container(
            iced::widget::column![
                iced::widget::center_x(iced::widget::text("Eight Queens").size(20)),
                iced::widget::text(format!("Queens: {queens} / {MAX_PIECES}")).size(16),
                iced::widget::text(status).size(16),
                iced::widget::text("Drag a queen off the board to remove it.").size(14),
                iced::widget::row![
                    iced::widget::text("Place at:").size(16).width(iced::FillPortion(1)),
                    iced::widget::TextInput::new("d4", &self.place_input)
                        .width(iced::FillPortion(1))
                        .on_input(AppMessage::PlaceInputChanged)
                        .on_submit(AppMessage::PlaceSubmit),
                    iced::widget::button("↵")
                        .on_press(AppMessage::PlaceSubmit)
                        .width(iced::Length::Shrink)
                ]
                .spacing(4)
                .align_y(iced::alignment::Vertical::Center),
                iced::widget::center_x(
                    iced::widget::button(iced::widget::text("Clear").align_x(iced::alignment::Horizontal::Center))
                        .width(120.0)
                        .on_press_maybe((queens > 0).then_some(AppMessage::Chessboard(ChessboardMessage::Clear)))
                ),
            ]
            .spacing(8)
            .padding(6),
        )
        .width(iced::Length::Fixed(200.0));

        iced::widget::row![side_panel, self.chessboard.view().map(AppMessage::Chessboard)]
            .spacing(12)
            .padding(12)
            .into()
    }

    pub fn theme(&self) -> Option<iced::Theme> {
        Some(self.theme.clone())
    }

    pub fn subscriptions(&self) -> iced::Subscription<AppMessage> {
        iced::window::close_requests().map(AppMessage::CloseWindow)
    }
}
