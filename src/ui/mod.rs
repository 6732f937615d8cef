pub mod app;
pub mod chessboard;

pub use app::App;
