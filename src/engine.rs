pub mod eight_queens;
pub mod threat;

pub use eight_queens::EightQueens;
