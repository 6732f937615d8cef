pub mod board;
pub mod error;
pub mod extension;
pub mod piece;
pub mod square;
mod vec2d;

pub use square::Square;
pub use vec2d::Vec2D;
