#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    InvalidSquare(String),
    InvalidPiece(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidSquare(text) => write!(f, "invalid square: {:?}", text),
            Error::InvalidPiece(text) => write!(f, "invalid piece: {:?}", text),
        }
    }
}

impl std::error::Error for Error {}
