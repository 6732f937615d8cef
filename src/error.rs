#[derive(Debug)]
pub enum Error {
    IO(std::io::Error),
    ConfigDirNotFound,
    TomlSerialize(toml::ser::Error),
    TomlDeserialize(toml::de::Error),
    Iced(iced::Error),
    Base(crate::base::error::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::IO(value)
    }
}

impl From<iced::Error> for Error {
    fn from(value: iced::Error) -> Self {
        Error::Iced(value)
    }
}

impl From<toml::ser::Error> for Error {
    fn from(value: toml::ser::Error) -> Self {
        Error::TomlSerialize(value)
    }
}

impl From<toml::de::Error> for Error {
    fn from(value: toml::de::Error) -> Self {
        Error::TomlDeserialize(value)
    }
}

impl From<crate::base::error::Error> for Error {
    fn from(value: crate::base::error::Error) -> Self {
        Error::Base(value)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IO(e) => write!(f, "IO error: {e}"),
            Self::ConfigDirNotFound => write!(f, "no configuration directory on this platform"),
            Self::TomlSerialize(e) => write!(f, "TOML serialization error: {e}"),
            Self::TomlDeserialize(e) => write!(f, "TOML deserialization error: {e}"),
            Self::Iced(e) => write!(f, "iced error: {e}"),
            Self::Base(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IO(e) => Some(e),
            Self::ConfigDirNotFound => None,
            Self::TomlSerialize(e) => Some(e),
            Self::TomlDeserialize(e) => Some(e),
            Self::Iced(e) => Some(e),
            Self::Base(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Square;

    #[test]
    fn test_base_error_converts() {
        let err: Error = "z9".parse::<Square>().unwrap_err().into();
        assert!(matches!(
            err,
            Error::Base(crate::base::error::Error::InvalidSquare(ref text)) if text == "z9"
        ));
        assert_eq!(err.to_string(), "invalid square: \"z9\"");
        assert!(std::error::Error::source(&err).is_some());
    }
}
