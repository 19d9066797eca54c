#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    IO(std::io::Error),
    InvalidParameter(String),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IO(ref e) => Some(e),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::IO(e) => e.fmt(f),
            Error::InvalidParameter(msg) => write!(f, "InvalidParameter: {}", msg),
        }
    }
}

//-------------------------------------------------------------
// From impls.

impl From<std::io::Error> for Error {
    fn from(other: std::io::Error) -> Self {
        Self::IO(other)
    }
}
