use std::{convert::Infallible, fmt, io};

/// An error returned when a diff could not be produced
///
/// Nothing is written to the report sink when one of these is returned.
#[derive(Debug)]
pub enum DiffError {
    /// Reading one of the line sources failed
    Io(io::Error),
    /// One of the inputs holds more non-blank lines than the configured ceiling
    TooManyLines { limit: usize },
}

impl fmt::Display for DiffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffError::Io(e) => write!(f, "error reading input: {}", e),
            DiffError::TooManyLines { limit } => {
                write!(f, "input exceeds the maximum of {} lines", limit)
            }
        }
    }
}

impl std::error::Error for DiffError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DiffError::Io(e) => Some(e),
            DiffError::TooManyLines { .. } => None,
        }
    }
}

impl From<io::Error> for DiffError {
    fn from(e: io::Error) -> Self {
        DiffError::Io(e)
    }
}

impl From<Infallible> for DiffError {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn display() {
        let e = DiffError::TooManyLines { limit: 20000 };
        assert_eq!(e.to_string(), "input exceeds the maximum of 20000 lines");
        assert!(e.source().is_none());

        let e = DiffError::from(io::Error::new(io::ErrorKind::NotFound, "no such file"));
        assert_eq!(e.to_string(), "error reading input: no such file");
        assert!(e.source().is_some());
    }
}
