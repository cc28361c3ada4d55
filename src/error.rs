use std::fmt;

/// Errors reported by path queries
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Error {
    /// Indexed access outside of the available range
    IndexOutOfRange { index: usize, len: usize },
    /// Drawing command at `index` has no previous point to start from
    MissingStartPoint { index: usize },
    /// Path does not contain any drawing commands to compute bounds from
    EmptyBounds,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IndexOutOfRange { index, len } => {
                write!(f, "index {} is out of range, length is {}", index, len)
            }
            Error::MissingStartPoint { index } => {
                write!(f, "path command {} does not have a start point", index)
            }
            Error::EmptyBounds => write!(f, "path does not have any drawing commands"),
        }
    }
}

impl std::error::Error for Error {}
