use core::fmt;

/// Errors reported when building an index over invalid input.
///
/// Both variants are detected eagerly during construction; no partially
/// built index is ever retained alongside an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The key sequence is not non-decreasing.
    UnsortedKeys,
    /// A floating-point key was NaN.
    NanKey,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsortedKeys => write!(f, "keys must be sorted and non-decreasing"),
            Error::NanKey => write!(f, "floating-point keys must not be NaN"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
