//! Error type shared by every fallible operation of the crate.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Convenience alias used throughout the crate.
pub type Result<T, E = SimplePdfError> = std::result::Result<T, E>;

/// Errors produced while assembling or rendering a document.
#[derive(Debug)]
pub enum SimplePdfError {
    /// The underlying `genpdf` engine reported an error.
    Pdf(genpdf::error::Error),
    /// Reading or writing a file failed.
    Io(io::Error),
    /// A path handed to a loader does not exist.
    FileNotFound(PathBuf),
    /// A path handed to a loader points to something that is not a regular file.
    NotAFile(PathBuf),
    /// A text element had no font and no default font was registered.
    MissingFont {
        /// Name of the element that required a font.
        element: &'static str,
    },
    /// A font was referenced by name only and carries no glyph data to embed.
    FontNotLoaded(String),
    /// The editor target cannot start a new page.
    CouldNotCreatePage,
    /// The element cannot be placed where it was inserted.
    ElementNotSupported(String),
    /// The number of supplied column widths or cells does not match the table.
    ColumnCountMismatch {
        /// Number of columns the table was created with.
        expected: usize,
        /// Number of values that were supplied.
        actual: usize,
    },
    /// A builder was finalized without a required field.
    MissingField(&'static str),
    /// A table record did not serialize into a struct-like value.
    UnsupportedRecord(String),
    /// A table record could not be serialized.
    Serialization(serde_json::Error),
}

impl From<genpdf::error::Error> for SimplePdfError {
    fn from(err: genpdf::error::Error) -> Self {
        Self::Pdf(err)
    }
}

impl From<io::Error> for SimplePdfError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for SimplePdfError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}

impl fmt::Display for SimplePdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf(err) => write!(f, "PDF rendering failed: {err}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::FileNotFound(path) => write!(f, "\"{}\" does not exist", path.display()),
            Self::NotAFile(path) => write!(f, "\"{}\" is not a file", path.display()),
            Self::MissingFont { element } => {
                write!(f, "Cannot create a {element} without a font")
            }
            Self::FontNotLoaded(name) => write!(
                f,
                "Font '{name}' has no font data; load it from a file before registering it"
            ),
            Self::CouldNotCreatePage => write!(f, "Could not create a new page"),
            Self::ElementNotSupported(name) => write!(f, "Element {name} is not supported"),
            Self::ColumnCountMismatch { expected, actual } => write!(
                f,
                "Table expects {expected} columns but {actual} values were supplied"
            ),
            Self::MissingField(field) => write!(f, "{field} is required but was not set"),
            Self::UnsupportedRecord(kind) => write!(
                f,
                "Table rows must serialize into structs or maps, found {kind}"
            ),
            Self::Serialization(err) => write!(f, "Failed to serialize table row: {err}"),
        }
    }
}

impl std::error::Error for SimplePdfError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pdf(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl SimplePdfError {
    /// Converts the error into a `genpdf` error so it can cross render callbacks.
    pub(crate) fn into_pdf_error(self) -> genpdf::error::Error {
        match self {
            Self::Pdf(err) => err,
            other => genpdf::error::Error::new(
                other.to_string(),
                genpdf::error::ErrorKind::InvalidData,
            ),
        }
    }
}
