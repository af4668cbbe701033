//! Inspector error type

use std::error::Error;
use std::fmt;
use std::io;

/// Errors from inspecting an image
#[derive(Debug)]
pub enum InspectError {
    /// The image could not be read
    Io(io::Error),
    /// The image is not a valid ELF file
    Elf(goblin::error::Error),
    /// No symbol of this name in the symbol tables
    SymbolNotFound(String),
    /// The symbol is undefined or not attached to a section
    NoSection(String),
}

impl fmt::Display for InspectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InspectError::Io(e) => write!(f, "I/O error: {e}"),
            InspectError::Elf(e) => write!(f, "ELF error: {e}"),
            InspectError::SymbolNotFound(name) => write!(f, "symbol not found: {name}"),
            InspectError::NoSection(name) => write!(f, "symbol has no section: {name}"),
        }
    }
}

impl Error for InspectError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            InspectError::Io(e) => Some(e),
            InspectError::Elf(e) => Some(e),
            InspectError::SymbolNotFound(_) | InspectError::NoSection(_) => None,
        }
    }
}

impl From<io::Error> for InspectError {
    fn from(err: io::Error) -> Self {
        InspectError::Io(err)
    }
}

impl From<goblin::error::Error> for InspectError {
    fn from(err: goblin::error::Error) -> Self {
        InspectError::Elf(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_symbol() {
        let err = InspectError::SymbolNotFound("RESERVED_REGION".into());
        assert_eq!(err.to_string(), "symbol not found: RESERVED_REGION");
        assert!(err.source().is_none());
    }

    #[test]
    fn io_errors_keep_their_source() {
        let err = InspectError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(err.to_string().starts_with("I/O error"));
        assert!(err.source().is_some());
    }
}
