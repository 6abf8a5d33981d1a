#![allow(clippy::module_inception)]

use std::{
    fmt::Display,
    fs,
    io::{self, Write},
    path::Path,
    rc::Rc,
};

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};

pub mod errors;
pub mod lexer;
pub mod macros;
pub mod report;

/// A character offset into a named source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    /// Offsets past `u32::MAX` saturate rather than wrap.
    pub fn new(offset: usize, file: Rc<String>) -> Self {
        Position(u32::try_from(offset).unwrap_or(u32::MAX), file)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.1, self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Reads the whole file at `path` into memory.
///
/// An unreadable path is returned as `FileUnreadable`; the lexer is never
/// invoked for it.
pub fn load_source(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|e| {
        Error::new(
            ErrorImpl::FileUnreadable {
                path: path.to_string_lossy().into_owned(),
                reason: e.to_string(),
            },
            Position::new(0, Rc::new(path.to_string_lossy().into_owned())),
        )
    })
}

pub fn write_error<W: Write>(out: &mut W, error: &Error) -> io::Result<()> {
    /*
        Error: UnterminatedComment (comment opened here is never closed)
        -> main.cpp:42
    */

    if let ErrorTip::None = error.get_tip() {
        writeln!(out, "Error: {}: {}", error.get_error_name(), error.get_impl())?;
    } else {
        writeln!(out, "Error: {} ({})", error.get_error_name(), error.get_tip())?;
    }
    writeln!(out, "-> {}", error.get_position())
}

pub fn display_error(error: &Error) {
    let _ = write_error(&mut io::stderr().lock(), error);
}
