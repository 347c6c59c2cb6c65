//! Abstractions over reading files and source text used in the parser.

use std::{fmt, fs, io, path::Path};

/// A reference to a location in a source file. Useful for error messages.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Position {
    /// The line number. Begins at 1.
    pub line: usize,

    /// The column position in the current line. Begins at 1.
    pub column: usize,

    /// Byte offset from the beginning of the file.
    pub offset: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }
}

impl<'a> From<pest::Position<'a>> for Position {
    fn from(pos: pest::Position<'a>) -> Self {
        let (line, column) = pos.line_col();

        Self {
            line,
            column,
            offset: pos.pos(),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span of characters in a source file.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Span {
    /// The starting position.
    pub start: Position,

    /// The ending position.
    pub end: Position,
}

impl From<Position> for Span {
    fn from(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }
}

impl<'a> From<pest::Span<'a>> for Span {
    fn from(span: pest::Span<'a>) -> Self {
        Self {
            start: span.start_pos().into(),
            end: span.end_pos().into(),
        }
    }
}

/// Holds a source file being parsed in memory.
#[derive(Clone, Debug)]
pub struct SourceFile {
    name: Option<String>,
    buffer: String,
}

impl SourceFile {
    /// Create a new source file using an in-memory buffer.
    pub fn buffer(name: impl Into<Option<String>>, buffer: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            buffer: buffer.into(),
        }
    }

    /// Create a new named source file.
    pub fn named(name: impl Into<String>, buffer: impl Into<String>) -> Self {
        Self::buffer(Some(name.into()), buffer)
    }

    /// Open a file as a source file.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let name = path.file_name().map(|s| s.to_string_lossy().into_owned());

        fs::read_to_string(path).map(|string| Self::buffer(name, string))
    }

    /// Get the name of the file.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unknown>")
    }

    pub fn source(&self) -> &str {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unnamed_buffer() {
        let file = SourceFile::buffer(None, "[1, 2]");

        assert_eq!(file.name(), "<unknown>");
        assert_eq!(file.source(), "[1, 2]");
        assert_eq!(file.len(), 6);
    }

    #[test]
    fn position_from_pest() {
        let input = "foo\nbar";
        let pos = pest::Position::new(input, 5).unwrap();

        assert_eq!(Position::from(pos), Position {
            line: 2,
            column: 2,
            offset: 5,
        });
    }
}
