//! Errors raised while parsing and normalizing a value.

use crate::{grammar::Rule, source::*};
use std::{fmt, slice};

/// The syntax an interpolation body must have.
pub const INTERPOLATION_SYNTAX: &str = "${function_name(args...)}";

/// Any error that can occur turning source text into a typed value.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// The text does not conform to the grammar.
    #[error("{0}")]
    Syntax(ErrorList),

    /// The parse tree did not have the shape expected for a node. This
    /// indicates a mismatch between the grammar and the normalizer and is never
    /// caused by user input.
    #[error("expected parser to return type {expected} but got {actual}: {value}")]
    UnexpectedShape {
        expected: &'static str,
        actual: &'static str,
        value: String,
    },

    /// A grammar rule produced the wrong number of children.
    #[error("expected parser to return a list of length {expected} but got {actual}")]
    UnexpectedLength {
        expected: usize,
        actual: usize,
    },

    /// An interpolation body that is not a function call.
    #[error("{}: expected an interpolation of the format '{expected}' but got '{actual}'", .span.start)]
    InvalidInterpolation {
        expected: &'static str,
        actual: String,
        span: Span,
    },
}

impl Error {
    pub fn is_syntax(&self) -> bool {
        matches!(self, Error::Syntax(_))
    }

    /// Shape and length violations are both defects in the parser itself.
    pub fn is_shape(&self) -> bool {
        matches!(self, Error::UnexpectedShape { .. } | Error::UnexpectedLength { .. })
    }

    pub fn is_invalid_interpolation(&self) -> bool {
        matches!(self, Error::InvalidInterpolation { .. })
    }
}

impl From<ParseError> for Error {
    fn from(error: ParseError) -> Self {
        Error::Syntax(error.into())
    }
}

/// A list of syntax errors collected by a single parse. Only the first error
/// is authoritative; the rest are often a consequence of it.
///
/// A list is only ever created from at least one error and cannot be emptied,
/// so it is never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorList {
    errors: Vec<ParseError>,
}

impl ErrorList {
    /// Get the first, authoritative error.
    pub fn first(&self) -> &ParseError {
        &self.errors[0]
    }

    pub fn iter(&self) -> slice::Iter<'_, ParseError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always false; see the type documentation.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl From<ParseError> for ErrorList {
    fn from(error: ParseError) -> ErrorList {
        ErrorList {
            errors: vec![error],
        }
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a ParseError;
    type IntoIter = slice::Iter<'a, ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;

        for error in self.errors.iter() {
            if !first {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
            first = false;
        }

        Ok(())
    }
}

/// Describes an error that occurred in parsing.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseError {
    /// The error message. This is a string instead of an enum because the
    /// messages can be highly specific.
    pub message: String,

    /// The span in the source the error occurred in.
    pub span: Span,

    /// The name of the source file the error occurred in.
    pub source_name: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span, file: &SourceFile) -> Self {
        Self {
            message: message.into(),
            span,
            source_name: file.name().to_owned(),
        }
    }

    pub(crate) fn from_pest(error: &pest::error::Error<Rule>, file: &SourceFile) -> Self {
        use pest::error::InputLocation;

        let input = file.source();
        let (start, end) = match error.location {
            InputLocation::Pos(offset) => (offset, offset),
            InputLocation::Span(span) => span,
        };

        let position = |offset| pest::Position::new(input, offset)
            .map(Position::from)
            .unwrap_or_default();

        Self::new(
            error.variant.message().into_owned(),
            Span {
                start: position(start),
                end: position(end),
            },
            file,
        )
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}: {}", self.source_name, self.span.start, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_display() {
        let file = SourceFile::named("terraform.tfvars", "[1, 2");
        let span = Span::from(Position {
            line: 1,
            column: 6,
            offset: 5,
        });
        let error = ParseError::new("expected ]", span, &file);

        assert_eq!(error.to_string(), "terraform.tfvars:1:6: expected ]");
    }

    #[test]
    fn error_classification() {
        let shape = Error::UnexpectedShape {
            expected: "list",
            actual: "chars",
            value: "\"foo\"".into(),
        };
        let length = Error::UnexpectedLength {
            expected: 2,
            actual: 1,
        };

        assert!(shape.is_shape());
        assert!(length.is_shape());
        assert!(!shape.is_syntax());
        assert!(!length.is_invalid_interpolation());
    }

    #[test]
    fn error_list_from_one_error() {
        let file = SourceFile::named("test", "]");
        let errors = ErrorList::from(ParseError::new("unexpected ]", Span::default(), &file));

        assert_eq!(errors.len(), 1);
        assert!(!errors.is_empty());
        assert_eq!(errors.first().message, "unexpected ]");
        assert_eq!(errors.to_string(), "test:1:1: unexpected ]");
    }
}
