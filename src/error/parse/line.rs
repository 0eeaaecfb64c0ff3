//! Errors from parsing individual lines in documents.

use std::{error::Error, fmt};

use crate::consts::{CHOICE_MARKER, STICKY_CHOICE_MARKER};

#[derive(Clone, Debug)]
/// Error from parsing a single line, before its origin is known.
///
/// The document parser wraps this into a [`ParseError`][crate::error::ParseError]
/// along with information about which line the error came from.
pub struct LineParsingError {
    /// Kind of error.
    pub kind: LineErrorKind,
    /// Line that caused the error.
    pub line: String,
}

impl LineParsingError {
    /// Construct an error from the kind and line content.
    pub fn from_kind<T: Into<String>>(line: T, kind: LineErrorKind) -> Self {
        LineParsingError {
            kind,
            line: line.into(),
        }
    }
}

#[derive(Clone, Debug)]
/// Variants of line errors.
pub enum LineErrorKind {
    /// Found an empty embraced expression (`{}`).
    EmptyExpression,
    /// A line did not end after a jump target where it had to.
    ExpectedEndOfLine { tail: String },
    /// An assignment statement had no `=` sign to split at.
    InvalidAssignment,
    /// Found a jump target with invalid characters or too many segments.
    InvalidAddress { address: String },
    /// A choice has both non-sticky and sticky markers.
    StickyAndNonSticky,
    /// A block comment was opened but never closed.
    UnterminatedComment,
    /// Found unmatched curly braces.
    UnmatchedBraces,
    /// Found unmatched square brackets.
    UnmatchedBrackets,
}

impl Error for LineParsingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.kind)
    }
}

impl Error for LineErrorKind {}

impl fmt::Display for LineParsingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "could not parse line '{}': {}", &self.line, &self.kind)
    }
}

impl fmt::Display for LineErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use LineErrorKind::*;

        match &self {
            EmptyExpression => write!(f, "found an empty embraced expression ('{{}}')"),
            ExpectedEndOfLine { tail } => write!(
                f,
                "expected no more content after a jump target but found '{}'",
                tail
            ),
            InvalidAssignment => write!(
                f,
                "assignment statement has no '=' sign to separate the variable \
                 name from the value expression"
            ),
            InvalidAddress { address } => write!(
                f,
                "found an invalid jump target '{}': addresses are up to three \
                 dot-separated identifiers",
                address
            ),
            StickyAndNonSticky => write!(
                f,
                "encountered a line which has both non-sticky ('{}') and sticky ('{}') \
                 choice markers, which is not allowed",
                CHOICE_MARKER, STICKY_CHOICE_MARKER
            ),
            UnterminatedComment => {
                write!(f, "a block comment ('/* ... */') was opened but never closed")
            }
            UnmatchedBraces => write!(f, "line has unmatched curly '{{}}' braces"),
            UnmatchedBrackets => write!(f, "choice line has unmatched square '[]' brackets"),
        }
    }
}
