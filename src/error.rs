use std::fmt;

use crate::id::NameId;

/// What went wrong on a line of a persisted name table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The input ended before a header line was found.
    MissingHeader,
    /// The header line does not have exactly three tokens.
    BadHeader,
    /// The header count is not an unsigned integer.
    BadCount,
    /// A record line does not have exactly two tokens.
    BadRecord,
    /// A record id is not an unsigned integer.
    BadId,
    /// The input ended before the declared number of records was read.
    UnexpectedEof,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParseErrorKind::MissingHeader => "missing header",
            ParseErrorKind::BadHeader => "expected `<label> <word> <count>`",
            ParseErrorKind::BadCount => "name count is not an unsigned integer",
            ParseErrorKind::BadRecord => "expected `<id> <name>`",
            ParseErrorKind::BadId => "name id is not an unsigned integer",
            ParseErrorKind::UnexpectedEof => "fewer records than declared",
        };
        f.write_str(s)
    }
}

#[derive(Debug)]
pub enum Error {
    /// The id was never allocated by this table.
    OutOfRange { id: NameId, len: usize },
    /// A strict lookup did not find the name.
    NameNotFound(String),
    /// Persisted data could not be parsed. `line` is 1-based.
    Parse { line: usize, kind: ParseErrorKind },
    /// Under the strict policy, the id declared for a record differs from the
    /// id allocation would assign.
    IndexMismatch { expected: NameId, assigned: NameId },
    /// The name is empty or contains whitespace and cannot be
    /// written in the text format.
    UnencodableName(NameId),
    /// The type label cannot be written as a single token.
    UnencodableLabel(String),
    /// A record list to rebuild a table from has no sentinel record.
    MissingSentinel,
    /// A record list to rebuild a table from has a sentinel with a non-zero
    /// tag.
    SentinelTag(u32),
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutOfRange { id, len } => {
                write!(f, "name id {} out of range (table has {} names)", id, len)
            }
            Error::NameNotFound(name) => write!(f, "cannot find {} in hash table", name),
            Error::Parse { line, kind } => write!(f, "line {}: {}", line, kind),
            Error::IndexMismatch { expected, assigned } => write!(
                f,
                "mismatch between {} and {} name ids",
                assigned, expected
            ),
            Error::UnencodableName(id) => {
                write!(f, "name {} cannot be written as a single token", id)
            }
            Error::UnencodableLabel(label) => {
                write!(f, "label {:?} cannot be written as a single token", label)
            }
            Error::MissingSentinel => write!(f, "missing sentinel record"),
            Error::SentinelTag(tag) => write!(f, "sentinel record has tag {}, expected 0", tag),
            Error::Io(e) => write!(f, "io error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    #[inline]
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
