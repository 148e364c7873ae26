use nom::{error::ErrorKind, IResult};
use thiserror::Error;

use super::scalars::{Dword, Word};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid magic number: expected {expected:#06x}, found {found:#06x}")]
    InvalidMagicNumber { expected: Word, found: Word },
    #[error("invalid frame size {0}")]
    InvalidFrameSize(Dword),
    #[error("{kind:?} with {remaining} bytes remaining")]
    Nom { kind: ErrorKind, remaining: usize },
}

impl ParseError {
    /// True if the parser ran out of input rather than hitting bad data
    pub fn is_eof(&self) -> bool {
        matches!(
            self,
            ParseError::Nom {
                kind: ErrorKind::Eof,
                ..
            }
        )
    }
}

impl<'a> nom::error::ParseError<&'a [u8]> for ParseError {
    fn from_error_kind(input: &'a [u8], kind: ErrorKind) -> Self {
        ParseError::Nom {
            kind,
            remaining: input.len(),
        }
    }

    fn append(_input: &'a [u8], _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

pub type ParseResult<'a, O> = IResult<&'a [u8], O, ParseError>;

/// Flattens a nom error into the inner [`ParseError`]
pub fn into_parse_error(err: nom::Err<ParseError>) -> ParseError {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => e,
        nom::Err::Incomplete(_) => ParseError::Nom {
            kind: ErrorKind::Eof,
            remaining: 0,
        },
    }
}
