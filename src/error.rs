//! Error types for minimization requests

use std::fmt;

use thiserror::Error;

use crate::variables::MAX_VARIABLES;

/// Result type alias
pub type Result<T> = std::result::Result<T, KmapError>;

/// A syntax error in an expression or an index list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// 0-based character offset of the offending token
    pub position: usize,
    /// What was expected at `position`
    pub message: String,
}

impl ParseError {
    pub fn new(position: usize, message: impl Into<String>) -> Self {
        ParseError {
            position,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at position {}: {}", self.position, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Every way a minimization request can be rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KmapError {
    #[error("parse error {0}")]
    Parse(#[from] ParseError),

    #[error("unknown variable `{name}` at position {position}")]
    UnknownVariable { name: String, position: usize },

    #[error("too many variables: {count} (at most {max} are supported)", max = MAX_VARIABLES)]
    TooManyVariables { count: usize },

    #[error("index {index} is listed both as a minterm and as a don't-care")]
    ConflictingTerm { index: u32 },

    #[error("index {index} is out of range, indices must be below {limit}")]
    TermOutOfRange { index: u32, limit: u32 },

    #[error("invalid variable name `{name}`")]
    InvalidVariable { name: String },

    #[error("empty input: {0}")]
    EmptyInput(&'static str),
}

impl KmapError {
    /// Character offset in the request text the error points at, if any.
    pub fn position(&self) -> Option<usize> {
        match self {
            KmapError::Parse(e) => Some(e.position),
            KmapError::UnknownVariable { position, .. } => Some(*position),
            _ => None,
        }
    }

    pub(crate) fn parse(position: usize, message: impl Into<String>) -> Self {
        KmapError::Parse(ParseError::new(position, message))
    }
}
