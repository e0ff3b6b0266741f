//! Errors returned by the public API.

use crate::evaluator::EvalError;
use crate::parser::{Location, ParseError};

/// Any failure of [`evaluate`](super::evaluate) and friends.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl Error {
    /// Stable short code identifying the kind of failure.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Parse(err) => err.code(),
            Error::Eval(err) => err.code(),
        }
    }

    pub fn location(&self) -> Option<&Location> {
        match self {
            Error::Parse(err) => err.location(),
            Error::Eval(err) => err.location.as_ref(),
        }
    }

    /// The message without the trailing location.
    pub fn message(&self) -> String {
        match self {
            Error::Parse(ParseError::Syntax { message, .. }) => {
                format!("Syntax error: unable to parse expression: {message}")
            }
            Error::Parse(err) => err.to_string(),
            Error::Eval(err) => err.kind.to_string(),
        }
    }
}
