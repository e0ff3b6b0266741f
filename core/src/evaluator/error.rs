//! Runtime evaluation errors.
//!
//! Every error carries the location of the node that failed, when known.
//! Errors are cheap to clone so a cached failure can be returned again.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::parser::Location;
use crate::values::{NumberError, SanitizeError};

#[derive(Debug, Clone, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("Variable not defined: {name}")]
    UndefinedVariable { name: String },

    #[error("Function not defined: {name}")]
    FunctionNotDefined { name: String },

    #[error("Cannot invoke non-function value: {name}")]
    NotCallable { name: String },

    #[error("Cannot use function as value: {name}")]
    InvalidFunctionValue { name: String },

    #[error("Expected {expected}, got {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// `+` applied to operands that are neither two numbers nor involve a string.
    #[error(
        "Invalid operands for concatenation: {left}, {right} (expected two rationals or a string)"
    )]
    InvalidOperands {
        left: &'static str,
        right: &'static str,
    },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("{message}")]
    NotImplemented { message: String },

    #[error("{message}")]
    Conversion { message: String },

    #[error("{message}")]
    Json { message: String },

    #[error("{message}")]
    Access { message: String },

    #[error("{message}")]
    InvalidKey { message: String },

    /// A host function failed. The original error is kept as the source.
    #[error("[function {name}]:\n{message}")]
    HostFunction {
        name: String,
        message: String,
        cause: Arc<dyn StdError + Send + Sync>,
    },

    #[error("[function {name}] returned an invalid value: {value} ({reason}); arguments: ({arguments})")]
    InvalidReturnValue {
        name: String,
        value: String,
        reason: String,
        arguments: String,
    },

    #[error("Exceeded step limit of {max_steps} steps.")]
    StepLimitExceeded { max_steps: usize },
}

impl EvalErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            EvalErrorKind::UndefinedVariable { .. } => "R001",
            EvalErrorKind::FunctionNotDefined { .. } => "R002",
            EvalErrorKind::NotCallable { .. } => "R003",
            EvalErrorKind::InvalidFunctionValue { .. } => "R004",
            EvalErrorKind::TypeMismatch { .. } => "R005",
            EvalErrorKind::InvalidOperands { .. } => "R006",
            EvalErrorKind::DivisionByZero => "R007",
            EvalErrorKind::NotImplemented { .. } => "R008",
            EvalErrorKind::Conversion { .. } => "R009",
            EvalErrorKind::Json { .. } => "R010",
            EvalErrorKind::Access { .. } => "R011",
            EvalErrorKind::InvalidKey { .. } => "R012",
            EvalErrorKind::HostFunction { .. } => "R013",
            EvalErrorKind::InvalidReturnValue { .. } => "R014",
            EvalErrorKind::StepLimitExceeded { .. } => "R015",
        }
    }
}

impl From<NumberError> for EvalErrorKind {
    fn from(err: NumberError) -> Self {
        match err {
            NumberError::DivisionByZero => EvalErrorKind::DivisionByZero,
            NumberError::NotImplemented { message } => EvalErrorKind::NotImplemented { message },
            other => EvalErrorKind::Conversion {
                message: other.to_string(),
            },
        }
    }
}

impl EvalErrorKind {
    /// Maps a failed environment lookup of `name`.
    pub(crate) fn from_sanitize(name: &str, err: SanitizeError) -> Self {
        match err {
            SanitizeError::Function => EvalErrorKind::InvalidFunctionValue {
                name: name.to_string(),
            },
            SanitizeError::Number(err) => err.into(),
        }
    }
}

/// Evaluation error with the location of the failing node.
#[derive(Debug, Clone)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub location: Option<Location>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        Self {
            kind,
            location: None,
        }
    }

    pub fn at(mut self, location: Option<&Location>) -> Self {
        self.location = location.cloned();
        self
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::new(kind)
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(location) = &self.location {
            write!(f, " {location}")?;
        }
        Ok(())
    }
}

impl StdError for EvalError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.kind {
            EvalErrorKind::HostFunction { cause, .. } => Some(&**cause),
            _ => None,
        }
    }
}
