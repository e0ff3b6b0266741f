//! Exacta standard library
//!
//! A set of host functions covering common string and number chores:
//! - String: `trim`, `upper`, `lower`, `len`, `contains`
//! - Math: `abs`, `min`, `max`, `floor`, `ceil`, `round`, `fixed`
//!
//! Every function is exact: numbers stay rationals throughout. Argument
//! mistakes are reported by the function itself and reach the caller as
//! host function errors naming the function.

use crate::api::Environment;
use crate::values::{ExactNumber, MAX_DIGITS, Value};

pub mod math;
pub mod string;

/// Argument errors raised by standard library functions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StdlibError {
    #[error("expected {expected} argument(s), got {found}")]
    Arity { expected: String, found: usize },

    #[error("argument {position} must be a {expected}, got {found}")]
    ArgumentType {
        position: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("argument {position} must be an integer from 0 to {max}, got {value}", max = MAX_DIGITS)]
    Digits { position: usize, value: String },
}

/// Register every standard library function in `env`.
///
/// Existing bindings with the same names are replaced.
///
/// # Example
///
/// ```
/// use exacta_core::api::{Environment, evaluate};
/// use exacta_core::stdlib::register_stdlib;
///
/// let mut env = Environment::new();
/// register_stdlib(&mut env);
///
/// let result = evaluate("fixed(max(1/3, 0.3), 4)", &env).unwrap();
/// assert_eq!(result.to_string(), "0.3333");
/// ```
pub fn register_stdlib(env: &mut Environment) -> &mut Environment {
    string::register(env);
    math::register(env);
    env
}

pub(crate) fn arity(args: &[Value], count: usize) -> Result<(), StdlibError> {
    if args.len() == count {
        return Ok(());
    }
    Err(StdlibError::Arity {
        expected: count.to_string(),
        found: args.len(),
    })
}

pub(crate) fn str_arg(args: &[Value], index: usize) -> Result<&str, StdlibError> {
    let value = &args[index];
    value.as_str().ok_or(StdlibError::ArgumentType {
        position: index + 1,
        expected: "string",
        found: value.type_name(),
    })
}

pub(crate) fn number_arg(args: &[Value], index: usize) -> Result<&ExactNumber, StdlibError> {
    let value = &args[index];
    value.as_number().ok_or(StdlibError::ArgumentType {
        position: index + 1,
        expected: "rational",
        found: value.type_name(),
    })
}

/// A digit count: an integer from 0 to [`MAX_DIGITS`].
pub(crate) fn digits_arg(args: &[Value], index: usize) -> Result<u32, StdlibError> {
    let number = number_arg(args, index)?;
    number
        .to_integer()
        .and_then(|n| u32::try_from(n).ok())
        .filter(|&digits| digits <= MAX_DIGITS)
        .ok_or_else(|| StdlibError::Digits {
            position: index + 1,
            value: number.to_string(),
        })
}
