//! Tree-walking evaluator for exacta expressions.
//!
//! The evaluator walks a parsed [`Expr`] against an [`Environment`] and
//! produces a [`Value`].
//!
//! ## Design Principles
//!
//! - **Never panic**: adversarial input ends in an [`EvalError`], never a crash
//! - **Bounded**: every visited node costs one step, and evaluation stops once
//!   the step budget is spent
//! - **Exact**: all arithmetic is done on [`ExactNumber`](crate::values::ExactNumber)
//!
//! ## Example
//!
//! ```
//! use exacta_core::api::Environment;
//! use exacta_core::{evaluator, parser};
//!
//! let expr = parser::parse("0.1 + 0.2 == 0.3").unwrap().unwrap();
//! let result = evaluator::eval(&expr, &Environment::new()).unwrap();
//! assert_eq!(result.as_bool(), Some(true));
//! ```

mod access;
mod error;
mod eval;
mod operators;

#[cfg(test)]
mod eval_test;

pub use error::{EvalError, EvalErrorKind};
pub use eval::Evaluator;

use crate::api::{DEFAULT_STEPS, Environment};
use crate::parser::Expr;
use crate::values::Value;

/// Options for a single evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorOptions {
    /// Step budget. A tree of `n` nodes needs at least `n + 1` steps.
    pub max_steps: usize,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_STEPS,
        }
    }
}

/// Evaluate `expr` with the default step budget.
pub fn eval(expr: &Expr, env: &Environment) -> Result<Value, EvalError> {
    eval_with_limits(expr, env, DEFAULT_STEPS)
}

/// Evaluate `expr` with a custom step budget.
///
/// ## Example
///
/// ```
/// use exacta_core::api::Environment;
/// use exacta_core::{evaluator, parser};
///
/// // `1 + 2` has three nodes.
/// let expr = parser::parse("1 + 2").unwrap().unwrap();
/// assert!(evaluator::eval_with_limits(&expr, &Environment::new(), 3).is_err());
/// assert!(evaluator::eval_with_limits(&expr, &Environment::new(), 4).is_ok());
/// ```
pub fn eval_with_limits(
    expr: &Expr,
    env: &Environment,
    max_steps: usize,
) -> Result<Value, EvalError> {
    Evaluator::new(EvaluatorOptions { max_steps }, env).eval(expr)
}
