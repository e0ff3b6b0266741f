//! One-shot evaluation entry points.

use crate::api::{DEFAULT_STEPS, Environment, Error};
use crate::evaluator;
use crate::parser::{Expr, ExpressionParser, SourceParser};
use crate::values::Value;

/// Parse and evaluate `code` with the default step budget.
///
/// # Example
///
/// ```
/// use exacta_core::api::{Environment, evaluate};
///
/// let env = Environment::new().with("a", 0.1).with("b", 0.2);
/// let sum = evaluate("a + b", &env).unwrap();
/// assert_eq!(sum.to_string(), "(3/10)");
/// ```
pub fn evaluate(code: &str, env: &Environment) -> Result<Value, Error> {
    evaluate_with_steps(code, env, DEFAULT_STEPS)
}

/// Parse and evaluate `code`, visiting fewer than `steps` nodes.
pub fn evaluate_with_steps(code: &str, env: &Environment, steps: usize) -> Result<Value, Error> {
    let ast = ExpressionParser.parse(code)?;
    evaluate_ast_with_steps(ast.as_ref(), env, steps)
}

/// Evaluate an already parsed tree. A missing tree evaluates to `null`.
pub fn evaluate_ast(ast: Option<&Expr>, env: &Environment) -> Result<Value, Error> {
    evaluate_ast_with_steps(ast, env, DEFAULT_STEPS)
}

pub fn evaluate_ast_with_steps(
    ast: Option<&Expr>,
    env: &Environment,
    steps: usize,
) -> Result<Value, Error> {
    match ast {
        None => Ok(Value::Null),
        Some(expr) => Ok(evaluator::eval_with_limits(expr, env, steps)?),
    }
}
