//! Binary and unary operator implementations.
//!
//! Operands arrive fully evaluated. `&&`, `||` and `??` short-circuit in the
//! evaluator, which hands the operands it did evaluate to [`eval_logical`].

use crate::evaluator::EvalErrorKind;
use crate::parser::{BinaryOp, UnaryOp};
use crate::values::{ExactNumber, NumberError, Value};

fn expect_number(value: &Value) -> Result<&ExactNumber, EvalErrorKind> {
    value.as_number().ok_or(EvalErrorKind::TypeMismatch {
        expected: "rational",
        found: value.type_name(),
    })
}

pub(super) fn expect_bool(value: &Value) -> Result<bool, EvalErrorKind> {
    value.as_bool().ok_or(EvalErrorKind::TypeMismatch {
        expected: "boolean",
        found: value.type_name(),
    })
}

pub(super) fn eval_unary(op: UnaryOp, operand: &Value) -> Result<Value, EvalErrorKind> {
    match op {
        UnaryOp::Not => Ok(Value::Bool(!expect_bool(operand)?)),
        UnaryOp::Plus => Ok(Value::Number(expect_number(operand)?.clone())),
        UnaryOp::Minus => Ok(Value::Number(expect_number(operand)?.negated())),
    }
}

/// `+` adds two numbers and otherwise concatenates, as long as one side is a
/// string.
fn add(left: &Value, right: &Value) -> Result<Value, EvalErrorKind> {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => Ok(Value::Number(l.plus(r))),
        (Value::Str(_), _) | (_, Value::Str(_)) => Ok(Value::Str(format!("{left}{right}"))),
        _ => Err(EvalErrorKind::InvalidOperands {
            left: left.type_name(),
            right: right.type_name(),
        }),
    }
}

/// Applies `f` to two numeric operands.
fn numeric(
    left: &Value,
    right: &Value,
    f: impl FnOnce(&ExactNumber, &ExactNumber) -> Result<Value, NumberError>,
) -> Result<Value, EvalErrorKind> {
    Ok(f(expect_number(left)?, expect_number(right)?)?)
}

pub(super) fn eval_binary(
    op: BinaryOp,
    left: &Value,
    right: &Value,
) -> Result<Value, EvalErrorKind> {
    match op {
        BinaryOp::Add => add(left, right),
        BinaryOp::Sub => numeric(left, right, |l, r| Ok(l.minus(r).into())),
        BinaryOp::Mul => numeric(left, right, |l, r| Ok(l.multiplied_by(r).into())),
        BinaryOp::Div => numeric(left, right, |l, r| Ok(l.divided_by(r)?.into())),
        BinaryOp::Rem => numeric(left, right, |l, r| Ok(l.remainder(r)?.into())),
        BinaryOp::Pow => numeric(left, right, |l, r| Ok(l.to_the_power_of(r)?.into())),
        BinaryOp::Lt => numeric(left, right, |l, r| Ok(Value::Bool(l < r))),
        BinaryOp::Le => numeric(left, right, |l, r| Ok(Value::Bool(l <= r))),
        BinaryOp::Gt => numeric(left, right, |l, r| Ok(Value::Bool(l > r))),
        BinaryOp::Ge => numeric(left, right, |l, r| Ok(Value::Bool(l >= r))),
        BinaryOp::Eq => Ok(Value::Bool(left == right)),
        BinaryOp::Ne => Ok(Value::Bool(left != right)),
        BinaryOp::And | BinaryOp::Or | BinaryOp::Coalesce => eval_logical(op, left, right),
    }
}

/// Logical operators on operands that were both evaluated.
pub(super) fn eval_logical(
    op: BinaryOp,
    left: &Value,
    right: &Value,
) -> Result<Value, EvalErrorKind> {
    match op {
        BinaryOp::Coalesce if left.is_null() => Ok(right.clone()),
        BinaryOp::Coalesce => Ok(left.clone()),
        BinaryOp::And => {
            let l = expect_bool(left)?;
            Ok(Value::Bool(l && expect_bool(right)?))
        }
        BinaryOp::Or => {
            let l = expect_bool(left)?;
            Ok(Value::Bool(l || expect_bool(right)?))
        }
        _ => eval_binary(op, left, right),
    }
}
