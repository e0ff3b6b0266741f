//! Math functions on exact rationals.
//!
//! Rounding helpers work on the rational itself, never through floats.

use crate::api::Environment;
use crate::values::{ExactNumber, HostResult, HostValue, Value};

use super::{StdlibError, arity, digits_arg, number_arg};

fn math_abs(args: &[Value]) -> HostResult {
    arity(args, 1)?;
    Ok(number_arg(args, 0)?.abs().into())
}

fn math_floor(args: &[Value]) -> HostResult {
    arity(args, 1)?;
    Ok(number_arg(args, 0)?.floor().into())
}

fn math_ceil(args: &[Value]) -> HostResult {
    arity(args, 1)?;
    Ok(number_arg(args, 0)?.ceil().into())
}

/// `round(x)` or `round(x, digits)`, half away from zero.
fn math_round(args: &[Value]) -> HostResult {
    let digits = match args.len() {
        1 => 0,
        2 => digits_arg(args, 1)?,
        found => {
            return Err(StdlibError::Arity {
                expected: "1 or 2".to_string(),
                found,
            }
            .into());
        }
    };
    Ok(number_arg(args, 0)?.round(digits)?.into())
}

/// Fixed-point text with exactly `digits` decimals.
fn math_fixed(args: &[Value]) -> HostResult {
    arity(args, 2)?;
    let digits = digits_arg(args, 1)?;
    Ok(HostValue::Str(number_arg(args, 0)?.to_fixed(digits)?))
}

/// Picks the extreme of one or more numbers according to `keep`.
fn extreme(
    args: &[Value],
    keep: impl Fn(&ExactNumber, &ExactNumber) -> bool,
) -> HostResult {
    if args.is_empty() {
        return Err(StdlibError::Arity {
            expected: "at least 1".to_string(),
            found: 0,
        }
        .into());
    }
    let mut best = number_arg(args, 0)?;
    for index in 1..args.len() {
        let candidate = number_arg(args, index)?;
        if keep(candidate, best) {
            best = candidate;
        }
    }
    Ok(best.clone().into())
}

fn math_min(args: &[Value]) -> HostResult {
    extreme(args, |candidate, best| candidate < best)
}

fn math_max(args: &[Value]) -> HostResult {
    extreme(args, |candidate, best| candidate > best)
}

pub(super) fn register(env: &mut Environment) {
    env.register_function("abs", math_abs)
        .register_function("min", math_min)
        .register_function("max", math_max)
        .register_function("floor", math_floor)
        .register_function("ceil", math_ceil)
        .register_function("round", math_round)
        .register_function("fixed", math_fixed);
}

#[cfg(test)]
#[path = "math_test.rs"]
mod math_test;
