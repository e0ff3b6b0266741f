//! String functions.
//!
//! - `len` counts Unicode code points, not bytes
//! - `upper` and `lower` use full Unicode case mapping

use crate::api::Environment;
use crate::values::{ExactNumber, HostResult, HostValue, Value};

use super::{arity, str_arg};

/// Remove leading and trailing whitespace.
fn string_trim(args: &[Value]) -> HostResult {
    arity(args, 1)?;
    Ok(str_arg(args, 0)?.trim().into())
}

fn string_upper(args: &[Value]) -> HostResult {
    arity(args, 1)?;
    Ok(str_arg(args, 0)?.to_uppercase().into())
}

fn string_lower(args: &[Value]) -> HostResult {
    arity(args, 1)?;
    Ok(str_arg(args, 0)?.to_lowercase().into())
}

/// Number of code points.
fn string_len(args: &[Value]) -> HostResult {
    arity(args, 1)?;
    let count = str_arg(args, 0)?.chars().count();
    Ok(HostValue::Number(ExactNumber::from_integer(count)))
}

/// Whether the first argument contains the second.
fn string_contains(args: &[Value]) -> HostResult {
    arity(args, 2)?;
    let haystack = str_arg(args, 0)?;
    let needle = str_arg(args, 1)?;
    Ok(haystack.contains(needle).into())
}

pub(super) fn register(env: &mut Environment) {
    env.register_function("trim", string_trim)
        .register_function("upper", string_upper)
        .register_function("lower", string_lower)
        .register_function("len", string_len)
        .register_function("contains", string_contains);
}

#[cfg(test)]
#[path = "string_test.rs"]
mod string_test;
