//! Values supplied by the host: environment entries and host function results.
//!
//! Host values are looser than [`Value`]s. They may be plain floats, which are
//! converted exactly on the way in, or functions, which can only be called.

use core::fmt;

use num_bigint::BigInt;

use super::function::{HostResult, NativeFunction};
use super::number::{ExactNumber, NumberError};
use super::value::Value;

#[derive(Clone)]
pub enum HostValue {
    Null,
    Bool(bool),
    Str(String),
    Int(i64),
    BigInt(BigInt),
    Float(f64),
    Number(ExactNumber),
    Function(NativeFunction),
}

/// Why a host value could not be turned into a [`Value`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SanitizeError {
    #[error("functions cannot be used as values")]
    Function,
    #[error(transparent)]
    Number(#[from] NumberError),
}

impl HostValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            HostValue::Null => "null",
            HostValue::Bool(_) => "boolean",
            HostValue::Str(_) => "string",
            HostValue::Int(_) | HostValue::BigInt(_) | HostValue::Float(_) => "number",
            HostValue::Number(_) => "rational",
            HostValue::Function(_) => "function",
        }
    }

    pub fn function(func: impl Fn(&[Value]) -> HostResult + 'static) -> Self {
        HostValue::Function(NativeFunction::new(func))
    }

    pub fn as_function(&self) -> Option<&NativeFunction> {
        match self {
            HostValue::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Converts into an expression value. Floats go through their exact
    /// decimal expansion, NaN and infinities are refused.
    pub fn sanitize(&self) -> Result<Value, SanitizeError> {
        Ok(match self {
            HostValue::Null => Value::Null,
            HostValue::Bool(b) => Value::Bool(*b),
            HostValue::Str(s) => Value::Str(s.clone()),
            HostValue::Int(i) => Value::Number(ExactNumber::from(*i)),
            HostValue::BigInt(i) => Value::Number(ExactNumber::from(i.clone())),
            HostValue::Float(f) => Value::Number(ExactNumber::try_from(*f)?),
            HostValue::Number(n) => Value::Number(n.clone()),
            HostValue::Function(_) => return Err(SanitizeError::Function),
        })
    }

    /// Identity comparison used to decide whether a cached result is stale.
    ///
    /// Functions compare by handle, floats by bit pattern (so `NaN` is the
    /// same as itself and `0.0` differs from `-0.0`), everything else by value.
    pub fn same_as(&self, other: &HostValue) -> bool {
        match (self, other) {
            (HostValue::Null, HostValue::Null) => true,
            (HostValue::Bool(a), HostValue::Bool(b)) => a == b,
            (HostValue::Str(a), HostValue::Str(b)) => a == b,
            (HostValue::Int(a), HostValue::Int(b)) => a == b,
            (HostValue::BigInt(a), HostValue::BigInt(b)) => a == b,
            (HostValue::Float(a), HostValue::Float(b)) => a.to_bits() == b.to_bits(),
            (HostValue::Number(a), HostValue::Number(b)) => a == b,
            (HostValue::Function(a), HostValue::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostValue::Null => write!(f, "null"),
            HostValue::Bool(b) => write!(f, "{b}"),
            HostValue::Str(s) => write!(f, "{s:?}"),
            HostValue::Int(i) => write!(f, "{i}"),
            HostValue::BigInt(i) => write!(f, "{i}"),
            HostValue::Float(x) => write!(f, "{x:?}"),
            HostValue::Number(n) => write!(f, "{n}"),
            HostValue::Function(func) => write!(f, "{func:?}"),
        }
    }
}

impl From<Value> for HostValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => HostValue::Null,
            Value::Bool(b) => HostValue::Bool(b),
            Value::Str(s) => HostValue::Str(s),
            Value::Number(n) => HostValue::Number(n),
        }
    }
}

impl From<()> for HostValue {
    fn from(_: ()) -> Self {
        HostValue::Null
    }
}

impl From<bool> for HostValue {
    fn from(value: bool) -> Self {
        HostValue::Bool(value)
    }
}

impl From<&str> for HostValue {
    fn from(value: &str) -> Self {
        HostValue::Str(value.to_string())
    }
}

impl From<String> for HostValue {
    fn from(value: String) -> Self {
        HostValue::Str(value)
    }
}

impl From<i64> for HostValue {
    fn from(value: i64) -> Self {
        HostValue::Int(value)
    }
}

impl From<BigInt> for HostValue {
    fn from(value: BigInt) -> Self {
        HostValue::BigInt(value)
    }
}

impl From<f64> for HostValue {
    fn from(value: f64) -> Self {
        HostValue::Float(value)
    }
}

impl From<ExactNumber> for HostValue {
    fn from(value: ExactNumber) -> Self {
        HostValue::Number(value)
    }
}

impl From<NativeFunction> for HostValue {
    fn from(value: NativeFunction) -> Self {
        HostValue::Function(value)
    }
}

impl<T: Into<HostValue>> From<Option<T>> for HostValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(HostValue::Null, Into::into)
    }
}
