//! Host functions callable from expressions.
//!
//! A [`NativeFunction`] wraps any Rust closure taking already-evaluated
//! arguments. Its result is a [`HostValue`], which the evaluator validates
//! before handing it back to the expression.

use std::fmt;
use std::rc::Rc;

use super::host::HostValue;
use super::value::Value;

/// Error type host functions may fail with. Any error works.
pub type HostError = Box<dyn std::error::Error + Send + Sync>;

/// Result of invoking a host function.
pub type HostResult = Result<HostValue, HostError>;

/// A callable host value.
///
/// Cloning is cheap and preserves identity: two clones compare equal under
/// [`NativeFunction::ptr_eq`].
#[derive(Clone)]
pub struct NativeFunction {
    func: Rc<dyn Fn(&[Value]) -> HostResult>,
}

impl NativeFunction {
    pub fn new(func: impl Fn(&[Value]) -> HostResult + 'static) -> Self {
        Self {
            func: Rc::new(func),
        }
    }

    pub fn call(&self, args: &[Value]) -> HostResult {
        (self.func)(args)
    }

    /// Whether both handles refer to the same function.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function@{:p}>", Rc::as_ptr(&self.func) as *const ())
    }
}
