pub mod function;
pub mod host;
pub mod number;
pub mod value;

pub use function::{HostError, HostResult, NativeFunction};
pub use host::{HostValue, SanitizeError};
pub use number::{ExactNumber, MAX_DIGITS, NumberError};
pub use value::Value;

#[cfg(test)]
mod number_test;
#[cfg(test)]
mod host_test;
