//! Named values visible to expressions.

use hashbrown::HashMap;

use crate::values::{HostResult, HostValue, NativeFunction, Value};

/// Read-only bindings from identifiers to host values.
///
/// Evaluation never mutates the environment. Entries may be plain values or
/// host functions.
///
/// # Example
///
/// ```
/// use exacta_core::api::Environment;
/// use exacta_core::values::HostValue;
///
/// let mut env = Environment::new();
/// env.register("price", 19.99)
///     .register("currency", "EUR")
///     .register_function("double", |args| match args {
///         [value] => Ok(HostValue::Str(format!("{value}{value}"))),
///         _ => Err("expected one argument".into()),
///     });
/// assert!(env.contains("double"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Environment {
    entries: HashMap<String, HostValue>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a value, replacing any previous binding of `name`.
    pub fn register(&mut self, name: impl Into<String>, value: impl Into<HostValue>) -> &mut Self {
        self.entries.insert(name.into(), value.into());
        self
    }

    /// Register a host function.
    pub fn register_function(
        &mut self,
        name: impl Into<String>,
        function: impl Fn(&[Value]) -> HostResult + 'static,
    ) -> &mut Self {
        self.register(name, NativeFunction::new(function))
    }

    /// Builder-style [`Environment::register`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<HostValue>) -> Self {
        self.register(name, value);
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<HostValue> {
        self.entries.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&HostValue> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HostValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<HostValue>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}
