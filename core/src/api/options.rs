//! Configuration options for expression evaluation.

/// Step budget used when none is given.
pub const DEFAULT_STEPS: usize = 1000;

/// Configuration options for expression execution.
///
/// These options control resource limits during evaluation.
///
/// # Example
///
/// ```
/// use exacta_core::api::ExecutionOptions;
///
/// let options = ExecutionOptions { max_steps: 10_000 };
/// assert_eq!(ExecutionOptions::default().max_steps, 1000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionOptions {
    /// Maximum number of nodes an evaluation may visit.
    ///
    /// A tree of `n` nodes needs a budget of at least `n + 1`.
    ///
    /// Default: 1000
    pub max_steps: usize,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_STEPS,
        }
    }
}
