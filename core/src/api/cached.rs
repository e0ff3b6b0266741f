//! Memoizing evaluator for repeated evaluation of the same expression.

use std::rc::Rc;

use hashbrown::HashMap;
use tracing::debug;

use crate::api::{Environment, Error, ExecutionOptions};
use crate::evaluator::{self, EvalError};
use crate::parser::{Expr, ExpressionParser, SourceParser};
use crate::values::{HostValue, Value};
use crate::visitor::{IdentifierSet, find_identifiers};

/// Counters describing how calls were served.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Calls that had to parse their source.
    pub parses: usize,
    /// Calls that ran the evaluator.
    pub evaluations: usize,
    /// Calls answered from the stored outcome.
    pub hits: usize,
}

/// What the last call saw and produced.
struct CacheState {
    code: String,
    steps: usize,
    ast: Option<Rc<Expr>>,
    identifiers: Rc<IdentifierSet>,
    /// Bindings of `identifiers` at the time of the last call. Unbound names
    /// are absent.
    env: HashMap<String, HostValue>,
    outcome: Result<Value, EvalError>,
}

impl CacheState {
    fn new(steps: usize) -> Self {
        Self {
            code: String::new(),
            steps,
            ast: None,
            identifiers: Rc::default(),
            env: HashMap::new(),
            outcome: Ok(Value::Null),
        }
    }

    /// Whether any identifier the expression uses is bound differently in `env`.
    fn env_changed(&self, env: &Environment) -> bool {
        self.identifiers.iter().any(|name| {
            match (self.env.get(name.as_str()), env.get(name)) {
                (None, None) => false,
                (Some(before), Some(now)) => !before.same_as(now),
                _ => true,
            }
        })
    }
}

/// Evaluates expressions, reusing the previous parse and result when possible.
///
/// The evaluator remembers only the most recent call. Calling again with the
/// same source skips parsing; if in addition the step budget is unchanged and
/// every identifier the expression uses is bound to the same value (functions
/// by identity), the previous outcome is returned without evaluating. A
/// recorded failure is returned again the same way. Parse failures are not
/// recorded.
///
/// # Example
///
/// ```
/// use exacta_core::api::{CachedEvaluator, Environment};
///
/// let mut cached = CachedEvaluator::new();
/// let env = Environment::new().with("x", 2);
///
/// assert_eq!(cached.evaluate("x * 21", &env).unwrap().to_string(), "(42)");
/// assert_eq!(cached.evaluate("x * 21", &env).unwrap().to_string(), "(42)");
/// assert_eq!(cached.stats().evaluations, 1);
/// assert_eq!(cached.stats().hits, 1);
/// ```
pub struct CachedEvaluator<P: SourceParser = ExpressionParser> {
    parser: P,
    options: ExecutionOptions,
    state: CacheState,
    stats: CacheStats,
}

impl CachedEvaluator<ExpressionParser> {
    pub fn new() -> Self {
        Self::with_options(ExecutionOptions::default())
    }

    pub fn with_options(options: ExecutionOptions) -> Self {
        Self::with_parser(ExpressionParser, options)
    }
}

impl Default for CachedEvaluator<ExpressionParser> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: SourceParser> CachedEvaluator<P> {
    /// Use a custom front end.
    pub fn with_parser(parser: P, options: ExecutionOptions) -> Self {
        Self {
            parser,
            options,
            state: CacheState::new(options.max_steps),
            stats: CacheStats::default(),
        }
    }

    pub fn options(&self) -> ExecutionOptions {
        self.options
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Forget the previous call.
    pub fn clear(&mut self) {
        self.state = CacheState::new(self.options.max_steps);
    }

    pub fn evaluate(&mut self, code: &str, env: &Environment) -> Result<Value, Error> {
        self.evaluate_with_steps(code, env, self.options.max_steps)
    }

    pub fn evaluate_with_steps(
        &mut self,
        code: &str,
        env: &Environment,
        steps: usize,
    ) -> Result<Value, Error> {
        let (ast, identifiers, must_evaluate) = if code == self.state.code {
            let must_evaluate = steps != self.state.steps || self.state.env_changed(env);
            (
                self.state.ast.clone(),
                Rc::clone(&self.state.identifiers),
                must_evaluate,
            )
        } else {
            self.stats.parses += 1;
            let ast = self.parser.parse(code).inspect_err(|err| {
                debug!(error = %err, "Parse failed, cache left untouched");
            })?;
            let identifiers = find_identifiers(ast.as_ref());
            (ast.map(Rc::new), Rc::new(identifiers), true)
        };

        let outcome = if must_evaluate {
            debug!(steps, "Cache miss, evaluating");
            self.stats.evaluations += 1;
            match ast.as_deref() {
                None => Ok(Value::Null),
                Some(expr) => evaluator::eval_with_limits(expr, env, steps),
            }
        } else {
            debug!("Cache hit");
            self.stats.hits += 1;
            self.state.outcome.clone()
        };

        let snapshot = identifiers
            .iter()
            .filter_map(|name| env.get(name).map(|value| (name.clone(), value.clone())))
            .collect();
        self.state = CacheState {
            code: code.to_string(),
            steps,
            ast,
            identifiers,
            env: snapshot,
            outcome: outcome.clone(),
        };

        Ok(outcome?)
    }
}
