//! Core evaluation logic.

use tracing::{debug, trace};

use crate::api::Environment;
use crate::evaluator::{EvalError, EvalErrorKind, EvaluatorOptions, access, operators};
use crate::parser::{BinaryFamily, BinaryOp, Expr, ExprKind, Keyword};
use crate::values::{ExactNumber, HostValue, Value};

/// Tree-walking evaluator with a step budget.
///
/// Every node visited costs one step. Evaluation fails as soon as the number
/// of visited nodes reaches `max_steps`, so a tree of `n` nodes needs a budget
/// of at least `n + 1`.
pub struct Evaluator<'env> {
    options: EvaluatorOptions,
    env: &'env Environment,
    steps: usize,
}

impl<'env> Evaluator<'env> {
    pub fn new(options: EvaluatorOptions, env: &'env Environment) -> Self {
        Self {
            options,
            env,
            steps: 0,
        }
    }

    /// Number of nodes visited so far.
    pub fn steps_taken(&self) -> usize {
        self.steps
    }

    pub fn eval(&mut self, expr: &Expr) -> Result<Value, EvalError> {
        trace!(max_steps = self.options.max_steps, "Evaluating expression");
        self.eval_expr(expr)
    }

    fn step(&mut self) -> Result<(), EvalError> {
        self.steps += 1;
        if self.steps >= self.options.max_steps {
            debug!(max_steps = self.options.max_steps, "Step limit exceeded");
            return Err(EvalError::new(EvalErrorKind::StepLimitExceeded {
                max_steps: self.options.max_steps,
            }));
        }
        Ok(())
    }

    fn eval_expr(&mut self, expr: &Expr) -> Result<Value, EvalError> {
        self.step()?;
        let at = |kind: EvalErrorKind| EvalError::new(kind).at(expr.location.as_ref());

        match &expr.kind {
            ExprKind::Keyword(Keyword::True) => Ok(Value::Bool(true)),
            ExprKind::Keyword(Keyword::False) => Ok(Value::Bool(false)),
            ExprKind::Keyword(Keyword::Null) => Ok(Value::Null),

            ExprKind::Number(text) => text
                .parse::<ExactNumber>()
                .map(Value::Number)
                .map_err(|err| at(err.into())),

            ExprKind::Str(s) => Ok(Value::Str(s.clone())),

            ExprKind::Ident(name) => match self.env.get(name) {
                None => Err(at(EvalErrorKind::UndefinedVariable { name: name.clone() })),
                Some(value) => value
                    .sanitize()
                    .map_err(|err| at(EvalErrorKind::from_sanitize(name, err))),
            },

            ExprKind::Grouping(inner) => self.eval_expr(inner),

            ExprKind::Unary { op, operand } => {
                let value = self.eval_expr(operand)?;
                operators::eval_unary(*op, &value).map_err(at)
            }

            ExprKind::Binary { op, left, right } => {
                let left_value = self.eval_expr(left)?;
                match op.family() {
                    BinaryFamily::And | BinaryFamily::Or => {
                        let l = operators::expect_bool(&left_value).map_err(at)?;
                        // `false && x` and `true || x` never look at `x`.
                        if l == (*op == BinaryOp::Or) {
                            return Ok(left_value);
                        }
                    }
                    BinaryFamily::Coalesce if !left_value.is_null() => return Ok(left_value),
                    _ => {}
                }
                let right_value = self.eval_expr(right)?;
                operators::eval_binary(*op, &left_value, &right_value).map_err(at)
            }

            ExprKind::Ternary {
                check,
                then_branch,
                else_branch,
            } => {
                if self.eval_expr(check)?.is_truthy() {
                    self.eval_expr(then_branch)
                } else {
                    self.eval_expr(else_branch)
                }
            }

            ExprKind::Call { callee, args } => self.eval_call(expr, callee, args),

            ExprKind::Field { object, key } => {
                let object = self.eval_expr(object)?;
                access::field(&object, key).map_err(at)
            }

            ExprKind::Index { object, key } => {
                // The key is evaluated and checked before the object.
                let key = self.eval_expr(key)?;
                access::check_key(&key).map_err(at)?;
                let object = self.eval_expr(object)?;
                access::index(&object, &key).map_err(at)
            }
        }
    }

    fn eval_call(
        &mut self,
        expr: &Expr,
        callee: &str,
        args: &[Expr],
    ) -> Result<Value, EvalError> {
        let at = |kind: EvalErrorKind| EvalError::new(kind).at(expr.location.as_ref());

        let function = match self.env.get(callee) {
            None => {
                return Err(at(EvalErrorKind::FunctionNotDefined {
                    name: callee.to_string(),
                }));
            }
            Some(HostValue::Function(function)) => function.clone(),
            Some(_) => {
                return Err(at(EvalErrorKind::NotCallable {
                    name: callee.to_string(),
                }));
            }
        };

        let args = args
            .iter()
            .map(|arg| self.eval_expr(arg))
            .collect::<Result<Vec<_>, _>>()?;

        let returned = function.call(&args).map_err(|cause| {
            debug!(function = callee, error = %cause, "Host function failed");
            at(EvalErrorKind::HostFunction {
                name: callee.to_string(),
                message: cause.to_string(),
                cause: cause.into(),
            })
        })?;

        returned.sanitize().map_err(|reason| {
            let arguments = args
                .iter()
                .map(|arg| match arg {
                    Value::Str(s) => format!("{s:?}"),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", ");
            at(EvalErrorKind::InvalidReturnValue {
                name: callee.to_string(),
                value: format!("{returned:?}"),
                reason: reason.to_string(),
                arguments,
            })
        })
    }
}
