use std::{io::Write, rc::Rc};

use crate::{
    ast::{Expr, LogicalOperator, Stmt},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::{binary::eval_binary, function::Function, unary::eval_unary},
        value::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Outcome of executing a statement.
///
/// `return` is not an error, and modeling it as one would tangle it with
/// real failures. Instead every statement reports whether control continues
/// normally or a value is on its way out of the current function; callers
/// propagate `Return` until a call boundary catches it.
#[derive(Debug)]
pub enum Flow {
    /// Control falls through to the next statement.
    Normal,
    /// A `return` statement executed; the value travels to the nearest
    /// enclosing call.
    Return(Value),
}

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state during execution: the environment
/// that is current for the statement being executed and the sink that
/// receives `print` output. The environment pointer moves as blocks and
/// calls are entered and left; the frames themselves are shared, so function
/// values can keep their defining frame alive after the evaluator has moved
/// on.
pub struct Context<'io> {
    environment: Rc<Environment>,
    output:      &'io mut dyn Write,
}

impl<'io> Context<'io> {
    /// Creates a context that executes in `globals` and prints to `output`.
    pub fn new(globals: Rc<Environment>, output: &'io mut dyn Write) -> Self {
        Self { environment: globals,
               output }
    }

    /// Runs a parsed program, statement by statement.
    ///
    /// The first runtime error aborts the remaining statements. A top-level
    /// `return` has no call to unwind to and simply ends the program early.
    pub fn execute_program(&mut self, statements: &[Stmt]) -> EvalResult<()> {
        for statement in statements {
            if let Flow::Return(_) = self.execute(statement)? {
                break;
            }
        }
        Ok(())
    }

    /// Executes a single statement.
    fn execute(&mut self, statement: &Stmt) -> EvalResult<Flow> {
        match statement {
            Stmt::Expression { expr } => {
                self.eval(expr)?;
                Ok(Flow::Normal)
            },
            Stmt::Print { expr, line } => {
                let value = self.eval(expr)?;
                writeln!(self.output, "{value}").map_err(|error| RuntimeError::Io { error,
                                                                                    line: *line, })?;
                Ok(Flow::Normal)
            },
            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Nil,
                };
                self.environment.define(name, value);
                Ok(Flow::Normal)
            },
            Stmt::Block { statements } => {
                let environment = Environment::with_enclosing(Rc::clone(&self.environment));
                self.execute_block(statements, environment)
            },
            Stmt::If { condition,
                       then_branch,
                       else_branch, } => {
                if self.eval(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            },
            Stmt::While { condition, body } => {
                while self.eval(condition)?.is_truthy() {
                    if let Flow::Return(value) = self.execute(body)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            },
            Stmt::Function(declaration) => {
                let function = Function::new(Rc::clone(declaration), Rc::clone(&self.environment));
                self.environment.define(&declaration.name, Value::Function(function));
                Ok(Flow::Normal)
            },
            Stmt::Return { value } => {
                let value = match value {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Nil,
                };
                Ok(Flow::Return(value))
            },
        }
    }

    /// Executes `statements` with `environment` as the current frame.
    ///
    /// The previous frame is restored on every exit path: normal completion,
    /// a `return` unwinding through, and runtime errors.
    pub(crate) fn execute_block(&mut self,
                                statements: &[Stmt],
                                environment: Rc<Environment>)
                                -> EvalResult<Flow> {
        let previous = std::mem::replace(&mut self.environment, environment);

        let mut flow = Ok(Flow::Normal);
        for statement in statements {
            match self.execute(statement) {
                Ok(Flow::Normal) => {},
                other => {
                    flow = other;
                    break;
                },
            }
        }

        self.environment = previous;
        flow
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// Operands always evaluate left to right, and both operands of a binary
    /// operator are evaluated before the operator is applied. The logical
    /// operators are the exception: they return the deciding operand itself,
    /// unevaluated right operand and all, rather than coercing to a boolean.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Grouping { inner, .. } => self.eval(inner),
            Expr::Variable { name, line } => self.environment.get(name, *line),
            Expr::Assign { name, value, line } => {
                let value = self.eval(value)?;
                self.environment.assign(name, value.clone(), *line)?;
                Ok(value)
            },
            Expr::Unary { op, right, line } => {
                let right = self.eval(right)?;
                eval_unary(*op, &right, *line)
            },
            Expr::Binary { left,
                           op,
                           right,
                           line, } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                eval_binary(*op, &left, &right, *line)
            },
            Expr::Logical { left, op, right, .. } => {
                let left = self.eval(left)?;
                let short_circuits = match op {
                    LogicalOperator::Or => left.is_truthy(),
                    LogicalOperator::And => !left.is_truthy(),
                };
                if short_circuits { Ok(left) } else { self.eval(right) }
            },
            Expr::Call { callee,
                         arguments,
                         line, } => self.eval_call(callee, arguments, *line),
        }
    }
}
