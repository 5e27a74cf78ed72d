use std::{fmt, rc::Rc};

use crate::{
    ast::{Expr, FunctionDecl},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalResult, Flow},
        value::Value,
    },
};

/// A function value.
///
/// Pairs the parsed declaration with the environment that was current when
/// the declaration was executed. That captured frame, not the caller's, is
/// the parent of every invocation's frame, which is what makes closures
/// work: an inner function returned from an outer one still reads and
/// writes the outer function's locals.
#[derive(Clone)]
pub struct Function {
    declaration: Rc<FunctionDecl>,
    closure:     Rc<Environment>,
}

impl Function {
    /// Captures `closure` as the function's defining scope.
    #[must_use]
    pub const fn new(declaration: Rc<FunctionDecl>, closure: Rc<Environment>) -> Self {
        Self { declaration, closure }
    }

    /// The name the function was declared with.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.declaration.name
    }

    /// The number of parameters the function declares.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    /// Invokes the function.
    ///
    /// Binds the arguments in a fresh frame chained to the closure, runs the
    /// body, and converts a `return` unwind into the call's result. Falling
    /// off the end of the body yields `nil`.
    fn call(&self, context: &mut Context<'_>, arguments: Vec<Value>) -> EvalResult<Value> {
        let environment = Environment::with_enclosing(Rc::clone(&self.closure));
        for (param, argument) in self.declaration.params.iter().zip(arguments) {
            environment.define(param, argument);
        }

        match context.execute_block(&self.declaration.body, environment)? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Nil),
        }
    }
}

/// Function equality is identity: a function value only equals itself and
/// its clones, never another value that happens to share the declaration.
impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.declaration, &other.declaration)
        && Rc::ptr_eq(&self.closure, &other.closure)
    }
}

// The closure frame can transitively contain this very function (that is
// how recursion resolves), so Debug stays shallow instead of deriving.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
         .field("name", &self.declaration.name)
         .field("arity", &self.arity())
         .finish()
    }
}

impl Context<'_> {
    /// Evaluates a call expression.
    ///
    /// The callee is evaluated first, then each argument in source order,
    /// then the invocation itself. Only function values are callable, and
    /// the argument count must match the declared arity exactly; both checks
    /// happen before any of the body runs.
    ///
    /// # Parameters
    /// - `callee`: Expression producing the value being called.
    /// - `arguments`: Argument expressions, unevaluated.
    /// - `line`: Line of the call's closing parenthesis, for diagnostics.
    pub(crate) fn eval_call(&mut self,
                            callee: &Expr,
                            arguments: &[Expr],
                            line: usize)
                            -> EvalResult<Value> {
        let callee = self.eval(callee)?;

        let mut values = Vec::with_capacity(arguments.len());
        for argument in arguments {
            values.push(self.eval(argument)?);
        }

        match callee {
            Value::Function(function) => {
                if values.len() != function.arity() {
                    return Err(RuntimeError::ArityMismatch { expected: function.arity(),
                                                             found:    values.len(),
                                                             line });
                }
                function.call(self, values)
            },
            _ => Err(RuntimeError::NotCallable { line }),
        }
    }
}
