/// Core evaluation logic and context management.
///
/// Contains the evaluation context, statement execution, expression
/// dispatch, and the control-flow plumbing that carries `return` to the
/// nearest call boundary.
pub mod core;

/// Binary operator evaluation logic.
///
/// Applies arithmetic, comparison, and equality operators to a pair of
/// already-evaluated operands, enforcing their typing rules.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Numeric negation and logical NOT.
pub mod unary;

/// Function values and call evaluation.
///
/// Defines the function value type, closure capture, arity checking, and
/// the invocation protocol.
pub mod function;
