use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::Value},
};

/// Evaluates a unary operation over an already-evaluated operand.
///
/// Negation requires a number. Logical NOT accepts anything and inverts its
/// truthiness, so `!nil` is `true` and `!0` is `false`.
pub(crate) fn eval_unary(op: UnaryOperator, value: &Value, line: usize) -> EvalResult<Value> {
    match op {
        UnaryOperator::Negate => match value {
            Value::Number(n) => Ok(Value::Number(-n)),
            _ => Err(RuntimeError::OperandMustBeNumber { line }),
        },
        UnaryOperator::Not => Ok(Value::Bool(!value.is_truthy())),
    }
}
