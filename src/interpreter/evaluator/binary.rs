use std::rc::Rc;

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::Value},
};

/// Evaluates a binary operation over two already-evaluated operands.
///
/// `+` is the one overloaded operator: it adds two numbers or concatenates
/// two strings, and mixing the two is an error. The other arithmetic and
/// comparison operators require numbers on both sides. Equality accepts any
/// pair of values and never fails.
///
/// # Parameters
/// - `op`: The operator.
/// - `left`: Left operand.
/// - `right`: Right operand.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// An `EvalResult<Value>` containing the evaluated result.
pub(crate) fn eval_binary(op: BinaryOperator,
                          left: &Value,
                          right: &Value,
                          line: usize)
                          -> EvalResult<Value> {
    use BinaryOperator::{
        Add, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Sub,
    };
    use Value::{Bool, Number, Str};

    match op {
        Add => match (left, right) {
            (Number(a), Number(b)) => Ok(Number(a + b)),
            (Str(a), Str(b)) => Ok(Str(Rc::from(format!("{a}{b}")))),
            _ => Err(RuntimeError::OperandsMustBeNumbersOrStrings { line }),
        },

        Sub => {
            let (a, b) = number_operands(left, right, line)?;
            Ok(Number(a - b))
        },
        Mul => {
            let (a, b) = number_operands(left, right, line)?;
            Ok(Number(a * b))
        },
        Div => {
            // No divide-by-zero check: the result follows IEEE 754, so a
            // zero divisor yields an infinity or NaN.
            let (a, b) = number_operands(left, right, line)?;
            Ok(Number(a / b))
        },

        Greater => {
            let (a, b) = number_operands(left, right, line)?;
            Ok(Bool(a > b))
        },
        GreaterEqual => {
            let (a, b) = number_operands(left, right, line)?;
            Ok(Bool(a >= b))
        },
        Less => {
            let (a, b) = number_operands(left, right, line)?;
            Ok(Bool(a < b))
        },
        LessEqual => {
            let (a, b) = number_operands(left, right, line)?;
            Ok(Bool(a <= b))
        },

        Equal => Ok(Bool(left == right)),
        NotEqual => Ok(Bool(left != right)),
    }
}

/// Requires both operands to be numbers.
fn number_operands(left: &Value, right: &Value, line: usize) -> EvalResult<(f64, f64)> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(RuntimeError::OperandsMustBeNumbers { line }),
    }
}
