use std::io;

#[derive(Debug)]
/// Represents all errors that can abort evaluation.
///
/// The `Display` impl renders the two-line diagnostic the interpreter prints
/// to its error sink: the message followed by `[line N]`.
pub enum RuntimeError {
    /// Tried to read or assign a variable that is not bound in any enclosing
    /// scope.
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The operand of unary `-` was not a number.
    OperandMustBeNumber {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An arithmetic or comparison operator received a non-number operand.
    OperandsMustBeNumbers {
        /// The source line where the error occurred.
        line: usize,
    },
    /// `+` received operands that are neither both numbers nor both strings.
    OperandsMustBeNumbersOrStrings {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to call a value that is not a function.
    NotCallable {
        /// The source line of the call's closing parenthesis.
        line: usize,
    },
    /// A call supplied the wrong number of arguments.
    ArityMismatch {
        /// The number of parameters the function declares.
        expected: usize,
        /// The number of arguments actually supplied.
        found:    usize,
        /// The source line of the call's closing parenthesis.
        line:     usize,
    },
    /// Writing to the program output sink failed.
    Io {
        /// The underlying I/O error.
        error: io::Error,
        /// The source line of the `print` statement.
        line:  usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedVariable { name, line } => {
                write!(f, "Undefined variable '{name}'.\n[line {line}]")
            },
            Self::OperandMustBeNumber { line } => {
                write!(f, "Operand must be a number\n[line {line}]")
            },
            Self::OperandsMustBeNumbers { line } => {
                write!(f, "Operands must be a numbers\n[line {line}]")
            },
            Self::OperandsMustBeNumbersOrStrings { line } => {
                write!(f, "Operands must be two numbers or two strings\n[line {line}]")
            },
            Self::NotCallable { line } => {
                write!(f, "Can only call functions and classes.\n[line {line}]")
            },
            Self::ArityMismatch { expected, found, line } => write!(f,
                                                                    "Expected {expected} arguments but got {found}.\n[line {line}]"),
            Self::Io { error, line } => {
                write!(f, "Failed to write program output: {error}\n[line {line}]")
            },
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { error, .. } => Some(error),
            _ => None,
        }
    }
}
