#[derive(Debug)]
/// Represents all errors that can occur during lexing or parsing.
///
/// Each variant renders itself in the diagnostic format the interpreter
/// prints to its error sink: `[line N] Error<location>: <message>`, where the
/// location names the offending lexeme, says ` at end` when the input ran
/// out, or is empty for lexical errors.
pub enum ParseError {
    /// The scanner hit a character that cannot start any token.
    UnexpectedCharacter {
        /// The character encountered.
        ch:   char,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A string literal was still open when the input ended.
    UnterminatedString {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// What the parser was expecting instead.
        message: String,
        /// The lexeme encountered, or `None` at end of input.
        found:   Option<String>,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A position that requires an expression held something else.
    ExpectedExpression {
        /// The lexeme encountered, or `None` at end of input.
        found: Option<String>,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The left-hand side of an `=` is not assignable.
    InvalidAssignmentTarget {
        /// The source line of the `=` token.
        line: usize,
    },
    /// A function declaration lists more than 255 parameters.
    TooManyParameters {
        /// The lexeme at the point of the report, or `None` at end of input.
        found: Option<String>,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A call carries more than 255 arguments.
    TooManyArguments {
        /// The lexeme at the point of the report, or `None` at end of input.
        found: Option<String>,
        /// The source line where the error occurred.
        line:  usize,
    },
}

impl ParseError {
    fn location(found: Option<&String>) -> String {
        found.map_or_else(|| " at end".to_string(), |lexeme| format!(" at '{lexeme}'"))
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter { ch, line } => {
                write!(f, "[line {line}] Error: Unexpected character: {ch}")
            },

            Self::UnterminatedString { line } => {
                write!(f, "[line {line}] Error: Unterminated string")
            },

            Self::UnexpectedToken { message, found, line } => {
                write!(f, "[line {line}] Error{}: {message}", Self::location(found.as_ref()))
            },

            Self::ExpectedExpression { found, line } => {
                write!(f, "[line {line}] Error{}: Expect expression.", Self::location(found.as_ref()))
            },

            Self::InvalidAssignmentTarget { line } => {
                write!(f, "[line {line}] Error at '=': Invalid assignment target")
            },

            Self::TooManyParameters { found, line } => write!(f,
                                                              "[line {line}] Error{}: Can't have more than 255 parameters.",
                                                              Self::location(found.as_ref())),

            Self::TooManyArguments { found, line } => write!(f,
                                                             "[line {line}] Error{}: Can't have more than 255 arguments.",
                                                             Self::location(found.as_ref())),
        }
    }
}

impl std::error::Error for ParseError {}
