/// Turns source text into tokens.
///
/// Produces the ordered `(Token, line)` stream the parser consumes, tracking
/// line numbers through newlines, comments, and multi-line strings, and
/// collecting lexical errors without stopping the scan.
pub mod lexer;

/// Turns tokens into an abstract syntax tree.
///
/// A recursive-descent parser with one level per precedence tier and
/// panic-mode recovery at statement boundaries, so a single mistake does not
/// hide the diagnostics for the rest of the program.
pub mod parser;

/// Walks the syntax tree and produces the program's effects.
///
/// Evaluates expressions, executes statements, manages call frames, and
/// threads `return` back to the nearest enclosing call.
pub mod evaluator;

/// Lexically scoped storage for variables.
///
/// Environments chain from the innermost block out to the global frame and
/// are shared by reference so function values can capture the scope they
/// were declared in.
pub mod environment;

/// Runtime value representation.
///
/// The `Value` enum and its coercion rules: truthiness, equality, and the
/// textual form `print` produces.
pub mod value;
