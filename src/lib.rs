//! # loxide
//!
//! loxide is a tree-walking interpreter for the Lox scripting language,
//! written in Rust. It scans, parses, and evaluates Lox programs with support
//! for variables, lexical scoping, blocks, control flow, and first-class
//! functions with closures.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::{io::Write, rc::Rc};

use crate::interpreter::{
    environment::Environment, evaluator::core::Context, lexer::scan_tokens,
    parser::core::parse_program,
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Stmt` enums and related types that
/// represent the syntactic structure of source code as a tree. The AST is
/// built by the parser and walked by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source lines to AST nodes for error reporting.
/// - Renders expressions back to source text for display.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while lexing, parsing,
/// or evaluating code. It standardizes error reporting and carries the source
/// line of each failure for diagnostics.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Renders each error in its user-visible diagnostic format.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, environments, and error handling to provide a complete
/// runtime for source code evaluation.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, and evaluator.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;

/// The result of interpreting a piece of source code, mapped to the process
/// exit codes the command line tool uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// The program ran to completion.
    Success,
    /// Scanning or parsing reported at least one diagnostic; nothing was
    /// evaluated.
    CompileError,
    /// Evaluation was aborted by a runtime error.
    RuntimeError,
}

impl ExitCode {
    /// The conventional process exit code for this outcome.
    ///
    /// # Example
    /// ```
    /// use loxide::ExitCode;
    ///
    /// assert_eq!(ExitCode::Success.code(), 0);
    /// assert_eq!(ExitCode::CompileError.code(), 64);
    /// assert_eq!(ExitCode::RuntimeError.code(), 70);
    /// ```
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::CompileError => 64,
            Self::RuntimeError => 70,
        }
    }
}

/// An interpreter session.
///
/// The session owns the global environment, which survives across
/// [`interpret`](Self::interpret) calls so that an interactive prompt can
/// accumulate definitions line by line. Program output and diagnostics are
/// written to the two sinks supplied at construction; the library never
/// writes to the process streams itself.
///
/// # Examples
///
/// Definitions persist across calls:
///
/// ```
/// use loxide::{ExitCode, Interpreter};
///
/// let mut output = Vec::new();
/// let mut errors = Vec::new();
/// let mut interpreter = Interpreter::new(&mut output, &mut errors);
///
/// let declaration = r#"
///     fun max(x, y) {
///         if (x > y) { return x; } else { return y; }
///     }
/// "#;
/// assert_eq!(interpreter.interpret(declaration), ExitCode::Success);
/// assert_eq!(interpreter.interpret("print max(10, 20);"), ExitCode::Success);
///
/// assert_eq!(output, b"20\n");
/// ```
pub struct Interpreter<'io> {
    globals: Rc<Environment>,
    output:  &'io mut dyn Write,
    errors:  &'io mut dyn Write,
}

impl<'io> Interpreter<'io> {
    /// Creates a session with a fresh global environment. `output` receives
    /// the text produced by `print` statements; `errors` receives
    /// diagnostics.
    pub fn new(output: &'io mut dyn Write, errors: &'io mut dyn Write) -> Self {
        Self { globals: Environment::new(),
               output,
               errors }
    }

    /// Scans, parses, and evaluates `source`.
    ///
    /// Every lexical and syntactic diagnostic is written to the error sink,
    /// one per line; if there was at least one, evaluation is skipped
    /// entirely. At runtime the first error is reported and aborts the
    /// remaining statements. The global environment keeps whatever
    /// definitions were executed before the failure.
    pub fn interpret(&mut self, source: &str) -> ExitCode {
        let (tokens, mut compile_errors) = scan_tokens(source);

        let mut stream = tokens.iter().peekable();
        let statements = parse_program(&mut stream, &mut compile_errors);

        if !compile_errors.is_empty() {
            for error in &compile_errors {
                let _ = writeln!(self.errors, "{error}");
            }
            return ExitCode::CompileError;
        }

        let mut context = Context::new(Rc::clone(&self.globals), &mut *self.output);
        match context.execute_program(&statements) {
            Ok(()) => ExitCode::Success,
            Err(error) => {
                let _ = writeln!(self.errors, "{error}");
                ExitCode::RuntimeError
            },
        }
    }
}
