use std::iter::Peekable;

use crate::{
    ast::{Expr, Stmt},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{binary::parse_assignment, statement::parse_declaration},
    },
};

/// Result type used by the parser.
pub type ParseResult<T> = Result<T, ParseError>;

/// The most parameters a function may declare, and the most arguments a call
/// may pass.
pub const MAX_ARITY: usize = 255;

/// Parses a whole program: declarations until end of input.
///
/// The parser never bails out on the first mistake. A declaration that fails
/// to parse is recorded in `errors` and skipped via [`synchronize`], leaving
/// the stream at a plausible statement start so the declarations after it
/// still parse and report their own diagnostics.
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
/// - `errors`: Collector for everything wrong with the source.
///
/// # Returns
/// The statements that did parse, in source order. The caller must check
/// `errors` before evaluating them.
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>, errors: &mut Vec<ParseError>) -> Vec<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut statements = Vec::new();

    while !at_end(tokens) {
        match parse_declaration(tokens, errors) {
            Ok(statement) => statements.push(statement),
            Err(error) => {
                errors.push(error);
                synchronize(tokens);
            },
        }
    }

    statements
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, assignment, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := assignment`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>,
                               errors: &mut Vec<ParseError>)
                               -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_assignment(tokens, errors)
}

/// Whether the stream is out of meaningful tokens.
pub(crate) fn at_end<'a, I>(tokens: &mut Peekable<I>) -> bool
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    matches!(tokens.peek(), None | Some((Token::Eof, _)))
}

/// Panic-mode recovery: discards the offending token, then everything up to
/// and including the next `;`, unless a keyword that can begin a declaration
/// shows up first.
pub(crate) fn synchronize<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut previous = tokens.next();

    while let Some((token, _)) = tokens.peek() {
        if matches!(previous, Some((Token::Semicolon, _))) {
            return;
        }
        match token {
            Token::Eof => return,
            Token::Class
            | Token::Fun
            | Token::Var
            | Token::For
            | Token::If
            | Token::While
            | Token::Print
            | Token::Return => return,
            _ => previous = tokens.next(),
        }
    }
}
