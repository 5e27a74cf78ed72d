use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{lexer::Token, parser::core::ParseResult},
};

/// Builds the diagnostic for a token that should not be where it is,
/// rendering end of input as ` at end`.
pub(in crate::interpreter::parser) fn unexpected(message: impl Into<String>,
                                                 found: Option<&(Token, usize)>)
                                                 -> ParseError {
    match found {
        Some((Token::Eof, line)) => ParseError::UnexpectedToken { message: message.into(),
                                                                  found:   None,
                                                                  line:    *line, },
        Some((token, line)) => ParseError::UnexpectedToken { message: message.into(),
                                                             found:   Some(token.to_string()),
                                                             line:    *line, },
        None => ParseError::UnexpectedToken { message: message.into(),
                                              found:   None,
                                              line:    0, },
    }
}

/// Consumes the next token when it is `expected` and returns its line.
///
/// On a mismatch the offending token is left in the stream, so panic-mode
/// recovery gets to look at it, and `message` is reported against it.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token,
                                                    message: &str)
                                                    -> ParseResult<usize>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((token, line)) if token == expected => {
            let line = *line;
            tokens.next();
            Ok(line)
        },
        other => Err(unexpected(message, other.copied())),
    }
}

/// Parses a plain identifier and returns its name.
///
/// The next token must be `Token::Identifier`; anything else is reported
/// with `message` and left unconsumed.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>,
                                                              message: &str)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::Identifier(name), _)) => {
            let name = name.clone();
            tokens.next();
            Ok(name)
        },
        other => Err(unexpected(message, other.copied())),
    }
}

/// Describes the upcoming token for diagnostics that are reported without
/// consuming anything, such as the 255-argument limit.
pub(in crate::interpreter::parser) fn describe_peek<'a, I>(tokens: &mut Peekable<I>)
                                                           -> (Option<String>, usize)
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::Eof, line)) => (None, *line),
        Some((token, line)) => (Some(token.to_string()), *line),
        None => (None, 0),
    }
}
