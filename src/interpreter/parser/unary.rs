use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{Expr, LiteralValue, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{MAX_ARITY, ParseResult, parse_expression},
            utils::{describe_peek, expect},
        },
    },
};

/// Parses a unary expression.
///
/// Supports the prefix operators `-` (numeric negation) and `!` (logical
/// not). Unary operators are right-associative, so `!-x` parses as
/// `!( -x )`. If no unary operator is present, parsing falls through to the
/// call tier.
///
/// Grammar: `unary := ("!" | "-") unary | call`
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>,
                                 errors: &mut Vec<ParseError>)
                                 -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Minus, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let right = parse_unary(tokens, errors)?;
        Ok(Expr::Unary { op: UnaryOperator::Negate,
                         right: Box::new(right),
                         line })
    } else if let Some((Token::Bang, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let right = parse_unary(tokens, errors)?;
        Ok(Expr::Unary { op: UnaryOperator::Not,
                         right: Box::new(right),
                         line })
    } else {
        parse_call(tokens, errors)
    }
}

/// Parses a primary expression followed by any number of call suffixes.
///
/// Each `(` after the primary starts an argument list, and the result of one
/// call can immediately be called again, so `f(1)(2)` works.
///
/// Grammar: `call := primary ("(" arguments? ")")*`
pub(crate) fn parse_call<'a, I>(tokens: &mut Peekable<I>,
                                errors: &mut Vec<ParseError>)
                                -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut expr = parse_primary(tokens, errors)?;

    while let Some((Token::LeftParen, _)) = tokens.peek() {
        tokens.next();
        expr = finish_call(tokens, errors, expr)?;
    }

    Ok(expr)
}

/// Parses the argument list of a call, the opening `(` already consumed.
///
/// Arguments beyond the 255th are reported but parsing continues; the limit
/// exists for portability, not because anything here would break.
fn finish_call<'a, I>(tokens: &mut Peekable<I>,
                      errors: &mut Vec<ParseError>,
                      callee: Expr)
                      -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut arguments = Vec::new();

    if !matches!(tokens.peek(), Some((Token::RightParen, _))) {
        loop {
            if arguments.len() >= MAX_ARITY {
                let (found, line) = describe_peek(tokens);
                errors.push(ParseError::TooManyArguments { found, line });
            }
            arguments.push(parse_expression(tokens, errors)?);

            match tokens.peek() {
                Some((Token::Comma, _)) => {
                    tokens.next();
                },
                _ => break,
            }
        }
    }

    let line = expect(tokens, &Token::RightParen, "Expect ')' after arguments.")?;

    Ok(Expr::Call { callee: Box::new(callee),
                    arguments,
                    line })
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar:
/// - the literals `true`, `false`, `nil`, numbers, and strings
/// - identifiers
/// - parenthesized expressions
///
/// Grammar:
/// ```text
///     primary := NUMBER | STRING | "true" | "false" | "nil"
///              | IDENTIFIER | "(" expression ")"
/// ```
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>,
                                   errors: &mut Vec<ParseError>)
                                   -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::False, line)) => {
            let line = *line;
            tokens.next();
            Ok(Expr::Literal { value: false.into(),
                               line })
        },
        Some((Token::True, line)) => {
            let line = *line;
            tokens.next();
            Ok(Expr::Literal { value: true.into(),
                               line })
        },
        Some((Token::Nil, line)) => {
            let line = *line;
            tokens.next();
            Ok(Expr::Literal { value: LiteralValue::Nil,
                               line })
        },
        Some((Token::Number(n), line)) => {
            let (value, line) = ((*n).into(), *line);
            tokens.next();
            Ok(Expr::Literal { value, line })
        },
        Some((Token::Str(s), line)) => {
            let (value, line) = (LiteralValue::Str(Rc::from(s.as_str())), *line);
            tokens.next();
            Ok(Expr::Literal { value, line })
        },
        Some((Token::Identifier(name), line)) => {
            let (name, line) = (name.clone(), *line);
            tokens.next();
            Ok(Expr::Variable { name, line })
        },
        Some((Token::LeftParen, line)) => {
            let line = *line;
            tokens.next();
            let inner = parse_expression(tokens, errors)?;
            expect(tokens, &Token::RightParen, "Expect ')' after expression.")?;
            Ok(Expr::Grouping { inner: Box::new(inner),
                                line })
        },
        Some((Token::Eof, line)) => Err(ParseError::ExpectedExpression { found: None,
                                                                         line:  *line, }),
        Some((token, line)) => Err(ParseError::ExpectedExpression { found: Some(token.to_string()),
                                                                    line:  *line, }),
        None => Err(ParseError::ExpectedExpression { found: None,
                                                     line:  0, }),
    }
}
