use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{Expr, FunctionDecl, LiteralValue, Stmt},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{MAX_ARITY, ParseResult, at_end, parse_expression, synchronize},
            utils::{describe_peek, expect, parse_identifier},
        },
    },
};

/// Parses a single declaration.
///
/// A declaration is a function declaration, a variable declaration, or any
/// other statement. This is the rule the program loop and block bodies
/// iterate, and therefore the granularity of panic-mode recovery.
///
/// Grammar: `declaration := funDecl | varDecl | statement`
pub fn parse_declaration<'a, I>(tokens: &mut Peekable<I>,
                                errors: &mut Vec<ParseError>)
                                -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::Fun, _)) => {
            tokens.next();
            parse_function_declaration(tokens, errors)
        },
        Some((Token::Var, _)) => {
            tokens.next();
            parse_var_declaration(tokens, errors)
        },
        _ => parse_statement(tokens, errors),
    }
}

/// Parses a single statement.
///
/// Grammar:
/// ```text
///     statement := exprStmt | printStmt | returnStmt
///                | ifStmt | whileStmt | forStmt | block
/// ```
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>,
                              errors: &mut Vec<ParseError>)
                              -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::For, _)) => {
            tokens.next();
            parse_for_statement(tokens, errors)
        },
        Some((Token::If, _)) => {
            tokens.next();
            parse_if_statement(tokens, errors)
        },
        Some((Token::Print, line)) => {
            let line = *line;
            tokens.next();
            parse_print_statement(tokens, errors, line)
        },
        Some((Token::Return, _)) => {
            tokens.next();
            parse_return_statement(tokens, errors)
        },
        Some((Token::While, _)) => {
            tokens.next();
            parse_while_statement(tokens, errors)
        },
        Some((Token::LeftBrace, _)) => {
            tokens.next();
            Ok(Stmt::Block { statements: parse_block_statements(tokens, errors)? })
        },
        _ => parse_expression_statement(tokens, errors),
    }
}

/// Parses a variable declaration, the `var` keyword already consumed.
///
/// Grammar: `varDecl := "var" IDENTIFIER ("=" expression)? ";"`
fn parse_var_declaration<'a, I>(tokens: &mut Peekable<I>,
                                errors: &mut Vec<ParseError>)
                                -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let name = parse_identifier(tokens, "Expect variable name.")?;

    let initializer = if let Some((Token::Equal, _)) = tokens.peek() {
        tokens.next();
        Some(parse_expression(tokens, errors)?)
    } else {
        None
    };

    expect(tokens, &Token::Semicolon, "Expect ';' after variable declaration.")?;
    Ok(Stmt::Var { name, initializer })
}

/// Parses a function declaration, the `fun` keyword already consumed.
///
/// Parameters beyond the 255th are reported but parsing continues, matching
/// the treatment of oversized argument lists.
///
/// Grammar:
/// ```text
///     funDecl := "fun" IDENTIFIER "(" params? ")" block
///     params  := IDENTIFIER ("," IDENTIFIER)*
/// ```
fn parse_function_declaration<'a, I>(tokens: &mut Peekable<I>,
                                     errors: &mut Vec<ParseError>)
                                     -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let name = parse_identifier(tokens, "Expect function name.")?;
    expect(tokens, &Token::LeftParen, "Expect '(' after function name.")?;

    let mut params = Vec::new();
    if !matches!(tokens.peek(), Some((Token::RightParen, _))) {
        loop {
            if params.len() >= MAX_ARITY {
                let (found, line) = describe_peek(tokens);
                errors.push(ParseError::TooManyParameters { found, line });
            }
            params.push(parse_identifier(tokens, "Expect parameter name.")?);

            match tokens.peek() {
                Some((Token::Comma, _)) => {
                    tokens.next();
                },
                _ => break,
            }
        }
    }
    expect(tokens, &Token::RightParen, "Expect ')' after parameters.")?;

    expect(tokens, &Token::LeftBrace, "Expect '{' before function body.")?;
    let body = parse_block_statements(tokens, errors)?;

    Ok(Stmt::Function(Rc::new(FunctionDecl { name, params, body })))
}

/// Parses the statements of a block, the opening `{` already consumed, up to
/// and including the closing `}`.
///
/// A declaration that fails inside the block is recorded and skipped the
/// same way the top-level loop does it, so the rest of the block still
/// parses.
pub(crate) fn parse_block_statements<'a, I>(tokens: &mut Peekable<I>,
                                            errors: &mut Vec<ParseError>)
                                            -> ParseResult<Vec<Stmt>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut statements = Vec::new();

    while !matches!(tokens.peek(), Some((Token::RightBrace, _))) && !at_end(tokens) {
        match parse_declaration(tokens, errors) {
            Ok(statement) => statements.push(statement),
            Err(error) => {
                errors.push(error);
                synchronize(tokens);
            },
        }
    }

    expect(tokens, &Token::RightBrace, "Expect '}' after block.")?;
    Ok(statements)
}

/// Parses a `print` statement, the keyword already consumed.
///
/// Grammar: `printStmt := "print" expression ";"`
fn parse_print_statement<'a, I>(tokens: &mut Peekable<I>,
                                errors: &mut Vec<ParseError>,
                                line: usize)
                                -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let expr = parse_expression(tokens, errors)?;
    expect(tokens, &Token::Semicolon, "Expect ';' after value.")?;
    Ok(Stmt::Print { expr, line })
}

/// Parses a `return` statement, the keyword already consumed. The value is
/// optional; `return;` returns `nil`.
///
/// Grammar: `returnStmt := "return" expression? ";"`
fn parse_return_statement<'a, I>(tokens: &mut Peekable<I>,
                                 errors: &mut Vec<ParseError>)
                                 -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let value = if matches!(tokens.peek(), Some((Token::Semicolon, _))) {
        None
    } else {
        Some(parse_expression(tokens, errors)?)
    };

    expect(tokens, &Token::Semicolon, "Expect ';' after return value.")?;
    Ok(Stmt::Return { value })
}

/// Parses an `if` statement, the keyword already consumed. An `else` binds
/// to the nearest `if`.
///
/// Grammar: `ifStmt := "if" "(" expression ")" statement ("else" statement)?`
fn parse_if_statement<'a, I>(tokens: &mut Peekable<I>,
                             errors: &mut Vec<ParseError>)
                             -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LeftParen, "Expect '(' after 'if'.")?;
    let condition = parse_expression(tokens, errors)?;
    expect(tokens, &Token::RightParen, "Expect ')' after condition.")?;

    let then_branch = Box::new(parse_statement(tokens, errors)?);
    let else_branch = if let Some((Token::Else, _)) = tokens.peek() {
        tokens.next();
        Some(Box::new(parse_statement(tokens, errors)?))
    } else {
        None
    };

    Ok(Stmt::If { condition,
                  then_branch,
                  else_branch })
}

/// Parses a `while` statement, the keyword already consumed.
///
/// Grammar: `whileStmt := "while" "(" expression ")" statement`
fn parse_while_statement<'a, I>(tokens: &mut Peekable<I>,
                                errors: &mut Vec<ParseError>)
                                -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LeftParen, "Expect '(' after 'while'.")?;
    let condition = parse_expression(tokens, errors)?;
    expect(tokens, &Token::RightParen, "Expect ')' after condition.")?;

    let body = Box::new(parse_statement(tokens, errors)?);

    Ok(Stmt::While { condition, body })
}

/// Parses a `for` statement, the keyword already consumed, by desugaring it.
///
/// There is no `for` node in the AST. The three clauses wrap the body in
/// existing constructs:
///
/// ```text
///     { initializer; while (condition) { body; increment; } }
/// ```
///
/// with a literal `true` standing in for an omitted condition.
///
/// Grammar:
/// ```text
///     forStmt := "for" "(" (varDecl | exprStmt | ";")
///                expression? ";" expression? ")" statement
/// ```
fn parse_for_statement<'a, I>(tokens: &mut Peekable<I>,
                              errors: &mut Vec<ParseError>)
                              -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LeftParen, "Expect '(' after 'for'.")?;

    let initializer = match tokens.peek() {
        Some((Token::Semicolon, _)) => {
            tokens.next();
            None
        },
        Some((Token::Var, _)) => {
            tokens.next();
            Some(parse_var_declaration(tokens, errors)?)
        },
        _ => Some(parse_expression_statement(tokens, errors)?),
    };

    let condition = if matches!(tokens.peek(), Some((Token::Semicolon, _))) {
        None
    } else {
        Some(parse_expression(tokens, errors)?)
    };
    expect(tokens, &Token::Semicolon, "Expect ';' after loop condition.")?;

    let increment = if matches!(tokens.peek(), Some((Token::RightParen, _))) {
        None
    } else {
        Some(parse_expression(tokens, errors)?)
    };
    let paren_line = expect(tokens, &Token::RightParen, "Expect ')' after for clauses.")?;

    let mut body = parse_statement(tokens, errors)?;

    if let Some(increment) = increment {
        body = Stmt::Block { statements: vec![body, Stmt::Expression { expr: increment }] };
    }

    let condition = condition.unwrap_or(Expr::Literal { value: LiteralValue::Bool(true),
                                                        line:  paren_line, });
    body = Stmt::While { condition,
                         body: Box::new(body) };

    if let Some(initializer) = initializer {
        body = Stmt::Block { statements: vec![initializer, body] };
    }

    Ok(body)
}

/// Parses an expression in statement position.
///
/// Grammar: `exprStmt := expression ";"`
fn parse_expression_statement<'a, I>(tokens: &mut Peekable<I>,
                                     errors: &mut Vec<ParseError>)
                                     -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let expr = parse_expression(tokens, errors)?;
    expect(tokens, &Token::Semicolon, "Expect ';' after expression.")?;
    Ok(Stmt::Expression { expr })
}
