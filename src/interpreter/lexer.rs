use std::fmt;

use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Numeric literal tokens, such as `7` or `3.14`. A trailing `.` with no
    /// digit after it is not part of the number.
    #[regex(r"[0-9]+(\.[0-9]+)?", parse_number)]
    Number(f64),
    /// String literal tokens; the payload has the surrounding quotes
    /// stripped. Strings may span lines.
    #[regex(r#""[^"]*""#, parse_string, priority = 3)]
    Str(String),
    /// A string literal whose closing quote never arrived. Reported by
    /// [`scan_tokens`] and never handed to the parser.
    #[regex(r#""[^"]*"#, unterminated_string, priority = 2)]
    UnterminatedString,
    /// Identifier tokens; variable or function names such as `x` or `count`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `and`
    #[token("and")]
    And,
    /// `class`
    #[token("class")]
    Class,
    /// `else`
    #[token("else")]
    Else,
    /// `false`
    #[token("false")]
    False,
    /// `for`
    #[token("for")]
    For,
    /// `fun`
    #[token("fun")]
    Fun,
    /// `if`
    #[token("if")]
    If,
    /// `nil`
    #[token("nil")]
    Nil,
    /// `or`
    #[token("or")]
    Or,
    /// `print`
    #[token("print")]
    Print,
    /// `return`
    #[token("return")]
    Return,
    /// `super`
    #[token("super")]
    Super,
    /// `this`
    #[token("this")]
    This,
    /// `true`
    #[token("true")]
    True,
    /// `var`
    #[token("var")]
    Var,
    /// `while`
    #[token("while")]
    While,
    /// `(`
    #[token("(")]
    LeftParen,
    /// `)`
    #[token(")")]
    RightParen,
    /// `{`
    #[token("{")]
    LeftBrace,
    /// `}`
    #[token("}")]
    RightBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `-`
    #[token("-")]
    Minus,
    /// `+`
    #[token("+")]
    Plus,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `/`
    #[token("/")]
    Slash,
    /// `*`
    #[token("*")]
    Star,
    /// `!`
    #[token("!")]
    Bang,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `=`
    #[token("=")]
    Equal,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,

    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip)]
    Comment,
    /// Skipped; increments the line counter.
    #[token("\n", newline)]
    Newline,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \r\t\f]+", logos::skip)]
    Whitespace,

    /// End-of-input sentinel. Only appended by [`scan_tokens`] when the
    /// lexer runs out of input; never produced by a lexer rule.
    Eof,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
/// Incremented as newlines are processed, including those inside strings.
pub struct LexerExtras {
    /// The current 1-based line number in the source being tokenized.
    pub line: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line: 1 }
    }
}

/// Parses a numeric literal from the current token slice.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Strips the surrounding quotes from a string literal and counts the
/// newlines it spans so later tokens report the right line.
fn parse_string(lex: &mut logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    lex.extras.line += slice.chars().filter(|&c| c == '\n').count();
    slice[1..slice.len() - 1].to_string()
}

/// Counts the newlines inside a string that reached end of input unclosed.
fn unterminated_string(lex: &mut logos::Lexer<Token>) {
    lex.extras.line += lex.slice().chars().filter(|&c| c == '\n').count();
}

fn newline(lex: &mut logos::Lexer<Token>) -> logos::Skip {
    lex.extras.line += 1;
    logos::Skip
}

/// Scans `source` into an ordered token stream terminated by [`Token::Eof`].
///
/// Lexical errors never stop the scan: the offending input is skipped, the
/// error is collected, and scanning continues so the parser can still run
/// over everything that did tokenize. The caller checks the error list
/// before evaluating anything.
///
/// # Returns
/// The `(Token, line)` stream and the lexical errors, in source order.
///
/// # Example
/// ```
/// use loxide::interpreter::lexer::{Token, scan_tokens};
///
/// let (tokens, errors) = scan_tokens("print 1;");
/// assert!(errors.is_empty());
/// assert_eq!(tokens.last(), Some(&(Token::Eof, 1)));
/// ```
#[must_use]
pub fn scan_tokens(source: &str) -> (Vec<(Token, usize)>, Vec<ParseError>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        match token {
            Ok(Token::UnterminatedString) => {
                errors.push(ParseError::UnterminatedString { line: lexer.extras.line });
            },
            Ok(token) => tokens.push((token, lexer.extras.line)),
            Err(()) => {
                let ch = lexer.slice().chars().next().unwrap_or('\0');
                errors.push(ParseError::UnexpectedCharacter { ch,
                                                              line: lexer.extras.line, });
            },
        }
    }
    tokens.push((Token::Eof, lexer.extras.line));

    (tokens, errors)
}

/// Renders the lexeme the token spans, as used in `at '<lexeme>'`
/// diagnostics.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "\"{s}\""),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::And => write!(f, "and"),
            Self::Class => write!(f, "class"),
            Self::Else => write!(f, "else"),
            Self::False => write!(f, "false"),
            Self::For => write!(f, "for"),
            Self::Fun => write!(f, "fun"),
            Self::If => write!(f, "if"),
            Self::Nil => write!(f, "nil"),
            Self::Or => write!(f, "or"),
            Self::Print => write!(f, "print"),
            Self::Return => write!(f, "return"),
            Self::Super => write!(f, "super"),
            Self::This => write!(f, "this"),
            Self::True => write!(f, "true"),
            Self::Var => write!(f, "var"),
            Self::While => write!(f, "while"),
            Self::LeftParen => write!(f, "("),
            Self::RightParen => write!(f, ")"),
            Self::LeftBrace => write!(f, "{{"),
            Self::RightBrace => write!(f, "}}"),
            Self::Comma => write!(f, ","),
            Self::Dot => write!(f, "."),
            Self::Minus => write!(f, "-"),
            Self::Plus => write!(f, "+"),
            Self::Semicolon => write!(f, ";"),
            Self::Slash => write!(f, "/"),
            Self::Star => write!(f, "*"),
            Self::Bang => write!(f, "!"),
            Self::BangEqual => write!(f, "!="),
            Self::Equal => write!(f, "="),
            Self::EqualEqual => write!(f, "=="),
            Self::Greater => write!(f, ">"),
            Self::GreaterEqual => write!(f, ">="),
            Self::Less => write!(f, "<"),
            Self::LessEqual => write!(f, "<="),
            // Never surfaced in diagnostics: the first three are stripped
            // before the parser runs and `Eof` renders as ` at end` instead.
            Self::UnterminatedString | Self::Comment | Self::Newline | Self::Whitespace
            | Self::Eof => Ok(()),
        }
    }
}
