/// Parser entry points and panic-mode recovery.
///
/// Hosts `parse_program`, the statement loop that records errors and
/// resynchronizes instead of giving up, plus the shared `ParseResult` alias.
pub mod core;

/// Statement and declaration parsing.
///
/// Variable and function declarations, `print`, `return`, `if`, `while`,
/// blocks, and the desugaring of `for` into a `while` wrapped in blocks.
pub mod statement;

/// Assignment, logical, and binary expression parsing.
///
/// One function per precedence tier, lowest first: assignment, `or`, `and`,
/// equality, comparison, term, factor. All tiers are left-associative except
/// assignment.
pub mod binary;

/// Unary, call, and primary expression parsing.
///
/// The high-precedence end of the grammar: prefix `!` and `-`, call suffixes
/// with their argument lists, literals, identifiers, and groupings.
pub mod unary;

/// Utility functions for parsing.
///
/// Small shared helpers: consuming an expected token, reading an identifier,
/// and describing the upcoming token for diagnostics.
pub mod utils;
