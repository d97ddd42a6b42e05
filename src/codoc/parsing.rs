//! Line grammar for the codoc outline format
//!
//!     Every non blank line is exactly one statement. The grammar recognizes seven
//!     statement shapes from the token stream of a single trimmed line:
//!
//!         /name            Directory
//!         name.ext         File
//!         %Name            Component
//!         $name()          Function
//!         varName = value  Variable (parsed, never materialized as a node)
//!         @name(.name)*    Reference
//!         # free text      Note
//!
//!     The parser is built from chumsky combinators over `(Token, Span)` pairs. It is
//!     constructed per call and holds no state, so parsing is safe from any thread.
//!
//!     [parse_line] is the entry point used by the tree builder. It separates blank
//!     lines and incomplete input (a truncated marker while typing) from real
//!     statements, and reports lexing and grammar failures as a [LineError].

pub mod grammar;
pub mod ir;

pub use grammar::{parse_statement, ParseError};
pub use ir::{
    ComponentDecl, DirectoryDecl, FileDecl, FunctionDecl, NoteDecl, ReferenceDecl, Statement,
    VariableDecl,
};

use crate::codoc::lexing::{is_incomplete, tokenize_line};
use crate::codoc::token::Token;
use thiserror::Error;

/// Why a single line produced no statement
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    /// Text no token rule accepts, from `column` (1-based) to the end of the line
    #[error("syntax error: unexpected input '{text}' at column {column}")]
    UnexpectedInput { text: String, column: usize },
    #[error("syntax error: {0}")]
    Parse(#[from] ParseError),
}

/// Result of reading one line of outline text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Empty or whitespace only
    Blank,
    /// A truncated marker; skipped without a diagnostic
    Incomplete,
    Statement(Statement),
}

/// Lex and parse a single line. Leading and trailing whitespace is ignored.
pub fn parse_line(line: &str) -> Result<LineOutcome, LineError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(LineOutcome::Blank);
    }
    if is_incomplete(trimmed) {
        return Ok(LineOutcome::Incomplete);
    }

    let tokens = tokenize_line(trimmed);
    if let Some((Token::Content(text), span)) = tokens.last() {
        return Err(LineError::UnexpectedInput {
            text: text.clone(),
            column: span.start + 1,
        });
    }
    let statement = parse_statement(tokens)?;
    Ok(LineOutcome::Statement(statement))
}
