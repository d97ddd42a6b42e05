//! Lexing of single outline lines
//!
//!     The tree builder hands each trimmed line to [tokenize_line], which runs the
//!     logos lexer and keeps the byte span of every token. Input logos cannot match
//!     ends the stream as one catch-all content token, which no statement accepts.
//!
//!     Lines that consist of nothing but a truncated marker (`$`, `%@`, `#` ...) are
//!     what an editor sees while the user is still typing. [is_incomplete] detects
//!     them so callers can skip the line without raising a diagnostic.

mod incomplete;
mod tokenizer;

pub use incomplete::is_incomplete;
pub use tokenizer::{tokenize_line, TokenSpan};
