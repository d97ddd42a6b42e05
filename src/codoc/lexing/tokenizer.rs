//! Line tokenizer built on the logos lexer

use crate::codoc::token::Token;
use logos::Logos;
use std::ops::Range;

/// A token paired with its byte range in the trimmed line
pub type TokenSpan = (Token, Range<usize>);

/// Tokenize one line.
///
/// Whitespace is skipped by the lexer itself, so the returned spans may have gaps.
/// From the first fragment logos rejects, the rest of the line becomes a single
/// [Token::Content]. Only the first line of a multi-line input is considered.
pub fn tokenize_line(line: &str) -> Vec<TokenSpan> {
    let line = line.lines().next().unwrap_or("");
    let mut lexer = Token::lexer(line);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(()) => {
                let rest = line[span.start..].trim_end();
                tokens.push((
                    Token::Content(rest.to_string()),
                    span.start..span.start + rest.len(),
                ));
                break;
            }
        }
    }

    tokens
}
