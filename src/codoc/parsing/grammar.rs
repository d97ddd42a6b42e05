//! Parser combinators for the seven statement shapes

use chumsky::error::SimpleReason;
use chumsky::prelude::*;

use super::ir::{
    ComponentDecl, DirectoryDecl, FileDecl, FunctionDecl, NoteDecl, ReferenceDecl, Statement,
    VariableDecl,
};
use crate::codoc::lexing::TokenSpan;
use crate::codoc::token::Token;

/// Type alias for parser error
type ParserError = Simple<TokenSpan>;

/// A token stream that matches none of the statement shapes
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    fn from_simple(errors: Vec<ParserError>) -> Self {
        let message = errors
            .into_iter()
            .next()
            .map(|error| describe(&error))
            .unwrap_or_else(|| "unrecognized statement".to_string());
        ParseError { message }
    }
}

fn describe(error: &ParserError) -> String {
    if let SimpleReason::Custom(message) = error.reason() {
        return message.clone();
    }
    match error.found() {
        Some((token, _)) => format!("unexpected '{}'", token),
        None => "unexpected end of line".to_string(),
    }
}

/// Parse the token stream of one line into a statement.
pub fn parse_statement(tokens: Vec<TokenSpan>) -> Result<Statement, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError {
            message: "empty statement".to_string(),
        });
    }
    statement().parse(tokens).map_err(ParseError::from_simple)
}

fn statement() -> impl Parser<TokenSpan, Statement, Error = ParserError> + Clone {
    choice((
        directory(),
        file(),
        component(),
        function(),
        variable(),
        reference(),
        note(),
    ))
    .then_ignore(end())
}

/// Helper: match a specific token, ignoring the span
fn token(t: Token) -> impl Parser<TokenSpan, (), Error = ParserError> + Clone {
    filter(move |(tok, _): &TokenSpan| tok == &t).ignored()
}

/// Helper: a bare name (identifier, or a `varName` used as a plain name)
fn name() -> impl Parser<TokenSpan, String, Error = ParserError> + Clone {
    filter_map(|span, (tok, _): TokenSpan| match tok {
        Token::Identifier(name) | Token::Variable(name) => Ok(name),
        other => Err(Simple::custom(
            span,
            format!("expected a name, found '{}'", other),
        )),
    })
}

/// `/name` with an optional trailing slash
fn directory() -> impl Parser<TokenSpan, Statement, Error = ParserError> + Clone {
    token(Token::Slash)
        .ignore_then(name())
        .then_ignore(token(Token::Slash).or_not())
        .map(|name| Statement::Directory(DirectoryDecl { name }))
}

/// `name.ext`, where the name may itself contain dots (`index.test.ts`).
///
/// Every name part displays as exactly its source slice, so joining the parts
/// rebuilds the file name as written.
fn file() -> impl Parser<TokenSpan, Statement, Error = ParserError> + Clone {
    filter(|(tok, _): &TokenSpan| tok.is_file_name_part())
        .repeated()
        .at_least(2)
        .try_map(|parts: Vec<TokenSpan>, span| {
            file_decl(&parts)
                .map(Statement::File)
                .map_err(|message| Simple::custom(span, message))
        })
}

fn file_decl(parts: &[TokenSpan]) -> Result<FileDecl, String> {
    let name: String = parts.iter().map(|(tok, _)| tok.to_string()).collect();

    if parts
        .windows(2)
        .any(|pair| pair[0].1.end != pair[1].1.start)
    {
        return Err(format!("file name '{}' cannot contain spaces", name));
    }
    if matches!(parts[0].0, Token::Dot | Token::FileExtension(_)) {
        return Err(format!("file name '{}' must not start with a dot", name));
    }
    match parts.last() {
        Some((token @ Token::FileExtension(extension), _)) if token.is_known_extension() => {
            Ok(FileDecl {
                name,
                extension: extension.clone(),
            })
        }
        _ => Err(format!("'{}' does not end in a known file extension", name)),
    }
}

fn component() -> impl Parser<TokenSpan, Statement, Error = ParserError> + Clone {
    filter_map(|span, (tok, _): TokenSpan| match tok {
        Token::Component(name) => Ok(Statement::Component(ComponentDecl { name })),
        other => Err(Simple::custom(
            span,
            format!("expected a component, found '{}'", other),
        )),
    })
}

fn function() -> impl Parser<TokenSpan, Statement, Error = ParserError> + Clone {
    filter_map(|span, (tok, _): TokenSpan| match tok {
        Token::Function(name) => Ok(Statement::Function(FunctionDecl { name })),
        other => Err(Simple::custom(
            span,
            format!("expected a function, found '{}'", other),
        )),
    })
}

/// `name = value`, value being a string, number or identifier
fn variable() -> impl Parser<TokenSpan, Statement, Error = ParserError> + Clone {
    let value = filter_map(|span, (tok, _): TokenSpan| match tok {
        Token::StringLiteral(value) | Token::Number(value) | Token::Identifier(value) => {
            Ok(value)
        }
        other => Err(Simple::custom(
            span,
            format!("expected a value after '=', found '{}'", other),
        )),
    });

    name()
        .then_ignore(token(Token::Equals))
        .then(value)
        .map(|(name, value)| Statement::Variable(VariableDecl { name, value }))
}

fn reference() -> impl Parser<TokenSpan, Statement, Error = ParserError> + Clone {
    filter_map(|span, (tok, _): TokenSpan| match tok {
        Token::Reference(name) => Ok(Statement::Reference(ReferenceDecl { name })),
        other => Err(Simple::custom(
            span,
            format!("expected a reference, found '{}'", other),
        )),
    })
}

fn note() -> impl Parser<TokenSpan, Statement, Error = ParserError> + Clone {
    filter_map(|span, (tok, _): TokenSpan| match tok {
        Token::Note(text) => Ok(Statement::Note(NoteDecl { text })),
        other => Err(Simple::custom(
            span,
            format!("expected a note, found '{}'", other),
        )),
    })
}
