//! Token definitions for the codoc outline format
//!
//! Tokens are produced by the logos derive. Logos resolves overlapping rules by
//! longest match first and rule priority second, so a bare `#` can never be
//! swallowed by a longer rule and `varName` wins over the generic identifier.

use logos::{Lexer, Logos};
use serde::Serialize;
use std::fmt;

/// File extensions recognized by the file statement
pub const FILE_EXTENSIONS: &[&str] = &[
    "ts", "tsx", "js", "jsx", "json", "css", "scss", "html", "md", "py", "java", "cpp", "c",
    "go", "rs", "rb", "php", "yaml", "yml", "xml", "sql", "sh", "bash",
];

/// All possible tokens in a single outline line
#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone, Serialize)]
#[logos(skip r"[ \t\f]+")]
pub enum Token {
    /// `#` followed by free text. The callback consumes the rest of the line.
    #[token("#", note_text)]
    Note(String),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| unquote(lex.slice()))]
    StringLiteral(String),

    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().to_string())]
    Number(String),

    /// `%Name`
    #[regex(r"%[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice()[1..].to_string())]
    Component(String),

    /// `varName`, the conventional prefix of a variable statement
    #[regex(r"var[A-Z][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Variable(String),

    /// `@name(.name)*`
    #[regex(r"@[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*", |lex| lex.slice()[1..].to_string())]
    Reference(String),

    /// `$name()`
    #[regex(r"\$[A-Za-z_][A-Za-z0-9_]*\(\)", |lex| {
        let slice = lex.slice();
        slice[1..slice.len() - 2].to_string()
    })]
    Function(String),

    /// `.word`: a dotted file name segment. The grammar accepts it as the
    /// extension of a file only when the word is one of [FILE_EXTENSIONS].
    #[regex(r"\.[A-Za-z0-9_]+", |lex| lex.slice()[1..].to_string())]
    FileExtension(String),

    #[token("/")]
    Slash,

    #[token("=")]
    Equals,

    #[token(".")]
    Dot,

    #[regex(r"[A-Za-z_][A-Za-z0-9_\-]*", |lex| lex.slice().to_string())]
    Identifier(String),

    /// Rest of the line from the first fragment no other rule accepts. Emitted by
    /// the line tokenizer, never by the logos rules themselves.
    Content(String),
}

fn note_text(lex: &mut Lexer<Token>) -> String {
    let rest = lex.remainder();
    let len = rest.find('\n').unwrap_or(rest.len());
    let text = rest[..len].trim().to_string();
    lex.bump(len);
    text
}

fn unquote(slice: &str) -> String {
    slice[1..slice.len() - 1].to_string()
}

impl Token {
    /// Check if this token opens a statement on its own (`#`, `%`, `$`, `@`, `/`)
    pub fn is_marker(&self) -> bool {
        matches!(
            self,
            Token::Note(_)
                | Token::Component(_)
                | Token::Function(_)
                | Token::Reference(_)
                | Token::Slash
        )
    }

    /// Check if this token can be the value of a variable statement
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Token::StringLiteral(_) | Token::Number(_) | Token::Identifier(_)
        )
    }

    /// Check if this token is a `.ext` segment naming a known file extension
    pub fn is_known_extension(&self) -> bool {
        matches!(self, Token::FileExtension(ext) if FILE_EXTENSIONS.contains(&ext.as_str()))
    }

    /// Check if this token can be part of a file name
    pub fn is_file_name_part(&self) -> bool {
        matches!(
            self,
            Token::Identifier(_)
                | Token::Variable(_)
                | Token::Number(_)
                | Token::Dot
                | Token::FileExtension(_)
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Note(text) if text.is_empty() => write!(f, "#"),
            Token::Note(text) => write!(f, "# {}", text),
            Token::StringLiteral(s) => write!(f, "\"{}\"", s),
            Token::Number(n) => write!(f, "{}", n),
            Token::Component(name) => write!(f, "%{}", name),
            Token::Variable(name) => write!(f, "{}", name),
            Token::Reference(name) => write!(f, "@{}", name),
            Token::Function(name) => write!(f, "${}()", name),
            Token::FileExtension(ext) => write!(f, ".{}", ext),
            Token::Slash => write!(f, "/"),
            Token::Equals => write!(f, "="),
            Token::Dot => write!(f, "."),
            Token::Identifier(name) => write!(f, "{}", name),
            Token::Content(text) => write!(f, "{}", text),
        }
    }
}
