//! Tree building
//!
//!     Turns outline text into a [Forest](crate::codoc::ast::Forest). Each line is lexed
//!     and parsed on its own; the hierarchy comes from indentation, reduced with a
//!     stack of `(node, indent level)` pairs the way a Python style block parser does.
//!
//!     Structural problems are never fatal. A node whose kind is not allowed under the
//!     nearest enclosing node is re-parented to the closest legal ancestor, or made
//!     top-level when there is none, and a diagnostic records the correction. Only
//!     lines that fail to lex or parse are dropped.
//!
//!     See [rules] for the parent/child table and [tree_builder] for the algorithm.

pub mod rules;
pub mod tree_builder;

pub use rules::{allowed_children, is_legal_child};
pub use tree_builder::TreeBuilder;

use crate::codoc::ast::{Diagnostic, Forest};

/// Default number of spaces per indentation level
pub const DEFAULT_INDENT_WIDTH: usize = 2;

/// Knobs for a single parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Spaces per indentation level. Zero is treated as one.
    pub indent_width: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }
}

/// The forest built from one source text plus everything noticed on the way
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseResult {
    pub forest: Forest,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseResult {
    /// Diagnostics in their `Line N: <message>` form
    pub fn diagnostic_strings(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }

    /// True when at least one line was dropped for a syntax error
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Parse outline text with the default options
pub fn parse_outline(source: &str) -> ParseResult {
    parse_outline_with(source, &ParseOptions::default())
}

/// Parse outline text
pub fn parse_outline_with(source: &str, options: &ParseOptions) -> ParseResult {
    TreeBuilder::new(options).build(source)
}
