//! Core token types shared by the lexer and the line grammar.
//!
//!     CoDoc is a line oriented format: every statement fits on a single line and the
//!     hierarchy is carried by indentation alone. The lexer therefore never sees
//!     indentation or newlines. The tree builder strips leading spaces, and only the
//!     trimmed remainder of each line reaches the logos lexer.
//!
//!     Marker tokens ($, %, @, /, #) decide the statement shape, identifiers and the
//!     file extension allow-list carry names, and literals only appear on the right
//!     hand side of variable assignments. See [core] for the complete list.

pub mod core;

pub use core::{Token, FILE_EXTENSIONS};
