//! # codoc
//!
//! The structural engine for the CoDoc outline format.
//!
//! CoDoc is a compact, indentation based outline of a codebase: directories, files,
//! functions, components, cross references and notes, one statement per line. This
//! crate turns that text into a validated node forest and compares two forests
//! structurally.
//!
//! Layout
//!
//! src/codoc
//!   ├── token      Core tokens produced by the logos lexer
//!   ├── lexing     Single line tokenization and incomplete-input detection
//!   ├── parsing    Line grammar: token stream to a typed statement
//!   ├── ast        SchemaNode arena, content hashing and diagnostics
//!   ├── building   Indentation stack tree builder with auto-correction
//!   ├── analysis   Forest construction from scanner snapshots
//!   ├── diff       Hash-bucket structural diff engine
//!   ├── formats    Change formatter and tree visualisation
//!   └── testing    Fluent assertions used by the test suites
//!
//! Everything here is pure: parse and diff calls allocate their own state and can
//! run concurrently over different inputs.

pub mod codoc;

pub use codoc::ast::{Diagnostic, DiagnosticSeverity, Forest, NodeId, NodeKind, SchemaNode};
pub use codoc::building::{parse_outline, parse_outline_with, ParseOptions, ParseResult};
pub use codoc::diff::{diff_forests, diff_forests_with, DiffOptions, MoveDetection, StructuralDiff};
