//! Node model for parsed outlines
//!
//! Everything the tree builder produces lives here:
//!
//!     - [SchemaNode]: one parsed element, discriminated by [NodeKind]
//!     - [Forest]: the arena that owns all nodes of one parse. Children are owned by
//!       the arena and referenced by [NodeId]; the parent link is a plain id, so
//!       walking upwards never affects ownership.
//!     - [content_hash]: the normalized line digest used as fuzzy identity when diffing
//!     - [Diagnostic]: advisory messages collected while building a forest

pub mod diagnostics;
pub mod forest;
pub mod hash;
pub mod node;

pub use diagnostics::{Diagnostic, DiagnosticSeverity};
pub use forest::{Forest, NodeId};
pub use hash::{content_hash, HASH_LENGTH};
pub use node::{NodeKind, SchemaNode};
