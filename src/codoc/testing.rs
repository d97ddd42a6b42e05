//! Testing utilities for outline forests and diffs
//!
//! Tests should assert on structure through the fluent API instead of indexing into
//! the arena by hand:
//!
//! ```rust,ignore
//! let result = parse_outline("/src\n  utils.ts\n    $foo()\n");
//! assert_forest(&result.forest)
//!     .root_count(1)
//!     .root(0, |dir| {
//!         dir.kind(NodeKind::Directory)
//!             .name("src")
//!             .child(0, |file| {
//!                 file.path("src/utils.ts").child_count(1);
//!             });
//!     });
//! ```
//!
//! Every assertion carries a context string (`roots[0]:children[1]`) so a failure
//! points at the node that broke.

mod diff_assertions;
mod forest_assertions;

pub use diff_assertions::{assert_diff, DiffAssertion};
pub use forest_assertions::{assert_forest, ForestAssertion, NodeAssertion};
