//! Structural diff between two outline forests
//!
//!     Nodes carry no identity across parses, so the diff reconstructs it. Two nodes
//!     are "the same" when they share a path; failing that, when they share a content
//!     hash. Hashing instead of comparing positions is what lets the engine tell a
//!     rename or a move apart from an unrelated removal plus addition.
//!
//!     The passes, in order:
//!
//!         1. Same path: pair nodes by path, report a modification when their
//!            comparable hashes differ.
//!         2. Buckets: queue every unpaired old node under its comparable hash,
//!            keeping pre-order.
//!         3. Resolution: every unpaired new node takes the oldest old node from its
//!            hash bucket (a rename or move), or is an addition.
//!         4. Removals: old nodes that were never paired.
//!         5. Refactors: extract, inline and split patterns inferred from the above.
//!
//!     Duplicate content is resolved first come, first served. That is deterministic,
//!     but two identical lines that both move can pair up crosswise.
//!
//!     See [engine] for the passes, [classify] for rename versus move, and [refactor]
//!     for the heuristics.

pub mod classify;
pub mod engine;
pub mod refactor;

pub use classify::classify_relocation;
pub use engine::{comparable_hash, diff_forests, diff_forests_with};
pub use refactor::{detect_refactors, names_similar};

use serde::{Deserialize, Serialize};

use crate::codoc::ast::node::owning_file_of;
use crate::codoc::ast::{NodeKind, SchemaNode};

/// Confidence of every exact classification
pub const EXACT_CONFIDENCE: f64 = 1.0;

/// How a rename/move pair is told apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoveDetection {
    /// Compare the owning container: the owning file for functions, components,
    /// references and notes; the parent directory for directories and files.
    #[default]
    OwningFile,
    /// Compare the raw path with its last `/` segment dropped. A function that moves
    /// between two files of the same directory is reported as a rename.
    PathPrefix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOptions {
    pub move_detection: MoveDetection,
    pub detect_refactors: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            move_detection: MoveDetection::default(),
            detect_refactors: true,
        }
    }
}

/// Owned copy of the node fields a change report needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangedNode {
    pub kind: NodeKind,
    pub name: String,
    pub path: String,
    pub line_number: usize,
    pub column: usize,
    pub indent_level: usize,
    pub content_hash: String,
    pub content: Option<String>,
}

impl ChangedNode {
    pub fn from_node(node: &SchemaNode) -> Self {
        Self {
            kind: node.kind,
            name: node.name.clone(),
            path: node.path.clone(),
            line_number: node.line_number,
            column: node.column,
            indent_level: node.indent_level,
            content_hash: node.content_hash.clone(),
            content: node.content.clone(),
        }
    }

    pub fn owning_file(&self) -> &str {
        owning_file_of(&self.path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Modification {
    pub before: ChangedNode,
    pub after: ChangedNode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelocationKind {
    Rename,
    Move,
}

/// A node whose content survived under a different path
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relocation {
    pub from: ChangedNode,
    pub to: ChangedNode,
    pub kind: RelocationKind,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RefactorKind {
    Extract,
    Inline,
    Split,
}

impl RefactorKind {
    pub fn confidence(self) -> f64 {
        match self {
            RefactorKind::Extract => 0.8,
            RefactorKind::Inline => 0.7,
            RefactorKind::Split => 0.75,
        }
    }
}

/// A heuristically detected refactor.
///
/// `subject` is the extracted function, or the removed one for inline and split.
/// `related` names the modified functions (extract, inline) or the split targets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Refactor {
    pub kind: RefactorKind,
    pub file: String,
    pub subject: ChangedNode,
    pub related: Vec<String>,
    pub confidence: f64,
}

/// Classified changes between an old and a new forest
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StructuralDiff {
    pub added: Vec<ChangedNode>,
    pub removed: Vec<ChangedNode>,
    pub modified: Vec<Modification>,
    pub renamed: Vec<Relocation>,
    pub refactors: Vec<Refactor>,
}

impl StructuralDiff {
    /// True when no node was added, removed, modified, renamed or moved
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.modified.is_empty()
            && self.renamed.is_empty()
    }

    /// Number of exact changes, refactor annotations excluded
    pub fn total_changes(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len() + self.renamed.len()
    }

    pub fn moves(&self) -> impl Iterator<Item = &Relocation> {
        self.renamed
            .iter()
            .filter(|relocation| relocation.kind == RelocationKind::Move)
    }

    pub fn renames(&self) -> impl Iterator<Item = &Relocation> {
        self.renamed
            .iter()
            .filter(|relocation| relocation.kind == RelocationKind::Rename)
    }
}
