//! Diff assertions

use crate::codoc::diff::{RefactorKind, RelocationKind, StructuralDiff};

/// Create an assertion builder for a diff
pub fn assert_diff(diff: &StructuralDiff) -> DiffAssertion<'_> {
    DiffAssertion { diff }
}

pub struct DiffAssertion<'a> {
    diff: &'a StructuralDiff,
}

fn paths<'a>(nodes: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    nodes.collect()
}

impl<'a> DiffAssertion<'a> {
    pub fn is_empty(self) -> Self {
        assert!(self.diff.is_empty(), "Expected no changes, got {:#?}", self.diff);
        self
    }

    pub fn added(self, expected: &[&str]) -> Self {
        let actual = paths(self.diff.added.iter().map(|n| n.path.as_str()));
        assert_eq!(actual, expected, "Unexpected additions");
        self
    }

    pub fn removed(self, expected: &[&str]) -> Self {
        let actual = paths(self.diff.removed.iter().map(|n| n.path.as_str()));
        assert_eq!(actual, expected, "Unexpected removals");
        self
    }

    pub fn modified(self, expected: &[&str]) -> Self {
        let actual = paths(self.diff.modified.iter().map(|m| m.after.path.as_str()));
        assert_eq!(actual, expected, "Unexpected modifications");
        self
    }

    /// Assert the exact list of `(from, to, kind)` relocations
    pub fn relocated(self, expected: &[(&str, &str, RelocationKind)]) -> Self {
        let actual: Vec<(&str, &str, RelocationKind)> = self
            .diff
            .renamed
            .iter()
            .map(|r| (r.from.path.as_str(), r.to.path.as_str(), r.kind))
            .collect();
        assert_eq!(actual, expected, "Unexpected renames or moves");
        self
    }

    pub fn refactor_count(self, expected: usize) -> Self {
        assert_eq!(
            self.diff.refactors.len(),
            expected,
            "Expected {} refactors, got {:#?}",
            expected,
            self.diff.refactors
        );
        self
    }

    /// Assert a refactor of `kind` on `subject` exists and involves `related`
    pub fn has_refactor(self, kind: RefactorKind, subject: &str, related: &[&str]) -> Self {
        let found = self.diff.refactors.iter().any(|refactor| {
            refactor.kind == kind
                && refactor.subject.name == subject
                && refactor.related.iter().map(String::as_str).eq(related.iter().copied())
        });
        assert!(
            found,
            "Expected {:?} refactor of '{}' with {:?}, got {:#?}",
            kind, subject, related, self.diff.refactors
        );
        self
    }
}
