//! Human readable change lines

use crate::codoc::diff::{RefactorKind, RelocationKind, StructuralDiff};

/// One line per change, in the same order as the flattened change list.
/// An empty diff describes to no lines.
pub fn describe(diff: &StructuralDiff) -> Vec<String> {
    let mut lines = Vec::new();

    for node in &diff.added {
        lines.push(format!("+ Added {} {} at {}", node.kind.label(), node.name, node.path));
    }
    for node in &diff.removed {
        lines.push(format!(
            "- Removed {} {} from {}",
            node.kind.label(),
            node.name,
            node.path
        ));
    }
    for modification in &diff.modified {
        let node = &modification.after;
        lines.push(format!(
            "~ Modified {} {} at {}",
            node.kind.label(),
            node.name,
            node.path
        ));
    }
    for relocation in &diff.renamed {
        let line = match relocation.kind {
            RelocationKind::Rename => format!(
                "→ Renamed {} {} to {} ({})",
                relocation.to.kind.label(),
                relocation.from.name,
                relocation.to.name,
                relocation.to.path
            ),
            RelocationKind::Move => format!(
                "⇢ Moved {} {} from {} to {}",
                relocation.to.kind.label(),
                relocation.to.name,
                relocation.from.path,
                relocation.to.path
            ),
        };
        lines.push(line);
    }
    for refactor in &diff.refactors {
        let detail = match refactor.kind {
            RefactorKind::Extract => format!(
                "{} extracted from {}",
                refactor.subject.name,
                refactor.related.join(", ")
            ),
            RefactorKind::Inline => format!(
                "{} inlined into {}",
                refactor.subject.name,
                refactor.related.join(", ")
            ),
            RefactorKind::Split => format!(
                "{} split into {}",
                refactor.subject.name,
                refactor.related.join(", ")
            ),
        };
        lines.push(format!(
            "⟳ Refactor in {}: {} (confidence {:.2})",
            refactor.file, detail, refactor.confidence
        ));
    }

    lines
}
