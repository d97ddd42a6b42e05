//! Refactor heuristics
//!
//! Best effort patterns over the exact changes of one file:
//!
//!     Extract  an added function next to a modified one
//!     Inline   a removed function next to a modified one
//!     Split    a removed function and two or more added functions with similar names
//!
//! "Same file" compares the part of the path before `#`.

use std::collections::{HashMap, HashSet};

use super::{ChangedNode, Modification, Refactor, RefactorKind};
use crate::codoc::ast::NodeKind;

pub fn detect_refactors(
    added: &[ChangedNode],
    removed: &[ChangedNode],
    modified: &[Modification],
) -> Vec<Refactor> {
    let mut modified_by_file: HashMap<&str, Vec<String>> = HashMap::new();
    for modification in modified {
        if modification.after.kind == NodeKind::Function {
            modified_by_file
                .entry(modification.after.owning_file())
                .or_default()
                .push(modification.after.name.clone());
        }
    }

    let added_functions: Vec<&ChangedNode> = added
        .iter()
        .filter(|node| node.kind == NodeKind::Function)
        .collect();
    let removed_functions: Vec<&ChangedNode> = removed
        .iter()
        .filter(|node| node.kind == NodeKind::Function)
        .collect();

    let mut refactors = Vec::new();

    for node in &added_functions {
        if let Some(names) = modified_by_file.get(node.owning_file()) {
            refactors.push(refactor(RefactorKind::Extract, node, names.clone()));
        }
    }

    for node in &removed_functions {
        if let Some(names) = modified_by_file.get(node.owning_file()) {
            refactors.push(refactor(RefactorKind::Inline, node, names.clone()));
        }
    }

    for node in &removed_functions {
        let targets: Vec<String> = added_functions
            .iter()
            .filter(|candidate| candidate.owning_file() == node.owning_file())
            .filter(|candidate| names_similar(&node.name, &candidate.name))
            .map(|candidate| candidate.name.clone())
            .collect();
        if targets.len() >= 2 {
            refactors.push(refactor(RefactorKind::Split, node, targets));
        }
    }

    refactors
}

fn refactor(kind: RefactorKind, subject: &ChangedNode, related: Vec<String>) -> Refactor {
    Refactor {
        kind,
        file: subject.owning_file().to_string(),
        subject: subject.clone(),
        related,
        confidence: kind.confidence(),
    }
}

/// Substring containment either way, or at least two shared words.
pub fn names_similar(left: &str, right: &str) -> bool {
    let left_lower = left.to_lowercase();
    let right_lower = right.to_lowercase();
    if left_lower.is_empty() || right_lower.is_empty() {
        return false;
    }
    if left_lower.contains(&right_lower) || right_lower.contains(&left_lower) {
        return true;
    }

    let left_words: HashSet<String> = split_words(left).into_iter().collect();
    let right_words: HashSet<String> = split_words(right).into_iter().collect();
    left_words.intersection(&right_words).count() >= 2
}

/// Lowercase words of an identifier, split on `_` and camel case boundaries.
fn split_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut previous: Option<char> = None;

    for c in name.chars() {
        if c == '_' || c == '-' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            previous = None;
            continue;
        }
        let boundary = c.is_uppercase()
            && previous.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit());
        if boundary && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.extend(c.to_lowercase());
        previous = Some(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}
