//! Flattened change records
//!
//! A [StructuralDiff] groups changes by class. Consumers that replay changes one by
//! one want a single list instead, with refactor annotations inline. Every record
//! gets a fresh v4 id; all records of one call share the timestamp passed in.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::codoc::ast::NodeKind;
use crate::codoc::diff::{
    ChangedNode, Refactor, RefactorKind, Relocation, RelocationKind, StructuralDiff,
    EXACT_CONFIDENCE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Add,
    Remove,
    Modify,
    Rename,
    Move,
    Refactor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeElement {
    pub kind: NodeKind,
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AIChange {
    pub id: String,
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    pub element: ChangeElement,
    pub line_number: usize,
    pub indent_level: usize,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refactor_type: Option<RefactorKind>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<String>,
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
}

impl AIChange {
    fn for_node(change_type: ChangeType, node: &ChangedNode, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            change_type,
            element: ChangeElement {
                kind: node.kind,
                name: node.name.clone(),
                path: node.path.clone(),
            },
            line_number: node.line_number,
            indent_level: node.indent_level,
            content: node.content.clone().unwrap_or_else(|| node.name.clone()),
            from_path: None,
            to_path: None,
            from_name: None,
            to_name: None,
            refactor_type: None,
            related: Vec::new(),
            confidence: EXACT_CONFIDENCE,
            timestamp,
        }
    }

    fn for_relocation(relocation: &Relocation, timestamp: DateTime<Utc>) -> Self {
        let change_type = match relocation.kind {
            RelocationKind::Rename => ChangeType::Rename,
            RelocationKind::Move => ChangeType::Move,
        };
        let mut change = Self::for_node(change_type, &relocation.to, timestamp);
        change.from_path = Some(relocation.from.path.clone());
        change.to_path = Some(relocation.to.path.clone());
        change.from_name = Some(relocation.from.name.clone());
        change.to_name = Some(relocation.to.name.clone());
        change.confidence = relocation.confidence;
        change
    }

    fn for_refactor(refactor: &Refactor, timestamp: DateTime<Utc>) -> Self {
        let mut change = Self::for_node(ChangeType::Refactor, &refactor.subject, timestamp);
        change.refactor_type = Some(refactor.kind);
        change.related = refactor.related.clone();
        change.confidence = refactor.confidence;
        change
    }
}

/// Flatten a diff: additions, removals, modifications, renames and moves, then
/// refactor annotations.
pub fn to_ai_changes(diff: &StructuralDiff, timestamp: DateTime<Utc>) -> Vec<AIChange> {
    let mut changes = Vec::with_capacity(diff.total_changes() + diff.refactors.len());

    changes.extend(
        diff.added
            .iter()
            .map(|node| AIChange::for_node(ChangeType::Add, node, timestamp)),
    );
    changes.extend(
        diff.removed
            .iter()
            .map(|node| AIChange::for_node(ChangeType::Remove, node, timestamp)),
    );
    changes.extend(
        diff.modified
            .iter()
            .map(|modification| AIChange::for_node(ChangeType::Modify, &modification.after, timestamp)),
    );
    changes.extend(
        diff.renamed
            .iter()
            .map(|relocation| AIChange::for_relocation(relocation, timestamp)),
    );
    changes.extend(
        diff.refactors
            .iter()
            .map(|refactor| AIChange::for_refactor(refactor, timestamp)),
    );

    changes
}
