//! Forests from scanner snapshots
//!
//! The source scanner reports, per file path, the elements it found. This module turns
//! such a snapshot into the same [Forest] the outline parser produces, so the diff
//! engine can compare a scanned codebase against an earlier scan.
//!
//! Directories are derived from the `/`-separated file paths and carry no content
//! hash, so they are compared by shape. Files use the scanner's file hash. Functions
//! and components hash their normalized source text, and their calls and references
//! become dependencies.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::codoc::ast::{content_hash, Forest, NodeId, NodeKind, SchemaNode, HASH_LENGTH};

/// `file path -> file facts`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct AnalysisSnapshot {
    pub files: BTreeMap<String, FileAnalysis>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAnalysis {
    #[serde(default)]
    pub elements: Vec<CodeElement>,
    #[serde(default)]
    pub content_hash: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeElement {
    pub name: String,
    pub kind: ElementKind,
    #[serde(default)]
    pub line: usize,
    #[serde(default)]
    pub column: usize,
    #[serde(default)]
    pub is_exported: bool,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub calls: Vec<String>,
    #[serde(default)]
    pub references: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Function,
    Method,
    Component,
    Class,
    Variable,
    Import,
    Export,
    #[serde(other)]
    Other,
}

impl ElementKind {
    /// Node kind for the element, if it is materialized at all
    pub fn node_kind(self) -> Option<NodeKind> {
        match self {
            ElementKind::Function | ElementKind::Method => Some(NodeKind::Function),
            ElementKind::Component | ElementKind::Class => Some(NodeKind::Component),
            ElementKind::Variable | ElementKind::Import | ElementKind::Export | ElementKind::Other => {
                None
            }
        }
    }
}

/// Build a forest with one node per directory, file, function and component.
pub fn forest_from_snapshot(snapshot: &AnalysisSnapshot) -> Forest {
    let mut forest = Forest::new();
    let mut directories: HashMap<String, NodeId> = HashMap::new();

    for (file_path, file) in &snapshot.files {
        let segments: Vec<&str> = file_path.split('/').filter(|s| !s.is_empty()).collect();
        let Some((file_name, dir_segments)) = segments.split_last() else {
            continue;
        };

        let parent = directory_chain(&mut forest, &mut directories, dir_segments);
        let file_id = forest.push(file_node(file_name, &segments.join("/"), file));
        match parent {
            Some(parent) => forest.attach(file_id, parent),
            None => forest.add_root(file_id),
        }

        let owning_path = forest[file_id].path.clone();
        for element in &file.elements {
            let Some(kind) = element.kind.node_kind() else {
                continue;
            };
            let id = forest.push(element_node(kind, element, &owning_path));
            forest.attach(id, file_id);
        }
    }

    link_dependents(&mut forest);

    debug!(
        files = snapshot.files.len(),
        nodes = forest.len(),
        "built forest from analysis snapshot"
    );
    forest
}

/// Fill `dependents` from the `dependencies` of other elements, matched by name.
fn link_dependents(forest: &mut Forest) {
    let mut by_name: HashMap<String, Vec<NodeId>> = HashMap::new();
    for (id, node) in forest.iter() {
        if !node.kind.is_container() {
            by_name.entry(node.name.clone()).or_default().push(id);
        }
    }

    let mut links: Vec<(NodeId, String)> = Vec::new();
    for (_, node) in forest.iter() {
        for dependency in &node.dependencies {
            for target in by_name.get(dependency).into_iter().flatten() {
                links.push((*target, node.path.clone()));
            }
        }
    }

    for (target, dependent) in links {
        if let Some(node) = forest.get_mut(target) {
            if !node.dependents.contains(&dependent) {
                node.dependents.push(dependent);
            }
        }
    }
}

/// Create (or reuse) the directory nodes for `segments`, returning the innermost.
fn directory_chain(
    forest: &mut Forest,
    directories: &mut HashMap<String, NodeId>,
    segments: &[&str],
) -> Option<NodeId> {
    let mut parent: Option<NodeId> = None;
    for depth in 0..segments.len() {
        let path = segments[..=depth].join("/");
        let id = match directories.get(&path) {
            Some(id) => *id,
            None => {
                let mut node = SchemaNode::new(NodeKind::Directory, segments[depth]);
                node.path = path.clone();
                node.indent_level = depth;
                let id = forest.push(node);
                match parent {
                    Some(parent) => forest.attach(id, parent),
                    None => forest.add_root(id),
                }
                directories.insert(path, id);
                id
            }
        };
        parent = Some(id);
    }
    parent
}

fn file_node(name: &str, path: &str, file: &FileAnalysis) -> SchemaNode {
    let mut hash = file.content_hash.to_lowercase();
    hash.truncate(HASH_LENGTH);

    let mut node = SchemaNode::new(NodeKind::File, name).with_hash(hash);
    if let Some((_, extension)) = name.rsplit_once('.') {
        node = node.with_extension(extension);
    }
    node.path = path.to_string();
    node.indent_level = path.matches('/').count();
    node
}

fn element_node(kind: NodeKind, element: &CodeElement, file_path: &str) -> SchemaNode {
    let hash = if element.content.trim().is_empty() {
        String::new()
    } else {
        content_hash(&normalize_source(&element.content))
    };

    let mut dependencies: Vec<String> = Vec::new();
    for name in element.calls.iter().chain(&element.references) {
        if !dependencies.contains(name) {
            dependencies.push(name.clone());
        }
    }

    let mut node = SchemaNode::new(kind, element.name.clone())
        .with_hash(hash)
        .with_position(element.line, element.column)
        .with_dependencies(dependencies);
    node.path = format!("{}#{}", file_path, element.name);
    node.indent_level = file_path.matches('/').count() + 1;
    node
}

/// Collapse runs of whitespace so formatting-only edits do not change the hash.
fn normalize_source(source: &str) -> String {
    source.split_whitespace().collect::<Vec<_>>().join(" ")
}
