//! Arena that owns every node of one parse

use serde::Serialize;
use std::collections::HashMap;
use std::ops::Index;

use super::node::{NodeKind, SchemaNode};

/// Index of a node inside its [Forest]. Only meaningful for the forest that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A set of top-level node trees.
///
/// Nodes are only ever appended, and a node gets at most one parent, so the structure
/// cannot contain cycles.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Forest {
    nodes: Vec<SchemaNode>,
    roots: Vec<NodeId>,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a detached node. It becomes part of the tree structure once it is either
    /// attached to a parent or promoted to a root.
    pub fn push(&mut self, mut node: SchemaNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.children.clear();
        node.parent = None;
        self.nodes.push(node);
        id
    }

    /// Make `child` the last child of `parent`. A node that already has a parent is
    /// left untouched.
    pub fn attach(&mut self, child: NodeId, parent: NodeId) {
        if child == parent || self.nodes[child.0].parent.is_some() {
            return;
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    pub fn add_root(&mut self, id: NodeId) {
        if self.nodes[id.0].parent.is_none() && !self.roots.contains(&id) {
            self.roots.push(id);
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&SchemaNode> {
        self.nodes.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut SchemaNode> {
        self.nodes.get_mut(id.0)
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// All nodes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SchemaNode)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    /// Node ids in pre-order, roots in order, children in order.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        order
    }

    /// Ancestors of `id`, innermost first, excluding `id` itself.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    /// Nearest File ancestor, or the node itself when it is a file
    pub fn owning_file(&self, id: NodeId) -> Option<NodeId> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|candidate| self[*candidate].kind == NodeKind::File)
    }

    /// `/`-joined names of the directory and file chain ending at `id`.
    ///
    /// Non container ancestors are skipped, as are nodes with an empty name.
    pub fn container_path(&self, id: NodeId) -> String {
        let mut names: Vec<&str> = std::iter::once(id)
            .chain(self.ancestors(id))
            .map(|candidate| &self[candidate])
            .filter(|node| node.kind.is_container() && !node.name.is_empty())
            .map(|node| node.name.as_str())
            .collect();
        names.reverse();
        names.join("/")
    }

    /// First node, in pre-order, with the given path
    pub fn find_by_path(&self, path: &str) -> Option<NodeId> {
        self.preorder()
            .into_iter()
            .find(|id| self[*id].path == path)
    }

    /// Index by `(kind, path)`, built in pre-order. Later duplicates overwrite
    /// earlier ones. A note and a function of one file may share a path, so the kind
    /// is part of the key.
    pub fn path_index(&self) -> HashMap<(NodeKind, &str), NodeId> {
        let mut index = HashMap::with_capacity(self.nodes.len());
        for id in self.preorder() {
            index.insert((self[id].kind, self[id].path.as_str()), id);
        }
        index
    }

    /// Number of nodes reachable from the roots
    pub fn reachable_count(&self) -> usize {
        self.preorder().len()
    }
}

impl Index<NodeId> for Forest {
    type Output = SchemaNode;

    fn index(&self, id: NodeId) -> &SchemaNode {
        &self.nodes[id.0]
    }
}
