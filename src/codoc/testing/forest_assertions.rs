//! Forest and node assertions

use crate::codoc::ast::{Forest, NodeId, NodeKind};

/// Create an assertion builder for a forest
pub fn assert_forest(forest: &Forest) -> ForestAssertion<'_> {
    ForestAssertion { forest }
}

fn summarize(forest: &Forest, ids: &[NodeId]) -> String {
    ids.iter()
        .map(|id| format!("{} {}", forest[*id].kind, forest[*id].name))
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct ForestAssertion<'a> {
    forest: &'a Forest,
}

impl<'a> ForestAssertion<'a> {
    pub fn root_count(self, expected: usize) -> Self {
        let roots = self.forest.roots();
        assert_eq!(
            roots.len(),
            expected,
            "Expected {} roots, found {}: [{}]",
            expected,
            roots.len(),
            summarize(self.forest, roots)
        );
        self
    }

    pub fn node_count(self, expected: usize) -> Self {
        assert_eq!(
            self.forest.len(),
            expected,
            "Expected {} nodes, found {}",
            expected,
            self.forest.len()
        );
        self
    }

    pub fn root<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let roots = self.forest.roots();
        assert!(
            index < roots.len(),
            "Root index {} out of bounds (forest has {} roots)",
            index,
            roots.len()
        );
        assertion(NodeAssertion {
            forest: self.forest,
            id: roots[index],
            context: format!("roots[{}]", index),
        });
        self
    }

    /// Assert on the first node, in pre-order, with the given path
    pub fn node_at<F>(self, path: &str, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let id = self
            .forest
            .find_by_path(path)
            .unwrap_or_else(|| panic!("No node with path '{}'", path));
        assertion(NodeAssertion {
            forest: self.forest,
            id,
            context: path.to_string(),
        });
        self
    }

    pub fn has_path(self, path: &str) -> Self {
        assert!(
            self.forest.find_by_path(path).is_some(),
            "Expected a node with path '{}'",
            path
        );
        self
    }
}

pub struct NodeAssertion<'a> {
    forest: &'a Forest,
    id: NodeId,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    pub fn kind(self, expected: NodeKind) -> Self {
        let actual = self.forest[self.id].kind;
        assert_eq!(
            actual, expected,
            "{}: Expected {}, found {}",
            self.context, expected, actual
        );
        self
    }

    pub fn name(self, expected: &str) -> Self {
        let actual = &self.forest[self.id].name;
        assert_eq!(
            actual, expected,
            "{}: Expected name '{}', but got '{}'",
            self.context, expected, actual
        );
        self
    }

    pub fn path(self, expected: &str) -> Self {
        let actual = &self.forest[self.id].path;
        assert_eq!(
            actual, expected,
            "{}: Expected path '{}', but got '{}'",
            self.context, expected, actual
        );
        self
    }

    pub fn line(self, expected: usize) -> Self {
        let actual = self.forest[self.id].line_number;
        assert_eq!(
            actual, expected,
            "{}: Expected line {}, but got {}",
            self.context, expected, actual
        );
        self
    }

    pub fn column(self, expected: usize) -> Self {
        let actual = self.forest[self.id].column;
        assert_eq!(
            actual, expected,
            "{}: Expected column {}, but got {}",
            self.context, expected, actual
        );
        self
    }

    pub fn extension(self, expected: &str) -> Self {
        let actual = self.forest[self.id].extension.as_deref();
        assert_eq!(
            actual,
            Some(expected),
            "{}: Expected extension '{}', but got {:?}",
            self.context,
            expected,
            actual
        );
        self
    }

    pub fn dependencies(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.forest[self.id]
            .dependencies
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(
            actual, expected,
            "{}: Expected dependencies {:?}, but got {:?}",
            self.context, expected, actual
        );
        self
    }

    pub fn is_root(self) -> Self {
        assert!(
            self.forest.parent(self.id).is_none(),
            "{}: Expected a top-level node",
            self.context
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let children = self.forest.children(self.id);
        assert_eq!(
            children.len(),
            expected,
            "{}: Expected {} children, found {} children: [{}]",
            self.context,
            expected,
            children.len(),
            summarize(self.forest, children)
        );
        self
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let children = self.forest.children(self.id);
        assert!(
            index < children.len(),
            "{}: Child index {} out of bounds (node has {} children)",
            self.context,
            index,
            children.len()
        );
        assertion(NodeAssertion {
            forest: self.forest,
            id: children[index],
            context: format!("{}:children[{}]", self.context, index),
        });
        self
    }
}
