//! SchemaNode, the single element type of a parsed outline

use serde::Serialize;
use std::fmt;

use super::forest::NodeId;

/// Discriminates the elements an outline can describe.
///
/// Variable statements are parsed but never become nodes, so there is no variant
/// for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Directory,
    File,
    Function,
    Component,
    Reference,
    Note,
}

impl NodeKind {
    /// Directories and files form the `/`-joined path chain; everything else hangs
    /// off a file with a `#` suffix.
    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Directory | NodeKind::File)
    }

    /// Lowercase name used in change descriptions
    pub fn label(self) -> &'static str {
        match self {
            NodeKind::Directory => "directory",
            NodeKind::File => "file",
            NodeKind::Function => "function",
            NodeKind::Component => "component",
            NodeKind::Reference => "reference",
            NodeKind::Note => "note",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Directory => "Directory",
            NodeKind::File => "File",
            NodeKind::Function => "Function",
            NodeKind::Component => "Component",
            NodeKind::Reference => "Reference",
            NodeKind::Note => "Note",
        };
        write!(f, "{}", name)
    }
}

/// One parsed outline element.
///
/// `children` and `parent` are maintained by the owning [Forest](super::Forest);
/// they are ids into its arena.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaNode {
    pub kind: NodeKind,
    /// Bare name: directory or file name, function or component name, dotted
    /// reference target, or the note text
    pub name: String,
    /// Canonical identity, see the tree builder for how it is derived
    pub path: String,
    /// Only set for files
    pub extension: Option<String>,
    /// Only set for notes
    pub content: Option<String>,
    /// 1-based source line
    pub line_number: usize,
    /// Indentation column (`indent_level` times the indent width)
    pub column: usize,
    pub indent_level: usize,
    pub dependencies: Vec<String>,
    pub dependents: Vec<String>,
    pub content_hash: String,
    #[serde(skip)]
    pub(crate) children: Vec<NodeId>,
    #[serde(skip)]
    pub(crate) parent: Option<NodeId>,
}

impl SchemaNode {
    pub fn new(kind: NodeKind, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind,
            path: name.clone(),
            name,
            extension: None,
            content: None,
            line_number: 0,
            column: 0,
            indent_level: 0,
            dependencies: Vec::new(),
            dependents: Vec::new(),
            content_hash: String::new(),
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.content_hash = hash.into();
        self
    }

    pub fn with_position(mut self, line_number: usize, column: usize) -> Self {
        self.line_number = line_number;
        self.column = column;
        self
    }

    pub fn with_dependencies(mut self, dependencies: Vec<String>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Path of the file a `#`-suffixed path belongs to; the path itself otherwise.
    pub fn owning_file_path(&self) -> &str {
        owning_file_of(&self.path)
    }
}

/// Strip everything from the first `#` on.
pub fn owning_file_of(path: &str) -> &str {
    match path.find('#') {
        Some(index) => &path[..index],
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_defaults_path_to_name() {
        let node = SchemaNode::new(NodeKind::File, "utils.ts").with_extension("ts");
        assert_eq!(node.path, "utils.ts");
        assert_eq!(node.extension.as_deref(), Some("ts"));
        assert!(node.is_root());
        assert!(node.children().is_empty());
    }

    #[test]
    fn test_owning_file_path() {
        let mut node = SchemaNode::new(NodeKind::Function, "foo");
        node.path = "src/utils.ts#foo".to_string();
        assert_eq!(node.owning_file_path(), "src/utils.ts");
        assert_eq!(owning_file_of("src/utils.ts"), "src/utils.ts");
    }

    #[test]
    fn test_kind_helpers() {
        assert!(NodeKind::Directory.is_container());
        assert!(NodeKind::File.is_container());
        assert!(!NodeKind::Note.is_container());
        assert_eq!(NodeKind::Component.to_string(), "Component");
        assert_eq!(NodeKind::Component.label(), "component");
    }
}
