//! Parent/child legality table

use crate::codoc::ast::NodeKind;

/// Kinds that may appear directly under `parent`
pub fn allowed_children(parent: NodeKind) -> &'static [NodeKind] {
    match parent {
        NodeKind::Directory => &[NodeKind::Directory, NodeKind::File],
        NodeKind::File => &[
            NodeKind::Function,
            NodeKind::Component,
            NodeKind::Reference,
            NodeKind::Note,
        ],
        NodeKind::Function | NodeKind::Component | NodeKind::Reference | NodeKind::Note => &[],
    }
}

pub fn is_legal_child(parent: NodeKind, child: NodeKind) -> bool {
    allowed_children(parent).contains(&child)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_rules() {
        assert!(is_legal_child(NodeKind::Directory, NodeKind::Directory));
        assert!(is_legal_child(NodeKind::Directory, NodeKind::File));
        assert!(!is_legal_child(NodeKind::Directory, NodeKind::Function));
    }

    #[test]
    fn test_file_rules() {
        assert!(is_legal_child(NodeKind::File, NodeKind::Function));
        assert!(is_legal_child(NodeKind::File, NodeKind::Note));
        assert!(!is_legal_child(NodeKind::File, NodeKind::File));
        assert!(!is_legal_child(NodeKind::File, NodeKind::Directory));
    }

    #[test]
    fn test_leaves_have_no_children() {
        for leaf in [
            NodeKind::Function,
            NodeKind::Component,
            NodeKind::Reference,
            NodeKind::Note,
        ] {
            assert!(allowed_children(leaf).is_empty());
        }
    }
}
