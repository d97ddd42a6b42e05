//! Rename versus move

use super::{ChangedNode, MoveDetection, RelocationKind};
use crate::codoc::ast::node::owning_file_of;

/// Classify a pair of nodes that share content but not a path.
///
/// A pair whose container differs is a move; otherwise it is a rename.
pub fn classify_relocation(
    from: &ChangedNode,
    to: &ChangedNode,
    detection: MoveDetection,
) -> RelocationKind {
    let same_container = match detection {
        MoveDetection::OwningFile => container_of(from) == container_of(to),
        MoveDetection::PathPrefix => path_prefix(&from.path) == path_prefix(&to.path),
    };

    if same_container {
        RelocationKind::Rename
    } else {
        RelocationKind::Move
    }
}

fn container_of(node: &ChangedNode) -> &str {
    if node.kind.is_container() {
        path_prefix(&node.path)
    } else {
        owning_file_of(&node.path)
    }
}

/// The path with its last `/` segment dropped
fn path_prefix(path: &str) -> &str {
    match path.rfind('/') {
        Some(index) => &path[..index],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codoc::ast::NodeKind;

    fn node(kind: NodeKind, name: &str, path: &str) -> ChangedNode {
        ChangedNode {
            kind,
            name: name.to_string(),
            path: path.to_string(),
            line_number: 1,
            column: 0,
            indent_level: 0,
            content_hash: "0000000000000000".to_string(),
            content: None,
        }
    }

    #[test]
    fn test_function_between_sibling_files_is_a_move() {
        let from = node(NodeKind::Function, "validate", "src/utils.ts#validate");
        let to = node(NodeKind::Function, "validate", "src/helpers.ts#validate");
        assert_eq!(
            classify_relocation(&from, &to, MoveDetection::OwningFile),
            RelocationKind::Move
        );
        assert_eq!(
            classify_relocation(&from, &to, MoveDetection::PathPrefix),
            RelocationKind::Rename
        );
    }

    #[test]
    fn test_function_renamed_in_place() {
        let from = node(NodeKind::Function, "check", "src/utils.ts#check");
        let to = node(NodeKind::Function, "validate", "src/utils.ts#validate");
        for detection in [MoveDetection::OwningFile, MoveDetection::PathPrefix] {
            assert_eq!(
                classify_relocation(&from, &to, detection),
                RelocationKind::Rename
            );
        }
    }

    #[test]
    fn test_file_between_directories() {
        let from = node(NodeKind::File, "a.ts", "src/a.ts");
        let to = node(NodeKind::File, "a.ts", "lib/a.ts");
        for detection in [MoveDetection::OwningFile, MoveDetection::PathPrefix] {
            assert_eq!(
                classify_relocation(&from, &to, detection),
                RelocationKind::Move
            );
        }
    }

    #[test]
    fn test_top_level_paths() {
        assert_eq!(path_prefix("a.ts"), "");
        assert_eq!(path_prefix("src/lib/a.ts"), "src/lib");
    }
}
