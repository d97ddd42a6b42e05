//! Treeviz formatter for outline forests
//!
//! One line per node, nesting shown as 2 spaces per level:
//!
//!     <line number> │ <indentation><icon> <name>
//!
//! Icons
//!     Directory: ▸
//!     File: ≡
//!     Function: ƒ
//!     Component: ◇
//!     Reference: @
//!     Note: #

use crate::codoc::ast::{Forest, NodeId, NodeKind};

fn icon(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Directory => "▸",
        NodeKind::File => "≡",
        NodeKind::Function => "ƒ",
        NodeKind::Component => "◇",
        NodeKind::Reference => "@",
        NodeKind::Note => "#",
    }
}

pub fn to_treeviz_str(forest: &Forest, show_line_numbers: bool) -> String {
    let mut output = String::new();
    for root in forest.roots() {
        write_node(forest, *root, 0, show_line_numbers, &mut output);
    }
    output
}

fn write_node(
    forest: &Forest,
    id: NodeId,
    depth: usize,
    show_line_numbers: bool,
    output: &mut String,
) {
    let node = &forest[id];
    if show_line_numbers {
        output.push_str(&format!("{:>4} │ ", node.line_number));
    }
    output.push_str(&"  ".repeat(depth));
    output.push_str(&format!("{} {}\n", icon(node.kind), node.name));

    for child in forest.children(id) {
        write_node(forest, *child, depth + 1, show_line_numbers, output);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codoc::building::parse_outline;

    #[test]
    fn test_treeviz_without_line_numbers() {
        let forest = parse_outline("/src\n  app.tsx\n    %App\n    # entry\n").forest;
        assert_eq!(
            to_treeviz_str(&forest, false),
            "▸ src\n  ≡ app.tsx\n    ◇ App\n    # entry\n"
        );
    }

    #[test]
    fn test_treeviz_with_line_numbers() {
        let forest = parse_outline("/src\n\n  a.ts\n").forest;
        assert_eq!(
            to_treeviz_str(&forest, true),
            "   1 │ ▸ src\n   3 │   ≡ a.ts\n"
        );
    }
}
