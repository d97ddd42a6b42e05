//! Property-based tests for the tree builder and the diff engine
//!
//! Outlines are generated line by line from a small vocabulary so that duplicate
//! names, odd indentation, illegal nesting and malformed lines all show up often.

use codoc::codoc::analysis::{
    forest_from_snapshot, AnalysisSnapshot, CodeElement, ElementKind, FileAnalysis,
};
use codoc::{diff_forests, parse_outline, NodeKind};
use proptest::prelude::*;
use std::collections::{BTreeMap, HashSet};

/// One generated line: leading spaces, statement shape, name
fn outline_line() -> impl Strategy<Value = String> {
    (0usize..9, 0usize..9, "[a-c][a-c0-9]{0,2}").prop_map(|(spaces, shape, name)| {
        let body = match shape {
            0 => format!("/{}", name),
            1 => format!("{}.ts", name),
            2 => format!("%{}", name),
            3 => format!("${}()", name),
            4 => format!("@{}.x", name),
            5 => format!("# {}", name),
            6 => "varX = 1".to_string(),
            7 => "$".to_string(),
            _ => format!("{} {}", name, name),
        };
        format!("{}{}", " ".repeat(spaces), body)
    })
}

fn outline() -> impl Strategy<Value = String> {
    prop::collection::vec(outline_line(), 0..24).prop_map(|lines| lines.join("\n"))
}

/// Scanner element with a small name pool and often no source text
fn code_element() -> impl Strategy<Value = CodeElement> {
    let kinds = prop::sample::select(vec![
        ElementKind::Function,
        ElementKind::Method,
        ElementKind::Component,
        ElementKind::Class,
        ElementKind::Variable,
    ]);
    let content = prop::sample::select(vec!["", " ", "return 1", "return 2"]);
    ("[ab]", kinds, content).prop_map(|(name, kind, content)| CodeElement {
        name,
        kind,
        line: 1,
        column: 0,
        is_exported: false,
        content: content.to_string(),
        calls: Vec::new(),
        references: Vec::new(),
    })
}

fn snapshot() -> impl Strategy<Value = AnalysisSnapshot> {
    let file = (
        prop::collection::vec(code_element(), 0..5),
        prop::sample::select(vec!["", "aaaa", "bbbb"]),
    )
        .prop_map(|(elements, hash)| FileAnalysis {
            elements,
            content_hash: hash.to_string(),
        });
    prop::collection::btree_map("(src/)?[xy]\\.ts", file, 0..4)
        .prop_map(|files: BTreeMap<String, FileAnalysis>| AnalysisSnapshot { files })
}

proptest! {
    #[test]
    fn diff_of_a_forest_with_itself_is_empty(source in outline()) {
        let forest = parse_outline(&source).forest;
        let diff = diff_forests(&forest, &forest);
        prop_assert!(diff.is_empty(), "{:#?}", diff);
    }

    #[test]
    fn diff_of_a_snapshot_forest_with_itself_is_empty(snapshot in snapshot()) {
        let forest = forest_from_snapshot(&snapshot);
        let diff = diff_forests(&forest, &forest);
        prop_assert!(diff.is_empty(), "{:#?}", diff);
    }

    #[test]
    fn reparsing_yields_identical_hashes(source in outline()) {
        let first = parse_outline(&source);
        let second = parse_outline(&source);
        let hashes = |forest: &codoc::Forest| -> Vec<String> {
            forest.preorder().into_iter().map(|id| forest[id].content_hash.clone()).collect()
        };
        prop_assert_eq!(hashes(&first.forest), hashes(&second.forest));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn directory_and_file_paths_are_unique(source in outline()) {
        let forest = parse_outline(&source).forest;
        let mut seen = HashSet::new();
        for id in forest.preorder() {
            let node = &forest[id];
            if matches!(node.kind, NodeKind::Directory | NodeKind::File) {
                prop_assert!(seen.insert(node.path.clone()), "duplicate path {}", node.path);
            }
        }
    }

    #[test]
    fn column_follows_leading_spaces(source in outline()) {
        let lines: Vec<&str> = source.lines().collect();
        let forest = parse_outline(&source).forest;
        for (_, node) in forest.iter() {
            let line = lines[node.line_number - 1];
            let leading = line.len() - line.trim_start_matches(' ').len();
            prop_assert_eq!(node.indent_level, leading / 2);
            prop_assert_eq!(node.column, node.indent_level * 2);
        }
    }

    #[test]
    fn relocated_paths_are_never_also_added(old in outline(), new in outline()) {
        let old = parse_outline(&old).forest;
        let new = parse_outline(&new).forest;
        let diff = diff_forests(&old, &new);

        let targets: HashSet<(NodeKind, &str)> = diff
            .renamed
            .iter()
            .map(|r| (r.to.kind, r.to.path.as_str()))
            .collect();
        for node in &diff.added {
            prop_assert!(
                !targets.contains(&(node.kind, node.path.as_str())),
                "{} is both",
                node.path
            );
        }
        for relocation in &diff.renamed {
            prop_assert_ne!(
                (relocation.from.kind, &relocation.from.path),
                (relocation.to.kind, &relocation.to.path)
            );
        }
    }

    #[test]
    fn every_old_node_is_accounted_for(old in outline(), new in outline()) {
        let old_forest = parse_outline(&old).forest;
        let new_forest = parse_outline(&new).forest;
        let diff = diff_forests(&old_forest, &new_forest);

        let new_ids: HashSet<(NodeKind, &str)> =
            new_forest.iter().map(|(_, n)| (n.kind, n.path.as_str())).collect();
        let removed: HashSet<(NodeKind, &str)> =
            diff.removed.iter().map(|n| (n.kind, n.path.as_str())).collect();
        let moved_away: HashSet<(NodeKind, &str)> =
            diff.renamed.iter().map(|r| (r.from.kind, r.from.path.as_str())).collect();
        for (_, node) in old_forest.iter() {
            let id = (node.kind, node.path.as_str());
            prop_assert!(
                new_ids.contains(&id) || removed.contains(&id) || moved_away.contains(&id),
                "{} vanished without a trace",
                node.path
            );
        }
    }
}
