//! Hash-bucket matching passes

use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

use super::classify::classify_relocation;
use super::refactor::detect_refactors;
use super::{
    ChangedNode, DiffOptions, Modification, Relocation, StructuralDiff, EXACT_CONFIDENCE,
};
use crate::codoc::ast::{content_hash, Forest, NodeId, NodeKind};

/// Diff with the default options
pub fn diff_forests(old: &Forest, new: &Forest) -> StructuralDiff {
    diff_forests_with(old, new, &DiffOptions::default())
}

pub fn diff_forests_with(old: &Forest, new: &Forest, options: &DiffOptions) -> StructuralDiff {
    let old_order = old.preorder();
    let new_order = new.preorder();
    let old_index = old.path_index();
    let new_index = new.path_index();

    let mut old_matched: HashSet<NodeId> = HashSet::new();
    let mut new_matched: HashSet<NodeId> = HashSet::new();
    let mut modified = Vec::new();

    for &new_id in &new_order {
        let key = identity(new, new_id);
        if new_index.get(&key) != Some(&new_id) {
            continue;
        }
        let Some(&old_id) = old_index.get(&key) else {
            continue;
        };
        old_matched.insert(old_id);
        new_matched.insert(new_id);
        if comparable_hash(old, old_id) != comparable_hash(new, new_id) {
            modified.push(Modification {
                before: ChangedNode::from_node(&old[old_id]),
                after: ChangedNode::from_node(&new[new_id]),
            });
        }
    }

    // Unpaired old nodes: by hash when they have one, otherwise by identity so a
    // hashless duplicate can still meet its twin.
    let mut buckets: HashMap<String, VecDeque<NodeId>> = HashMap::new();
    let mut hashless: HashMap<(NodeKind, &str), VecDeque<NodeId>> = HashMap::new();
    for &old_id in &old_order {
        if old_matched.contains(&old_id) {
            continue;
        }
        match comparable_hash(old, old_id) {
            Some(hash) => buckets.entry(hash).or_default().push_back(old_id),
            None => hashless
                .entry(identity(old, old_id))
                .or_default()
                .push_back(old_id),
        }
    }

    let mut pairs: Vec<(NodeId, NodeId)> = Vec::new();
    let mut additions: Vec<NodeId> = Vec::new();
    for &new_id in &new_order {
        if new_matched.contains(&new_id) {
            continue;
        }
        let key = identity(new, new_id);
        let candidate = match comparable_hash(new, new_id) {
            Some(hash) => buckets.get_mut(&hash).and_then(VecDeque::pop_front),
            None => hashless.get_mut(&key).and_then(VecDeque::pop_front),
        };
        match candidate {
            Some(old_id) => {
                old_matched.insert(old_id);
                new_matched.insert(new_id);
                pairs.push((old_id, new_id));
            }
            None if !old_index.contains_key(&key) => {
                additions.push(new_id);
            }
            None => {}
        }
    }

    let removed: Vec<ChangedNode> = old_order
        .iter()
        .filter(|id| !old_matched.contains(*id))
        .map(|id| ChangedNode::from_node(&old[*id]))
        .collect();

    let renamed: Vec<Relocation> = pairs
        .iter()
        .filter(|(old_id, new_id)| identity(old, *old_id) != identity(new, *new_id))
        .map(|(old_id, new_id)| {
            let from = ChangedNode::from_node(&old[*old_id]);
            let to = ChangedNode::from_node(&new[*new_id]);
            let kind = classify_relocation(&from, &to, options.move_detection);
            Relocation {
                from,
                to,
                kind,
                confidence: EXACT_CONFIDENCE,
            }
        })
        .collect();

    let relocated: HashSet<(NodeKind, &str)> = renamed
        .iter()
        .map(|r| (r.to.kind, r.to.path.as_str()))
        .collect();
    let added: Vec<ChangedNode> = additions
        .iter()
        .map(|id| ChangedNode::from_node(&new[*id]))
        .filter(|node| !relocated.contains(&(node.kind, node.path.as_str())))
        .collect();

    let refactors = if options.detect_refactors {
        detect_refactors(&added, &removed, &modified)
    } else {
        Vec::new()
    };

    debug!(
        added = added.len(),
        removed = removed.len(),
        modified = modified.len(),
        renamed = renamed.len(),
        refactors = refactors.len(),
        "computed structural diff"
    );

    StructuralDiff {
        added,
        removed,
        modified,
        renamed,
        refactors,
    }
}

/// A node's identity within one forest: paths are unique per kind.
fn identity(forest: &Forest, id: NodeId) -> (NodeKind, &str) {
    (forest[id].kind, forest[id].path.as_str())
}

/// Hash used to compare two nodes.
///
/// The node's own content hash when it has one. A node without line content but
/// with children (directories and files built from scanner facts) is compared by
/// shape: a digest over the sorted `kind:name` signatures of its direct children.
/// Anything else has no comparable hash and can only be matched by path.
pub fn comparable_hash(forest: &Forest, id: NodeId) -> Option<String> {
    let node = &forest[id];
    if !node.content_hash.is_empty() {
        return Some(node.content_hash.clone());
    }

    let children = forest.children(id);
    if children.is_empty() {
        return None;
    }

    let mut signature: Vec<String> = children
        .iter()
        .map(|child| format!("{}:{}", forest[*child].kind.label(), forest[*child].name))
        .collect();
    signature.sort_by_key(|entry| entry.to_lowercase());
    Some(content_hash(&signature.join("|")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codoc::ast::SchemaNode;
    use crate::codoc::building::parse_outline;
    use crate::codoc::diff::RelocationKind;

    fn forest(source: &str) -> Forest {
        parse_outline(source).forest
    }

    #[test]
    fn test_identical_forests_have_no_changes() {
        let tree = forest("/src\n  a.ts\n    $foo()\n    # todo\n  b.ts\n    # todo\n");
        let diff = diff_forests(&tree, &tree);
        assert!(diff.is_empty());
        assert!(diff.refactors.is_empty());
    }

    #[test]
    fn test_duplicate_paths_are_not_reported() {
        let tree = forest("a.ts\n  $foo()\n  $foo()\n");
        let diff = diff_forests(&tree, &tree);
        assert!(diff.is_empty(), "{:?}", diff);
    }

    #[test]
    fn test_addition_and_removal() {
        let old = forest("a.ts\n  $foo()\n");
        let new = forest("a.ts\n  $bar()\n");
        let diff = diff_forests(&old, &new);
        assert_eq!(diff.added.len(), 1);
        assert_eq!(diff.added[0].path, "a.ts#bar");
        assert_eq!(diff.removed.len(), 1);
        assert_eq!(diff.removed[0].path, "a.ts#foo");
        assert!(diff.renamed.is_empty());
    }

    #[test]
    fn test_move_between_files() {
        let old = forest("/src\n  utils.ts\n    $validateInput()\n");
        let new = forest("/src\n  utils.ts\n  helpers.ts\n    $validateInput()\n");
        let diff = diff_forests(&old, &new);

        assert_eq!(diff.renamed.len(), 1);
        let relocation = &diff.renamed[0];
        assert_eq!(relocation.from.path, "src/utils.ts#validateInput");
        assert_eq!(relocation.to.path, "src/helpers.ts#validateInput");
        assert_eq!(relocation.kind, RelocationKind::Move);
        assert_eq!(relocation.confidence, 1.0);

        assert!(diff.removed.is_empty());
        assert_eq!(diff.added.len(), 1);
        assert_eq!(diff.added[0].path, "src/helpers.ts");
    }

    #[test]
    fn test_fifo_bucket_order() {
        let old = forest("a.ts\n  # todo\nc.ts\n  # todo\n");
        let new = forest("d.ts\n  # todo\ne.ts\n  # todo\n");
        let diff = diff_forests(&old, &new);
        let pairs: Vec<(&str, &str)> = diff
            .renamed
            .iter()
            .map(|r| (r.from.path.as_str(), r.to.path.as_str()))
            .collect();
        assert_eq!(pairs, vec![("a.ts#todo", "d.ts#todo"), ("c.ts#todo", "e.ts#todo")]);
    }

    #[test]
    fn test_modification_by_shape() {
        let mut old = Forest::new();
        let dir = old.push(SchemaNode::new(NodeKind::Directory, "src"));
        let file = old.push(SchemaNode::new(NodeKind::File, "a.ts").with_hash("1111"));
        old.add_root(dir);
        old.attach(file, dir);

        let mut new = old.clone();
        let extra = new.push(SchemaNode::new(NodeKind::File, "b.ts").with_hash("2222"));
        new.attach(extra, dir);

        let diff = diff_forests(&old, &new);
        assert_eq!(diff.modified.len(), 1);
        assert_eq!(diff.modified[0].after.path, "src");
        assert_eq!(diff.added.len(), 1);
    }

    #[test]
    fn test_comparable_hash_is_case_insensitive_and_order_free() {
        let mut left = Forest::new();
        let dir = left.push(SchemaNode::new(NodeKind::Directory, "src"));
        let a = left.push(SchemaNode::new(NodeKind::File, "A.ts"));
        let b = left.push(SchemaNode::new(NodeKind::File, "b.ts"));
        left.add_root(dir);
        left.attach(a, dir);
        left.attach(b, dir);

        let mut right = Forest::new();
        let dir2 = right.push(SchemaNode::new(NodeKind::Directory, "src"));
        let b2 = right.push(SchemaNode::new(NodeKind::File, "b.ts"));
        let a2 = right.push(SchemaNode::new(NodeKind::File, "A.ts"));
        right.add_root(dir2);
        right.attach(b2, dir2);
        right.attach(a2, dir2);

        assert_eq!(comparable_hash(&left, dir), comparable_hash(&right, dir2));
        assert_eq!(comparable_hash(&left, a), None);
    }

    #[test]
    fn test_same_path_of_another_kind_is_not_a_modification() {
        let old = forest("a.ts\n  $foo()\n");
        let new = forest("a.ts\n  # foo\n");
        let diff = diff_forests(&old, &new);

        assert!(diff.modified.is_empty(), "{:?}", diff.modified);
        assert_eq!(diff.removed.len(), 1);
        assert_eq!(diff.removed[0].kind, NodeKind::Function);
        assert_eq!(diff.added.len(), 1);
        assert_eq!(diff.added[0].kind, NodeKind::Note);
        assert_eq!(diff.added[0].path, "a.ts#foo");
    }

    #[test]
    fn test_note_and_function_sharing_a_path_both_survive() {
        let tree = forest("a.ts\n  $foo()\n  # foo\n");
        assert!(diff_forests(&tree, &tree).is_empty());

        let new = forest("a.ts\n  $foo()\n");
        let diff = diff_forests(&tree, &new);
        assert!(diff.added.is_empty());
        assert_eq!(diff.removed.len(), 1);
        assert_eq!(diff.removed[0].kind, NodeKind::Note);
    }

    #[test]
    fn test_hashless_duplicates_pair_by_identity() {
        let mut tree = Forest::new();
        let file = tree.push(SchemaNode::new(NodeKind::File, "a.ts"));
        tree.add_root(file);
        for _ in 0..2 {
            let mut function = SchemaNode::new(NodeKind::Function, "f");
            function.path = "a.ts#f".to_string();
            let id = tree.push(function);
            tree.attach(id, file);
        }
        assert_eq!(comparable_hash(&tree, tree.children(file)[0]), None);

        let diff = diff_forests(&tree, &tree);
        assert!(diff.is_empty(), "{:?}", diff);
    }

    #[test]
    fn test_refactors_can_be_disabled() {
        let old = forest("a.ts\n  $a()\n");
        let new = forest("a.ts\n  $aPart1()\n  $aPart2()\n");
        let options = DiffOptions {
            detect_refactors: false,
            ..DiffOptions::default()
        };
        assert!(diff_forests_with(&old, &new, &options).refactors.is_empty());
        assert_eq!(diff_forests(&old, &new).refactors.len(), 1);
    }
}
