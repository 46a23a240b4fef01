use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use ghterm_core::{
    DirectoryNode, EntryKind, NavError, NavigationCursor, TreeBuilder, TreeEntry, TreeError,
    TreeNode, format_size,
};
use itertools::Itertools;

fn scenario_listing() -> Vec<TreeEntry> {
    vec![
        TreeEntry::tree("src"),
        TreeEntry::blob("src/a.txt", 10),
        TreeEntry::blob("README.md", 2048),
    ]
}

fn larger_listing() -> Vec<TreeEntry> {
    vec![
        TreeEntry::tree("crates"),
        TreeEntry::tree("crates/core"),
        TreeEntry::tree("crates/core/src"),
        TreeEntry::blob("crates/core/src/lib.rs", 900).with_hash("11"),
        TreeEntry::blob("crates/core/Cargo.toml", 300).with_hash("22"),
        TreeEntry::blob("docs/guide/intro.md", 1536),
        TreeEntry::blob("Cargo.toml", 512),
        TreeEntry::tree("empty"),
    ]
}

/// Immediate children implied by a listing for every directory path.
fn implied_children(entries: &[TreeEntry]) -> BTreeMap<String, BTreeSet<String>> {
    let mut map: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    map.entry(String::new()).or_default();
    for entry in entries {
        let segments: Vec<&str> = entry.path.split('/').collect();
        for depth in 0..segments.len() {
            let parent = segments[..depth].join("/");
            map.entry(parent).or_default().insert(segments[depth].to_string());
            if depth + 1 < segments.len() || entry.kind == EntryKind::Tree {
                map.entry(segments[..=depth].join("/")).or_default();
            }
        }
    }
    map
}

fn dir_at(root: &Arc<DirectoryNode>, path: &str) -> Arc<DirectoryNode> {
    let mut cursor = NavigationCursor::new(Arc::clone(root));
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        cursor.descend(segment).unwrap();
    }
    Arc::clone(cursor.current())
}

#[test]
fn test_scenario_tree_shape() {
    let root = TreeBuilder::build(&scenario_listing()).unwrap();

    assert_eq!(root.child_count(), 2);
    let src = root.child("src").and_then(TreeNode::as_dir).unwrap();
    let names: Vec<_> = src.entries().map(TreeNode::name).collect();
    assert_eq!(names, ["a.txt"]);

    let readme = root.child("README.md").and_then(TreeNode::as_file).unwrap();
    assert_eq!(readme.size, 2048);
    assert_eq!(format_size(readme.size), "2KB");
}

#[test]
fn test_build_is_order_independent() {
    for listing in [scenario_listing(), larger_listing()] {
        let expected = TreeBuilder::build(&listing).unwrap();
        // 8! orderings is more than needed; the first 720 already move
        // files ahead of their directories.
        for order in listing.iter().permutations(listing.len()).take(720) {
            let built = TreeBuilder::build(order.iter().copied()).unwrap();
            assert_eq!(built, expected);
        }
        let reversed: Vec<_> = listing.iter().rev().collect();
        assert_eq!(TreeBuilder::build(reversed.iter().copied()).unwrap(), expected);
    }
}

#[test]
fn test_listing_round_trip() {
    let listing = larger_listing();
    let root = TreeBuilder::build(&listing).unwrap();

    for (path, expected) in implied_children(&listing) {
        let dir = dir_at(&root, &path);
        let actual: BTreeSet<String> = dir.entries().map(|n| n.name().to_string()).collect();
        assert_eq!(actual, expected, "children of {path:?}");
    }
}

#[test]
fn test_cd_then_back_restores_path() {
    let root = TreeBuilder::build(&larger_listing()).unwrap();
    let mut cursor = NavigationCursor::new(root);
    cursor.descend("crates").unwrap();
    cursor.descend("core").unwrap();

    let before = cursor.path_string();
    cursor.descend("src").unwrap();
    cursor.ascend().unwrap();
    assert_eq!(cursor.path_string(), before);
    assert_eq!(before, "~/crates/core");
}

#[test]
fn test_ascend_at_root_leaves_cursor() {
    let root = TreeBuilder::build(&scenario_listing()).unwrap();
    let mut cursor = NavigationCursor::new(root);
    assert_eq!(cursor.ascend(), Err(NavError::AtRoot));
    assert_eq!(cursor.path_string(), "~");
}

#[test]
fn test_descend_into_file_is_not_a_directory() {
    let root = TreeBuilder::build(&scenario_listing()).unwrap();
    let mut cursor = NavigationCursor::new(root);
    assert_eq!(
        cursor.descend("README.md"),
        Err(NavError::NotADirectory {
            name: "README.md".into()
        })
    );
}

#[test]
fn test_conflict_is_order_independent() {
    let listing = vec![TreeEntry::tree("bin"), TreeEntry::blob("bin", 4)];
    for order in listing.iter().permutations(2) {
        let err = TreeBuilder::build(order.iter().copied()).unwrap_err();
        assert!(matches!(err, TreeError::StructureConflict { .. }));
    }
}

#[test]
fn test_other_entry_kinds_are_skipped() {
    let mut submodule = TreeEntry::tree("vendor/dep");
    submodule.kind = EntryKind::Other;
    let listing = vec![TreeEntry::tree("vendor"), submodule];

    let root = TreeBuilder::build(&listing).unwrap();
    let vendor = root.child("vendor").and_then(TreeNode::as_dir).unwrap();
    assert!(vendor.is_empty());
}

#[test]
fn test_source_paths_and_hashes() {
    let root = TreeBuilder::build(&larger_listing()).unwrap();
    let core = dir_at(&root, "crates/core/src");
    let lib = core.child("lib.rs").and_then(TreeNode::as_file).unwrap();
    assert_eq!(lib.source_path.as_deref(), Some("crates/core/src/lib.rs"));
    assert_eq!(lib.content_hash.as_ref().map(|h| h.as_str()), Some("11"));
}
