//! Tests for DocumentTree addressing and root exclusivity

use rstest::rstest;

use texdocs::domain::{DocumentMetadata, DocumentTree, DomainError};
use texdocs::util::testing;

#[rstest]
#[case::single(vec!["A"])]
#[case::nested(vec!["A", "B"])]
#[case::deep(vec!["A", "B", "C", "D", "E"])]
fn given_path_when_resolved_twice_then_same_node_and_no_new_children(#[case] path: Vec<&str>) {
    // Arrange
    testing::init_test_setup();
    let mut tree = DocumentTree::default();

    // Act
    let first = tree.resolve(&path);
    let len_after_first = tree.len();
    let root_children = tree.children(tree.root()).len();
    let second = tree.resolve(&path);

    // Assert
    assert_eq!(first, second);
    assert_eq!(tree.len(), len_after_first);
    assert_eq!(tree.children(tree.root()).len(), root_children);
    assert_eq!(tree.depth(first), path.len());
}

#[test]
fn given_shared_prefix_when_resolving_then_siblings_share_parent() {
    // Arrange
    let mut tree = DocumentTree::default();

    // Act
    let b = tree.resolve(["A", "B"]);
    let c = tree.resolve(["A", "C"]);

    // Assert
    let a = tree.lookup(["A"]).unwrap();
    assert_eq!(tree.children(a), &[b, c]);
    assert!(tree.has_children(a));
    assert!(!tree.has_children(b));
    assert_eq!(tree.get_node(b).unwrap().parent, Some(a));
}

#[test]
fn given_empty_path_when_resolving_then_root() {
    let mut tree = DocumentTree::default();

    let idx = tree.resolve(Vec::<String>::new());

    assert!(tree.is_root(idx));
    assert_eq!(tree.depth(idx), 0);
}

#[test]
fn given_unknown_path_when_looking_up_then_nothing_is_created() {
    let tree = DocumentTree::default();

    assert!(tree.lookup(["missing"]).is_none());
    assert_eq!(tree.len(), 1);
}

#[test]
fn given_non_root_node_when_inserting_with_metadata_then_configuration_error() {
    // Arrange
    let mut tree = DocumentTree::default();
    let root = tree.root();

    // Act
    let result = tree.insert_node(root, "Intro", Some(DocumentMetadata::new("Nope").with_author("X")));

    // Assert
    assert!(matches!(result, Err(DomainError::Configuration { .. })));
    assert_eq!(tree.len(), 1);
}

#[test]
fn given_non_root_node_when_setting_metadata_then_configuration_error() {
    let mut tree = DocumentTree::default();
    let intro = tree.resolve(["Intro"]);

    let result = tree.set_metadata(intro, DocumentMetadata::new("Nope"));

    assert!(matches!(result, Err(DomainError::Configuration { .. })));
    assert_eq!(tree.metadata().title, "Documentation");
}

#[test]
fn given_root_when_setting_metadata_then_replaced() {
    let mut tree = DocumentTree::default();
    let root = tree.root();

    tree.set_metadata(root, DocumentMetadata::new("Report").with_date(true))
        .unwrap();

    assert_eq!(tree.metadata().title, "Report");
    assert!(tree.metadata().date);
}

#[test]
fn given_items_when_extending_then_kept_in_argument_order() {
    // Arrange
    let mut tree = DocumentTree::default();
    let node = tree.resolve(["Notes"]);

    // Act
    tree.extend(node, ["a", "b", "c"]).unwrap();

    // Assert
    let kinds: Vec<_> = tree
        .content(node)
        .iter()
        .map(|item| match item {
            texdocs::domain::ContentItem::Text(t) => t.as_str(),
            _ => "",
        })
        .collect();
    assert_eq!(kinds, vec!["a", "b", "c"]);
}
