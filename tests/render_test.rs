//! Tests for flattening document trees

use rstest::rstest;

use texdocs::application::{flatten, render};
use texdocs::domain::{
    DocumentMetadata, DocumentTree, DomainError, HeadingLevel, Image, RenderTarget, StyledText,
};
use texdocs::infrastructure::latex::{LatexDocument, Op};
use texdocs::util::testing;

fn text(s: &str) -> Op {
    Op::Text(s.to_string())
}

fn open(level: HeadingLevel, title: &str) -> Op {
    Op::OpenHeading {
        level,
        title: title.to_string(),
    }
}

#[test]
fn given_flat_document_when_rendering_then_init_and_text_only() {
    // Arrange
    testing::init_test_setup();
    let metadata = DocumentMetadata::new("Flat").with_author("QA");
    let mut tree = DocumentTree::new(metadata.clone());
    let root = tree.root();
    tree.append(root, "hello").unwrap();

    // Act
    let doc = render(&tree).unwrap();

    // Assert
    assert_eq!(doc.ops(), &[Op::Init(metadata), text("hello")]);
}

#[test]
fn given_two_level_nesting_when_rendering_then_headings_close_in_reverse_order() {
    // Arrange
    let mut tree = DocumentTree::default();
    let b = tree.resolve(["A", "B"]);
    tree.append(b, "x").unwrap();

    // Act
    let doc = render(&tree).unwrap();

    // Assert
    assert_eq!(
        &doc.ops()[1..],
        &[
            open(HeadingLevel::Section, "A"),
            open(HeadingLevel::Subsection, "B"),
            text("x"),
            Op::CloseHeading,
            Op::CloseHeading,
        ]
    );
}

#[test]
fn given_content_and_children_when_rendering_then_own_content_first_in_order() {
    // Arrange
    let mut tree = DocumentTree::default();
    let child = tree.resolve(["S", "Child"]);
    tree.append(child, "child").unwrap();
    let s = tree.resolve(["S"]);
    tree.extend(s, ["a", "b", "c"]).unwrap();

    // Act
    let doc = render(&tree).unwrap();

    // Assert
    assert_eq!(
        &doc.ops()[1..],
        &[
            open(HeadingLevel::Section, "S"),
            text("a"),
            text("b"),
            text("c"),
            open(HeadingLevel::Subsection, "Child"),
            text("child"),
            Op::CloseHeading,
            Op::CloseHeading,
        ]
    );
}

#[rstest]
#[case::leaf(false)]
#[case::with_children(true)]
fn given_node_at_depth_four_when_rendering_then_no_heading(#[case] with_children: bool) {
    // Arrange
    let mut tree = DocumentTree::default();
    let deep = tree.resolve(["1", "2", "3", "4"]);
    tree.append(deep, "deep").unwrap();
    if with_children {
        let deeper = tree.resolve(["1", "2", "3", "4", "5"]);
        tree.append(deeper, "deeper").unwrap();
    }

    // Act
    let doc = render(&tree).unwrap();

    // Assert
    let headings: Vec<&Op> = doc
        .ops()
        .iter()
        .filter(|op| matches!(op, Op::OpenHeading { .. }))
        .collect();
    assert_eq!(headings.len(), 3);
    assert!(!headings.contains(&&open(HeadingLevel::Subsubsection, "4")));
    assert!(doc.ops().contains(&text("deep")));
    assert!(doc.body().contains("\\subsubsection{3}\ndeep"));
}

#[test]
fn given_sibling_sections_when_rendering_then_insertion_order() {
    let mut tree = DocumentTree::default();
    let second = tree.resolve(["Second"]);
    let first = tree.resolve(["First"]);
    tree.append(first, "1").unwrap();
    tree.append(second, "2").unwrap();

    let body = render(&tree).unwrap().body();

    assert_eq!(body, "\\section{Second}\n2\n\\section{First}\n1");
}

#[test]
fn given_root_content_and_sections_when_rendering_then_root_inlined_first() {
    let mut tree = DocumentTree::default();
    let intro = tree.resolve(["Intro"]);
    tree.append(intro, StyledText::bold("Summary")).unwrap();
    let root = tree.root();
    tree.append(root, "Preface").unwrap();

    let body = render(&tree).unwrap().body();

    assert_eq!(body, "Preface\n\\section{Intro}\n\\textbf{Summary}");
}

#[test]
fn given_renderable_item_when_rendering_then_dispatches_to_item() {
    let mut tree = DocumentTree::default();
    let figures = tree.resolve(["Figures"]);
    tree.append(figures, Image::new("plot.png").unwrap()).unwrap();

    let body = render(&tree).unwrap().body();

    assert_eq!(
        body,
        "\\section{Figures}\n\\begin{figure}[H]\n\\centering\n\\includegraphics[width=7.5cm]{plot.png}\n\\end{figure}"
    );
}

/// Target that rejects nothing but counts heading balance.
#[derive(Default)]
struct BalanceTarget {
    open: usize,
    max_open: usize,
}

impl RenderTarget for BalanceTarget {
    fn init(&mut self, _metadata: &DocumentMetadata) {}
    fn open_heading(&mut self, level: HeadingLevel, _title: &str) {
        self.open += 1;
        self.max_open = self.max_open.max(self.open);
        assert_eq!(level.depth(), self.open);
    }
    fn close_heading(&mut self) {
        self.open -= 1;
    }
    fn append_text(&mut self, _text: &str) {}
    fn append_raw(&mut self, _markup: &str) {}
    fn begin_environment(&mut self, _name: &str, _options: Option<&str>, _args: &[&str]) {}
    fn end_environment(&mut self, _name: &str) {}
    fn append_command(&mut self, _name: &str, _options: Option<&str>, _args: &[&str]) {}
    fn append_row(&mut self, _cells: &[String]) {}
    fn append_plot(&mut self, _plot: &texdocs::domain::Plot) {}
}

#[test]
fn given_custom_target_when_flattening_then_headings_balanced_and_capped() {
    // Arrange
    let mut tree = DocumentTree::default();
    for path in [vec!["a", "b", "c", "d"], vec!["a", "e"], vec!["f"]] {
        let idx = tree.resolve(&path);
        tree.append(idx, "x").unwrap();
    }
    let mut target = BalanceTarget::default();

    // Act
    let result: Result<(), DomainError> = flatten(&tree, &mut target);

    // Assert
    assert!(result.is_ok());
    assert_eq!(target.open, 0);
    assert_eq!(target.max_open, 3);
}

#[test]
fn given_rendered_twice_then_identical_output() {
    let mut tree = DocumentTree::default();
    let s = tree.resolve(["S"]);
    tree.append(s, "x").unwrap();

    let first: LatexDocument = render(&tree).unwrap();
    let second = render(&tree).unwrap();

    assert_eq!(first, second);
}
