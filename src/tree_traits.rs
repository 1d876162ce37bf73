//! Outline rendering of document trees with termtree

use termtree::Tree;
use tracing::instrument;

use crate::domain::{DocumentTree, NodeId, MAX_HEADING_DEPTH};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for DocumentTree {
    /// Sections as branches, content items as `[kind]` leaves in order.
    #[instrument(level = "debug", skip_all)]
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(doc: &DocumentTree, idx: NodeId, parent_tree: &mut Tree<String>) {
            for item in doc.content(idx) {
                parent_tree.push(Tree::new(format!("[{}]", item.kind())));
            }
            for &child_idx in doc.children(idx) {
                let key = doc.key(child_idx).unwrap_or_default().to_string();
                let mut child_tree = Tree::new(key);
                build_tree(doc, child_idx, &mut child_tree);
                parent_tree.push(child_tree);
            }
        }

        let mut tree = Tree::new(self.metadata().title.clone());
        build_tree(self, self.root(), &mut tree);
        tree
    }
}

/// Section and item counts, noting sections too deep to get a heading.
pub fn outline_summary(doc: &DocumentTree) -> String {
    let (sections, items) = doc.iter().fold((0, 0), |(sections, items), (idx, node)| {
        (
            sections + usize::from(!doc.is_root(idx)),
            items + node.data.content.len(),
        )
    });
    let depth = doc.height() - 1;

    let mut summary = format!("{} sections, {} items, depth {}", sections, items, depth);
    if depth > MAX_HEADING_DEPTH {
        summary.push_str(&format!(
            " (levels below {} are inlined without headings)",
            MAX_HEADING_DEPTH
        ));
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DocumentMetadata, Image};

    #[test]
    fn given_nested_sections_then_outline_lists_keys_and_kinds() {
        let mut doc = DocumentTree::new(DocumentMetadata::new("Report"));
        let intro = doc.resolve(["Intro"]);
        doc.append(intro, "hello").unwrap();
        let plots = doc.resolve(["Intro", "Plots"]);
        doc.append(plots, Image::new("a.png").unwrap()).unwrap();

        let outline = doc.to_tree_string().to_string();

        assert_eq!(
            outline,
            "Report\n└── Intro\n    ├── [text]\n    └── Plots\n        └── [image]\n"
        );
    }

    #[test]
    fn given_shallow_tree_then_summary_counts_sections_and_items() {
        let mut doc = DocumentTree::new(DocumentMetadata::new("Report"));
        doc.append(doc.root(), "preface").unwrap();
        let results = doc.resolve(["Results", "Errors"]);
        doc.extend(results, ["a", "b"]).unwrap();

        assert_eq!(outline_summary(&doc), "2 sections, 3 items, depth 2");
    }

    #[test]
    fn given_sections_past_heading_cap_then_summary_notes_inlining() {
        let mut doc = DocumentTree::new(DocumentMetadata::default());
        let deep = doc.resolve(["A", "B", "C", "D"]);
        doc.append(deep, "deep").unwrap();

        assert_eq!(
            outline_summary(&doc),
            "4 sections, 1 items, depth 4 (levels below 3 are inlined without headings)"
        );
    }
}
