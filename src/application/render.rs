//! Flattening a document tree into a linear stream of render operations

use tracing::{debug, instrument, trace};

use crate::application::ApplicationResult;
use crate::domain::{DocumentTree, DomainResult, HeadingLevel, NodeId, RenderTarget};
use crate::infrastructure::latex::LatexDocument;

/// Render the tree into a fresh LaTeX document.
pub fn render(tree: &DocumentTree) -> ApplicationResult<LatexDocument> {
    let mut doc = LatexDocument::new();
    flatten(tree, &mut doc)?;
    Ok(doc)
}

/// Walk the tree once, depth-first and pre-order, emitting into `target`.
///
/// The root's content is always inlined. Every other node that holds
/// content or children gets a heading chosen by its level, up to
/// [`crate::domain::MAX_HEADING_DEPTH`]; deeper nodes are inlined. A
/// node's own content precedes its children, and its heading is closed
/// after its subtree. On error the target is left partially written.
#[instrument(level = "debug", skip_all, fields(nodes = tree.len()))]
pub fn flatten(tree: &DocumentTree, target: &mut dyn RenderTarget) -> DomainResult<()> {
    target.init(tree.metadata());
    visit(tree, tree.root(), 0, target)?;
    debug!("flatten: done");
    Ok(())
}

fn visit(
    tree: &DocumentTree,
    idx: NodeId,
    level: usize,
    target: &mut dyn RenderTarget,
) -> DomainResult<()> {
    let opened = level > 0 && tree.is_nested(idx, level);
    if opened {
        let heading = HeadingLevel::try_from(level)?;
        let title = tree.key(idx).unwrap_or_default();
        trace!("visit: {} '{}'", heading, title);
        target.open_heading(heading, title);
    }

    for item in tree.content(idx) {
        item.emit(target);
    }

    for &child in tree.children(idx) {
        visit(tree, child, level + 1, target)?;
    }

    if opened {
        target.close_heading();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DocumentMetadata;
    use crate::infrastructure::latex::Op;

    #[test]
    fn given_flat_document_then_only_init_and_text() {
        let metadata = DocumentMetadata::new("Flat");
        let mut tree = DocumentTree::new(metadata.clone());
        let root = tree.root();
        tree.append(root, "hello").unwrap();

        let doc = render(&tree).unwrap();

        assert_eq!(
            doc.ops(),
            &[Op::Init(metadata), Op::Text("hello".to_string())]
        );
    }

    #[test]
    fn given_empty_section_then_no_heading() {
        let mut tree = DocumentTree::default();
        tree.resolve(["Empty"]);

        let doc = render(&tree).unwrap();

        assert_eq!(doc.ops().len(), 1);
    }
}
