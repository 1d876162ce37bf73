//! Arena-backed, path-addressable document tree.
//!
//! Nodes live in a generational arena. Children are owned top-down through
//! each node's ordered `children` list; the `parent` index is a non-owning
//! back-link used only for depth and root lookup. A separate map from key
//! paths to arena indices makes addressing idempotent.

use std::collections::HashMap;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument, trace};

use crate::domain::content::ContentItem;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::metadata::DocumentMetadata;
use crate::domain::target::MAX_HEADING_DEPTH;

/// Payload of a tree node.
#[derive(Debug)]
pub struct NodeData {
    /// Path segment under the parent; empty for the root
    key: String,
    /// Content items in emission order
    pub content: Vec<ContentItem>,
}

impl NodeData {
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Tree node in the arena-based hierarchy.
#[derive(Debug)]
pub struct TreeNode {
    pub data: NodeData,
    /// Index of the parent node, None for the root
    pub parent: Option<Index>,
    /// Child indices in insertion order
    pub children: Vec<Index>,
}

/// A document as an addressable tree of sections.
///
/// The root always exists and is the only node carrying
/// [`DocumentMetadata`].
#[derive(Debug)]
pub struct DocumentTree {
    arena: Arena<TreeNode>,
    root: Index,
    paths: HashMap<Vec<String>, Index>,
    metadata: DocumentMetadata,
}

impl Default for DocumentTree {
    fn default() -> Self {
        Self::new(DocumentMetadata::default())
    }
}

impl DocumentTree {
    pub fn new(metadata: DocumentMetadata) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(TreeNode {
            data: NodeData {
                key: String::new(),
                content: Vec::new(),
            },
            parent: None,
            children: Vec::new(),
        });
        let mut paths = HashMap::new();
        paths.insert(Vec::new(), root);

        Self {
            arena,
            root,
            paths,
            metadata,
        }
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    /// Replace the document metadata. Only valid on the root.
    pub fn set_metadata(&mut self, idx: Index, metadata: DocumentMetadata) -> DomainResult<()> {
        if !self.is_root(idx) {
            return Err(DomainError::configuration(
                "only the root node can carry a title, author or layout",
            ));
        }
        self.metadata = metadata;
        Ok(())
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.get_node(self.root)
            .map(|root| root.children.is_empty() && root.data.content.is_empty())
            .unwrap_or(true)
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    fn node_mut(&mut self, idx: Index) -> DomainResult<&mut TreeNode> {
        self.arena.get_mut(idx).ok_or(DomainError::NodeNotFound)
    }

    /// Insert a child under `parent`, or return the existing child with that key.
    ///
    /// `metadata` is only accepted for the root, which already exists, so any
    /// metadata passed here is a configuration error.
    #[instrument(level = "trace", skip(self, metadata))]
    pub fn insert_node(
        &mut self,
        parent: Index,
        key: &str,
        metadata: Option<DocumentMetadata>,
    ) -> DomainResult<Index> {
        if metadata.is_some() {
            return Err(DomainError::configuration(format!(
                "node '{}' is not the root and cannot carry a title, author or layout",
                key
            )));
        }

        let mut path = self.path(parent)?;
        path.push(key.to_string());
        if let Some(&existing) = self.paths.get(&path) {
            return Ok(existing);
        }

        let idx = self.arena.insert(TreeNode {
            data: NodeData {
                key: key.to_string(),
                content: Vec::new(),
            },
            parent: Some(parent),
            children: Vec::new(),
        });
        self.node_mut(parent)?.children.push(idx);
        trace!("insert_node: {:?} -> {:?}", path, idx);
        self.paths.insert(path, idx);
        Ok(idx)
    }

    /// Address a node by its key path, creating missing nodes on the way.
    ///
    /// Resolving the same path again returns the same index and creates
    /// nothing. The empty path resolves to the root.
    #[instrument(level = "debug", skip(self, path))]
    pub fn resolve<I, S>(&mut self, path: I) -> Index
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut current = self.root;
        let mut prefix: Vec<String> = Vec::new();

        for segment in path {
            prefix.push(segment.as_ref().to_string());
            current = match self.paths.get(&prefix) {
                Some(&idx) => idx,
                None => {
                    let idx = self.arena.insert(TreeNode {
                        data: NodeData {
                            key: segment.as_ref().to_string(),
                            content: Vec::new(),
                        },
                        parent: Some(current),
                        children: Vec::new(),
                    });
                    if let Some(parent) = self.arena.get_mut(current) {
                        parent.children.push(idx);
                    }
                    self.paths.insert(prefix.clone(), idx);
                    debug!("resolve: created {:?}", prefix);
                    idx
                }
            };
        }

        current
    }

    /// Look up a node without creating anything.
    pub fn lookup<I, S>(&self, path: I) -> Option<Index>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let key: Vec<String> = path.into_iter().map(|s| s.as_ref().to_string()).collect();
        self.paths.get(&key).copied()
    }

    /// Key path from the root to `idx`.
    pub fn path(&self, idx: Index) -> DomainResult<Vec<String>> {
        let mut segments = Vec::new();
        let mut current = self.get_node(idx).ok_or(DomainError::NodeNotFound)?;
        while let Some(parent) = current.parent {
            segments.push(current.data.key.clone());
            current = self.get_node(parent).ok_or(DomainError::NodeNotFound)?;
        }
        segments.reverse();
        Ok(segments)
    }

    /// Append one item to the node's content.
    pub fn append(&mut self, idx: Index, item: impl Into<ContentItem>) -> DomainResult<()> {
        let item = item.into();
        trace!("append: {} item to {:?}", item.kind(), idx);
        self.node_mut(idx)?.data.content.push(item);
        Ok(())
    }

    /// Append items in argument order.
    pub fn extend<I, T>(&mut self, idx: Index, items: I) -> DomainResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<ContentItem>,
    {
        let node = self.node_mut(idx)?;
        node.data.content.extend(items.into_iter().map(Into::into));
        Ok(())
    }

    pub fn is_root(&self, idx: Index) -> bool {
        idx == self.root
    }

    /// Number of ancestors between `idx` and the root (root = 0).
    pub fn depth(&self, idx: Index) -> usize {
        let mut depth = 0;
        let mut current = self.get_node(idx).and_then(|n| n.parent);
        while let Some(parent) = current {
            depth += 1;
            current = self.get_node(parent).and_then(|n| n.parent);
        }
        depth
    }

    /// True iff the node has at least one child node.
    pub fn has_children(&self, idx: Index) -> bool {
        self.get_node(idx)
            .map(|n| !n.children.is_empty())
            .unwrap_or(false)
    }

    pub fn children(&self, idx: Index) -> &[Index] {
        self.get_node(idx)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn content(&self, idx: Index) -> &[ContentItem] {
        self.get_node(idx)
            .map(|n| n.data.content.as_slice())
            .unwrap_or(&[])
    }

    pub fn key(&self, idx: Index) -> Option<&str> {
        self.get_node(idx).map(|n| n.data.key())
    }

    /// Whether the node gets a heading when emitted at `level`.
    ///
    /// A node qualifies when it holds children or content and `level` is
    /// within [`MAX_HEADING_DEPTH`].
    pub fn is_nested(&self, idx: Index, level: usize) -> bool {
        (self.has_children(idx) || !self.content(idx).is_empty()) && level <= MAX_HEADING_DEPTH
    }

    /// Number of levels below and including the root.
    pub fn height(&self) -> usize {
        self.calculate_height(self.root)
    }

    fn calculate_height(&self, idx: Index) -> usize {
        match self.get_node(idx) {
            Some(node) => {
                1 + node
                    .children
                    .iter()
                    .map(|&child| self.calculate_height(child))
                    .max()
                    .unwrap_or(0)
            }
            None => 0,
        }
    }

    /// Pre-order traversal in document order.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }
}

/// Depth-first, pre-order iterator over `(index, node)` pairs.
pub struct TreeIterator<'a> {
    tree: &'a DocumentTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a DocumentTree) -> Self {
        Self {
            tree,
            stack: vec![tree.root()],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current) {
                // reverse push keeps left-to-right order
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current, node));
            }
        }
        None
    }
}
