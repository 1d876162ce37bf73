//! Domain layer: the document tree and its content
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod content;
pub mod error;
pub mod items;
pub mod metadata;
pub mod target;

pub use arena::{DocumentTree, NodeData, TreeIterator, TreeNode};
pub use content::{ContentItem, Renderable, StyledText};
pub use error::{DomainError, DomainResult};
pub use generational_arena::Index as NodeId;
pub use items::*;
pub use metadata::{default_packages, DocumentClass, DocumentMetadata, LayoutOptions, DEFAULT_TITLE};
pub use target::{HeadingLevel, RenderTarget, MAX_HEADING_DEPTH};
