//! texdocs: assemble hierarchical LaTeX documents
//!
//! Content is appended to nodes addressed by section paths; nodes are
//! created on first use. Rendering walks the tree once and emits headings
//! for the first three levels, inlining anything deeper.
//!
//! ```no_run
//! use texdocs::application::render;
//! use texdocs::domain::{DocumentMetadata, DocumentTree};
//!
//! let mut doc = DocumentTree::new(DocumentMetadata::new("Report"));
//! let results = doc.resolve(["Results"]);
//! doc.append(results, "All tests passed.").unwrap();
//! println!("{}", render(&doc).unwrap().dumps());
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;
