//! Document assembly service
//!
//! Loads manifests into document trees and renders them to LaTeX source.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::manifest::Manifest;
use crate::application::render::render;
use crate::application::{ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::DocumentTree;
use crate::infrastructure::latex::LatexDocument;
use crate::infrastructure::traits::FileSystem;

/// Builds documents from manifest files.
pub struct DocumentService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl DocumentService {
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    /// Load a manifest into a tree, using the configured layout as the base.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, manifest: &Path) -> ApplicationResult<DocumentTree> {
        let manifest = Manifest::load(self.fs.as_ref(), manifest)?;
        manifest.into_tree(&self.settings.layout)
    }

    /// Load and render a manifest.
    pub fn build(&self, manifest: &Path) -> ApplicationResult<LatexDocument> {
        let tree = self.load(manifest)?;
        render(&tree)
    }

    /// Write the complete LaTeX source of `doc` to `path`.
    #[instrument(level = "debug", skip(self, doc))]
    pub fn write_source(&self, doc: &LatexDocument, path: &Path) -> ApplicationResult<()> {
        self.fs
            .ensure_parent(path)
            .with_path_context("create parent directory", path)?;
        self.fs
            .write(path, &doc.dumps())
            .with_path_context("write LaTeX source", path)?;
        debug!("write_source: {}", path.display());
        Ok(())
    }
}
