//! Document-level metadata carried by the root node only

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Title used when the caller does not provide one.
pub const DEFAULT_TITLE: &str = "Documentation";

/// LaTeX document class of the compiled artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentClass {
    #[default]
    Article,
    Book,
    Report,
}

impl DocumentClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentClass::Article => "article",
            DocumentClass::Book => "book",
            DocumentClass::Report => "report",
        }
    }
}

impl fmt::Display for DocumentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page layout and preamble configuration.
///
/// Passed explicitly into the builder's `init`; there is no shared
/// default package list outside of `LayoutOptions::default()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    pub document_class: DocumentClass,
    /// Options handed to the `geometry` package, in the order given
    pub geometry: IndexMap<String, String>,
    /// Packages loaded in the preamble, in load order
    pub packages: Vec<String>,
    /// Emit `\maketitle` at the start of the body
    pub maketitle: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        let geometry = [("tmargin", "1.5cm"), ("lmargin", "1.5cm"), ("rmargin", "1.5cm")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Self {
            document_class: DocumentClass::default(),
            geometry,
            packages: default_packages(),
            maketitle: true,
        }
    }
}

/// Packages every document loads unless configured otherwise.
pub fn default_packages() -> Vec<String> {
    [
        // math
        "amsmath",
        "amsopn",
        "breqn",
        "mathtools",
        // misc
        "enumitem",
        "xcolor",
        "lmodern",
        // graphics and plots
        "graphicx",
        "pgf",
        "pgfplots",
        "pdfpages",
        // floats and tables
        "float",
        "tabularx",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Metadata of a document. Only the root node of a tree may carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMetadata {
    pub title: String,
    pub author: Option<String>,
    /// Show today's date on the title page
    pub date: bool,
    pub layout: LayoutOptions,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            author: None,
            date: false,
            layout: LayoutOptions::default(),
        }
    }
}

impl DocumentMetadata {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_date(mut self, date: bool) -> Self {
        self.date = date;
        self
    }

    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }
}
