//! Document manifests: a TOML description of one document
//!
//! ```toml
//! title = "Estimation Report"
//! author = "QA"
//! date = true
//!
//! [layout]
//! packages = ["siunitx", "!pdfpages"]
//!
//! [[entries]]
//! path = ["Results", "Errors"]
//! type = "table"
//! columns = ["n", "err"]
//! rows = [[1, 0.5], [2, 0.25]]
//! ```
//!
//! Entries are appended in file order, so manifest order is document order.

use std::fmt;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, instrument, trace};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::RawLayoutOptions;
use crate::domain::{
    ContentItem, DocumentMetadata, DocumentTree, DomainError, DomainResult, Equation, Image,
    LayoutOptions, MathEnvironment, Plot, StyledText, Table, TableKind, TikzFigure,
    DEFAULT_TITLE,
};
use crate::infrastructure::traits::FileSystem;

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

/// Parsed manifest file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub date: bool,
    /// Overrides merged onto the configured layout
    #[serde(default)]
    pub layout: Option<RawLayoutOptions>,
    #[serde(default)]
    pub entries: Vec<ManifestEntry>,
}

/// One content item and the section path it is appended to.
#[derive(Debug, Deserialize)]
pub struct ManifestEntry {
    /// Section keys from the root; empty means the root itself
    #[serde(default)]
    pub path: Vec<String>,
    #[serde(flatten)]
    pub item: ItemSpec,
}

/// Table cell as written in TOML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Bool(b) => write!(f, "{}", b),
            Cell::Int(i) => write!(f, "{}", i),
            Cell::Float(x) => write!(f, "{}", x),
            Cell::Str(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableSpec {
    /// Column spec such as `l|c|r`; inferred from `columns` if absent
    #[serde(default)]
    pub spec: Option<String>,
    #[serde(default)]
    pub columns: Option<Vec<String>>,
    #[serde(default)]
    pub rows: Vec<Vec<Cell>>,
    #[serde(default)]
    pub kind: TableKind,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub centering: Option<bool>,
    #[serde(default)]
    pub hlines: bool,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesSpec {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub options: Option<String>,
    #[serde(default)]
    pub function: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Vec<(f64, f64)>>,
}

/// Item description, selected by the entry's `type` field.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum ItemSpec {
    Text {
        text: String,
    },
    Raw {
        markup: String,
    },
    Styled {
        text: String,
        #[serde(default)]
        bold: bool,
    },
    Table(TableSpec),
    Image {
        file: String,
        #[serde(default)]
        width: Option<String>,
        #[serde(default)]
        position: Option<String>,
        #[serde(default)]
        caption: Option<String>,
        #[serde(default)]
        label: Option<String>,
    },
    Figure {
        #[serde(default)]
        plot_options: Option<String>,
        #[serde(default)]
        series: Vec<SeriesSpec>,
    },
    Equation {
        lhs: String,
        rhs: String,
        #[serde(default)]
        sign: Option<String>,
        #[serde(default)]
        environment: MathEnvironment,
        #[serde(default)]
        dfrac: bool,
        #[serde(default)]
        pre: Option<String>,
        #[serde(default)]
        post: Option<String>,
    },
}

impl TableSpec {
    fn build(self) -> DomainResult<Table> {
        let mut table = match (self.columns, self.spec) {
            (Some(columns), spec) => {
                let table = Table::from_data(columns, self.rows)?;
                match spec {
                    Some(spec) => table.with_spec(&spec)?,
                    None => table,
                }
            }
            (None, Some(spec)) => {
                let mut table = Table::new(&spec)?;
                table.add_rows(self.rows)?;
                table
            }
            (None, None) => {
                return Err(DomainError::configuration(
                    "table needs either 'columns' or 'spec'",
                ))
            }
        };

        table = table.with_kind(self.kind).with_hlines(self.hlines);
        if let Some(position) = self.position {
            table = table.with_position(position);
        }
        if let Some(centering) = self.centering {
            table = table.with_centering(centering);
        }
        if let Some(caption) = self.caption {
            table = table.with_caption(caption);
        }
        if let Some(label) = self.label {
            table = table.with_label(label);
        }
        Ok(table)
    }
}

impl SeriesSpec {
    fn build(self) -> DomainResult<Plot> {
        let mut plot = match (self.function, self.coordinates) {
            (Some(expr), None) => Plot::function(expr),
            (None, Some(points)) => Plot::coordinates(points),
            _ => {
                return Err(DomainError::item_shape(
                    "plot series needs exactly one of 'function' or 'coordinates'",
                ))
            }
        };
        if let Some(name) = self.name {
            plot = plot.named(name);
        }
        if let Some(options) = self.options {
            plot = plot.with_options(options);
        }
        Ok(plot)
    }
}

impl ItemSpec {
    /// Build the content item this spec describes.
    pub fn into_item(self) -> DomainResult<ContentItem> {
        let item = match self {
            ItemSpec::Text { text } => ContentItem::Text(text),
            ItemSpec::Raw { markup } => ContentItem::Raw(markup),
            ItemSpec::Styled { text, bold } => StyledText { text, bold }.into(),
            ItemSpec::Table(spec) => spec.build()?.into(),
            ItemSpec::Image {
                file,
                width,
                position,
                caption,
                label,
            } => {
                let mut image = Image::new(file)?;
                if let Some(width) = width {
                    image = image.with_width(width);
                }
                if let Some(position) = position {
                    image = image.with_position(position);
                }
                if let Some(caption) = caption {
                    image = image.with_caption(caption);
                }
                if let Some(label) = label {
                    image = image.with_label(label);
                }
                image.into()
            }
            ItemSpec::Figure {
                plot_options,
                series,
            } => {
                let mut figure = TikzFigure::new();
                if let Some(options) = plot_options {
                    figure = figure.with_plot_options(options);
                }
                for spec in series {
                    figure.add_plot(spec.build()?);
                }
                figure.into()
            }
            ItemSpec::Equation {
                lhs,
                rhs,
                sign,
                environment,
                dfrac,
                pre,
                post,
            } => {
                let mut equation = Equation::new(lhs, rhs)
                    .with_environment(environment)
                    .with_dfrac(dfrac);
                if let Some(sign) = sign {
                    equation = equation.with_sign(sign);
                }
                if let Some(pre) = pre {
                    equation = equation.with_pre(pre);
                }
                if let Some(post) = post {
                    equation = equation.with_post(post);
                }
                equation.into()
            }
        };
        Ok(item)
    }
}

impl Manifest {
    /// Parse manifest text. `origin` is only used in error messages.
    pub fn parse(text: &str, origin: &Path) -> ApplicationResult<Self> {
        toml::from_str(text).map_err(|e| ApplicationError::Manifest {
            path: origin.to_path_buf(),
            message: e.message().to_string(),
        })
    }

    /// Read and parse a manifest file.
    #[instrument(level = "debug", skip(fs))]
    pub fn load(fs: &dyn FileSystem, path: &Path) -> ApplicationResult<Self> {
        let text = fs
            .read_to_string(path)
            .with_path_context("read manifest", path)?;
        let manifest = Self::parse(&text, path)?;
        debug!("load: {} entries", manifest.entries.len());
        Ok(manifest)
    }

    /// Metadata for the root, with layout overrides merged onto `base`.
    pub fn metadata(&self, base: &LayoutOptions) -> DocumentMetadata {
        let layout = self
            .layout
            .as_ref()
            .map(|raw| raw.merge_onto(base))
            .unwrap_or_else(|| base.clone());

        let mut metadata = DocumentMetadata::new(self.title.clone())
            .with_date(self.date)
            .with_layout(layout);
        if let Some(author) = &self.author {
            metadata = metadata.with_author(author.clone());
        }
        metadata
    }

    /// Build the document tree, appending entries in manifest order.
    #[instrument(level = "debug", skip_all, fields(title = %self.title))]
    pub fn into_tree(self, base: &LayoutOptions) -> ApplicationResult<DocumentTree> {
        let mut tree = DocumentTree::new(self.metadata(base));
        for (i, entry) in self.entries.into_iter().enumerate() {
            trace!("into_tree: entry {} at {:?}", i, entry.path);
            let idx = tree.resolve(&entry.path);
            let item = entry.item.into_item()?;
            tree.append(idx, item)?;
        }
        Ok(tree)
    }
}
