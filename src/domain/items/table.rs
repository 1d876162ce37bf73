//! Tables rendered as a `tabular`/`tabularx` block inside a `table` float

use std::fmt::Display;
use std::iter::Peekable;
use std::str::Chars;

use serde::Deserialize;

use crate::domain::content::Renderable;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::target::RenderTarget;

/// Environment used for the row block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    #[default]
    Tabular,
    /// `tabularx` spanning `\textwidth`
    Tabularx,
}

impl TableKind {
    pub fn environment(&self) -> &'static str {
        match self {
            TableKind::Tabular => "tabular",
            TableKind::Tabularx => "tabularx",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TableEntry {
    Row(Vec<String>),
    Hline,
    Cline(usize, usize),
}

/// A table with a fixed column specification.
///
/// Rows are either added one by one (`add_row`, `add_hline`, ...) or given
/// up front together with column labels (`from_data`). Data rows are
/// emitted after manually added entries, framed by horizontal rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    kind: TableKind,
    spec: String,
    column_count: usize,
    position: String,
    centering: bool,
    hlines: bool,
    caption: Option<String>,
    label: Option<String>,
    columns: Option<Vec<String>>,
    data: Vec<Vec<String>>,
    entries: Vec<TableEntry>,
}

impl Table {
    /// Create an empty table from a column spec such as `"l|c|r"`.
    pub fn new(spec: &str) -> DomainResult<Self> {
        let column_count = count_columns(spec)?;
        if column_count == 0 {
            return Err(DomainError::configuration(format!(
                "column spec '{}' declares no columns",
                spec
            )));
        }
        Ok(Self {
            kind: TableKind::default(),
            spec: spec.to_string(),
            column_count,
            position: "h".to_string(),
            centering: true,
            hlines: false,
            caption: None,
            label: None,
            columns: None,
            data: Vec::new(),
            entries: Vec::new(),
        })
    }

    /// Create a table from column labels and data rows.
    ///
    /// The column spec is inferred as `|c|c|...|`. Every row must have
    /// exactly one cell per label.
    pub fn from_data<C, R, T>(columns: Vec<C>, rows: impl IntoIterator<Item = R>) -> DomainResult<Self>
    where
        C: Into<String>,
        R: IntoIterator<Item = T>,
        T: Display,
    {
        if columns.is_empty() {
            return Err(DomainError::configuration(
                "column labels must be provided alongside table data",
            ));
        }
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let spec = format!("|{}", "c|".repeat(columns.len()));
        let mut table = Self::new(&spec)?;

        for (i, row) in rows.into_iter().enumerate() {
            let cells: Vec<String> = row.into_iter().map(|c| c.to_string()).collect();
            if cells.len() != columns.len() {
                return Err(DomainError::item_shape(format!(
                    "data row {} has {} cells, expected {}",
                    i,
                    cells.len(),
                    columns.len()
                )));
            }
            table.data.push(cells);
        }
        table.columns = Some(columns);
        Ok(table)
    }

    /// Replace the inferred column spec. Must keep the column count.
    pub fn with_spec(mut self, spec: &str) -> DomainResult<Self> {
        let count = count_columns(spec)?;
        if count != self.column_count {
            return Err(DomainError::item_shape(format!(
                "column spec '{}' has {} columns, table has {}",
                spec, count, self.column_count
            )));
        }
        self.spec = spec.to_string();
        Ok(self)
    }

    pub fn with_kind(mut self, kind: TableKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = position.into();
        self
    }

    pub fn with_centering(mut self, centering: bool) -> Self {
        self.centering = centering;
        self
    }

    /// Rule after every data row.
    pub fn with_hlines(mut self, hlines: bool) -> Self {
        self.hlines = hlines;
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn add_row<T: Display>(&mut self, cells: impl IntoIterator<Item = T>) -> DomainResult<()> {
        let cells: Vec<String> = cells.into_iter().map(|c| c.to_string()).collect();
        if cells.len() != self.column_count {
            return Err(DomainError::item_shape(format!(
                "row has {} cells, column spec '{}' declares {}",
                cells.len(),
                self.spec,
                self.column_count
            )));
        }
        self.entries.push(TableEntry::Row(cells));
        Ok(())
    }

    pub fn add_rows<R, T>(&mut self, rows: impl IntoIterator<Item = R>) -> DomainResult<()>
    where
        R: IntoIterator<Item = T>,
        T: Display,
    {
        for row in rows {
            self.add_row(row)?;
        }
        Ok(())
    }

    pub fn add_empty_row(&mut self) {
        self.entries
            .push(TableEntry::Row(vec![String::new(); self.column_count]));
    }

    pub fn add_hline(&mut self) {
        self.entries.push(TableEntry::Hline);
    }

    /// Partial rule spanning columns `start..=end` (1-based).
    pub fn add_cline(&mut self, start: usize, end: usize) -> DomainResult<()> {
        if start == 0 || start > end || end > self.column_count {
            return Err(DomainError::item_shape(format!(
                "cline {}-{} outside of columns 1-{}",
                start, end, self.column_count
            )));
        }
        self.entries.push(TableEntry::Cline(start, end));
        Ok(())
    }

    pub fn spec(&self) -> &str {
        &self.spec
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Rows emitted on render, header row excluded.
    pub fn row_count(&self) -> usize {
        let manual = self
            .entries
            .iter()
            .filter(|e| matches!(e, TableEntry::Row(_)))
            .count();
        manual + self.data.len()
    }
}

impl Renderable for Table {
    fn render_into(&self, target: &mut dyn RenderTarget) {
        target.begin_environment("table", Some(self.position.as_str()), &[]);
        if self.centering {
            target.append_command("centering", None, &[]);
        }

        let environment = self.kind.environment();
        match self.kind {
            TableKind::Tabular => target.begin_environment(environment, None, &[self.spec.as_str()]),
            TableKind::Tabularx => {
                target.begin_environment(environment, None, &["\\textwidth", self.spec.as_str()])
            }
        }

        for entry in &self.entries {
            match entry {
                TableEntry::Row(cells) => target.append_row(cells),
                TableEntry::Hline => target.append_command("hline", None, &[]),
                TableEntry::Cline(start, end) => {
                    target.append_command("cline", None, &[format!("{}-{}", start, end).as_str()])
                }
            }
        }

        if let Some(columns) = &self.columns {
            target.append_command("hline", None, &[]);
            target.append_row(columns);
            target.append_command("hline", None, &[]);
            for row in &self.data {
                target.append_row(row);
                if self.hlines {
                    target.append_command("hline", None, &[]);
                }
            }
            target.append_command("hline", None, &[]);
        }

        target.end_environment(environment);

        if let Some(caption) = &self.caption {
            target.append_command("caption", None, &[caption.as_str()]);
        }
        if let Some(label) = &self.label {
            target.append_command("label", None, &[label.as_str()]);
        }
        target.end_environment("table");
    }
}

/// Count the columns declared by a LaTeX column spec.
///
/// Understands `l c r X` and other single-letter types, `p{..} m{..} b{..}`,
/// the `> < @ !` decorations and `*{n}{..}` repetition.
pub fn count_columns(spec: &str) -> DomainResult<usize> {
    let mut chars = spec.chars().peekable();
    let mut count: usize = 0;

    while let Some(c) = chars.next() {
        match c {
            '|' => {}
            c if c.is_whitespace() => {}
            '>' | '<' | '@' | '!' => {
                take_group(&mut chars, spec)?;
            }
            'p' | 'm' | 'b' => {
                take_group(&mut chars, spec)?;
                count += 1;
            }
            '*' => {
                let times = take_group(&mut chars, spec)?;
                let times: usize = times.trim().parse().map_err(|_| {
                    DomainError::configuration(format!("invalid repeat count in column spec '{}'", spec))
                })?;
                let inner = take_group(&mut chars, spec)?;
                count = times
                    .checked_mul(count_columns(&inner)?)
                    .and_then(|n| count.checked_add(n))
                    .ok_or_else(|| {
                        DomainError::configuration(format!("too many columns in column spec '{}'", spec))
                    })?;
            }
            c if c.is_ascii_alphabetic() => count += 1,
            _ => {
                return Err(DomainError::configuration(format!(
                    "unexpected '{}' in column spec '{}'",
                    c, spec
                )))
            }
        }
    }

    Ok(count)
}

/// Consume a `{...}` group (nesting allowed) and return its inner text.
fn take_group(chars: &mut Peekable<Chars<'_>>, spec: &str) -> DomainResult<String> {
    let unbalanced = || DomainError::configuration(format!("unbalanced braces in column spec '{}'", spec));

    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }
    if chars.next() != Some('{') {
        return Err(unbalanced());
    }

    let mut depth = 1;
    let mut inner = String::new();
    for c in chars.by_ref() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(inner);
                }
            }
            _ => {}
        }
        inner.push(c);
    }
    Err(unbalanced())
}
