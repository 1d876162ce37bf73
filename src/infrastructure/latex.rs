//! LaTeX source builder
//!
//! `LatexDocument` records the structural operations produced by a render
//! pass in order, and serializes them to a complete `.tex` source.

use std::fmt;

use itertools::Itertools;

use crate::domain::{DocumentMetadata, HeadingLevel, Plot, PlotData, RenderTarget};
use crate::util::latex::{escape_latex, format_sig};

/// Significant digits used for plot coordinates.
const COORDINATE_DIGITS: usize = 6;

/// One recorded structural operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Init(DocumentMetadata),
    OpenHeading {
        level: HeadingLevel,
        title: String,
    },
    CloseHeading,
    Text(String),
    Raw(String),
    BeginEnvironment {
        name: String,
        options: Option<String>,
        args: Vec<String>,
    },
    EndEnvironment(String),
    Command {
        name: String,
        options: Option<String>,
        args: Vec<String>,
    },
    Row(Vec<String>),
    Plot(Plot),
}

/// A LaTeX document assembled from render operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LatexDocument {
    ops: Vec<Op>,
}

impl LatexDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Operations in the order they were emitted.
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Metadata given to `init`, if it ran.
    pub fn metadata(&self) -> Option<&DocumentMetadata> {
        self.ops.iter().find_map(|op| match op {
            Op::Init(metadata) => Some(metadata),
            _ => None,
        })
    }

    /// Serialized body, i.e. everything between `\begin{document}` and
    /// `\end{document}` except the title.
    pub fn body(&self) -> String {
        self.ops
            .iter()
            .filter_map(serialize_op)
            .join("\n")
    }

    /// Preamble for the recorded metadata (defaults when `init` never ran).
    pub fn preamble(&self) -> String {
        let default = DocumentMetadata::default();
        let metadata = self.metadata().unwrap_or(&default);
        let layout = &metadata.layout;

        let mut lines = vec![format!("\\documentclass{{{}}}", layout.document_class)];
        if !layout.geometry.is_empty() {
            let options = layout
                .geometry
                .iter()
                .map(|(key, value)| format!("{}={}", key, value))
                .join(",");
            lines.push(format!("\\usepackage[{}]{{geometry}}", options));
        }
        for package in &layout.packages {
            lines.push(format!("\\usepackage{{{}}}", package));
        }

        lines.push(format!("\\title{{{}}}", escape_latex(&metadata.title)));
        if let Some(author) = &metadata.author {
            lines.push(format!("\\author{{{}}}", escape_latex(author)));
        }
        if metadata.date {
            lines.push("\\date{\\today}".to_string());
        } else {
            lines.push("\\date{}".to_string());
        }
        lines.join("\n")
    }

    /// Complete `.tex` source.
    pub fn dumps(&self) -> String {
        let maketitle = self
            .metadata()
            .map(|m| m.layout.maketitle)
            .unwrap_or(false);

        let mut out = self.preamble();
        out.push_str("\n\\begin{document}\n");
        if maketitle {
            out.push_str("\\maketitle\n");
        }
        let body = self.body();
        if !body.is_empty() {
            out.push_str(&body);
            out.push('\n');
        }
        out.push_str("\\end{document}\n");
        out
    }
}

impl fmt::Display for LatexDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dumps())
    }
}

fn command(name: &str, options: Option<&String>, args: &[String]) -> String {
    format!("\\{}{}", name, command_tail(options, args))
}

fn serialize_op(op: &Op) -> Option<String> {
    let line = match op {
        Op::Init(_) | Op::CloseHeading => return None,
        Op::OpenHeading { level, title } => {
            format!("\\{}{{{}}}", level.command(), escape_latex(title))
        }
        Op::Text(text) => escape_latex(text),
        Op::Raw(markup) => markup.clone(),
        Op::BeginEnvironment {
            name,
            options,
            args,
        } => format!("\\begin{{{}}}{}", name, command_tail(options.as_ref(), args)),
        Op::EndEnvironment(name) => format!("\\end{{{}}}", name),
        Op::Command {
            name,
            options,
            args,
        } => command(name, options.as_ref(), args),
        Op::Row(cells) => format!("{} \\\\", cells.iter().map(|c| escape_latex(c)).join(" & ")),
        Op::Plot(plot) => serialize_plot(plot),
    };
    Some(line)
}

fn command_tail(options: Option<&String>, args: &[String]) -> String {
    let options = options
        .map(|o| format!("[{}]", o))
        .unwrap_or_default();
    let args = args.iter().map(|a| format!("{{{}}}", a)).join("");
    options + &args
}

fn serialize_plot(plot: &Plot) -> String {
    let options = plot
        .options
        .as_ref()
        .map(|o| format!("[{}]", o))
        .unwrap_or_default();
    let mut out = match &plot.data {
        PlotData::Function(expr) => format!("\\addplot{} {{{}}};", options, expr),
        PlotData::Coordinates(points) => {
            let points = points
                .iter()
                .map(|(x, y)| {
                    format!(
                        "({},{})",
                        format_sig(*x, COORDINATE_DIGITS, None),
                        format_sig(*y, COORDINATE_DIGITS, None)
                    )
                })
                .join(" ");
            format!("\\addplot{} coordinates {{{}}};", options, points)
        }
    };
    if let Some(name) = &plot.name {
        out.push_str(&format!("\n\\addlegendentry{{{}}}", escape_latex(name)));
    }
    out
}

impl RenderTarget for LatexDocument {
    fn init(&mut self, metadata: &DocumentMetadata) {
        self.ops.push(Op::Init(metadata.clone()));
    }

    fn open_heading(&mut self, level: HeadingLevel, title: &str) {
        self.ops.push(Op::OpenHeading {
            level,
            title: title.to_string(),
        });
    }

    fn close_heading(&mut self) {
        self.ops.push(Op::CloseHeading);
    }

    fn append_text(&mut self, text: &str) {
        self.ops.push(Op::Text(text.to_string()));
    }

    fn append_raw(&mut self, markup: &str) {
        self.ops.push(Op::Raw(markup.to_string()));
    }

    fn begin_environment(&mut self, name: &str, options: Option<&str>, args: &[&str]) {
        self.ops.push(Op::BeginEnvironment {
            name: name.to_string(),
            options: options.map(String::from),
            args: args.iter().map(|a| a.to_string()).collect(),
        });
    }

    fn end_environment(&mut self, name: &str) {
        self.ops.push(Op::EndEnvironment(name.to_string()));
    }

    fn append_command(&mut self, name: &str, options: Option<&str>, args: &[&str]) {
        self.ops.push(Op::Command {
            name: name.to_string(),
            options: options.map(String::from),
            args: args.iter().map(|a| a.to_string()).collect(),
        });
    }

    fn append_row(&mut self, cells: &[String]) {
        self.ops.push(Op::Row(cells.to_vec()));
    }

    fn append_plot(&mut self, plot: &Plot) {
        self.ops.push(Op::Plot(plot.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LayoutOptions;

    #[test]
    fn given_environment_with_options_and_args_then_serializes_in_order() {
        let mut doc = LatexDocument::new();
        doc.begin_environment("tabularx", None, &["\\textwidth", "X|X"]);
        doc.begin_environment("table", Some("h!"), &[]);

        assert_eq!(
            doc.body(),
            "\\begin{tabularx}{\\textwidth}{X|X}\n\\begin{table}[h!]"
        );
    }

    #[test]
    fn given_row_then_escapes_cells() {
        let mut doc = LatexDocument::new();
        doc.append_row(&["50%".to_string(), "a&b".to_string()]);
        assert_eq!(doc.body(), "50\\% & a\\&b \\\\");
    }

    #[test]
    fn given_named_coordinate_plot_then_adds_legend_entry() {
        let mut doc = LatexDocument::new();
        doc.append_plot(&Plot::coordinates([(-4.77778, 2027.60977), (5.0, -3269.56775)]).named("estimate"));
        assert_eq!(
            doc.body(),
            "\\addplot coordinates {(-4.77778,2027.61) (5,-3269.57)};\n\\addlegendentry{estimate}"
        );
    }

    #[test]
    fn given_metadata_then_preamble_has_title_author_and_date() {
        let mut doc = LatexDocument::new();
        let layout = LayoutOptions {
            packages: vec!["amsmath".into()],
            ..LayoutOptions::default()
        };
        doc.init(
            &DocumentMetadata::new("Report & Co")
                .with_author("BB")
                .with_date(true)
                .with_layout(layout),
        );

        let source = doc.dumps();
        assert!(source.starts_with("\\documentclass{article}\n"));
        assert!(source.contains("\\usepackage[tmargin=1.5cm,lmargin=1.5cm,rmargin=1.5cm]{geometry}"));
        assert!(source.contains("\\usepackage{amsmath}"));
        assert!(source.contains("\\title{Report \\& Co}"));
        assert!(source.contains("\\author{BB}"));
        assert!(source.contains("\\date{\\today}"));
        assert!(source.contains("\\begin{document}\n\\maketitle\n"));
        assert!(source.ends_with("\\end{document}\n"));
    }

    #[test]
    fn given_no_date_then_clears_date() {
        let mut doc = LatexDocument::new();
        doc.init(&DocumentMetadata::default());
        assert!(doc.preamble().contains("\\date{}"));
    }
}
