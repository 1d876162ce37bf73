//! Render target contract consumed by the flattener and by renderable items

use std::fmt;

use crate::domain::error::DomainError;
use crate::domain::items::Plot;
use crate::domain::metadata::DocumentMetadata;

/// Deepest level that still opens a heading. Deeper nodes are inlined.
pub const MAX_HEADING_DEPTH: usize = 3;

/// One of the three supported heading kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeadingLevel {
    Section,
    Subsection,
    Subsubsection,
}

impl HeadingLevel {
    pub fn depth(&self) -> usize {
        match self {
            HeadingLevel::Section => 1,
            HeadingLevel::Subsection => 2,
            HeadingLevel::Subsubsection => 3,
        }
    }

    /// LaTeX command name opening this heading.
    pub fn command(&self) -> &'static str {
        match self {
            HeadingLevel::Section => "section",
            HeadingLevel::Subsection => "subsection",
            HeadingLevel::Subsubsection => "subsubsection",
        }
    }
}

impl TryFrom<usize> for HeadingLevel {
    type Error = DomainError;

    fn try_from(level: usize) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(HeadingLevel::Section),
            2 => Ok(HeadingLevel::Subsection),
            3 => Ok(HeadingLevel::Subsubsection),
            _ => Err(DomainError::UnsupportedDepth { level }),
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

/// Accumulating structural representation of a document.
///
/// The flattener drives the heading and text operations; renderable items
/// use the remaining ones to serialize themselves.
pub trait RenderTarget {
    /// Set up document-level metadata. Called exactly once, from the root.
    fn init(&mut self, metadata: &DocumentMetadata);

    fn open_heading(&mut self, level: HeadingLevel, title: &str);

    fn close_heading(&mut self);

    /// Plain text; the backend escapes it.
    fn append_text(&mut self, text: &str);

    /// Markup passed through verbatim.
    fn append_raw(&mut self, markup: &str);

    fn begin_environment(&mut self, name: &str, options: Option<&str>, args: &[&str]);

    fn end_environment(&mut self, name: &str);

    fn append_command(&mut self, name: &str, options: Option<&str>, args: &[&str]);

    /// One table row; cells are plain text.
    fn append_row(&mut self, cells: &[String]);

    fn append_plot(&mut self, plot: &Plot);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, HeadingLevel::Section)]
    #[case(2, HeadingLevel::Subsection)]
    #[case(3, HeadingLevel::Subsubsection)]
    fn given_supported_level_then_maps_to_heading(
        #[case] level: usize,
        #[case] expected: HeadingLevel,
    ) {
        assert_eq!(HeadingLevel::try_from(level).unwrap(), expected);
        assert_eq!(expected.depth(), level);
    }

    #[rstest]
    #[case(0)]
    #[case(4)]
    #[case(17)]
    fn given_unsupported_level_then_rejects(#[case] level: usize) {
        assert_eq!(
            HeadingLevel::try_from(level),
            Err(DomainError::UnsupportedDepth { level })
        );
    }
}
