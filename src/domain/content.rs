//! Content items stored in document nodes

use std::fmt;

use crate::domain::items::{Equation, Image, Table, TikzFigure};
use crate::domain::target::RenderTarget;

/// A content item that serializes itself into a render target.
pub trait Renderable: fmt::Debug {
    fn render_into(&self, target: &mut dyn RenderTarget);
}

/// Text with optional bold face, emitted as markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledText {
    pub text: String,
    pub bold: bool,
}

impl StyledText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

impl Renderable for StyledText {
    fn render_into(&self, target: &mut dyn RenderTarget) {
        if self.bold {
            target.append_command("textbf", None, &[self.text.as_str()]);
        } else {
            target.append_raw(&self.text);
        }
    }
}

/// Everything a node's content list may hold.
#[derive(Debug)]
pub enum ContentItem {
    /// Plain text, escaped by the backend.
    Text(String),
    /// Markup passed through verbatim.
    Raw(String),
    Styled(StyledText),
    Table(Table),
    Image(Image),
    Figure(TikzFigure),
    Equation(Equation),
    /// Caller-defined item.
    Custom(Box<dyn Renderable>),
}

impl ContentItem {
    pub fn raw(markup: impl Into<String>) -> Self {
        ContentItem::Raw(markup.into())
    }

    pub fn custom(item: impl Renderable + 'static) -> Self {
        ContentItem::Custom(Box::new(item))
    }

    /// Short name of the variant, used in logs and outlines.
    pub fn kind(&self) -> &'static str {
        match self {
            ContentItem::Text(_) => "text",
            ContentItem::Raw(_) => "raw",
            ContentItem::Styled(_) => "styled",
            ContentItem::Table(_) => "table",
            ContentItem::Image(_) => "image",
            ContentItem::Figure(_) => "figure",
            ContentItem::Equation(_) => "equation",
            ContentItem::Custom(_) => "custom",
        }
    }

    /// Emit this item into the target.
    pub fn emit(&self, target: &mut dyn RenderTarget) {
        match self {
            ContentItem::Text(text) => target.append_text(text),
            ContentItem::Raw(markup) => target.append_raw(markup),
            ContentItem::Styled(item) => item.render_into(target),
            ContentItem::Table(item) => item.render_into(target),
            ContentItem::Image(item) => item.render_into(target),
            ContentItem::Figure(item) => item.render_into(target),
            ContentItem::Equation(item) => item.render_into(target),
            ContentItem::Custom(item) => item.render_into(target),
        }
    }
}

impl From<&str> for ContentItem {
    fn from(text: &str) -> Self {
        ContentItem::Text(text.to_string())
    }
}

impl From<String> for ContentItem {
    fn from(text: String) -> Self {
        ContentItem::Text(text)
    }
}

impl From<StyledText> for ContentItem {
    fn from(item: StyledText) -> Self {
        ContentItem::Styled(item)
    }
}

impl From<Table> for ContentItem {
    fn from(item: Table) -> Self {
        ContentItem::Table(item)
    }
}

impl From<Image> for ContentItem {
    fn from(item: Image) -> Self {
        ContentItem::Image(item)
    }
}

impl From<TikzFigure> for ContentItem {
    fn from(item: TikzFigure) -> Self {
        ContentItem::Figure(item)
    }
}

impl From<Equation> for ContentItem {
    fn from(item: Equation) -> Self {
        ContentItem::Equation(item)
    }
}
