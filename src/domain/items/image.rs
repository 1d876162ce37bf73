//! Images embedded in a floating `figure`

use crate::domain::content::Renderable;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::target::RenderTarget;

pub const DEFAULT_IMAGE_WIDTH: &str = "7.5cm";
pub const DEFAULT_IMAGE_POSITION: &str = "H";

/// An image file placed in a `figure` float.
///
/// The file path is handed to the backend unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    filename: String,
    width: String,
    position: String,
    caption: Option<String>,
    label: Option<String>,
}

impl Image {
    pub fn new(filename: impl Into<String>) -> DomainResult<Self> {
        let filename = filename.into();
        if filename.trim().is_empty() {
            return Err(DomainError::configuration("no image path provided"));
        }
        Ok(Self {
            filename,
            width: DEFAULT_IMAGE_WIDTH.to_string(),
            position: DEFAULT_IMAGE_POSITION.to_string(),
            caption: None,
            label: None,
        })
    }

    /// Display width. `"full"` spans the text width.
    pub fn with_width(mut self, width: impl Into<String>) -> Self {
        let width = width.into();
        self.width = if width.eq_ignore_ascii_case("full") {
            "\\textwidth".to_string()
        } else {
            width
        };
        self
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = position.into();
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

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn width(&self) -> &str {
        &self.width
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }
}

impl Renderable for Image {
    fn render_into(&self, target: &mut dyn RenderTarget) {
        let width = format!("width={}", self.width);

        target.begin_environment("figure", Some(self.position.as_str()), &[]);
        target.append_command("centering", None, &[]);
        target.append_command("includegraphics", Some(width.as_str()), &[self.filename.as_str()]);
        if let Some(caption) = &self.caption {
            target.append_command("caption", None, &[caption.as_str()]);
        }
        if let Some(label) = &self.label {
            target.append_command("label", None, &[label.as_str()]);
        }
        target.end_environment("figure");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_full_width_then_uses_textwidth() {
        let image = Image::new("plot.png").unwrap().with_width("FULL");
        assert_eq!(image.width(), "\\textwidth");
    }

    #[test]
    fn given_blank_path_then_configuration_error() {
        assert!(matches!(
            Image::new("  "),
            Err(DomainError::Configuration { .. })
        ));
    }
}
