//! pgfplots figures: one `axis` inside a `tikzpicture`

use crate::domain::content::Renderable;
use crate::domain::target::RenderTarget;

pub const DEFAULT_PLOT_OPTIONS: &str = "height=4cm, width=6cm, grid=major";

/// Data of a single plotted series.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotData {
    /// Symbolic expression in `x`, e.g. `-x^5 - 242`
    Function(String),
    /// Explicit points in plotting order
    Coordinates(Vec<(f64, f64)>),
}

/// One `\addplot` series with an optional legend entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    pub name: Option<String>,
    pub options: Option<String>,
    pub data: PlotData,
}

impl Plot {
    pub fn function(expr: impl Into<String>) -> Self {
        Self {
            name: None,
            options: None,
            data: PlotData::Function(expr.into()),
        }
    }

    pub fn coordinates(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self {
            name: None,
            options: None,
            data: PlotData::Coordinates(points.into_iter().collect()),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_options(mut self, options: impl Into<String>) -> Self {
        self.options = Some(options.into());
        self
    }
}

/// A TikZ picture holding one axis and its series.
#[derive(Debug, Clone, PartialEq)]
pub struct TikzFigure {
    plot_options: String,
    series: Vec<Plot>,
}

impl Default for TikzFigure {
    fn default() -> Self {
        Self::new()
    }
}

impl TikzFigure {
    pub fn new() -> Self {
        Self {
            plot_options: DEFAULT_PLOT_OPTIONS.to_string(),
            series: Vec::new(),
        }
    }

    /// Options of the `axis` environment.
    pub fn with_plot_options(mut self, options: impl Into<String>) -> Self {
        self.plot_options = options.into();
        self
    }

    pub fn add_plot(&mut self, plot: Plot) {
        self.series.push(plot);
    }

    pub fn with_plot(mut self, plot: Plot) -> Self {
        self.add_plot(plot);
        self
    }

    pub fn series(&self) -> &[Plot] {
        &self.series
    }

    pub fn plot_options(&self) -> &str {
        &self.plot_options
    }
}

impl Renderable for TikzFigure {
    fn render_into(&self, target: &mut dyn RenderTarget) {
        target.begin_environment("tikzpicture", None, &[]);
        target.begin_environment("axis", Some(self.plot_options.as_str()), &[]);
        for plot in &self.series {
            target.append_plot(plot);
        }
        target.end_environment("axis");
        target.end_environment("tikzpicture");
    }
}
