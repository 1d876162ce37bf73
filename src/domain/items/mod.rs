//! Renderable content items

mod equation;
mod figure;
mod image;
mod table;

pub use equation::{Equation, MathEnvironment};
pub use figure::{Plot, PlotData, TikzFigure, DEFAULT_PLOT_OPTIONS};
pub use image::{Image, DEFAULT_IMAGE_POSITION, DEFAULT_IMAGE_WIDTH};
pub use table::{count_columns, Table, TableKind};
