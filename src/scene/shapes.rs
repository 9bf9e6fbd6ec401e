//! Leaf shapes.
//!
//! Leaves paint in their own local space: the node has already been
//! translated and rotated by the time a leaf's `paint` runs, so `(0, 0)` is
//! the node's transformed origin. Sizes are issued as given; a zero or
//! negative extent simply paints nothing visible.

use crate::color::Color;
use crate::surface::Surface;

use super::context::DrawContext;

/// A filled (and optionally stroked) axis-aligned rectangle from `(0, 0)`
/// to `(width, height)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub width: f32,
    pub height: f32,
    pub fill_color: Color,
    /// Outline drawn over the fill, if set
    pub stroke_color: Option<Color>,
}

impl Rect {
    pub const DEFAULT_SIZE: f32 = 100.0;
    pub const DEFAULT_FILL: Color = Color::RED;

    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    pub fn with_stroke(mut self, color: Color) -> Self {
        self.stroke_color = Some(color);
        self
    }

    pub(crate) fn paint<S: Surface>(&self, ctx: &mut DrawContext<'_, S>) -> Result<(), S::Error> {
        let surface = ctx.surface();
        surface.set_fill_color(self.fill_color)?;
        surface.fill_rect(0.0, 0.0, self.width, self.height)?;

        if let Some(stroke) = self.stroke_color {
            surface.set_stroke_color(stroke)?;
            surface.stroke_rect(0.0, 0.0, self.width, self.height)?;
        }
        Ok(())
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_SIZE,
            height: Self::DEFAULT_SIZE,
            fill_color: Self::DEFAULT_FILL,
            stroke_color: None,
        }
    }
}

/// A single run of filled text.
///
/// The baseline sits `font_size` below the local origin, so the glyphs hang
/// down from `(0, 0)` roughly like a box would.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    content: String,
    pub font_size: f32,
    pub text_color: Color,
}

impl Text {
    pub const DEFAULT_FONT_SIZE: f32 = 30.0;
    pub const DEFAULT_COLOR: Color = Color::BLACK;

    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            font_size: Self::DEFAULT_FONT_SIZE,
            text_color: Self::DEFAULT_COLOR,
        }
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    /// The text, fixed at construction.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub(crate) fn paint<S: Surface>(&self, ctx: &mut DrawContext<'_, S>) -> Result<(), S::Error> {
        let surface = ctx.surface();
        surface.set_font_size(self.font_size)?;
        surface.set_fill_color(self.text_color)?;
        surface.fill_text(&self.content, 0.0, self.font_size)
    }
}
