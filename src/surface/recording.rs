//! A surface that records calls instead of rasterizing them.

use thiserror::Error;

use super::Surface;
use crate::color::Color;
use crate::transform::Transform;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("invalid color: {0:?}")]
    InvalidColor(Color),
}

/// A single call made on a [`RecordingSurface`].
///
/// Coordinates are exactly as passed by the caller, in the surface's current
/// local space at the time of the call.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Save,
    Restore,
    Translate {
        dx: f32,
        dy: f32,
    },
    Rotate {
        radians: f32,
    },
    Scale {
        sx: f32,
        sy: f32,
    },
    SetFillColor(Color),
    SetStrokeColor(Color),
    SetFontSize(f32),
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    FillText {
        /// The text string to render
        text: String,
        /// Baseline start in local coordinates
        x: f32,
        y: f32,
    },
}

impl SurfaceOp {
    /// Whether this op produces pixels (as opposed to changing state).
    pub fn is_paint(&self) -> bool {
        matches!(
            self,
            SurfaceOp::FillRect { .. } | SurfaceOp::StrokeRect { .. } | SurfaceOp::FillText { .. }
        )
    }

    /// Whether this op only changes fill/stroke/font style.
    pub fn is_style(&self) -> bool {
        matches!(
            self,
            SurfaceOp::SetFillColor(_) | SurfaceOp::SetStrokeColor(_) | SurfaceOp::SetFontSize(_)
        )
    }
}

/// An op together with the surface transform in effect when it was issued.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedOp {
    pub op: SurfaceOp,
    /// World transform (composed from every translate/rotate/scale still on the stack)
    pub transform: Transform,
}

/// The ops committed by one [`Surface::present`] call.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub ops: Vec<RecordedOp>,
}

impl Frame {
    pub fn paint_count(&self) -> usize {
        self.ops.iter().filter(|r| r.op.is_paint()).count()
    }
}

#[derive(Debug, Clone, Copy)]
struct State {
    transform: Transform,
    fill: Color,
    stroke: Color,
    font_size: f32,
}

impl Default for State {
    fn default() -> Self {
        Self {
            transform: Transform::IDENTITY,
            fill: Color::BLACK,
            stroke: Color::BLACK,
            font_size: 10.0,
        }
    }
}

/// A [`Surface`] that records every call.
///
/// It tracks a canvas-style state stack of its own so that each recorded op
/// carries the world transform it was drawn with, and so unbalanced
/// save/restore pairs are observable through [`RecordingSurface::depth`] and
/// [`RecordingSurface::unmatched_restores`]. A `restore` with nothing saved
/// is ignored, as a canvas would.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pending: Vec<RecordedOp>,
    frames: Vec<Frame>,
    state: State,
    stack: Vec<State>,
    max_depth: usize,
    unmatched_restores: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ops recorded since the last `present`.
    pub fn ops(&self) -> Vec<SurfaceOp> {
        self.pending.iter().map(|r| r.op.clone()).collect()
    }

    /// Ops recorded since the last `present`, with their world transforms.
    pub fn recorded(&self) -> &[RecordedOp] {
        &self.pending
    }

    /// Paint ops recorded since the last `present`, with their world transforms.
    pub fn paints(&self) -> impl Iterator<Item = &RecordedOp> {
        self.pending.iter().filter(|r| r.op.is_paint())
    }

    /// Frames committed so far, oldest first.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Drop everything recorded, keeping the current state stack.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.frames.clear();
    }

    /// Current save depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Deepest save depth reached so far.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Number of `restore` calls made with nothing saved.
    pub fn unmatched_restores(&self) -> usize {
        self.unmatched_restores
    }

    /// The current world transform.
    pub fn transform(&self) -> Transform {
        self.state.transform
    }

    pub fn fill_color(&self) -> Color {
        self.state.fill
    }

    pub fn font_size(&self) -> f32 {
        self.state.font_size
    }

    fn record(&mut self, op: SurfaceOp) {
        self.pending.push(RecordedOp {
            op,
            transform: self.state.transform,
        });
    }

    fn apply(&mut self, transform: Transform) {
        self.state.transform = self.state.transform.then(&transform);
    }

    fn check_color(color: Color) -> Result<Color, SurfaceError> {
        if color.is_valid() {
            Ok(color)
        } else {
            Err(SurfaceError::InvalidColor(color))
        }
    }
}

impl Surface for RecordingSurface {
    type Error = SurfaceError;

    fn save(&mut self) {
        self.record(SurfaceOp::Save);
        self.stack.push(self.state);
        self.max_depth = self.max_depth.max(self.stack.len());
    }

    fn restore(&mut self) {
        self.record(SurfaceOp::Restore);
        match self.stack.pop() {
            Some(state) => self.state = state,
            None => self.unmatched_restores += 1,
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.record(SurfaceOp::Translate { dx, dy });
        self.apply(Transform::translate(dx, dy));
    }

    fn rotate(&mut self, radians: f32) {
        self.record(SurfaceOp::Rotate { radians });
        self.apply(Transform::rotate(radians));
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.record(SurfaceOp::Scale { sx, sy });
        self.apply(Transform::scale_xy(sx, sy));
    }

    fn set_fill_color(&mut self, color: Color) -> Result<(), SurfaceError> {
        self.state.fill = Self::check_color(color)?;
        self.record(SurfaceOp::SetFillColor(color));
        Ok(())
    }

    fn set_stroke_color(&mut self, color: Color) -> Result<(), SurfaceError> {
        self.state.stroke = Self::check_color(color)?;
        self.record(SurfaceOp::SetStrokeColor(color));
        Ok(())
    }

    fn set_font_size(&mut self, size: f32) -> Result<(), SurfaceError> {
        self.state.font_size = size;
        self.record(SurfaceOp::SetFontSize(size));
        Ok(())
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> Result<(), SurfaceError> {
        self.record(SurfaceOp::FillRect {
            x,
            y,
            width,
            height,
        });
        Ok(())
    }

    fn stroke_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<(), SurfaceError> {
        self.record(SurfaceOp::StrokeRect {
            x,
            y,
            width,
            height,
        });
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) -> Result<(), SurfaceError> {
        self.record(SurfaceOp::FillText {
            text: text.to_string(),
            x,
            y,
        });
        Ok(())
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        let ops = std::mem::take(&mut self.pending);
        log::trace!("RecordingSurface: presenting frame with {} ops", ops.len());
        self.frames.push(Frame { ops });
        Ok(())
    }
}
