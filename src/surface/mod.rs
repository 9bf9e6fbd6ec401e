//! The drawing surface a scene paints onto.
//!
//! A [`Surface`] looks like a 2D canvas context: it keeps a current
//! transform with a save/restore stack, and exposes fill, stroke and text
//! primitives in the coordinates of that current transform. The scene graph
//! never inspects surface state; it only issues calls.
//!
//! State operations (`save`, `restore`, `translate`, `rotate`, `scale`) are
//! infallible. Style and paint operations return the surface's own error
//! type, which the scene hands back to the caller untouched.

mod recording;

pub use recording::{Frame, RecordedOp, RecordingSurface, SurfaceError, SurfaceOp};

use crate::color::Color;

pub trait Surface {
    /// Error raised by style and paint calls (e.g. an unusable color).
    type Error: std::error::Error;

    /// Push the current transform and style state.
    fn save(&mut self);

    /// Pop the state pushed by the matching [`Surface::save`].
    fn restore(&mut self);

    fn translate(&mut self, dx: f32, dy: f32);

    /// Rotate by `radians`, clockwise-positive on a y-down surface.
    fn rotate(&mut self, radians: f32);

    fn scale(&mut self, sx: f32, sy: f32);

    fn set_fill_color(&mut self, color: Color) -> Result<(), Self::Error>;

    fn set_stroke_color(&mut self, color: Color) -> Result<(), Self::Error>;

    fn set_font_size(&mut self, size: f32) -> Result<(), Self::Error>;

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> Result<(), Self::Error>;

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32)
        -> Result<(), Self::Error>;

    /// Fill `text` with its baseline starting at `(x, y)`.
    fn fill_text(&mut self, text: &str, x: f32, y: f32) -> Result<(), Self::Error>;

    /// Commit everything drawn since the last call as one frame.
    ///
    /// Called by the host once per tick, never by the scene graph itself.
    fn present(&mut self) -> Result<(), Self::Error>;
}
