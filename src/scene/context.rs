//! Transform context threaded through a draw traversal.

use std::ops::{Deref, DerefMut};

use crate::surface::Surface;
use crate::transform::Transform;

/// Wraps a [`Surface`] for the duration of one traversal.
///
/// The context mirrors every transform it forwards to the surface, so the
/// current world transform and save depth can be read without asking the
/// surface. Saves are only reachable through [`DrawContext::save`], whose
/// guard restores on drop; a traversal therefore always leaves the surface
/// at the depth it started from, whether painting returns early through
/// `?` or unwinds.
pub struct DrawContext<'s, S: Surface> {
    surface: &'s mut S,
    current: Transform,
    stack: Vec<Transform>,
}

impl<'s, S: Surface> DrawContext<'s, S> {
    pub fn new(surface: &'s mut S) -> Self {
        Self {
            surface,
            current: Transform::IDENTITY,
            stack: Vec::new(),
        }
    }

    /// World transform relative to where this context was created.
    pub fn transform(&self) -> Transform {
        self.current
    }

    /// Number of saves currently open in this context.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The wrapped surface, for issuing paint and style calls.
    ///
    /// State calls made directly on the surface bypass the context's
    /// bookkeeping; use the context's own methods for those.
    pub fn surface(&mut self) -> &mut S {
        &mut *self.surface
    }

    /// Push the current state; it is popped when the guard drops.
    pub fn save(&mut self) -> SavedState<'_, 's, S> {
        self.surface.save();
        self.stack.push(self.current);
        SavedState { ctx: self }
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.surface.translate(dx, dy);
        self.current = self.current.then(&Transform::translate(dx, dy));
    }

    pub fn rotate(&mut self, radians: f32) {
        self.surface.rotate(radians);
        self.current = self.current.then(&Transform::rotate(radians));
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.surface.scale(sx, sy);
        self.current = self.current.then(&Transform::scale_xy(sx, sy));
    }

    fn restore(&mut self) {
        if let Some(previous) = self.stack.pop() {
            self.current = previous;
            self.surface.restore();
        }
    }
}

/// Scope guard returned by [`DrawContext::save`].
///
/// Derefs to the context so drawing continues through it; dropping it
/// issues the matching `restore`.
pub struct SavedState<'c, 's, S: Surface> {
    ctx: &'c mut DrawContext<'s, S>,
}

impl<'s, S: Surface> Deref for SavedState<'_, 's, S> {
    type Target = DrawContext<'s, S>;

    fn deref(&self) -> &Self::Target {
        &*self.ctx
    }
}

impl<S: Surface> DerefMut for SavedState<'_, '_, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.ctx
    }
}

impl<S: Surface> Drop for SavedState<'_, '_, S> {
    fn drop(&mut self) {
        self.ctx.restore();
    }
}
