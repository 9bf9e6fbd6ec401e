pub mod color;
pub mod error;
pub mod scene;
pub mod surface;
pub mod transform;

use std::time::{Duration, Instant};

use scene::Scene;
use surface::Surface;

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::error::SceneError;
    pub use crate::scene::{
        Card, ChangeFlags, Container, DrawContext, Node, NodeId, NodeKind, Rect, Scene, Text,
    };
    pub use crate::surface::{RecordingSurface, Surface, SurfaceOp};
    pub use crate::transform::Transform;
    pub use crate::{App, AppConfig, RedrawMode};
}

/// When the driver redraws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedrawMode {
    /// Draw and present on every tick
    #[default]
    EveryTick,
    /// Skip ticks where the scene reports no changes
    OnChange,
}

pub struct AppConfig {
    /// Time between ticks. The default of 20 ms is a 50 Hz redraw.
    pub frame_interval: Duration,
    /// Stop after this many ticks; `None` runs until the surface fails.
    pub max_frames: Option<u64>,
    pub redraw: RedrawMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(20),
            max_frames: None,
            redraw: RedrawMode::EveryTick,
        }
    }
}

/// A callback that gets called each tick before drawing, with the scene and
/// the tick number (starting at 0).
/// Use this to animate by mutating nodes.
pub type UpdateCallback = Box<dyn FnMut(&mut Scene, u64)>;

/// A fixed-rate redraw loop for hosts that don't bring their own timer.
///
/// Hosts that do have a timer call [`App::tick`] from it instead of
/// [`App::run`]; the scene itself never schedules anything.
pub struct App {
    config: AppConfig,
    on_update: Option<UpdateCallback>,
    ticks: u64,
    presented: u64,
}

impl App {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            on_update: None,
            ticks: 0,
            presented: 0,
        }
    }

    pub fn frame_interval(mut self, interval: Duration) -> Self {
        self.config.frame_interval = interval;
        self
    }

    pub fn max_frames(mut self, frames: u64) -> Self {
        self.config.max_frames = Some(frames);
        self
    }

    pub fn redraw(mut self, mode: RedrawMode) -> Self {
        self.config.redraw = mode;
        self
    }

    /// Set a callback that gets called each tick before drawing.
    ///
    /// # Example
    /// ```
    /// use stage2d::prelude::*;
    ///
    /// let mut scene = Scene::new();
    /// let card = scene.add_child(Card::new(10).into_node().at(100.0, 0.0)).unwrap();
    ///
    /// let mut surface = RecordingSurface::new();
    /// App::new()
    ///     .frame_interval(std::time::Duration::ZERO)
    ///     .max_frames(3)
    ///     .on_update(move |scene, _tick| {
    ///         if let Some(node) = scene.node_mut(card) {
    ///             node.rotation += 0.01;
    ///         }
    ///     })
    ///     .run(&mut scene, &mut surface)
    ///     .unwrap();
    /// assert_eq!(surface.frames().len(), 3);
    /// ```
    pub fn on_update<F: FnMut(&mut Scene, u64) + 'static>(mut self, callback: F) -> Self {
        self.on_update = Some(Box::new(callback));
        self
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Frames actually presented so far.
    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Run one tick: update, then draw and present unless the redraw mode
    /// says the frame can be skipped. Returns whether a frame was presented.
    pub fn tick<S: Surface>(&mut self, scene: &mut Scene, surface: &mut S) -> Result<bool, S::Error> {
        let tick = self.ticks;
        self.ticks += 1;
        if let Some(ref mut callback) = self.on_update {
            callback(scene, tick);
        }

        if self.config.redraw == RedrawMode::OnChange && !scene.needs_paint() {
            log::trace!("App: tick {} skipped, scene unchanged", tick);
            return Ok(false);
        }

        scene.frame(surface)?;
        self.presented += 1;
        Ok(true)
    }

    /// Tick at the configured interval until `max_frames` ticks have run.
    ///
    /// Returns the number of frames presented. A surface error stops the
    /// loop and is returned unchanged.
    pub fn run<S: Surface>(mut self, scene: &mut Scene, surface: &mut S) -> Result<u64, S::Error> {
        let _ = env_logger::try_init();

        log::info!(
            "App: starting, interval {:?}, max frames {:?}, redraw {:?}",
            self.config.frame_interval,
            self.config.max_frames,
            self.config.redraw
        );

        while self.config.max_frames.map_or(true, |max| self.ticks < max) {
            let started = Instant::now();

            let tick = self.ticks;
            if let Err(err) = self.tick(scene, surface) {
                log::warn!("App: surface error on tick {}: {}", tick, err);
                return Err(err);
            }

            // Sleep off whatever is left of the interval
            if let Some(rest) = self.config.frame_interval.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }

        log::info!(
            "App: stopped after {} ticks, {} frames presented",
            self.ticks,
            self.presented
        );
        Ok(self.presented)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
