//! The rain controller: owner of all animation state.

use std::time::Instant;

use amefuri_core::{
    LayerCatalog,
    constants::{DENSITY, FLICKER_CHANCE, OVERLAY_COLOR},
};
use log::{debug, info};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::column::RainColumn;
use crate::fade::Fade;
use crate::scheduler::{FrameHandle, FrameQueue, FrameScheduler};
use crate::surface::Surface;

/// Drives the rain on a surface.
///
/// Motion is a fixed displacement per frame, so the fall speed follows the
/// rate at which the scheduler delivers frames.
#[derive(Debug)]
pub struct RainController<S, F, R = StdRng> {
    catalog: LayerCatalog,
    columns: Vec<RainColumn>,
    surface: S,
    scheduler: F,
    rng: R,
    /// Handle of the next requested frame while the loop runs.
    frame: Option<FrameHandle>,
    /// Last requested opacity. `None` until the host first sets visibility.
    target_opacity: Option<f32>,
    fade: Fade,
}

impl<S: Surface, F: FrameScheduler> RainController<S, F, StdRng> {
    /// Create a controller seeded from the operating system.
    pub fn new(surface: S, scheduler: F) -> Self {
        Self::with_rng(surface, scheduler, StdRng::from_os_rng())
    }
}

impl<S: Surface, F: FrameScheduler, R: Rng> RainController<S, F, R> {
    /// Create a controller with an explicit random source.
    ///
    /// No columns exist until [`rebuild`](Self::rebuild) or
    /// [`load`](Self::load) runs. The surface starts fully opaque.
    pub fn with_rng(surface: S, scheduler: F, rng: R) -> Self {
        Self {
            catalog: LayerCatalog::standard(),
            columns: Vec::new(),
            surface,
            scheduler,
            rng,
            frame: None,
            target_opacity: None,
            fade: Fade::settled(1.0, Instant::now()),
        }
    }

    /// Initial load: build the columns and start animating, whatever the
    /// visibility.
    pub fn load(&mut self) {
        self.rebuild();
        self.start_loop();
    }

    /// Resize the surface and rebuild every column.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.surface.resize(width, height);
        self.rebuild();
    }

    /// Replace the column set with fresh columns evenly spread over the width.
    pub fn rebuild(&mut self) {
        let (width, height) = self.surface.size();
        let count = (width / self.catalog.average_size() * DENSITY).floor().max(0.0) as usize;
        let spacing = if count > 0 { width / count as f32 } else { 0.0 };

        let columns: Vec<RainColumn> = (0..count)
            .map(|i| RainColumn::new(i as f32 * spacing, height, &self.catalog, &mut self.rng))
            .collect();
        self.columns = columns;

        debug!("rebuilt {count} columns for a {width}x{height} surface");
    }

    /// Run one frame and request the next one.
    pub fn animate(&mut self) {
        self.surface.fill_overlay(OVERLAY_COLOR);

        let (_, height) = self.surface.size();
        for column in &mut self.columns {
            column.update(height, FLICKER_CHANCE, &self.catalog, &mut self.rng);
            column.draw(&mut self.surface);
        }

        self.frame = Some(self.scheduler.request_frame());
    }

    /// Start the frame loop unless it is already running.
    pub fn start_loop(&mut self) {
        if self.frame.is_some() {
            return;
        }
        debug!("starting frame loop");
        self.animate();
    }

    /// Stop requesting frames. The surface keeps its last frame.
    pub fn stop_loop(&mut self) {
        if let Some(handle) = self.frame.take() {
            self.scheduler.cancel_frame(handle);
            debug!("stopped frame loop");
        }
    }

    /// Callback for a frame delivered by the scheduler.
    ///
    /// Frames other than the one currently requested are ignored.
    pub fn on_frame(&mut self, handle: FrameHandle) {
        if self.frame != Some(handle) {
            return;
        }
        self.frame = None;
        self.animate();
    }

    /// Fade the surface in or out and start or stop the loop to match.
    pub fn set_visibility(&mut self, visible: bool) {
        self.set_visibility_at(visible, Instant::now());
    }

    /// [`set_visibility`](Self::set_visibility) with an explicit clock.
    pub fn set_visibility_at(&mut self, visible: bool, now: Instant) {
        let target = if visible { 1.0 } else { 0.0 };
        if self.target_opacity != Some(target) {
            info!("fading rain {}", if visible { "in" } else { "out" });
            self.fade = self.fade.retarget(target, now);
            self.target_opacity = Some(target);
        }

        if visible && self.frame.is_none() {
            self.start_loop();
        } else if !visible && self.frame.is_some() {
            self.stop_loop();
        }
    }

    /// Whether a frame is currently requested.
    pub fn is_running(&self) -> bool {
        self.frame.is_some()
    }

    /// Last opacity requested through [`set_visibility`](Self::set_visibility).
    pub fn target_opacity(&self) -> Option<f32> {
        self.target_opacity
    }

    /// Surface opacity at `now`, following the current fade.
    pub fn opacity_at(&self, now: Instant) -> f32 {
        self.fade.opacity_at(now)
    }

    pub fn columns(&self) -> &[RainColumn] {
        &self.columns
    }

    pub fn catalog(&self) -> &LayerCatalog {
        &self.catalog
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }
}

impl<S: Surface, R: Rng> RainController<S, FrameQueue, R> {
    /// Run the pending frame of the queue, if there is one.
    pub fn run_due_frame(&mut self) -> bool {
        match self.scheduler.take_due() {
            Some(handle) => {
                self.on_frame(handle);
                true
            }
            None => false,
        }
    }
}
