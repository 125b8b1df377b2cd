//! The particle field simulator and its lifecycle.
//!
//! A [`ParticleField`] owns its pool, pointer state and visibility flag; no
//! state is shared between instances. The host drives it with three kinds of
//! input:
//!
//! 1. [`HostEvent`]s from its listeners (resize, pointer, visibility),
//!    delivered through [`ParticleField::handle_event`].
//! 2. Frame callbacks: every token handed out by the [`FrameScheduler`] comes
//!    back through [`ParticleField::tick`], which updates, renders and
//!    requests the next frame.
//! 3. [`ParticleField::teardown`] when the layer goes away.

use crate::{
    config::FieldConfig,
    connections::GridIndex,
    particle::Particle,
    pool::ParticlePool,
    render::{self, FrameReport},
    scheduler::{FrameScheduler, FrameToken},
    surface::Surface,
    viewport::Viewport,
};
use glam::Vec2;
use rand::Rng;

/// Signals delivered by the host's listeners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    /// The viewport changed size; the pool is regenerated.
    Resize(Viewport),
    /// Latest pointer position in surface pixels.
    PointerMoved(Vec2),
    /// The host page became visible (`true`) or hidden (`false`).
    VisibilityChanged(bool),
}

/// An ambient, pointer-reactive field of particles.
pub struct ParticleField<R> {
    cfg: FieldConfig,
    /// `None` until an available viewport has been seen.
    viewport: Option<Viewport>,
    pool: ParticlePool,
    grid: GridIndex,
    pointer: Vec2,
    visible: bool,
    /// The single frame this field is waiting for, if any.
    pending: Option<FrameToken>,
    torn_down: bool,
    rng: R,
}

impl<R: Rng> ParticleField<R> {
    /// Creates an unmounted field. Nothing is drawn until [`Self::mount`].
    pub fn new(cfg: FieldConfig, rng: R) -> Self {
        Self {
            cfg,
            viewport: None,
            pool: ParticlePool::empty(),
            grid: GridIndex::default(),
            pointer: Vec2::ZERO,
            visible: true,
            pending: None,
            torn_down: false,
            rng,
        }
    }

    /// Sizes the field to `viewport`, samples the pool and starts the loop.
    ///
    /// An unavailable viewport leaves the field unmounted; a later
    /// [`HostEvent::Resize`] to a usable size mounts it.
    pub fn mount(&mut self, viewport: Viewport, scheduler: &mut impl FrameScheduler) {
        if self.torn_down {
            return;
        }
        self.initialize(viewport);
        self.start(scheduler);
    }

    /// Regenerates the pool for a new viewport size.
    ///
    /// Particle identity is not preserved: the whole pool is replaced.
    pub fn resize(&mut self, viewport: Viewport, scheduler: &mut impl FrameScheduler) {
        self.mount(viewport, scheduler);
    }

    /// Resamples the pool in the current viewport.
    pub fn regenerate(&mut self) {
        if let Some(viewport) = self.viewport {
            self.pool = ParticlePool::generate(viewport, &self.cfg, &mut self.rng);
        }
    }

    fn initialize(&mut self, viewport: Viewport) {
        if !viewport.is_available() {
            log::debug!(
                "viewport {}x{} unavailable, field stays empty",
                viewport.width,
                viewport.height
            );
            self.viewport = None;
            self.pool = ParticlePool::empty();
            return;
        }
        self.viewport = Some(viewport);
        self.pool = ParticlePool::generate(viewport, &self.cfg, &mut self.rng);
    }

    /// Requests the first frame of the loop.
    ///
    /// Does nothing when the field is unmounted, hidden, torn down, or
    /// already has a frame pending.
    pub fn start(&mut self, scheduler: &mut impl FrameScheduler) {
        if self.torn_down || !self.visible || self.viewport.is_none() || self.pending.is_some() {
            return;
        }
        self.pending = Some(scheduler.request_frame());
    }

    /// Cancels the pending frame, if any. Calling it twice is harmless.
    pub fn stop(&mut self, scheduler: &mut impl FrameScheduler) {
        if let Some(token) = self.pending.take() {
            scheduler.cancel_frame(token);
        }
    }

    /// The per-frame callback.
    ///
    /// Only the pending token is honored; stale or cancelled tokens are
    /// ignored. While visible the frame is updated, rendered onto `surface`
    /// and the next frame is requested unconditionally. While hidden nothing
    /// is drawn and no frame is requested, which halts the loop until the
    /// field becomes visible again.
    ///
    /// ### Returns
    /// A [`FrameReport`] if a frame was rendered, `None` otherwise.
    pub fn tick(
        &mut self,
        token: FrameToken,
        surface: &mut impl Surface,
        scheduler: &mut impl FrameScheduler,
    ) -> Option<FrameReport> {
        if self.pending != Some(token) {
            return None;
        }
        self.pending = None;

        if self.torn_down || !self.visible {
            log::trace!("frame {} skipped, field halted", token.id());
            return None;
        }
        let viewport = self.viewport?;

        let pointer = self.cfg.interactive.then_some(self.pointer);
        self.pool.update(viewport, pointer);
        let report = render::draw_frame(surface, &self.pool, viewport, &self.cfg, &mut self.grid);

        self.pending = Some(scheduler.request_frame());
        Some(report)
    }

    /// Applies one listener event. Events after teardown are ignored.
    pub fn handle_event(&mut self, event: HostEvent, scheduler: &mut impl FrameScheduler) {
        if self.torn_down {
            return;
        }
        match event {
            HostEvent::Resize(viewport) => self.resize(viewport, scheduler),
            // The pointer listener only exists for interactive fields.
            HostEvent::PointerMoved(pos) if self.cfg.interactive => self.pointer = pos,
            HostEvent::PointerMoved(_) => {}
            HostEvent::VisibilityChanged(visible) => {
                self.visible = visible;
                if visible {
                    self.start(scheduler);
                }
            }
        }
    }

    /// Cancels the in-flight frame and detaches from the host.
    ///
    /// Idempotent. After teardown no frame runs and no event is applied.
    pub fn teardown(&mut self, scheduler: &mut impl FrameScheduler) {
        if self.torn_down {
            return;
        }
        self.stop(scheduler);
        self.torn_down = true;
        log::info!("particle field torn down ({} particles)", self.pool.len());
    }
}

impl<R> ParticleField<R> {
    pub fn config(&self) -> &FieldConfig {
        &self.cfg
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn particles(&self) -> &[Particle] {
        &self.pool.particles
    }

    /// Mutable access to the current pool, e.g. to place particles by hand.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.pool.particles
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_mounted(&self) -> bool {
        self.viewport.is_some()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.pending
    }
}
