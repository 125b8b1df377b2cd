use crate::{
    config::{
        FieldConfig, INTERACTION_RADIUS, MAX_OPACITY, MAX_SPAWN_OPACITY, MIN_OPACITY,
        OPACITY_BOOST, OPACITY_DECAY, RADIUS_BOOST,
    },
    viewport::Viewport,
};
use glam::Vec2;
use rand::Rng;

/// A single dot of the field.
///
/// `radius` never drops below `base_radius` and `opacity` stays within
/// `[MIN_OPACITY, MAX_OPACITY]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    /// Displacement per frame.
    pub vel: Vec2,
    /// Resting radius, fixed at creation.
    pub base_radius: f32,
    /// Rendered radius, enlarged while the pointer is near.
    pub radius: f32,
    pub opacity: f32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, base_radius: f32, opacity: f32) -> Self {
        Self {
            pos,
            vel,
            base_radius,
            radius: base_radius,
            opacity: opacity.clamp(MIN_OPACITY, MAX_OPACITY),
        }
    }

    /// Samples a particle uniformly inside `viewport`.
    ///
    /// - position in `[0, width] × [0, height]`
    /// - velocity components in `[-0.5, 0.5] * animation_speed`
    /// - base radius in `[1, particle_size + 1]`
    /// - opacity in `[MIN_OPACITY, MAX_SPAWN_OPACITY]`
    ///
    /// ### Parameters
    /// - `viewport` - Bounds to spawn in; must be available.
    /// - `cfg` - Supplies the speed and size factors.
    /// - `rng` - Source of randomness.
    pub fn random(viewport: Viewport, cfg: &FieldConfig, rng: &mut impl Rng) -> Self {
        let pos = Vec2::new(
            rng.random::<f32>() * viewport.width,
            rng.random::<f32>() * viewport.height,
        );
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * cfg.animation_speed,
            (rng.random::<f32>() - 0.5) * cfg.animation_speed,
        );
        let base_radius = 1.0 + rng.random::<f32>() * cfg.particle_size;
        let opacity = rng.random_range(MIN_OPACITY..=MAX_SPAWN_OPACITY);

        Self::new(pos, vel, base_radius, opacity)
    }

    /// Moves the particle by one frame of velocity and keeps it in bounds.
    ///
    /// A coordinate that leaves `[0, width]` (resp. `[0, height]`) flips the
    /// matching velocity component; the position is then clamped onto the
    /// edge so a reflected particle never lingers outside.
    pub fn advance(&mut self, viewport: Viewport) {
        self.pos += self.vel;

        if self.pos.x < 0.0 || self.pos.x > viewport.width {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y < 0.0 || self.pos.y > viewport.height {
            self.vel.y = -self.vel.y;
        }

        self.pos = viewport.clamp(self.pos);
    }

    /// Applies the pointer proximity effect for one frame.
    ///
    /// Within [`INTERACTION_RADIUS`] the particle grows and brightens in
    /// proportion to `force = (R - d) / R`. Outside it snaps back to its base
    /// radius and fades by [`OPACITY_DECAY`] towards [`MIN_OPACITY`].
    pub fn react_to_pointer(&mut self, pointer: Vec2) {
        let d = self.pos.distance(pointer);

        if d < INTERACTION_RADIUS {
            let force = (INTERACTION_RADIUS - d) / INTERACTION_RADIUS;
            self.radius = self.base_radius + force * RADIUS_BOOST;
            self.opacity = (self.opacity + force * OPACITY_BOOST).min(MAX_OPACITY);
        } else {
            self.radius = self.base_radius;
            self.opacity = (self.opacity - OPACITY_DECAY).max(MIN_OPACITY);
        }
    }
}
