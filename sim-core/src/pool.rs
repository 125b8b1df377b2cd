//! The fixed-size particle pool and its per-frame update phase.

use crate::{config::FieldConfig, particle::Particle, viewport::Viewport};
use glam::Vec2;
use rand::Rng;

/// An ordered collection of exactly `particle_count` particles.
///
/// A pool is never grown or shrunk in place: a resize replaces it wholesale
/// through [`ParticlePool::generate`].
#[derive(Clone, Debug, Default)]
pub struct ParticlePool {
    pub particles: Vec<Particle>,
}

impl ParticlePool {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    /// Samples `cfg.particle_count` fresh particles inside `viewport`.
    pub fn generate(viewport: Viewport, cfg: &FieldConfig, rng: &mut impl Rng) -> Self {
        let particles = (0..cfg.particle_count)
            .map(|_| Particle::random(viewport, cfg, rng))
            .collect();

        log::debug!(
            "generated {} particles in {}x{}",
            cfg.particle_count,
            viewport.width,
            viewport.height
        );

        Self { particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Advances every particle by one frame.
    ///
    /// Each particle is moved and bounced independently, so iteration order
    /// does not affect the result. When `pointer` is `Some` (the field is
    /// interactive) the proximity effect is applied after movement.
    ///
    /// ### Parameters
    /// - `viewport` - Current bounds used for bouncing and clamping.
    /// - `pointer` - Latest pointer position, or `None` to skip the
    ///   proximity effect entirely.
    pub fn update(&mut self, viewport: Viewport, pointer: Option<Vec2>) {
        for p in &mut self.particles {
            p.advance(viewport);
            if let Some(pointer) = pointer {
                p.react_to_pointer(pointer);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MAX_OPACITY, MIN_OPACITY};
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn generate_produces_exactly_particle_count() {
        let mut rng = StdRng::seed_from_u64(3);
        let viewport = Viewport::new(320.0, 240.0);
        let cfg = FieldConfig {
            particle_count: 17,
            ..FieldConfig::default()
        };

        let pool = ParticlePool::generate(viewport, &cfg, &mut rng);

        assert_eq!(pool.len(), 17);
        assert!(pool.particles.iter().all(|p| viewport.contains(p.pos)));
    }

    #[test]
    fn zero_particles_is_an_empty_pool() {
        let mut rng = StdRng::seed_from_u64(3);
        let cfg = FieldConfig {
            particle_count: 0,
            ..FieldConfig::default()
        };

        let mut pool = ParticlePool::generate(Viewport::new(10.0, 10.0), &cfg, &mut rng);
        pool.update(Viewport::new(10.0, 10.0), Some(Vec2::ZERO));

        assert!(pool.is_empty());
    }

    #[test]
    fn invariants_hold_over_many_frames() {
        let mut rng = StdRng::seed_from_u64(11);
        let viewport = Viewport::new(200.0, 150.0);
        let cfg = FieldConfig {
            particle_count: 80,
            animation_speed: 25.0,
            ..FieldConfig::default()
        };
        let mut pool = ParticlePool::generate(viewport, &cfg, &mut rng);

        for frame in 0..2_000 {
            // Sweep the pointer around so both branches of the proximity
            // effect are exercised.
            let t = frame as f32 * 0.01;
            let pointer = Vec2::new(100.0 + 90.0 * t.cos(), 75.0 + 70.0 * t.sin());
            pool.update(viewport, Some(pointer));

            for p in &pool.particles {
                assert!(viewport.contains(p.pos), "escaped: {:?}", p.pos);
                assert!(p.radius >= p.base_radius);
                assert!((MIN_OPACITY..=MAX_OPACITY).contains(&p.opacity));
            }
        }
    }

    #[test]
    fn non_interactive_update_never_touches_radius_or_opacity() {
        let viewport = Viewport::new(200.0, 200.0);
        let mut pool = ParticlePool::from_particles(vec![
            Particle::new(Vec2::new(100.0, 100.0), Vec2::new(0.3, 0.0), 1.5, 0.6),
            Particle::new(Vec2::new(10.0, 190.0), Vec2::new(-0.2, 0.4), 2.5, 0.3),
        ]);

        for _ in 0..50 {
            pool.update(viewport, None);
        }

        assert_eq!(pool.particles[0].radius, 1.5);
        assert_eq!(pool.particles[0].opacity, 0.6);
        assert_eq!(pool.particles[1].radius, 2.5);
        assert_eq!(pool.particles[1].opacity, 0.3);
    }
}
