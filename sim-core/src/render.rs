use crate::{
    config::{CONNECTION_RADIUS, CONNECTION_WIDTH, FieldConfig, GRID_THRESHOLD},
    connections::{self, Connection, GridIndex},
    pool::ParticlePool,
    surface::Surface,
    viewport::Viewport,
};

/// What one rendered frame contained.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub particles: usize,
    pub connections: usize,
}

/// Draws one frame of the pool onto `surface`.
///
/// The surface is cleared, every particle is drawn as a filled circle, and
/// then, for an interactive field, every pair closer than
/// [`CONNECTION_RADIUS`] is joined by a line. Pools of [`GRID_THRESHOLD`]
/// particles or more go through `grid`; the line set is the same either way.
pub fn draw_frame(
    surface: &mut impl Surface,
    pool: &ParticlePool,
    viewport: Viewport,
    cfg: &FieldConfig,
    grid: &mut GridIndex,
) -> FrameReport {
    surface.clear(viewport);

    for p in &pool.particles {
        surface.fill_circle(p.pos, p.radius, cfg.particle_color.with_opacity(p.opacity));
    }

    let mut report = FrameReport {
        particles: pool.len(),
        connections: 0,
    };
    if !cfg.interactive {
        return report;
    }

    let particles = &pool.particles;
    let mut draw = |c: Connection| {
        surface.stroke_line(
            particles[c.a].pos,
            particles[c.b].pos,
            CONNECTION_WIDTH,
            cfg.particle_color.with_alpha(c.alpha()),
        );
        report.connections += 1;
    };

    if particles.len() >= GRID_THRESHOLD {
        grid.rebuild(particles, viewport);
        grid.for_each_pair_within(particles, CONNECTION_RADIUS, &mut draw);
    } else {
        connections::for_each_pair_within(particles, CONNECTION_RADIUS, &mut draw);
    }

    report
}
