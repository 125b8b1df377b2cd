//! Proximity connections between pairs of particles.
//!
//! Every unordered pair closer than the connection radius is joined by a
//! line. The brute-force pass, [`for_each_pair_within`], is O(N²) and is the
//! dominant per-frame cost: fine for a few hundred particles, quadratic
//! beyond that. [`GridIndex`] buckets particles into radius-sized cells and
//! yields the identical connection sequence while only testing neighboring
//! cells.

use crate::{
    color::alpha_byte,
    config::{CONNECTION_INTENSITY, CONNECTION_RADIUS},
    particle::Particle,
    types::ParticleId,
    viewport::Viewport,
};

/// A line between particles `a < b` that are `distance` pixels apart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    pub a: ParticleId,
    pub b: ParticleId,
    pub distance: f32,
}

impl Connection {
    /// Line alpha, `floor((1 - d / R) * CONNECTION_INTENSITY)`.
    ///
    /// Closer pairs draw brighter lines; a pair at the radius fades to zero.
    pub fn alpha(&self) -> u8 {
        alpha_byte((1.0 - self.distance / CONNECTION_RADIUS) * CONNECTION_INTENSITY)
    }
}

#[inline]
fn pair(
    particles: &[Particle],
    a: ParticleId,
    b: ParticleId,
    radius: f32,
) -> Option<Connection> {
    let distance = (particles[a].pos - particles[b].pos).length();
    (distance < radius).then_some(Connection { a, b, distance })
}

/// Calls `f` for every pair `(i, j)` with `i < j` closer than `radius`.
///
/// Pairs are visited in lexicographic order of `(i, j)`.
pub fn for_each_pair_within(particles: &[Particle], radius: f32, mut f: impl FnMut(Connection)) {
    for a in 0..particles.len() {
        for b in (a + 1)..particles.len() {
            if let Some(c) = pair(particles, a, b, radius) {
                f(c);
            }
        }
    }
}

/// Collects all connections closer than `radius`, in visiting order.
pub fn collect_within(particles: &[Particle], radius: f32) -> Vec<Connection> {
    let mut out = Vec::new();
    for_each_pair_within(particles, radius, |c| out.push(c));
    out
}

/// A uniform grid of particle ids, bucketed by position.
///
/// Cells are `cell_size` pixels wide, so two particles closer than
/// `cell_size` always sit in the same or adjacent cells. The index is reused
/// across frames; [`GridIndex::rebuild`] clears and refills it.
#[derive(Debug)]
pub struct GridIndex {
    cell_size: f32,
    cols: usize,
    rows: usize,
    /// Particle ids per cell, row-major.
    cells: Vec<Vec<ParticleId>>,
    /// Cell of each particle from the last rebuild.
    cell_of: Vec<usize>,
    /// Reused candidate list for one particle.
    scratch: Vec<ParticleId>,
}

impl Default for GridIndex {
    fn default() -> Self {
        Self::with_cell_size(CONNECTION_RADIUS)
    }
}

impl GridIndex {
    pub fn with_cell_size(cell_size: f32) -> Self {
        Self {
            cell_size,
            cols: 0,
            rows: 0,
            cells: Vec::new(),
            cell_of: Vec::new(),
            scratch: Vec::new(),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of `(cols, rows)` from the last rebuild.
    pub fn dims(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// Clears the grid and buckets `particles` for `viewport`.
    ///
    /// The cell layout is recomputed only when the viewport needs a
    /// different number of cells.
    pub fn rebuild(&mut self, particles: &[Particle], viewport: Viewport) {
        let cols = ((viewport.width / self.cell_size).ceil() as usize).max(1);
        let rows = ((viewport.height / self.cell_size).ceil() as usize).max(1);

        if cols != self.cols || rows != self.rows {
            self.cols = cols;
            self.rows = rows;
            self.cells.resize_with(cols * rows, Vec::new);
        }
        for cell in &mut self.cells {
            cell.clear();
        }

        self.cell_of.clear();
        for (id, p) in particles.iter().enumerate() {
            let cx = ((p.pos.x / self.cell_size) as usize).min(cols - 1);
            let cy = ((p.pos.y / self.cell_size) as usize).min(rows - 1);
            let cell = cy * cols + cx;
            self.cells[cell].push(id);
            self.cell_of.push(cell);
        }
    }

    /// Same contract as the free [`for_each_pair_within`], using the grid.
    ///
    /// `particles` must be the slice passed to the last [`GridIndex::rebuild`]
    /// and `radius` must not exceed the cell size.
    pub fn for_each_pair_within(
        &mut self,
        particles: &[Particle],
        radius: f32,
        mut f: impl FnMut(Connection),
    ) {
        debug_assert!(radius <= self.cell_size);
        debug_assert_eq!(particles.len(), self.cell_of.len());

        for a in 0..particles.len() {
            let cell = self.cell_of[a];
            let (cx, cy) = (cell % self.cols, cell / self.cols);

            self.scratch.clear();
            for ny in cy.saturating_sub(1)..=(cy + 1).min(self.rows - 1) {
                for nx in cx.saturating_sub(1)..=(cx + 1).min(self.cols - 1) {
                    let ids = &self.cells[ny * self.cols + nx];
                    self.scratch.extend(ids.iter().copied().filter(|&b| b > a));
                }
            }
            // Keep the brute-force visiting order.
            self.scratch.sort_unstable();

            for &b in &self.scratch {
                if let Some(c) = pair(particles, a, b, radius) {
                    f(c);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::FieldConfig, pool::ParticlePool};
    use glam::Vec2;
    use rand::{SeedableRng, rngs::StdRng};

    fn at(x: f32, y: f32) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::ZERO, 1.0, 0.5)
    }

    #[test]
    fn pair_at_fifty_pixels_is_connected() {
        let particles = [at(100.0, 100.0), at(150.0, 100.0)];

        let found = collect_within(&particles, CONNECTION_RADIUS);

        assert_eq!(found.len(), 1);
        assert_eq!((found[0].a, found[0].b), (0, 1));
        assert_eq!(found[0].distance, 50.0);
        assert_eq!(found[0].alpha(), 25);
    }

    #[test]
    fn pair_at_exact_radius_is_not_connected() {
        let particles = [at(0.0, 0.0), at(CONNECTION_RADIUS, 0.0)];
        assert!(collect_within(&particles, CONNECTION_RADIUS).is_empty());
    }

    #[test]
    fn coincident_pair_has_full_intensity() {
        let c = Connection {
            a: 0,
            b: 1,
            distance: 0.0,
        };
        assert_eq!(c.alpha(), 50);
    }

    #[test]
    fn empty_and_single_particle_yield_nothing() {
        assert!(collect_within(&[], CONNECTION_RADIUS).is_empty());
        assert!(collect_within(&[at(1.0, 1.0)], CONNECTION_RADIUS).is_empty());
    }

    #[test]
    fn pairs_are_visited_in_lexicographic_order() {
        let particles = [at(0.0, 0.0), at(10.0, 0.0), at(20.0, 0.0)];

        let ids: Vec<_> = collect_within(&particles, CONNECTION_RADIUS)
            .into_iter()
            .map(|c| (c.a, c.b))
            .collect();

        assert_eq!(ids, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn grid_matches_brute_force_exactly() {
        let mut rng = StdRng::seed_from_u64(42);
        let viewport = Viewport::new(1280.0, 720.0);
        let cfg = FieldConfig {
            particle_count: 400,
            ..FieldConfig::default()
        };
        let pool = ParticlePool::generate(viewport, &cfg, &mut rng);

        let brute = collect_within(&pool.particles, CONNECTION_RADIUS);

        let mut grid = GridIndex::default();
        grid.rebuild(&pool.particles, viewport);
        let mut bucketed = Vec::new();
        grid.for_each_pair_within(&pool.particles, CONNECTION_RADIUS, |c| bucketed.push(c));

        assert!(!brute.is_empty());
        assert_eq!(brute, bucketed);
    }

    #[test]
    fn grid_handles_particles_on_the_far_edges() {
        let viewport = Viewport::new(250.0, 100.0);
        let particles = [at(250.0, 100.0), at(199.0, 100.0), at(0.0, 0.0)];

        let mut grid = GridIndex::default();
        grid.rebuild(&particles, viewport);
        assert_eq!(grid.dims(), (3, 1));

        let mut found = Vec::new();
        grid.for_each_pair_within(&particles, CONNECTION_RADIUS, |c| found.push(c));

        assert_eq!(found, collect_within(&particles, CONNECTION_RADIUS));
    }

    #[test]
    fn grid_rebuild_after_resize_changes_layout() {
        let mut grid = GridIndex::default();
        grid.rebuild(&[at(1.0, 1.0)], Viewport::new(100.0, 100.0));
        assert_eq!(grid.dims(), (1, 1));

        grid.rebuild(&[at(1.0, 1.0)], Viewport::new(450.0, 210.0));
        assert_eq!(grid.dims(), (5, 3));
    }
}
