use glam::Vec2;

/// Pixel dimensions of the drawing surface.
///
/// The simulation space spans `[0, width] × [0, height]`, with the origin at
/// the top-left corner like the host's pointer coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if the surface has a positive, finite area.
    ///
    /// An unavailable viewport makes all setup a no-op.
    pub fn is_available(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    /// Clamps a point into `[0, width] × [0, height]`.
    ///
    /// Only meaningful for an available viewport.
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(0.0, self.width), p.y.clamp(0.0, self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_or_non_finite_viewport_is_unavailable() {
        assert!(!Viewport::new(0.0, 600.0).is_available());
        assert!(!Viewport::new(800.0, 0.0).is_available());
        assert!(!Viewport::new(f32::NAN, 600.0).is_available());
        assert!(Viewport::new(800.0, 600.0).is_available());
    }

    #[test]
    fn clamp_pulls_points_onto_the_edges() {
        let v = Viewport::new(100.0, 50.0);
        assert_eq!(v.clamp(Vec2::new(-3.0, 70.0)), Vec2::new(0.0, 50.0));
        assert_eq!(v.clamp(Vec2::new(40.0, 20.0)), Vec2::new(40.0, 20.0));
        assert!(v.contains(v.clamp(Vec2::new(1e6, -1e6))));
    }
}
