//! The drawing surface the field renders onto.

use crate::{color::Rgba, viewport::Viewport};
use glam::Vec2;

/// A 2-D immediate-mode drawing target.
///
/// Coordinates are surface pixels with the origin at the top-left corner.
pub trait Surface {
    /// Erases the whole surface, sized to `viewport`.
    fn clear(&mut self, viewport: Viewport);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Viewport),
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Rgba,
    },
}

/// A [`Surface`] that records one frame of draw commands.
///
/// [`Surface::clear`] drops the previous frame, so after a render the list
/// holds exactly the commands of that frame. Hosts replay it onto their own
/// painter.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Forgets everything recorded so far, including the clear.
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }
}

impl Surface for DrawList {
    fn clear(&mut self, viewport: Viewport) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(viewport));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn clear_starts_a_new_frame() {
        let mut list = DrawList::new();
        let red = Color::rgb(255, 0, 0).with_alpha(255);

        list.clear(Viewport::new(10.0, 10.0));
        list.fill_circle(Vec2::ONE, 1.0, red);
        list.stroke_line(Vec2::ZERO, Vec2::ONE, 0.5, red);
        assert_eq!(list.circle_count(), 1);
        assert_eq!(list.line_count(), 1);

        list.clear(Viewport::new(20.0, 20.0));
        assert_eq!(
            list.commands(),
            &[DrawCommand::Clear(Viewport::new(20.0, 20.0))]
        );
    }

    #[test]
    fn reset_empties_the_list() {
        let mut list = DrawList::new();
        list.clear(Viewport::new(10.0, 10.0));

        list.reset();

        assert!(list.is_empty());
    }
}
