//! Interactive particle field viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], the host of a [`ParticleField`]: it
//! provides the viewport, pointer and visibility signals, drives the frame
//! loop from egui repaints, and replays each rendered frame onto the egui
//! painter.

use crate::scheduler::RepaintScheduler;
use eframe::App;
use field_core::{
    color::{Color, Rgba},
    config::FieldConfig,
    field::{HostEvent, ParticleField},
    render::FrameReport,
    surface::{DrawCommand, DrawList},
    viewport::Viewport,
};
use glam::Vec2;
use rand::rngs::ThreadRng;

/// Main application state for the viewer.
///
/// [`Viewer`] glues together:
/// - The simulation core: [`ParticleField`] and the [`DrawList`] it renders into.
/// - The host signals: central panel size, pointer position, window visibility.
/// - UI configuration (the editable [`FieldConfig`], pause state).
///
/// The typical per-frame update is:
/// 1. Build the panels; a changed config remounts the field.
/// 2. Forward viewport, pointer and visibility changes as [`HostEvent`]s.
/// 3. If a frame is due, tick the field into the draw list.
/// 4. Replay the draw list onto the painter.
///
/// ### Fields
/// - `field` - The simulator being hosted.
/// - `scheduler` - egui-backed frame scheduler the field requests frames from.
/// - `draw_list` - Commands of the last rendered frame.
///
/// - `cfg` - Config as edited in the side panel.
/// - `viewport` - Last central panel size forwarded to the field.
/// - `origin` - Screen position of the surface's top-left corner.
///
/// - `paused` - User-requested halt, reported to the field as hidden.
/// - `host_visible` - Whether the window is currently shown.
///
/// - `last_report` - Counts from the last rendered frame (for display only).
/// - `frame_dt` - egui's stable frame time (for display only).
pub struct Viewer {
    field: ParticleField<ThreadRng>,
    scheduler: RepaintScheduler,
    draw_list: DrawList,

    cfg: FieldConfig,
    viewport: Option<Viewport>,
    origin: egui::Pos2,

    paused: bool,
    host_visible: bool,

    last_report: FrameReport,
    frame_dt: f32,
}

impl Viewer {
    /// Creates a viewer hosting an unmounted field.
    ///
    /// The field is mounted on the first frame, once the central panel size
    /// is known.
    pub fn new(cfg: FieldConfig, ctx: egui::Context) -> Self {
        Self {
            field: ParticleField::new(cfg, rand::rng()),
            scheduler: RepaintScheduler::new(ctx),
            draw_list: DrawList::new(),
            cfg,
            viewport: None,
            origin: egui::Pos2::ZERO,
            paused: false,
            host_visible: true,
            last_report: FrameReport::default(),
            frame_dt: 0.0,
        }
    }

    fn is_visible(&self) -> bool {
        self.host_visible && !self.paused
    }

    /// Tears the current field down and mounts a fresh one from `cfg`.
    ///
    /// Mirrors how changing construction-time options re-creates the layer:
    /// the old loop is cancelled and a new pool is sampled.
    fn remount(&mut self) {
        self.field.teardown(&mut self.scheduler);
        self.draw_list.reset();
        self.last_report = FrameReport::default();

        self.field = ParticleField::new(self.cfg, rand::rng());
        if !self.is_visible() {
            self.field
                .handle_event(HostEvent::VisibilityChanged(false), &mut self.scheduler);
        }
        if let Some(viewport) = self.viewport {
            self.field.mount(viewport, &mut self.scheduler);
        }
        log::info!("remounted particle field with {:?}", self.cfg);
    }

    /// Forwards a new surface size; the first one mounts the field.
    fn apply_viewport(&mut self, viewport: Viewport) {
        if self.viewport == Some(viewport) {
            return;
        }
        let first = self.viewport.is_none();
        self.viewport = Some(viewport);

        if first {
            self.field.mount(viewport, &mut self.scheduler);
        } else {
            self.field
                .handle_event(HostEvent::Resize(viewport), &mut self.scheduler);
        }
    }

    /// Forwards a screen-space pointer position in surface coordinates.
    fn apply_pointer(&mut self, screen: egui::Pos2) {
        let local = screen - self.origin;
        self.field.handle_event(
            HostEvent::PointerMoved(Vec2::new(local.x, local.y)),
            &mut self.scheduler,
        );
    }

    /// Reports the combined window/pause visibility to the field on change.
    fn sync_visibility(&mut self) {
        let visible = self.is_visible();
        if visible != self.field.is_visible() {
            self.field
                .handle_event(HostEvent::VisibilityChanged(visible), &mut self.scheduler);
        }
    }

    /// Runs the due frame, if any. Returns `true` if a frame was rendered.
    fn run_due_frame(&mut self) -> bool {
        let Some(token) = self.scheduler.take_due() else {
            return false;
        };
        match self
            .field
            .tick(token, &mut self.draw_list, &mut self.scheduler)
        {
            Some(report) => {
                self.last_report = report;
                true
            }
            None => false,
        }
    }

    /// Helper to draw a labeled `usize` [`egui::DragValue`].
    fn labeled_drag_usize(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut usize,
        range: std::ops::RangeInclusive<usize>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`].
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the top panel UI (pause, regenerate, interactivity).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.paused { "▶ Resume" } else { "⏸ Pause" })
                    .clicked()
                {
                    self.paused = !self.paused;
                }

                if ui.button("Regenerate").clicked() {
                    self.field.regenerate();
                }

                ui.separator();
                ui.checkbox(&mut self.cfg.interactive, "Interactive");
            });
        });
    }

    /// Builds the bottom status bar (particles, connections, frame time).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("dt = {:.1} ms", self.frame_dt * 1000.0));
                ui.separator();
                ui.label(format!("connections = {}", self.last_report.connections));
                ui.label(format!("particles = {}", self.last_report.particles));
                if let Some(v) = self.viewport {
                    ui.label(format!("{:.0}x{:.0}", v.width, v.height));
                }
                if !self.field.is_visible() {
                    ui.label("halted");
                }
            });
        });
    }

    /// Builds the right-hand configuration panel.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Config");

                ui.separator();
                Self::labeled_drag_usize(
                    ui,
                    "particle count:",
                    &mut self.cfg.particle_count,
                    0..=2_000,
                    1.0,
                );
                Self::labeled_drag_f32(
                    ui,
                    "particle size:",
                    &mut self.cfg.particle_size,
                    0.0..=10.0,
                    0.1,
                );
                Self::labeled_drag_f32(
                    ui,
                    "animation speed:",
                    &mut self.cfg.animation_speed,
                    0.0..=10.0,
                    0.05,
                );

                ui.horizontal(|ui| {
                    ui.label("color:");
                    let c = self.cfg.particle_color;
                    let mut rgb = [c.r, c.g, c.b];
                    if ui.color_edit_button_srgb(&mut rgb).changed() {
                        self.cfg.particle_color = Color::rgb(rgb[0], rgb[1], rgb[2]);
                    }
                    ui.monospace(self.cfg.particle_color.to_string());
                });

                ui.separator();
                if ui.button("Reset cfg to default").clicked() {
                    self.cfg = FieldConfig::default();
                }
            });
    }

    /// Builds the central panel: the full-size, click-through particle layer.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::from_rgb(10, 10, 18)))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::hover());
                let rect = response.rect;
                self.origin = rect.min;

                self.apply_viewport(Viewport::new(rect.width(), rect.height()));

                // Pointer anywhere in the window counts, like a window-level listener.
                if let Some(pos) = ctx.input(|i| i.pointer.latest_pos()) {
                    self.apply_pointer(pos);
                }

                self.host_visible = !ctx.input(|i| i.viewport().minimized.unwrap_or(false));
                self.sync_visibility();

                self.frame_dt = ctx.input(|i| i.stable_dt);
                self.run_due_frame();

                paint_draw_list(&painter, self.origin, &self.draw_list);
            });
    }
}

/// Converts a straight-alpha color to egui's color type.
fn to_color32(c: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

fn to_screen(origin: egui::Pos2, p: Vec2) -> egui::Pos2 {
    origin + egui::vec2(p.x, p.y)
}

/// Replays one recorded frame onto the painter, offset by `origin`.
fn paint_draw_list(painter: &egui::Painter, origin: egui::Pos2, list: &DrawList) {
    for cmd in list.commands() {
        match *cmd {
            // egui redraws every frame from scratch.
            DrawCommand::Clear(_) => {}
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => {
                painter.circle_filled(to_screen(origin, center), radius, to_color32(color));
            }
            DrawCommand::Line {
                from,
                to,
                width,
                color,
            } => {
                painter.line_segment(
                    [to_screen(origin, from), to_screen(origin, to)],
                    egui::Stroke::new(width, to_color32(color)),
                );
            }
        }
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    ///
    /// Panels run before the central layer so that a config edited this
    /// frame is applied before the next tick.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);

        if self.cfg != *self.field.config() {
            self.remount();
        }

        self.ui_central_panel(ctx);
    }
}

impl Drop for Viewer {
    fn drop(&mut self) {
        self.field.teardown(&mut self.scheduler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer(cfg: FieldConfig) -> Viewer {
        Viewer::new(cfg, egui::Context::default())
    }

    #[test]
    fn first_viewport_mounts_the_field() {
        let mut viewer = viewer(FieldConfig::default());
        assert!(!viewer.field.is_mounted());

        viewer.apply_viewport(Viewport::new(800.0, 600.0));

        assert!(viewer.field.is_mounted());
        assert_eq!(viewer.field.particles().len(), 50);
        assert!(viewer.run_due_frame());
        assert_eq!(viewer.draw_list.circle_count(), 50);
    }

    #[test]
    fn same_viewport_does_not_regenerate() {
        let mut viewer = viewer(FieldConfig::default());
        viewer.apply_viewport(Viewport::new(800.0, 600.0));
        let before = viewer.field.particles().to_vec();

        viewer.apply_viewport(Viewport::new(800.0, 600.0));

        assert_eq!(viewer.field.particles(), before.as_slice());
    }

    #[test]
    fn pointer_is_relative_to_the_surface_origin() {
        let mut viewer = viewer(FieldConfig::default());
        viewer.origin = egui::pos2(20.0, 40.0);

        viewer.apply_pointer(egui::pos2(120.0, 90.0));

        assert_eq!(viewer.field.pointer(), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn pause_halts_and_resume_restarts() {
        let mut viewer = viewer(FieldConfig::default());
        viewer.apply_viewport(Viewport::new(400.0, 300.0));
        assert!(viewer.run_due_frame());

        viewer.paused = true;
        viewer.sync_visibility();
        // The frame requested before pausing fires but draws nothing.
        assert!(!viewer.run_due_frame());
        assert!(!viewer.run_due_frame());

        viewer.paused = false;
        viewer.sync_visibility();
        assert!(viewer.run_due_frame());
    }

    #[test]
    fn config_change_remounts_with_new_count() {
        let mut viewer = viewer(FieldConfig::default());
        viewer.apply_viewport(Viewport::new(400.0, 300.0));

        viewer.cfg.particle_count = 7;
        viewer.remount();

        assert_eq!(viewer.field.config().particle_count, 7);
        assert_eq!(viewer.field.particles().len(), 7);
        assert!(viewer.draw_list.is_empty());
        assert!(viewer.run_due_frame());
        assert_eq!(viewer.draw_list.circle_count(), 7);
    }

    #[test]
    fn remount_while_paused_stays_halted() {
        let mut viewer = viewer(FieldConfig::default());
        viewer.apply_viewport(Viewport::new(400.0, 300.0));
        viewer.paused = true;
        viewer.sync_visibility();

        viewer.cfg.particle_count = 3;
        viewer.remount();

        assert!(!viewer.field.is_visible());
        assert!(viewer.field.pending_frame().is_none());
    }

    #[test]
    fn colors_keep_straight_alpha() {
        let c = to_color32(Color::rgb(10, 20, 30).with_alpha(255));
        assert_eq!(c, egui::Color32::from_rgb(10, 20, 30));
    }
}
