//! Core of an ambient, pointer-reactive particle field.
//!
//! Main components:
//! - [`field`] — the simulator: lifecycle, host events, frame loop.
//! - [`particle`] — a single particle and its per-frame kinematics.
//! - [`pool`] — the fixed-size particle pool and its update phase.
//! - [`connections`] — pairwise proximity lines, brute force and grid.
//! - [`render`] — drawing one frame onto a [`surface::Surface`].
//! - [`surface`] — the drawing surface trait and a recording surface.
//! - [`scheduler`] — display-synchronized frame scheduling.
//! - [`config`] — construction-time options and tuning constants.
//! - [`color`] — hex colors and per-draw alpha.
//! - [`viewport`] — surface dimensions and bounds.
//! - [`error`] — color and config errors.
//! - [`types`] — shared type aliases and IDs.

pub mod color;
pub mod config;
pub mod connections;
pub mod error;
pub mod field;
pub mod particle;
pub mod pool;
pub mod render;
pub mod scheduler;
pub mod surface;
pub mod types;
pub mod viewport;
