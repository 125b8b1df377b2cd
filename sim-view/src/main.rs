//! Application entry point for the particle field viewer.
//!
//! This binary sets up logging and eframe/egui, and delegates the field
//! and its controls to [`Viewer`] from the `viewer` module.

mod logging;
mod scheduler;
mod viewer;

use field_core::config::FieldConfig;
use viewer::Viewer;

/// Starts the native eframe application.
///
/// An optional first argument names a JSON file with a partial
/// [`FieldConfig`]; without it, or if it cannot be loaded, the defaults
/// are used.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if logging or the native window fails to start.
fn main() -> anyhow::Result<()> {
    let _logger = logging::setup()?;

    let cfg = match std::env::args().nth(1) {
        Some(path) => FieldConfig::load(&path).unwrap_or_else(|err| {
            log::warn!("ignoring config `{path}`: {err}, using defaults");
            FieldConfig::default()
        }),
        None => FieldConfig::default(),
    };
    log::info!("starting with {cfg:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Particle Field"),
        ..Default::default()
    };

    eframe::run_native(
        "Particle Field",
        options,
        Box::new(move |cc| Ok(Box::new(Viewer::new(cfg, cc.egui_ctx.clone())))),
    )
    .map_err(|e| anyhow::anyhow!("eframe failed: {e}"))
}
