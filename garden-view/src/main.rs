//! Application entry point for the Zen Garden viewer.
//!
//! This binary sets up logging and eframe/egui, and delegates all
//! interactive logic and rendering to [`Viewer`] from the `viewer` module.

mod camera;
mod viewer;

use viewer::Viewer;

/// Starts the native eframe application.
///
/// Logging goes through `env_logger` (`RUST_LOG=debug` for planting and
/// suggestion traces). All UI state and rendering are handled by [`Viewer`].
fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "Zen Garden",
        options,
        Box::new(|_cc| Ok(Box::new(Viewer::new()))),
    )
}
