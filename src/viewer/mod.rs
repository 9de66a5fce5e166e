mod app;

pub use app::GridApp;

use crate::error::{CityGridError, Result};
use crate::table::{LoadOutcome, TableModel};
use eframe::egui;
use tracing::info;

pub const DEFAULT_TITLE: &str = "City Database";

#[derive(Debug, Clone)]
pub struct ViewerOptions {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Opens the window and blocks until the user closes it. Must be called from
/// the main thread.
pub fn show(model: TableModel, outcome: LoadOutcome, options: ViewerOptions) -> Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(options.title.clone())
            .with_inner_size([options.width, options.height]),
        ..Default::default()
    };

    info!(
        title = %options.title,
        rows = model.row_count(),
        columns = model.column_count(),
        "Opening viewer"
    );

    let app = GridApp::new(model, outcome);
    eframe::run_native(
        &options.title,
        native_options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| CityGridError::Viewer(e.to_string()))
}
