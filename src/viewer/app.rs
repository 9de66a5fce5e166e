use crate::table::{LoadOutcome, TableModel};
use eframe::egui;
use egui_extras::{Column, TableBuilder};

const ROW_HEIGHT: f32 = 20.0;
const HEADER_HEIGHT: f32 = 24.0;

pub struct GridApp {
    model: TableModel,
    outcome: LoadOutcome,
}

impl GridApp {
    pub fn new(model: TableModel, outcome: LoadOutcome) -> Self {
        Self { model, outcome }
    }

    fn show_status(&self, ui: &mut egui::Ui) {
        let (text, is_error) = status_line(&self.outcome);
        if is_error {
            ui.colored_label(egui::Color32::from_rgb(200, 40, 40), text);
        } else {
            ui.label(text);
        }
    }

    fn show_grid(&self, ui: &mut egui::Ui) {
        let column_count = self.model.column_count();
        if column_count == 0 {
            return;
        }

        egui::ScrollArea::horizontal().show(ui, |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .columns(Column::auto().at_least(60.0).clip(true), column_count)
                .header(HEADER_HEIGHT, |mut header| {
                    for column in self.model.columns() {
                        header.col(|ui| {
                            ui.strong(column.name.as_str())
                                .on_hover_text(column.column_type.as_str());
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, self.model.row_count(), |mut row| {
                        let index = row.index();
                        if let Some(cells) = self.model.rows().get(index) {
                            for cell in cells {
                                row.col(|ui| {
                                    if cell.is_numeric() {
                                        ui.with_layout(
                                            egui::Layout::right_to_left(egui::Align::Center),
                                            |ui| ui.label(cell.to_string()),
                                        );
                                    } else if cell.is_null() {
                                        ui.weak(cell.to_string());
                                    } else {
                                        ui.label(cell.to_string());
                                    }
                                });
                            }
                        }
                    });
                });
        });
    }
}

impl eframe::App for GridApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("status").show(ctx, |ui| {
            self.show_status(ui);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_grid(ui);
        });
    }
}

pub(crate) fn status_line(outcome: &LoadOutcome) -> (String, bool) {
    match outcome {
        LoadOutcome::Loaded { columns, rows } => {
            (format!("{} rows, {} columns", rows, columns), false)
        }
        LoadOutcome::Failed { reason } => (format!("Could not load data: {}", reason), true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_for_loaded_table() {
        let (text, is_error) = status_line(&LoadOutcome::Loaded {
            columns: 5,
            rows: 4079,
        });
        assert_eq!(text, "4079 rows, 5 columns");
        assert!(!is_error);
    }

    #[test]
    fn status_for_failed_load_is_an_error() {
        let (text, is_error) = status_line(&LoadOutcome::Failed {
            reason: "Table 'world.city' doesn't exist".to_string(),
        });
        assert!(text.starts_with("Could not load data:"));
        assert!(is_error);
    }
}
