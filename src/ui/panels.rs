use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::DatePickerButton;

use crate::state::{AppState, StatusMessage};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters & Options");
    ui.separator();

    // Edit a copy; the state only recomputes if it actually changed.
    let mut filters = state.filters;

    ui.strong("Select Date Range");
    egui::Grid::new("date_range")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("From");
            ui.add(DatePickerButton::new(&mut filters.start).id_salt("start_date"));
            ui.end_row();

            ui.label("To");
            ui.add(DatePickerButton::new(&mut filters.end).id_salt("end_date"));
            ui.end_row();
        });

    ui.add_space(6.0);
    ui.checkbox(&mut filters.anomalies_only, "Show Anomalies Only");

    state.set_filter(filters);

    ui.add_space(6.0);
    if ui.button("Reset filters").clicked() {
        state.reset_filters();
    }

    ui.separator();

    if ui.button("Download Filtered Data as CSV").clicked() {
        save_file_dialog(state);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export filtered CSV…").clicked() {
                save_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        let ds = state.datasets();
        ui.label(format!(
            "{} observations, {} predictions, {} features loaded; {} rows visible",
            ds.observations.len(),
            ds.predictions.len(),
            ds.features.len(),
            state.view.observation_indices.len()
        ));

        match &state.status_message {
            Some(StatusMessage::Info(msg)) => {
                ui.separator();
                ui.label(msg);
            }
            Some(StatusMessage::Error(msg)) => {
                ui.separator();
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Download filtered data")
        .add_filter("CSV", &["csv"])
        .set_file_name(state.config.export_file_name.clone())
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.export_to(&path) {
            log::error!("Failed to export filtered data: {e:#}");
            state.status_message = Some(StatusMessage::Error(format!("Error: {e:#}")));
        }
    }
}
