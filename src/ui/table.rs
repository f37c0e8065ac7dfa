use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::ANOMALY_COLOR;
use crate::data::export::STATUS_COLUMN;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 20.0;
const TABLE_HEIGHT: f32 = 400.0;

// ---------------------------------------------------------------------------
// Filtered observation table
// ---------------------------------------------------------------------------

/// Row-labelled table of the filtered observations plus the status column.
/// Clicking a header sorts by that column.
pub fn data_table(ui: &mut Ui, state: &mut AppState) {
    let mut clicked: Option<usize> = None;

    {
        let state = &*state;
        let table = &state.datasets().observations;
        let headers: Vec<&str> = table
            .columns
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(STATUS_COLUMN))
            .collect();

        if table.is_empty() || state.table_rows.is_empty() {
            ui.label(RichText::new("No rows match the current filters.").weak());
        }

        egui::ScrollArea::horizontal()
            .id_salt("data_table_scroll")
            .show(ui, |ui: &mut Ui| {
                TableBuilder::new(ui)
                    .striped(true)
                    .resizable(true)
                    .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                    .column(Column::auto().at_least(40.0))
                    .columns(Column::auto().at_least(70.0), headers.len())
                    .min_scrolled_height(0.0)
                    .max_scroll_height(TABLE_HEIGHT)
                    .header(ROW_HEIGHT + 4.0, |mut header| {
                        header.col(|ui: &mut Ui| {
                            ui.strong("#");
                        });
                        for (i, name) in headers.iter().enumerate() {
                            let arrow = match state.table_sort {
                                Some(s) if s.column == i && s.ascending => " ⬆",
                                Some(s) if s.column == i => " ⬇",
                                _ => "",
                            };
                            header.col(|ui: &mut Ui| {
                                let text = RichText::new(format!("{name}{arrow}")).strong();
                                if ui.add(egui::Button::new(text).frame(false)).clicked() {
                                    clicked = Some(i);
                                }
                            });
                        }
                    })
                    .body(|body| {
                        body.rows(ROW_HEIGHT, state.table_rows.len(), |mut row| {
                            let obs = &table.rows[state.table_rows[row.index()]];
                            row.col(|ui: &mut Ui| {
                                ui.label(RichText::new(obs.row_label.to_string()).weak());
                            });
                            for field in &obs.fields {
                                row.col(|ui: &mut Ui| {
                                    ui.label(field);
                                });
                            }
                            row.col(|ui: &mut Ui| {
                                let text = RichText::new(obs.anomaly.label());
                                if obs.anomaly.is_anomaly() {
                                    ui.label(text.color(ANOMALY_COLOR).strong());
                                } else {
                                    ui.label(text);
                                }
                            });
                        });
                    });
            });
    }

    if let Some(column) = clicked {
        state.sort_by_column(column);
    }
}
