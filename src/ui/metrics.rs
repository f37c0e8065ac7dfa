use eframe::egui::{self, RichText, Ui};

use crate::data::summary::SummaryMetrics;

/// Three metric tiles side by side.
pub fn summary_tiles(ui: &mut Ui, summary: &SummaryMetrics) {
    ui.columns(3, |cols| {
        metric_tile(&mut cols[0], "Average Efficiency", &summary.average_label());
        metric_tile(&mut cols[1], "Anomaly Days Detected", &summary.anomaly_count.to_string());
        metric_tile(&mut cols[2], "Data Points", &summary.row_count.to_string());
    });
}

fn metric_tile(ui: &mut Ui, label: &str, value: &str) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value).size(28.0).strong());
    });
}
