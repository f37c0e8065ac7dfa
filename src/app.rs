use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{metrics, panels, plot, table};

const RECOMMENDATIONS: [&str; 3] = [
    "Investigate highlighted anomaly days for root causes.",
    "Use prediction trends to plan maintenance schedules.",
    "Optimize key features identified by importance analysis for improved efficiency.",
];

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct BoilerDashboardApp {
    pub state: AppState,
}

impl BoilerDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for BoilerDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, charts, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    dashboard(ui, &mut self.state);
                });
        });
    }
}

/// Sections in their fixed order.
fn dashboard(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Boiler Efficiency Monitoring Dashboard");
    ui.add_space(8.0);

    ui.heading("Summary Metrics");
    metrics::summary_tiles(ui, &state.view.summary);
    ui.separator();

    ui.heading("Efficiency: Actual vs Predicted");
    plot::efficiency_plot(ui, state);
    ui.separator();

    ui.heading("Top Feature Importance");
    plot::feature_importance_chart(ui, state);
    ui.separator();

    ui.heading("Detailed Data Table with Anomalies");
    table::data_table(ui, state);
    ui.separator();

    ui.heading("Operational Recommendations");
    for line in RECOMMENDATIONS {
        ui.label(format!("• {line}"));
    }
}
