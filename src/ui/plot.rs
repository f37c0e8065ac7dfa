use chrono::{Datelike, NaiveDate};
use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, LineStyle, MarkerShape, Plot, PlotPoints, Points};

use crate::color::{importance_ramp, ACTUAL_COLOR, PREDICTED_COLOR};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 320.0;
const BAR_ROW_HEIGHT: f32 = 28.0;

// ---------------------------------------------------------------------------
// Date axis helpers (x = days since 0001-01-01)
// ---------------------------------------------------------------------------

pub fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    if !x.is_finite() || x.abs() > i32::MAX as f64 {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

fn date_axis_label(mark: GridMark, _range: &std::ops::RangeInclusive<f64>) -> String {
    // Only whole days get a label.
    if (mark.value - mark.value.round()).abs() > 1e-6 {
        return String::new();
    }
    x_to_date(mark.value)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Actual vs. predicted efficiency
// ---------------------------------------------------------------------------

/// Dual-series line chart of the filtered predictions.
pub fn efficiency_plot(ui: &mut Ui, state: &AppState) {
    let predictions = &state.datasets().predictions;

    let rows: Vec<_> = state
        .view
        .prediction_indices
        .iter()
        .map(|&i| &predictions[i])
        .collect();
    let actual: Vec<(f64, Option<f64>)> = rows.iter().map(|p| (date_to_x(p.date), p.actual)).collect();
    let predicted: Vec<(f64, Option<f64>)> =
        rows.iter().map(|p| (date_to_x(p.date), p.predicted)).collect();

    Plot::new("efficiency_plot")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("Date")
        .y_axis_label("Efficiency (%)")
        .x_axis_formatter(date_axis_label)
        .label_formatter(|name, value| {
            let date = x_to_date(value.x)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            if name.is_empty() {
                format!("{date}\n{:.2} %", value.y)
            } else {
                format!("{name}\n{date}\n{:.2} %", value.y)
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for segment in line_segments(&actual) {
                plot_ui.line(
                    Line::new(PlotPoints::from(segment))
                        .name("Actual")
                        .color(ACTUAL_COLOR)
                        .width(1.5)
                        .style(LineStyle::Solid),
                );
            }
            plot_ui.points(
                Points::new(PlotPoints::from(present_points(&actual)))
                    .name("Actual")
                    .color(ACTUAL_COLOR)
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(3.0),
            );

            for segment in line_segments(&predicted) {
                plot_ui.line(
                    Line::new(PlotPoints::from(segment))
                        .name("Predicted")
                        .color(PREDICTED_COLOR)
                        .width(1.5)
                        .style(LineStyle::dashed_loose()),
                );
            }
            plot_ui.points(
                Points::new(PlotPoints::from(present_points(&predicted)))
                    .name("Predicted")
                    .color(PREDICTED_COLOR)
                    .shape(MarkerShape::Cross)
                    .radius(4.0),
            );
        });
}

/// Split a series at missing values so the line shows a gap there.
fn line_segments(series: &[(f64, Option<f64>)]) -> Vec<Vec<[f64; 2]>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for &(x, y) in series {
        match y {
            Some(y) => current.push([x, y]),
            None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

fn present_points(series: &[(f64, Option<f64>)]) -> Vec<[f64; 2]> {
    series
        .iter()
        .filter_map(|&(x, y)| y.map(|y| [x, y]))
        .collect()
}

// ---------------------------------------------------------------------------
// Feature importance ranking
// ---------------------------------------------------------------------------

/// Horizontal bars, one per feature, in ascending importance from the bottom up.
pub fn feature_importance_chart(ui: &mut Ui, state: &AppState) {
    let features = &state.features_ascending;
    let colors = importance_ramp(features.len());

    let bars: Vec<Bar> = features
        .iter()
        .zip(colors)
        .enumerate()
        .map(|(i, (f, color))| {
            Bar::new(i as f64, f.importance)
                .name(&f.feature)
                .fill(color)
                .width(0.7)
        })
        .collect();

    let names: Vec<String> = features.iter().map(|f| f.feature.clone()).collect();
    let height = (features.len() as f32 * BAR_ROW_HEIGHT).max(CHART_HEIGHT);

    Plot::new("feature_importance")
        .height(height)
        .x_axis_label("Importance")
        .y_axis_formatter(move |mark, _range| {
            if (mark.value - mark.value.round()).abs() > 1e-6 || mark.value < 0.0 {
                return String::new();
            }
            names.get(mark.value as usize).cloned().unwrap_or_default()
        })
        .y_axis_min_width(120.0)
        .show_grid([true, false])
        .allow_drag(true)
        .allow_zoom(true)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Importance").horizontal());
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_axis_round_trips_whole_days() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(x_to_date(date_to_x(d)), Some(d));
        assert_eq!(x_to_date(date_to_x(d) + 0.4), Some(d));
        assert_eq!(x_to_date(f64::NAN), None);
    }

    #[test]
    fn missing_values_break_the_line() {
        let series = [
            (1.0, Some(80.0)),
            (2.0, None),
            (3.0, Some(81.0)),
            (4.0, Some(82.0)),
            (5.0, None),
        ];
        assert_eq!(
            line_segments(&series),
            vec![vec![[1.0, 80.0]], vec![[3.0, 81.0], [4.0, 82.0]]]
        );
        assert_eq!(present_points(&series), vec![[1.0, 80.0], [3.0, 81.0], [4.0, 82.0]]);
        assert!(line_segments(&[(1.0, None)]).is_empty());
    }

    #[test]
    fn consecutive_days_are_one_unit_apart() {
        let a = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(date_to_x(b) - date_to_x(a), 1.0);
    }
}
