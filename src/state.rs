use std::path::Path;

use anyhow::Result;

use crate::config::DashboardConfig;
use crate::data::export;
use crate::data::filter::{DashboardView, FilterState};
use crate::data::model::{Datasets, FeatureImportance};
use crate::data::sort::{sort_indices, TableSort};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded at startup, read-only afterwards.
    datasets: Datasets,

    pub config: DashboardConfig,

    /// Current filter controls.
    pub filters: FilterState,

    /// Filtered indices and summary for `filters` (cached).
    pub view: DashboardView,

    /// Feature importances sorted ascending, computed once.
    pub features_ascending: Vec<FeatureImportance>,

    /// Active table ordering, if the user clicked a header.
    pub table_sort: Option<TableSort>,

    /// Filtered observation indices in table display order.
    pub table_rows: Vec<usize>,

    /// Status / error message shown in the UI.
    pub status_message: Option<StatusMessage>,
}

/// Last outcome reported in the top bar.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

impl AppState {
    pub fn new(datasets: Datasets, config: DashboardConfig) -> Self {
        let filters = FilterState::for_span(&datasets);
        let view = DashboardView::compute(&datasets, &filters);
        let features_ascending = datasets.features_ascending();
        let table_rows = view.observation_indices.clone();
        Self {
            datasets,
            config,
            filters,
            view,
            features_ascending,
            table_sort: None,
            table_rows,
            status_message: None,
        }
    }

    pub fn datasets(&self) -> &Datasets {
        &self.datasets
    }

    /// Apply a filter change. Recomputes only when something changed.
    pub fn set_filter(&mut self, filters: FilterState) {
        if filters == self.filters {
            return;
        }
        self.filters = filters;
        self.refilter();
    }

    /// Restore the full-span, all-rows filter.
    pub fn reset_filters(&mut self) {
        self.set_filter(FilterState::for_span(&self.datasets));
    }

    /// Recompute the derived view after a filter change.
    pub fn refilter(&mut self) {
        self.view = DashboardView::compute(&self.datasets, &self.filters);
        self.resort();
    }

    /// Sort the table by `column`, flipping direction on repeated clicks.
    pub fn sort_by_column(&mut self, column: usize) {
        self.table_sort = Some(TableSort::toggled(self.table_sort, column));
        self.resort();
    }

    fn resort(&mut self) {
        self.table_rows = self.view.observation_indices.clone();
        if let Some(sort) = self.table_sort {
            sort_indices(&self.datasets.observations, &mut self.table_rows, sort);
        }
    }

    /// Write the currently filtered observations (source order) to `path`.
    pub fn export_to(&mut self, path: &Path) -> Result<usize> {
        let written = export::export_filtered(
            &self.datasets.observations,
            &self.view.observation_indices,
            path,
        )?;
        self.status_message = Some(StatusMessage::Info(format!(
            "Exported {written} rows to {}",
            path.display()
        )));
        Ok(written)
    }
}
