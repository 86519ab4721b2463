use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cache::LoadCache;
use crate::dashboard::{self, Dashboard};
use crate::data::filter::{selector_options, Selection, Selector};
use crate::data::loader::DataSource;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None when nothing could be loaded).
    pub dataset: Option<Dataset>,

    /// Current Region / Category / Segment selectors.
    pub selection: Selection,

    /// Output of the last render pass.
    pub dashboard: Option<Dashboard>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Name of the file the dataset came from.
    pub source_name: Option<String>,

    /// Dataset read when no file has been opened.
    pub fallback_path: PathBuf,

    cache: LoadCache,
}

impl AppState {
    pub fn new(fallback_path: PathBuf) -> Self {
        Self {
            fallback_path,
            ..Default::default()
        }
    }

    /// Load the configured default dataset.
    pub fn load_fallback(&mut self) {
        let source = DataSource::Fallback(self.fallback_path.clone());
        self.load(&source);
    }

    /// Load a dataset; on failure the dashboard is cleared and the error is
    /// kept for display.
    pub fn load(&mut self, source: &DataSource) {
        match self.cache.load(source) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} rows with columns {:?} from {}",
                    dataset.len(),
                    dataset.columns,
                    source.name()
                );
                self.source_name = Some(source.name());
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", source.name());
                self.dataset = None;
                self.dashboard = None;
                self.source_name = None;
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Ingest a newly loaded dataset, reset selectors and render.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.dataset = Some(dataset);
        self.selection = Selection::default();
        self.status_message = None;
        self.refresh();
    }

    /// Options for one selector column, fresh from the unfiltered dataset.
    pub fn options(&self, column: &str) -> Vec<Selector> {
        match &self.dataset {
            Some(ds) => selector_options(ds, column),
            None => vec![Selector::All],
        }
    }

    /// Replace the selection and recompute if it changed.
    pub fn set_selection(&mut self, selection: Selection) {
        if selection != self.selection {
            self.selection = selection;
            self.refresh();
        }
    }

    /// Recompute the dashboard from the dataset and the selection.
    pub fn refresh(&mut self) {
        let Some(ds) = &self.dataset else {
            self.dashboard = None;
            return;
        };
        match dashboard::render(ds, &self.selection) {
            Ok(dash) => self.dashboard = Some(dash),
            Err(e) => {
                log::error!("Failed to render dashboard: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Write the filtered rows of the last render to `path`.
    pub fn save_export(&self, path: &Path) -> Result<()> {
        let dash = self
            .dashboard
            .as_ref()
            .context("no data loaded to export")?;
        std::fs::write(path, &dash.export)
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported {} rows to {}", dash.filtered_rows, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, REGION};
    use pretty_assertions::assert_eq;

    const CSV: &str = "Region,Category,Segment,Sales,Profit,Quantity,Discount,Sub-Category\n\
                       East,Furniture,Consumer,100,10,2,0.1,Chairs\n\
                       West,Furniture,Corporate,200,-5,1,0.2,Tables\n";

    fn upload(body: &str) -> DataSource {
        DataSource::Upload {
            name: "Superstore.csv".to_string(),
            bytes: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn missing_fallback_halts_with_message() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(dir.path().join("nope.csv"));
        state.load_fallback();
        assert!(state.dataset.is_none());
        assert!(state.dashboard.is_none());
        assert!(state.status_message.unwrap().contains("nope.csv"));
    }

    #[test]
    fn upload_renders_and_selection_rerenders() {
        let mut state = AppState::default();
        state.load(&upload(CSV));
        assert_eq!(state.dashboard.as_ref().unwrap().filtered_rows, 2);
        assert_eq!(state.options(REGION).len(), 3);

        state.set_selection(Selection {
            region: Selector::Only(CellValue::String("West".into())),
            ..Default::default()
        });
        let dash = state.dashboard.as_ref().unwrap();
        assert_eq!(dash.filtered_rows, 1);
        assert_eq!(dash.metrics.total_sales, 200.0);
    }

    #[test]
    fn new_upload_resets_selection() {
        let mut state = AppState::default();
        state.load(&upload(CSV));
        state.set_selection(Selection {
            region: Selector::Only(CellValue::String("West".into())),
            ..Default::default()
        });
        state.load(&upload(&CSV.replace("West", "South")));
        assert_eq!(state.selection, Selection::default());
        assert_eq!(state.source_name.as_deref(), Some("Superstore.csv"));
    }

    #[test]
    fn malformed_upload_replaces_previous_dataset() {
        let mut state = AppState::default();
        state.load(&upload(CSV));
        state.load(&upload("Region\nEast\n"));
        assert!(state.dataset.is_none());
        assert!(state.status_message.is_some());
    }

    #[test]
    fn export_writes_filtered_rows() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("superstore_filtered.csv");
        let mut state = AppState::default();
        assert!(state.save_export(&out).is_err());

        state.load(&upload(CSV));
        state.set_selection(Selection {
            region: Selector::Only(CellValue::String("East".into())),
            ..Default::default()
        });
        state.save_export(&out).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().nth(1).unwrap().starts_with("East,"));
    }
}
