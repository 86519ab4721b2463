use anyhow::Result;
use serde::Serialize;

use crate::data::charts::{self, BarChart, ScatterChart};
use crate::data::export::export_csv;
use crate::data::filter::{self, Selection};
use crate::data::metrics::{self, Metrics};
use crate::data::model::Dataset;

/// Rows shown in the preview table.
pub const PREVIEW_ROWS: usize = 100;

/// Everything one render pass shows, derived from the dataset and the
/// current selection.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub total_rows: usize,
    pub filtered_rows: usize,
    pub metrics: Metrics,
    pub sales_by_region: BarChart,
    pub top_sub_categories: BarChart,
    pub discount_vs_profit: ScatterChart,
    #[serde(skip)]
    pub preview: Dataset,
    #[serde(skip)]
    pub export: Vec<u8>,
}

/// Recompute the whole dashboard from scratch.
pub fn render(dataset: &Dataset, selection: &Selection) -> Result<Dashboard> {
    let view = filter::apply(dataset, selection);
    Ok(Dashboard {
        total_rows: dataset.len(),
        filtered_rows: view.len(),
        metrics: metrics::aggregate(&view),
        sales_by_region: charts::sales_by_region(dataset),
        top_sub_categories: charts::top_sub_categories(&view),
        discount_vs_profit: charts::discount_vs_profit(&view),
        preview: view.head(PREVIEW_ROWS),
        export: export_csv(&view)?,
    })
}
