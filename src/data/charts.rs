use serde::Serialize;

use super::model::{CellValue, Dataset, CATEGORY, DISCOUNT, PROFIT, REGION, SALES, SUB_CATEGORY};

/// How many sub-categories the ranking chart keeps.
pub const TOP_SUB_CATEGORIES: usize = 15;

// ---------------------------------------------------------------------------
// Chart specifications handed to the plot widgets
// ---------------------------------------------------------------------------

/// One bar: category label and its aggregated value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarDatum {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<BarDatum>,
    /// Draw each bar's value above it.
    pub value_labels: bool,
}

/// One scatter point plus the metadata shown on hover.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub sub_category: String,
    pub sales: Option<f64>,
}

/// Points sharing one colour (one category).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub name: String,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<ScatterSeries>,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Sum `value_column` per distinct `key_column`, groups in first-seen order.
/// Null keys are dropped; non-numeric values count as zero.
fn group_sum(dataset: &Dataset, key_column: &str, value_column: &str) -> Vec<BarDatum> {
    let Some(key_col) = dataset.column_index(key_column) else {
        return Vec::new();
    };
    let value_col = dataset.column_index(value_column);

    let mut groups: Vec<BarDatum> = Vec::new();
    for row in &dataset.rows {
        let key = &row[key_col];
        if *key == CellValue::Null {
            continue;
        }
        let value = value_col.and_then(|c| row[c].as_f64()).unwrap_or(0.0);
        let label = key.to_string();
        match groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.value += value,
            None => groups.push(BarDatum { label, value }),
        }
    }
    groups
}

/// Total sales per region over the whole dataset (ignores the filters).
pub fn sales_by_region(dataset: &Dataset) -> BarChart {
    BarChart {
        title: "Sales by Region".to_string(),
        x_label: REGION.to_string(),
        y_label: SALES.to_string(),
        bars: group_sum(dataset, REGION, SALES),
        value_labels: false,
    }
}

/// The best-selling sub-categories of the filtered view, highest first.
pub fn top_sub_categories(view: &Dataset) -> BarChart {
    let mut bars = group_sum(view, SUB_CATEGORY, SALES);
    // Stable: equal totals keep first-seen order.
    bars.sort_by(|a, b| b.value.total_cmp(&a.value));
    bars.truncate(TOP_SUB_CATEGORIES);

    BarChart {
        title: "Top Sub-Categories".to_string(),
        x_label: SUB_CATEGORY.to_string(),
        y_label: SALES.to_string(),
        bars,
        value_labels: true,
    }
}

/// One point per row of the filtered view, coloured by category.
pub fn discount_vs_profit(view: &Dataset) -> ScatterChart {
    let mut series: Vec<ScatterSeries> = Vec::new();

    for (i, row_discount) in view.numbers(DISCOUNT).enumerate() {
        let (Some(x), Some(y)) = (row_discount, view.value(i, PROFIT).and_then(CellValue::as_f64))
        else {
            continue;
        };
        let name = view
            .value(i, CATEGORY)
            .map(|v| v.to_string())
            .unwrap_or_default();
        let point = ScatterPoint {
            x,
            y,
            sub_category: view
                .value(i, SUB_CATEGORY)
                .map(|v| v.to_string())
                .unwrap_or_default(),
            sales: view.value(i, SALES).and_then(CellValue::as_f64),
        };
        match series.iter_mut().find(|s| s.name == name) {
            Some(s) => s.points.push(point),
            None => series.push(ScatterSeries {
                name,
                points: vec![point],
            }),
        }
    }

    ScatterChart {
        title: "Discount vs Profit".to_string(),
        x_label: DISCOUNT.to_string(),
        y_label: PROFIT.to_string(),
        series,
    }
}
