use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::color::ColorMap;
use crate::data::charts::{self, ScatterChart};
use crate::data::metrics::format_currency;

const CHART_HEIGHT: f32 = 280.0;

// ---------------------------------------------------------------------------
// Bar charts (sales by region, top sub-categories)
// ---------------------------------------------------------------------------

/// Render a bar chart with category labels on the x axis.
pub fn bar_chart(ui: &mut Ui, id: &str, chart: &charts::BarChart, color: Color32) {
    ui.strong(&chart.title);

    let bars: Vec<Bar> = chart
        .bars
        .iter()
        .enumerate()
        .map(|(i, b)| Bar::new(i as f64, b.value).name(&b.label).width(0.7))
        .collect();

    let labels: Vec<String> = chart.bars.iter().map(|b| b.label.clone()).collect();
    let value_labels: Vec<(f64, f64, String)> = if chart.value_labels {
        chart
            .bars
            .iter()
            .enumerate()
            .map(|(i, b)| (i as f64, b.value, format_currency(b.value)))
            .collect()
    } else {
        Vec::new()
    };

    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(color));
            for (x, y, text) in value_labels {
                plot_ui.text(Text::new(PlotPoint::new(x, y), RichText::new(text).small()));
            }
        });
}

// ---------------------------------------------------------------------------
// Discount vs profit scatter
// ---------------------------------------------------------------------------

/// Hover text for the point of `series_name` nearest to `pos`.
fn point_details(chart: &ScatterChart, series_name: &str, pos: &PlotPoint) -> Option<String> {
    let series = chart.series.iter().find(|s| s.name == series_name)?;
    let nearest = series.points.iter().min_by(|a, b| {
        let da = (a.x - pos.x).powi(2) + (a.y - pos.y).powi(2);
        let db = (b.x - pos.x).powi(2) + (b.y - pos.y).powi(2);
        da.total_cmp(&db)
    })?;
    let sales = nearest
        .sales
        .map(format_currency)
        .unwrap_or_else(|| "-".to_string());
    Some(format!(
        "{series_name}\nDiscount: {:.2}\nProfit: {:.2}\nSub-Category: {}\nSales: {sales}",
        nearest.x, nearest.y, nearest.sub_category
    ))
}

/// Render the scatter, one coloured series per category.
pub fn scatter_chart(ui: &mut Ui, chart: &ScatterChart) {
    ui.strong(&chart.title);

    let color_map = ColorMap::new(chart.series.iter().map(|s| s.name.as_str()));
    let hover_chart = chart.clone();

    Plot::new("discount_vs_profit")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .label_formatter(move |name, pos| {
            point_details(&hover_chart, name, pos)
                .unwrap_or_else(|| format!("x = {:.2}\ny = {:.2}", pos.x, pos.y))
        })
        .allow_boxed_zoom(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let points: PlotPoints = series.points.iter().map(|p| [p.x, p.y]).collect();
                plot_ui.points(
                    Points::new(points)
                        .name(&series.name)
                        .color(color_map.color_for(&series.name))
                        .radius(3.0),
                );
            }
        });
}
