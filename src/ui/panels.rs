use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::export::{EXPORT_FILE_NAME, EXPORT_MIME};
use crate::data::filter::Selection;
use crate::data::loader::DataSource;
use crate::data::metrics::{format_count, format_currency, format_percent};
use crate::data::model::{CATEGORY, REGION, SEGMENT};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – source and selector widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Settings");
    ui.separator();

    if ui.button("Open .csv / .xlsx…").clicked() {
        open_file_dialog(state);
    }
    match &state.source_name {
        Some(name) => ui.label(RichText::new(name).weak()),
        None => ui.label(RichText::new("No file loaded").weak()),
    };
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    let mut selection = state.selection.clone();
    selector_combo(ui, state, REGION, &mut selection);
    selector_combo(ui, state, CATEGORY, &mut selection);
    selector_combo(ui, state, SEGMENT, &mut selection);
    state.set_selection(selection);
}

/// One "All + distinct values" drop-down bound to a selection field.
fn selector_combo(ui: &mut Ui, state: &AppState, column: &str, selection: &mut Selection) {
    let options = state.options(column);
    let current = match column {
        REGION => &mut selection.region,
        CATEGORY => &mut selection.category,
        _ => &mut selection.segment,
    };

    ui.strong(column);
    egui::ComboBox::from_id_salt(column)
        .selected_text(current.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in options {
                let label = option.to_string();
                let is_selected = *current == option;
                if ui.selectable_label(is_selected, label).clicked() {
                    *current = option;
                }
            }
        });
    ui.add_space(6.0);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.dashboard.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Download filtered CSV…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(dash) = &state.dashboard {
            ui.label(format!(
                "{} rows loaded, {} after filters",
                format_count(dash.total_rows as i64),
                format_count(dash.filtered_rows as i64)
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Metric cards
// ---------------------------------------------------------------------------

/// The four headline figures in a row.
pub fn metric_cards(ui: &mut Ui, state: &AppState) {
    let Some(dash) = &state.dashboard else {
        return;
    };
    let m = &dash.metrics;
    let cards = [
        ("Total Sales", format_currency(m.total_sales)),
        ("Total Profit", format_currency(m.total_profit)),
        ("Quantity Sold", format_count(m.total_quantity)),
        ("Average Discount", format_percent(m.avg_discount)),
    ];
    ui.columns(cards.len(), |columns| {
        for (col, (title, value)) in columns.iter_mut().zip(cards) {
            col.group(|ui: &mut Ui| {
                ui.label(RichText::new(title).weak());
                ui.heading(value);
            });
        }
    });
}

/// Download button under the preview table.
pub fn download_button(ui: &mut Ui, state: &mut AppState) {
    if state.dashboard.is_none() {
        return;
    }
    if ui
        .button("Download filtered data (CSV)")
        .on_hover_text(format!("{EXPORT_FILE_NAME} ({EXPORT_MIME})"))
        .clicked()
    {
        save_file_dialog(state);
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sales data")
        .add_filter("Supported files", &["csv", "xlsx"])
        .add_filter("CSV", &["csv"])
        .add_filter("Excel", &["xlsx"])
        .pick_file();

    let Some(path) = file else {
        return;
    };
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    match std::fs::read(&path) {
        Ok(bytes) => state.load(&DataSource::Upload { name, bytes }),
        Err(e) => {
            log::error!("Failed to read {}: {e}", path.display());
            state.status_message = Some(format!("Error: could not read {name}: {e}"));
        }
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Save filtered data")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.save_export(&path) {
            log::error!("Failed to export: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
