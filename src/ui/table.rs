use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Preview table of the filtered rows
// ---------------------------------------------------------------------------

pub fn preview_table(ui: &mut Ui, preview: &Dataset) {
    let row_height = ui.text_style_height(&eframe::egui::TextStyle::Body) + 4.0;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(320.0)
        .columns(Column::auto().at_least(60.0).clip(true), preview.columns.len())
        .header(row_height + 2.0, |mut header| {
            for name in &preview.columns {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(row_height, preview.len(), |mut row| {
                let cells = &preview.rows[row.index()];
                for cell in cells {
                    row.col(|ui| {
                        match cell {
                            CellValue::Null => ui.weak(""),
                            other => ui.label(other.to_string()),
                        };
                    });
                }
            });
        });
}
