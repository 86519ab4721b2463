use eframe::egui::{self, Color32, ScrollArea, Ui};

use crate::dashboard::PREVIEW_ROWS;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SuperstoreApp {
    pub state: AppState,
}

impl SuperstoreApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SuperstoreApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: source + selectors ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, charts, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dashboard.is_none() {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a .csv or .xlsx file to build the dashboard  (File → Open…)");
                });
                return;
            }

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    central_panel(ui, &mut self.state);
                });
        });
    }
}

fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Dashboard - Superstore");
    panels::metric_cards(ui, state);
    ui.separator();

    if let Some(dash) = &state.dashboard {
        plot::bar_chart(ui, "sales_by_region", &dash.sales_by_region, Color32::LIGHT_BLUE);
        ui.add_space(8.0);
        plot::bar_chart(
            ui,
            "top_sub_categories",
            &dash.top_sub_categories,
            Color32::from_rgb(99, 110, 250),
        );
        ui.add_space(8.0);
        plot::scatter_chart(ui, &dash.discount_vs_profit);
        ui.separator();

        ui.strong("Data and download");
        if dash.preview.is_empty() {
            ui.label("No rows match the current filters.");
        } else {
            ui.label(format!("First {PREVIEW_ROWS} filtered rows"));
            table::preview_table(ui, &dash.preview);
        }
    }

    ui.add_space(8.0);
    panels::download_button(ui, state);
}
