mod app;
mod cache;
mod color;
mod config;
mod dashboard;
mod data;
mod error;
mod state;
mod ui;

use std::io::Write;

use anyhow::{Context, Result};
use app::SuperstoreApp;
use clap::Parser;
use config::Args;
use data::loader::{self, DataSource};
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.report {
        return report(&args, &mut std::io::stdout().lock());
    }

    let mut state = AppState::new(args.data.clone());
    state.load_fallback();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Superstore Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(SuperstoreApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}

/// Headless mode: load, filter, write `--export` if asked, and print the
/// dashboard as JSON to `out`.
fn report(args: &Args, out: &mut impl Write) -> Result<()> {
    let source = DataSource::Fallback(args.data.clone());
    let dataset = loader::load(&source)?;
    log::info!("Loaded {} rows from {}", dataset.len(), source.name());

    let dash = dashboard::render(&dataset, &args.selection())?;

    if let Some(path) = &args.export {
        std::fs::write(path, &dash.export)
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported {} rows to {}", dash.filtered_rows, path.display());
    }

    serde_json::to_writer_pretty(&mut *out, &dash).context("serializing dashboard")?;
    writeln!(out).context("writing report")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use super::*;
    use pretty_assertions::assert_eq;

    const CSV: &str = "Region,Category,Segment,Sales,Profit,Quantity,Discount,Sub-Category\n\
                       East,Furniture,Consumer,100,10,2,0.1,Chairs\n\
                       West,Furniture,Corporate,200,-5,1,0.2,Tables\n";

    #[test]
    fn report_prints_json_and_writes_export() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("SampleSuperstore.csv");
        let export = dir.path().join("superstore_filtered.csv");
        std::fs::write(&data, CSV).unwrap();

        let args = Args::parse_from::<_, OsString>([
            "superstore-dash".into(),
            "--data".into(),
            data.into_os_string(),
            "--report".into(),
            "--region".into(),
            "East".into(),
            "--export".into(),
            export.clone().into_os_string(),
        ]);
        let mut out = Vec::new();
        report(&args, &mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["total_rows"], 2);
        assert_eq!(json["filtered_rows"], 1);
        assert_eq!(json["metrics"]["total_sales"], 100.0);

        let exported = std::fs::read_to_string(&export).unwrap();
        assert_eq!(exported.lines().count(), 2);
        assert!(exported.lines().nth(1).unwrap().starts_with("East,"));
    }

    #[test]
    fn report_fails_without_fallback_file() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("missing.csv");
        let args = Args::parse_from::<_, OsString>([
            "superstore-dash".into(),
            "--data".into(),
            data.into_os_string(),
            "--report".into(),
        ]);
        let mut out = Vec::new();
        let err = report(&args, &mut out).unwrap_err();
        assert!(err.to_string().contains("missing.csv"));
        assert!(out.is_empty());
    }
}
