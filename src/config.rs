use std::path::PathBuf;

use clap::Parser;

use crate::data::filter::{Selection, Selector};

/// Dataset read when nothing has been opened yet.
pub const DEFAULT_DATA_PATH: &str = "SampleSuperstore.csv";

/// Superstore sales dashboard.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Args {
    /// Default dataset (.csv or .xlsx) loaded until a file is opened.
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Print the dashboard as JSON instead of opening a window.
    #[arg(long)]
    pub report: bool,

    /// Region filter for `--report` (default: All).
    #[arg(long, requires = "report")]
    pub region: Option<String>,

    /// Category filter for `--report` (default: All).
    #[arg(long, requires = "report")]
    pub category: Option<String>,

    /// Segment filter for `--report` (default: All).
    #[arg(long, requires = "report")]
    pub segment: Option<String>,

    /// Write the filtered rows as CSV to this path (with `--report`).
    #[arg(long, requires = "report")]
    pub export: Option<PathBuf>,
}

impl Args {
    /// Selection described by the filter flags.
    pub fn selection(&self) -> Selection {
        Selection {
            region: Selector::parse(self.region.as_deref()),
            category: Selector::parse(self.category.as_deref()),
            segment: Selector::parse(self.segment.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["superstore-dash"]);
        assert_eq!(args.data, PathBuf::from(DEFAULT_DATA_PATH));
        assert!(!args.report);
        assert_eq!(args.selection(), Selection::default());
    }

    #[test]
    fn report_flags() {
        let args = Args::parse_from([
            "superstore-dash",
            "--data",
            "sales.xlsx",
            "--report",
            "--region",
            "East",
            "--segment",
            "All",
            "--export",
            "out.csv",
        ]);
        let sel = args.selection();
        assert_eq!(sel.region, Selector::Only(CellValue::String("East".into())));
        assert_eq!(sel.segment, Selector::All);
        assert_eq!(args.export, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn filters_need_report_mode() {
        assert!(Args::try_parse_from(["superstore-dash", "--region", "East"]).is_err());
    }
}
