use anyhow::{Context, Result};

use super::model::Dataset;

/// Default file name offered for the download.
pub const EXPORT_FILE_NAME: &str = "superstore_filtered.csv";
/// MIME type of the exported bytes.
pub const EXPORT_MIME: &str = "text/csv";

/// Serialize a view to UTF-8 CSV: header row, then one line per row, no
/// index column.
pub fn export_csv(view: &Dataset) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(&view.columns)
        .context("writing CSV header")?;
    for (row_no, row) in view.rows.iter().enumerate() {
        writer
            .write_record(row.iter().map(|v| v.to_field()))
            .with_context(|| format!("writing CSV row {row_no}"))?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing CSV buffer: {}", e.error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_bytes;
    use crate::data::model::{CellValue, REQUIRED_COLUMNS};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn s(v: &str) -> CellValue {
        CellValue::String(v.to_string())
    }

    fn columns() -> Vec<String> {
        REQUIRED_COLUMNS.map(String::from).to_vec()
    }

    #[test]
    fn writes_header_and_rows() {
        let view = Dataset::new(
            columns(),
            vec![vec![
                s("East"),
                s("Furniture"),
                s("Consumer"),
                CellValue::Float(100.0),
                CellValue::Integer(10),
                CellValue::Integer(2),
                CellValue::Float(0.1),
                s("Chairs, Office"),
            ]],
        );
        let text = String::from_utf8(export_csv(&view).unwrap()).unwrap();
        assert_eq!(
            text,
            "Region,Category,Segment,Sales,Profit,Quantity,Discount,Sub-Category\n\
             East,Furniture,Consumer,100.0,10,2,0.1,\"Chairs, Office\"\n"
        );
    }

    #[test]
    fn empty_view_is_header_only() {
        let text = String::from_utf8(export_csv(&Dataset::new(columns(), vec![])).unwrap()).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    fn arb_row() -> impl Strategy<Value = Vec<CellValue>> {
        (
            proptest::sample::select(&["East", "West", "Central", "South"][..]),
            proptest::sample::select(&["Furniture", "Technology", "Office Supplies"][..]),
            -1.0e6..1.0e6f64,
            -1.0e5..1.0e5f64,
            0..50i64,
            0.0..1.0f64,
            "[A-Za-z ,\"-]{1,12}",
        )
            .prop_map(|(region, cat, sales, profit, qty, disc, sub)| {
                vec![
                    s(region),
                    s(cat),
                    s("Consumer"),
                    CellValue::Float(sales),
                    CellValue::Float(profit),
                    CellValue::Integer(qty),
                    CellValue::Float(disc),
                    s(&format!("Sub-{sub}")),
                ]
            })
    }

    proptest! {
        #[test]
        fn export_round_trips_through_loader(rows in proptest::collection::vec(arb_row(), 1..20)) {
            let view = Dataset::new(columns(), rows);
            let bytes = export_csv(&view).unwrap();
            let parsed = parse_bytes("superstore_filtered.csv", &bytes).unwrap();
            prop_assert_eq!(parsed, view);
        }
    }
}
