use std::io::Cursor;
use std::path::{Path, PathBuf};

use calamine::{Data, Reader, Xlsx};

use super::model::{CellValue, Dataset, REQUIRED_COLUMNS};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Where the dataset comes from.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// A file picked by the user: original file name plus its contents.
    Upload { name: String, bytes: Vec<u8> },
    /// The configured default dataset on disk.
    Fallback(PathBuf),
}

impl DataSource {
    /// Human-readable name for messages.
    pub fn name(&self) -> String {
        match self {
            DataSource::Upload { name, .. } => name.clone(),
            DataSource::Fallback(path) => path.display().to_string(),
        }
    }
}

/// Supported input formats, chosen from the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Xlsx,
}

impl Format {
    /// `.csv` (any case) is CSV; everything else is treated as a spreadsheet.
    pub fn from_name(name: &str) -> Format {
        if name.to_ascii_lowercase().ends_with(".csv") {
            Format::Csv
        } else {
            Format::Xlsx
        }
    }
}

/// Load a sales dataset.  Dispatch by file name.
///
/// Supported formats:
/// * `.csv`  – header row followed by records
/// * `.xlsx` – first worksheet, first row is the header
///
/// Column names are trimmed and the required columns checked afterwards.
pub fn load(source: &DataSource) -> Result<Dataset, LoadError> {
    match source {
        DataSource::Upload { name, bytes } => parse_bytes(name, bytes),
        DataSource::Fallback(path) => {
            let bytes = read_fallback(path)?;
            parse_bytes(&path.display().to_string(), &bytes)
        }
    }
}

/// Read the fallback file, mapping any I/O failure to `MissingFallback`.
pub fn read_fallback(path: &Path) -> Result<Vec<u8>, LoadError> {
    std::fs::read(path).map_err(|source| LoadError::MissingFallback {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse in-memory file contents named `name`.
pub fn parse_bytes(name: &str, bytes: &[u8]) -> Result<Dataset, LoadError> {
    let mut dataset = match Format::from_name(name) {
        Format::Csv => parse_csv(name, bytes)?,
        Format::Xlsx => parse_xlsx(name, bytes)?,
    };
    dataset.trim_column_names();

    for required in REQUIRED_COLUMNS {
        if dataset.column_index(required).is_none() {
            return Err(LoadError::MissingColumn(required.to_string()));
        }
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Local file header signature of a zip archive (and so of any `.xlsx`).
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// CSV layout: header row with column names, then one record per line.
/// Cell types are inferred per value (see [`CellValue::infer`]). Short
/// records are padded with nulls; records wider than the header are rejected.
fn parse_csv(name: &str, bytes: &[u8]) -> Result<Dataset, LoadError> {
    if bytes.starts_with(ZIP_MAGIC) {
        return Err(LoadError::malformed(name, "file is a zip archive, not CSV text"));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::malformed(name, e))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if columns.is_empty() || columns.iter().all(|c| c.trim().is_empty()) {
        return Err(LoadError::Empty(name.to_string()));
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| LoadError::malformed(name, format!("row {row_no}: {e}")))?;
        if record.len() > columns.len() {
            return Err(LoadError::malformed(
                name,
                format!(
                    "row {row_no}: expected {} fields, saw {}",
                    columns.len(),
                    record.len()
                ),
            ));
        }
        rows.push(record.iter().map(CellValue::infer).collect());
    }

    Ok(Dataset::new(columns, rows))
}

// ---------------------------------------------------------------------------
// XLSX loader
// ---------------------------------------------------------------------------

/// Read the first worksheet. The first row is the header; empty header cells
/// get pandas-style `Unnamed: N` names.
fn parse_xlsx(name: &str, bytes: &[u8]) -> Result<Dataset, LoadError> {
    let mut workbook: Xlsx<_> =
        Xlsx::new(Cursor::new(bytes)).map_err(|e| LoadError::malformed(name, e))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::malformed(name, "workbook contains no sheets"))?
        .map_err(|e| LoadError::malformed(name, e))?;

    let mut rows_iter = range.rows();
    let header = rows_iter
        .next()
        .ok_or_else(|| LoadError::Empty(name.to_string()))?;

    let columns: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(i, cell)| match cell {
            Data::Empty => format!("Unnamed: {i}"),
            other => other.to_string(),
        })
        .collect();

    let rows = rows_iter
        .map(|row| row.iter().map(cell_to_value).collect())
        .collect();

    Ok(Dataset::new(columns, rows))
}

fn cell_to_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Float(f) => CellValue::Float(*f),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Error(e) => CellValue::String(format!("{e:?}")),
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Date(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
    }
}
