use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int32Type, Int64Type, UInt32Type, UInt64Type,
};
use arrow::util::display::array_value_to_string;
use log::{debug, info};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Dataset, NumericField, WorkforceRecord};
use crate::config::{INDUSTRY_COLUMN, STATE_COLUMN};
use crate::error::DataLoadError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the workforce table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – comma-separated, header row
/// * `.tsv`     – tab-separated, header row
/// * `.json`    – `[{ "indiastates": "...", "total_workers": 120, ... }, ...]`
/// * `.parquet` – one column per field (string and integer/float columns)
///
/// Every format needs the same nine columns; extra columns are ignored.
pub fn load(path: &Path) -> Result<Dataset, DataLoadError> {
    if !path.exists() {
        return Err(DataLoadError::NotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_delimited(path, b',')?,
        "tsv" => load_delimited(path, b'\t')?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataLoadError::UnsupportedFormat(other.to_string())),
    };
    check_totals(&records)?;

    let dataset = Dataset::from_records(records);
    info!(
        "Loaded {} rows ({} states, {} industry groups) from {}",
        dataset.len(),
        dataset.distinct_states().len(),
        dataset.distinct_industries().len(),
        path.display()
    );
    Ok(dataset)
}

fn open(path: &Path) -> Result<File, DataLoadError> {
    File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => DataLoadError::NotFound(path.to_path_buf()),
        _ => DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

// ---------------------------------------------------------------------------
// Column lookup shared by all formats
// ---------------------------------------------------------------------------

/// Positions of the required columns within a header.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    state: usize,
    industry: usize,
    /// Indexed like [`NumericField::ALL`].
    numeric: [usize; 7],
}

impl ColumnIndex {
    fn locate<S: AsRef<str>>(headers: &[S]) -> Result<Self, DataLoadError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.as_ref().trim() == name)
                .ok_or_else(|| DataLoadError::MissingColumn(name.to_string()))
        };

        let state = find(STATE_COLUMN)?;
        let industry = find(INDUSTRY_COLUMN)?;
        let mut numeric = [0usize; 7];
        for (slot, field) in numeric.iter_mut().zip(NumericField::ALL) {
            *slot = find(field.column_name())?;
        }
        Ok(ColumnIndex {
            state,
            industry,
            numeric,
        })
    }
}

/// Interpret a cell as a worker count.
///
/// Plain integers are accepted, and so are whole floats such as `120.0`
/// which pandas writes once a column has held a NaN.
pub(crate) fn parse_count(raw: &str) -> Option<u64> {
    let s = raw.trim();
    if let Ok(n) = s.parse::<u64>() {
        return Some(n);
    }
    whole_count(s.parse::<f64>().ok()?)
}

fn whole_count(v: f64) -> Option<u64> {
    (v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v < u64::MAX as f64).then_some(v as u64)
}

/// Reject tables whose column totals do not fit in a `u64`.
///
/// Counts are non-negative, so if the whole table sums without overflow then
/// so does every filtered subset, and aggregation never needs to check again.
/// The male and female totals add two columns together and are checked too.
fn check_totals(records: &[WorkforceRecord]) -> Result<(), DataLoadError> {
    let mut totals = [0u64; 7];
    for rec in records {
        for (total, field) in totals.iter_mut().zip(NumericField::ALL) {
            *total = total
                .checked_add(field.value(rec))
                .ok_or_else(|| DataLoadError::TotalOverflow(field.column_name().to_string()))?;
        }
    }

    let column_total = |field: NumericField| {
        NumericField::ALL
            .iter()
            .position(|&f| f == field)
            .map_or(0, |i| totals[i])
    };
    let pairs = [
        (NumericField::MainMales, NumericField::MarginalMales),
        (NumericField::MainFemales, NumericField::MarginalFemales),
    ];
    for (main, marginal) in pairs {
        if column_total(main).checked_add(column_total(marginal)).is_none() {
            return Err(DataLoadError::TotalOverflow(format!("{main} + {marginal}")));
        }
    }
    Ok(())
}

fn invalid_number(row: usize, field: NumericField, value: impl Into<String>) -> DataLoadError {
    DataLoadError::InvalidNumber {
        row,
        column: field.column_name().to_string(),
        value: value.into(),
    }
}

// ---------------------------------------------------------------------------
// CSV / TSV loader
// ---------------------------------------------------------------------------

/// Header row with column names, one record per line.
/// Row numbers in errors count data rows from 1.
fn load_delimited(path: &Path, delimiter: u8) -> Result<Vec<WorkforceRecord>, DataLoadError> {
    let file = open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(file);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let columns = ColumnIndex::locate(&headers)?;
    debug!("Located required columns in {} header fields", headers.len());

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row_no = i + 1;
        let row = result?;
        // The reader is not flexible, so every row is as wide as the header
        let cell = |idx: usize| row.get(idx).unwrap_or("");

        let state = cell(columns.state).trim().to_string();
        let industry = cell(columns.industry).trim().to_string();
        let mut counts = [0u64; 7];
        for ((count, &idx), field) in counts.iter_mut().zip(&columns.numeric).zip(NumericField::ALL) {
            let raw = cell(idx);
            *count = parse_count(raw).ok_or_else(|| invalid_number(row_no, field, raw))?;
        }

        records.push(WorkforceRecord::from_parts(state, industry, counts));
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`:
///
/// ```json
/// [
///   {
///     "indiastates": "Kerala",
///     "industry_group": "Manufacturing",
///     "total_workers": 1200,
///     ...
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<WorkforceRecord>, DataLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let rows = root.as_array().ok_or_else(|| {
        DataLoadError::InvalidLayout("expected a top-level JSON array of records".to_string())
    })?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, value) in rows.iter().enumerate() {
        let row_no = i + 1;
        let obj = value.as_object().ok_or_else(|| DataLoadError::MalformedRow {
            row: row_no,
            reason: "not a JSON object".to_string(),
        })?;

        let get = |name: &str| {
            obj.get(name)
                .ok_or_else(|| DataLoadError::MissingColumn(name.to_string()))
        };

        let state = json_label(get(STATE_COLUMN)?, row_no, STATE_COLUMN)?;
        let industry = json_label(get(INDUSTRY_COLUMN)?, row_no, INDUSTRY_COLUMN)?;
        let mut counts = [0u64; 7];
        for (count, field) in counts.iter_mut().zip(NumericField::ALL) {
            let v = get(field.column_name())?;
            *count = json_count(v).ok_or_else(|| invalid_number(row_no, field, v.to_string()))?;
        }

        records.push(WorkforceRecord::from_parts(state, industry, counts));
    }

    Ok(records)
}

fn json_label(val: &JsonValue, row: usize, column: &str) -> Result<String, DataLoadError> {
    match val {
        JsonValue::String(s) => Ok(s.trim().to_string()),
        JsonValue::Number(n) => Ok(n.to_string()),
        other => Err(DataLoadError::MalformedRow {
            row,
            reason: format!("column '{column}' holds {other}, expected text"),
        }),
    }
}

fn json_count(val: &JsonValue) -> Option<u64> {
    match val {
        JsonValue::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(whole_count)),
        JsonValue::String(s) => parse_count(s),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per field.
///
/// Categorical columns must be `Utf8`/`LargeUtf8`; numeric columns may be any
/// 32/64-bit integer or float type, or text holding a number.  Works with
/// files written by both **Pandas** (`df.to_parquet()`) and **Polars**.
fn load_parquet(path: &Path) -> Result<Vec<WorkforceRecord>, DataLoadError> {
    let file = open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let field_names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let columns = ColumnIndex::locate(&field_names)?;

    let reader = builder.build()?;
    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let state_col = batch.column(columns.state);
        let industry_col = batch.column(columns.industry);

        for row in 0..batch.num_rows() {
            let row_no = records.len() + 1;
            let state = string_cell(state_col, row).ok_or_else(|| {
                label_error(row_no, STATE_COLUMN, state_col, row)
            })?;
            let industry = string_cell(industry_col, row).ok_or_else(|| {
                label_error(row_no, INDUSTRY_COLUMN, industry_col, row)
            })?;

            let mut counts = [0u64; 7];
            for ((count, &idx), field) in counts.iter_mut().zip(&columns.numeric).zip(NumericField::ALL) {
                let col = batch.column(idx);
                *count = count_cell(col, row)
                    .ok_or_else(|| invalid_number(row_no, field, cell_repr(col, row)))?;
            }

            records.push(WorkforceRecord::from_parts(state, industry, counts));
        }
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

fn string_cell(col: &ArrayRef, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => Some(col.as_string::<i32>().value(row).trim().to_string()),
        DataType::LargeUtf8 => Some(col.as_string::<i64>().value(row).trim().to_string()),
        _ => None,
    }
}

fn count_cell(col: &ArrayRef, row: usize) -> Option<u64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Int32 => u64::try_from(col.as_primitive::<Int32Type>().value(row)).ok(),
        DataType::Int64 => u64::try_from(col.as_primitive::<Int64Type>().value(row)).ok(),
        DataType::UInt32 => Some(u64::from(col.as_primitive::<UInt32Type>().value(row))),
        DataType::UInt64 => Some(col.as_primitive::<UInt64Type>().value(row)),
        DataType::Float32 => whole_count(f64::from(col.as_primitive::<Float32Type>().value(row))),
        DataType::Float64 => whole_count(col.as_primitive::<Float64Type>().value(row)),
        DataType::Utf8 => parse_count(col.as_string::<i32>().value(row)),
        DataType::LargeUtf8 => parse_count(col.as_string::<i64>().value(row)),
        _ => None,
    }
}

fn cell_repr(col: &ArrayRef, row: usize) -> String {
    if col.is_null(row) {
        return "<null>".to_string();
    }
    array_value_to_string(col, row).unwrap_or_else(|_| format!("{:?}", col.data_type()))
}

fn label_error(row: usize, column: &str, col: &ArrayRef, idx: usize) -> DataLoadError {
    DataLoadError::MalformedRow {
        row,
        reason: format!(
            "column '{column}' holds {} of type {:?}, expected text",
            cell_repr(col, idx),
            col.data_type()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count_integers() {
        assert_eq!(parse_count("120"), Some(120));
        assert_eq!(parse_count(" 7 "), Some(7));
        assert_eq!(parse_count("0"), Some(0));
    }

    #[test]
    fn test_parse_count_whole_floats() {
        assert_eq!(parse_count("120.0"), Some(120));
        assert_eq!(parse_count("1e3"), Some(1000));
    }

    #[test]
    fn test_parse_count_rejects_invalid() {
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count("abc"), None);
        assert_eq!(parse_count("-4"), None);
        assert_eq!(parse_count("2.5"), None);
        assert_eq!(parse_count("NaN"), None);
        assert_eq!(parse_count("inf"), None);
        // 2^64 must not saturate to u64::MAX
        assert_eq!(parse_count("18446744073709551616.0"), None);
        assert_eq!(parse_count("18446744073709551615"), Some(u64::MAX));
    }

    fn counts(state: &str, counts: [u64; 7]) -> WorkforceRecord {
        WorkforceRecord::from_parts(state.into(), "Mining".into(), counts)
    }

    #[test]
    fn test_check_totals_rejects_column_overflow() {
        let half = u64::MAX / 2 + 1;
        let records = vec![
            counts("Goa", [half, 0, 0, 0, 0, 0, 0]),
            counts("Assam", [half, 0, 0, 0, 0, 0, 0]),
        ];
        match check_totals(&records) {
            Err(DataLoadError::TotalOverflow(col)) => assert_eq!(col, "total_workers"),
            other => panic!("expected TotalOverflow, got {other:?}"),
        }
    }

    #[test]
    fn test_check_totals_rejects_gender_overflow() {
        let records = vec![counts("Goa", [0, u64::MAX, 0, 1, 0, 0, 0])];
        match check_totals(&records) {
            Err(DataLoadError::TotalOverflow(col)) => assert_eq!(col, "main_males + marginal_males"),
            other => panic!("expected TotalOverflow, got {other:?}"),
        }
    }

    #[test]
    fn test_check_totals_accepts_max_single_column() {
        let records = vec![counts("Goa", [u64::MAX, 0, 0, 0, 0, 0, 0])];
        assert!(check_totals(&records).is_ok());
    }

    #[test]
    fn test_locate_reports_first_missing_column() {
        let headers = ["indiastates", "industry_group", "total_workers"];
        match ColumnIndex::locate(&headers) {
            Err(DataLoadError::MissingColumn(col)) => assert_eq!(col, "main_males"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_locate_ignores_extra_columns() {
        let mut headers = vec!["extra".to_string()];
        headers.extend(crate::data::model::required_columns().iter().rev().map(|c| c.to_string()));
        let idx = ColumnIndex::locate(&headers).unwrap();
        assert_eq!(idx.state, 9);
        assert_eq!(idx.industry, 8);
        assert_eq!(idx.numeric[0], 7);
    }

    #[test]
    fn test_json_count() {
        assert_eq!(json_count(&serde_json::json!(5)), Some(5));
        assert_eq!(json_count(&serde_json::json!(5.0)), Some(5));
        assert_eq!(json_count(&serde_json::json!("12")), Some(12));
        assert_eq!(json_count(&serde_json::json!(-1)), None);
        assert_eq!(json_count(&serde_json::json!(null)), None);
    }
}
