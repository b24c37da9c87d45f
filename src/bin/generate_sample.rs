use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{ArrayRef, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use workforce_insights::config::{INDUSTRY_COLUMN, STATE_COLUMN};
use workforce_insights::data::{NumericField, WorkforceRecord};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform count in `[lo, hi)`.
    fn between(&mut self, lo: u64, hi: u64) -> u64 {
        lo + (self.next_f64() * (hi - lo) as f64) as u64
    }
}

const STATES: [(&str, u64); 8] = [
    ("STATE - ASSAM", 40_000),
    ("STATE - BIHAR", 90_000),
    ("STATE - GUJARAT", 120_000),
    ("STATE - KERALA", 60_000),
    ("STATE - MAHARASHTRA", 200_000),
    ("STATE - ODISHA", 50_000),
    ("STATE - TAMIL NADU", 150_000),
    ("STATE - WEST BENGAL", 110_000),
];

const INDUSTRIES: [&str; 7] = [
    "Agriculture",
    "Construction",
    "Manufacturing",
    "Mining",
    "Retail",
    "Services",
    "Textiles",
];

fn generate(rng: &mut SimpleRng) -> Vec<WorkforceRecord> {
    let mut records = Vec::new();
    for &(state, scale) in &STATES {
        for &industry in &INDUSTRIES {
            // Not every state reports every industry
            if rng.next_f64() < 0.15 {
                continue;
            }
            let main_males = rng.between(scale / 10, scale);
            let main_females = rng.between(0, main_males / 2 + 1);
            // Some rows have no marginal workers at all
            let (marginal_males, marginal_females) = if rng.next_f64() < 0.1 {
                (0, 0)
            } else {
                (rng.between(0, main_males / 4 + 1), rng.between(0, main_females / 3 + 1))
            };
            let total_main_workers = main_males + main_females;
            let total_marginal_workers = marginal_males + marginal_females;

            records.push(WorkforceRecord {
                state: state.to_string(),
                industry_group: industry.to_string(),
                total_workers: total_main_workers + total_marginal_workers,
                main_males,
                main_females,
                marginal_males,
                marginal_females,
                total_main_workers,
                total_marginal_workers,
            });
        }
    }
    records
}

fn write_csv(path: &Path, records: &[WorkforceRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for rec in records {
        writer.serialize(rec).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, records: &[WorkforceRecord]) -> Result<()> {
    let mut fields = vec![
        Field::new(STATE_COLUMN, DataType::Utf8, false),
        Field::new(INDUSTRY_COLUMN, DataType::Utf8, false),
    ];
    fields.extend(
        NumericField::ALL
            .iter()
            .map(|f| Field::new(f.column_name(), DataType::UInt64, false)),
    );
    let schema = Arc::new(Schema::new(fields));

    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(records.iter().map(|r| r.state.as_str()))),
        Arc::new(StringArray::from_iter_values(records.iter().map(|r| r.industry_group.as_str()))),
    ];
    for field in NumericField::ALL {
        columns.push(Arc::new(UInt64Array::from_iter_values(
            records.iter().map(|r| field.value(r)),
        )));
    }

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating Parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing Parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let output: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_workforce.csv"));

    let mut rng = SimpleRng::new(42);
    let records = generate(&mut rng);

    let ext = output
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "csv" => write_csv(&output, &records)?,
        "parquet" | "pq" => write_parquet(&output, &records)?,
        other => bail!("Unsupported output extension: .{other} (use .csv or .parquet)"),
    }

    println!(
        "Wrote {} rows ({} states × {} industries) to {}",
        records.len(),
        STATES.len(),
        INDUSTRIES.len(),
        output.display()
    );
    Ok(())
}
