use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{INDUSTRY_COLUMN, STATE_COLUMN};

// ---------------------------------------------------------------------------
// NumericField – one of the seven worker-count columns
// ---------------------------------------------------------------------------

/// A numeric column of the workforce table.
///
/// Serializes as the source column name, so a `FieldTotals` map renders as
/// `{"total_workers": 180, ...}` in JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    TotalWorkers,
    MainMales,
    MainFemales,
    MarginalMales,
    MarginalFemales,
    TotalMainWorkers,
    TotalMarginalWorkers,
}

impl NumericField {
    /// All numeric fields, in source column order.
    pub const ALL: [NumericField; 7] = [
        NumericField::TotalWorkers,
        NumericField::MainMales,
        NumericField::MainFemales,
        NumericField::MarginalMales,
        NumericField::MarginalFemales,
        NumericField::TotalMainWorkers,
        NumericField::TotalMarginalWorkers,
    ];

    /// The four gender breakdown fields.
    pub const GENDER: [NumericField; 4] = [
        NumericField::MainMales,
        NumericField::MainFemales,
        NumericField::MarginalMales,
        NumericField::MarginalFemales,
    ];

    /// Main vs marginal worker totals.
    pub const WORKER_TYPE: [NumericField; 2] = [
        NumericField::TotalMainWorkers,
        NumericField::TotalMarginalWorkers,
    ];

    /// Case-sensitive column name in the input file.
    pub fn column_name(self) -> &'static str {
        match self {
            NumericField::TotalWorkers => "total_workers",
            NumericField::MainMales => "main_males",
            NumericField::MainFemales => "main_females",
            NumericField::MarginalMales => "marginal_males",
            NumericField::MarginalFemales => "marginal_females",
            NumericField::TotalMainWorkers => "total_main_workers",
            NumericField::TotalMarginalWorkers => "total_marginal_workers",
        }
    }

    /// Read this field from a record.
    pub fn value(self, record: &WorkforceRecord) -> u64 {
        match self {
            NumericField::TotalWorkers => record.total_workers,
            NumericField::MainMales => record.main_males,
            NumericField::MainFemales => record.main_females,
            NumericField::MarginalMales => record.marginal_males,
            NumericField::MarginalFemales => record.marginal_females,
            NumericField::TotalMainWorkers => record.total_main_workers,
            NumericField::TotalMarginalWorkers => record.total_marginal_workers,
        }
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Every column a source file must carry, categorical columns first.
pub fn required_columns() -> Vec<&'static str> {
    let mut cols = vec![STATE_COLUMN, INDUSTRY_COLUMN];
    cols.extend(NumericField::ALL.iter().map(|f| f.column_name()));
    cols
}

// ---------------------------------------------------------------------------
// WorkforceRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single (state, industry group) row.
///
/// `total_main_workers ≈ main_males + main_females` and
/// `total_workers ≈ total_main_workers + total_marginal_workers` hold in the
/// upstream data but are not checked here.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkforceRecord {
    #[serde(rename = "indiastates")]
    pub state: String,
    pub industry_group: String,
    pub total_workers: u64,
    pub main_males: u64,
    pub main_females: u64,
    pub marginal_males: u64,
    pub marginal_females: u64,
    pub total_main_workers: u64,
    pub total_marginal_workers: u64,
}

impl WorkforceRecord {
    /// Build a record from the two categorical values and the numeric
    /// columns in [`NumericField::ALL`] order.
    pub fn from_parts(state: String, industry_group: String, counts: [u64; 7]) -> Self {
        let [total_workers, main_males, main_females, marginal_males, marginal_females, total_main_workers, total_marginal_workers] =
            counts;
        WorkforceRecord {
            state,
            industry_group,
            total_workers,
            main_males,
            main_females,
            marginal_males,
            marginal_females,
            total_main_workers,
            total_marginal_workers,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with pre-computed distinct value sets.
///
/// Built once at load and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<WorkforceRecord>,
    states: BTreeSet<String>,
    industries: BTreeSet<String>,
}

impl Dataset {
    /// Build the distinct value indices from the loaded records.
    pub fn from_records(records: Vec<WorkforceRecord>) -> Self {
        let mut states = BTreeSet::new();
        let mut industries = BTreeSet::new();
        for rec in &records {
            states.insert(rec.state.clone());
            industries.insert(rec.industry_group.clone());
        }
        Dataset {
            records,
            states,
            industries,
        }
    }

    /// All records, in file order.
    pub fn records(&self) -> &[WorkforceRecord] {
        &self.records
    }

    /// Distinct states, ascending.
    pub fn distinct_states(&self) -> &BTreeSet<String> {
        &self.states
    }

    /// Distinct industry groups, ascending.
    pub fn distinct_industries(&self) -> &BTreeSet<String> {
        &self.industries
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
