//! Group-by sums, rankings and totals over a filtered view.
//!
//! Every function here is pure: it reads a [`FilteredView`] and returns new
//! values without touching the underlying dataset.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use log::debug;
use serde::{Serialize, Serializer};

use crate::data::filter::FilteredView;
use crate::data::model::{NumericField, WorkforceRecord};

// ---------------------------------------------------------------------------
// Grouping keys
// ---------------------------------------------------------------------------

/// Which column(s) rows are grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    ByState,
    ByIndustry,
    ByStateIndustry,
}

impl GroupKey {
    /// The label a record falls under for this key.
    pub fn label(self, record: &WorkforceRecord) -> GroupLabel {
        match self {
            GroupKey::ByState => GroupLabel::State(record.state.clone()),
            GroupKey::ByIndustry => GroupLabel::Industry(record.industry_group.clone()),
            GroupKey::ByStateIndustry => {
                GroupLabel::StateIndustry(record.state.clone(), record.industry_group.clone())
            }
        }
    }
}

/// Key value of one group. Ordered lexically (state before industry for pairs).
///
/// Serializes as a plain string, or `[state, industry]` for pairs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum GroupLabel {
    State(String),
    Industry(String),
    StateIndustry(String, String),
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupLabel::State(s) | GroupLabel::Industry(s) => f.write_str(s),
            GroupLabel::StateIndustry(s, i) => write!(f, "{s} / {i}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Summed fields
// ---------------------------------------------------------------------------

/// Summed value per numeric field. Fields that were not summed read as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldTotals(BTreeMap<NumericField, u64>);

impl FieldTotals {
    /// All requested fields present, each at 0.
    pub fn zeroed(fields: &[NumericField]) -> Self {
        FieldTotals(fields.iter().map(|&f| (f, 0)).collect())
    }

    pub fn get(&self, field: NumericField) -> u64 {
        self.0.get(&field).copied().unwrap_or(0)
    }

    pub fn contains(&self, field: NumericField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NumericField, u64)> + '_ {
        self.0.iter().map(|(&f, &v)| (f, v))
    }

    fn add_record(&mut self, record: &WorkforceRecord) {
        for (field, total) in self.0.iter_mut() {
            *total += field.value(record);
        }
    }
}

/// Summed fields per group, ordered by label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSum {
    pub key: GroupKey,
    pub fields: Vec<NumericField>,
    pub groups: BTreeMap<GroupLabel, FieldTotals>,
}

impl GroupSum {
    pub fn get(&self, label: &GroupLabel) -> Option<&FieldTotals> {
        self.groups.get(label)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// One serialized row: `{"label": ..., "totals": {...}}`.
#[derive(Serialize)]
struct GroupRow<'a> {
    label: &'a GroupLabel,
    totals: &'a FieldTotals,
}

impl Serialize for GroupSum {
    // Labels are not always strings, so groups go out as a list of rows
    // rather than a JSON object.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(
            self.groups
                .iter()
                .map(|(label, totals)| GroupRow { label, totals }),
        )
    }
}

// ---------------------------------------------------------------------------
// Rankings
// ---------------------------------------------------------------------------

/// One position in a ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub label: GroupLabel,
    /// Value of the field the ranking was built on.
    pub value: u64,
    pub totals: FieldTotals,
}

/// Groups in rank order; position 0 is rank 1.
pub type RankedList = Vec<RankedEntry>;

// ---------------------------------------------------------------------------
// Reductions
// ---------------------------------------------------------------------------

/// Group rows by `key` and sum each requested field per group.
///
/// Only groups with at least one row appear in the result.
pub fn sum_by_group(view: &FilteredView<'_>, key: GroupKey, fields: &[NumericField]) -> GroupSum {
    let mut groups: BTreeMap<GroupLabel, FieldTotals> = BTreeMap::new();
    for rec in view.iter() {
        groups
            .entry(key.label(rec))
            .or_insert_with(|| FieldTotals::zeroed(fields))
            .add_record(rec);
    }

    debug!("Grouped {} rows into {} groups by {:?}", view.len(), groups.len(), key);
    GroupSum {
        key,
        fields: fields.to_vec(),
        groups,
    }
}

/// Sort groups by `field`, largest first. Equal values keep label order.
pub fn rank_descending(sums: &GroupSum, field: NumericField) -> RankedList {
    let mut ranked: RankedList = sums
        .groups
        .iter()
        .map(|(label, totals)| RankedEntry {
            label: label.clone(),
            value: totals.get(field),
            totals: totals.clone(),
        })
        .collect();

    ranked.sort_by(|a, b| match b.value.cmp(&a.value) {
        Ordering::Equal => a.label.cmp(&b.label),
        other => other,
    });
    ranked
}

/// The first `n` entries of a ranking, in order.
pub fn top_n<T: Clone>(ranked: &[T], n: usize) -> Vec<T> {
    ranked.iter().take(n).cloned().collect()
}

/// Total of each requested field across the whole view (0 when empty).
pub fn sum_all(view: &FilteredView<'_>, fields: &[NumericField]) -> FieldTotals {
    let mut totals = FieldTotals::zeroed(fields);
    for rec in view.iter() {
        totals.add_record(rec);
    }
    totals
}
