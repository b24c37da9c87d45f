//! Main-to-marginal worker ratios with guarded division.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use super::aggregate::{sum_by_group, GroupKey, GroupLabel};
use crate::data::filter::FilteredView;
use crate::data::model::NumericField;

/// Result of a division that may have no meaningful value.
///
/// `Undefined` stands in for "marginal total is zero" so that NaN and
/// infinity never reach a sort. Serializes as a number or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Ratio {
    Defined(f64),
    Undefined,
}

impl Ratio {
    pub fn value(self) -> Option<f64> {
        match self {
            Ratio::Defined(v) => Some(v),
            Ratio::Undefined => None,
        }
    }

    pub fn is_defined(self) -> bool {
        matches!(self, Ratio::Defined(_))
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::Defined(v) => write!(f, "{v:.2}"),
            Ratio::Undefined => f.write_str("n/a"),
        }
    }
}

/// Per-state worker-type totals and their ratio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatioEntry {
    pub state: String,
    pub main_total: u64,
    pub marginal_total: u64,
    pub ratio: Ratio,
}

/// `main / marginal`, or `Undefined` when `marginal` is zero.
pub fn main_to_marginal_ratio(main_total: u64, marginal_total: u64) -> Ratio {
    if marginal_total == 0 {
        Ratio::Undefined
    } else {
        Ratio::Defined(main_total as f64 / marginal_total as f64)
    }
}

/// One entry per state in the view, in state order. Undefined ratios are kept.
pub fn per_state_ratios(view: &FilteredView<'_>) -> Vec<RatioEntry> {
    let sums = sum_by_group(view, GroupKey::ByState, &NumericField::WORKER_TYPE);
    sums.groups
        .into_iter()
        .map(|(label, totals)| {
            let main_total = totals.get(NumericField::TotalMainWorkers);
            let marginal_total = totals.get(NumericField::TotalMarginalWorkers);
            let state = match label {
                GroupLabel::State(s) => s,
                other => other.to_string(),
            };
            RatioEntry {
                state,
                main_total,
                marginal_total,
                ratio: main_to_marginal_ratio(main_total, marginal_total),
            }
        })
        .collect()
}

/// Drop undefined ratios and sort the rest largest first, ties by state.
pub fn rank_by_ratio(entries: &[RatioEntry]) -> Vec<RatioEntry> {
    let mut ranked: Vec<(f64, &RatioEntry)> = entries
        .iter()
        .filter_map(|e| e.ratio.value().map(|v| (v, e)))
        .collect();

    ranked.sort_by(|(va, a), (vb, b)| match vb.total_cmp(va) {
        Ordering::Equal => a.state.cmp(&b.state),
        other => other,
    });
    ranked.into_iter().map(|(_, e)| e.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::WorkforceRecord;

    fn rec(state: &str, main: u64, marginal: u64) -> WorkforceRecord {
        WorkforceRecord {
            state: state.to_string(),
            industry_group: "Manufacturing".to_string(),
            total_workers: main + marginal,
            total_main_workers: main,
            total_marginal_workers: marginal,
            ..Default::default()
        }
    }

    #[test]
    fn test_zero_marginal_is_undefined() {
        for main in [0, 1, 42, u64::MAX] {
            assert_eq!(main_to_marginal_ratio(main, 0), Ratio::Undefined);
        }
    }

    #[test]
    fn test_defined_ratio() {
        assert_eq!(main_to_marginal_ratio(90, 30), Ratio::Defined(3.0));
        assert_eq!(main_to_marginal_ratio(0, 5), Ratio::Defined(0.0));
    }

    #[test]
    fn test_per_state_ratios_sums_before_dividing() {
        let rows = vec![rec("Goa", 30, 10), rec("Assam", 10, 0), rec("Goa", 10, 10)];
        let view = FilteredView::from_rows(rows.iter().collect());
        let entries = per_state_ratios(&view);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].state, "Assam");
        assert_eq!(entries[0].ratio, Ratio::Undefined);
        assert_eq!(entries[1].main_total, 40);
        assert_eq!(entries[1].marginal_total, 20);
        assert_eq!(entries[1].ratio, Ratio::Defined(2.0));
    }

    #[test]
    fn test_rank_by_ratio_excludes_undefined() {
        let rows = vec![
            rec("Assam", 10, 0),
            rec("Bihar", 20, 10),
            rec("Goa", 60, 10),
            rec("Delhi", 40, 20),
        ];
        let view = FilteredView::from_rows(rows.iter().collect());
        let ranked = rank_by_ratio(&per_state_ratios(&view));
        let states: Vec<&str> = ranked.iter().map(|e| e.state.as_str()).collect();
        // Bihar and Delhi tie at 2.0
        assert_eq!(states, vec!["Goa", "Bihar", "Delhi"]);
        assert!(ranked.iter().all(|e| e.ratio.is_defined()));
    }

    #[test]
    fn test_ratio_serialization() {
        assert_eq!(serde_json::to_string(&Ratio::Defined(1.5)).unwrap(), "1.5");
        assert_eq!(serde_json::to_string(&Ratio::Undefined).unwrap(), "null");
    }

    #[test]
    fn test_ratio_display_rounds() {
        assert_eq!(Ratio::Defined(2.0 / 3.0).to_string(), "0.67");
        assert_eq!(Ratio::Undefined.to_string(), "n/a");
    }
}
