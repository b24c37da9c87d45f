//! KPI and top-N bundle for the dashboard cards and tables.

use log::debug;
use serde::Serialize;

use super::aggregate::{
    rank_descending, sum_all, sum_by_group, top_n, GroupKey, RankedEntry, RankedList,
};
use super::ratio::{main_to_marginal_ratio, per_state_ratios, rank_by_ratio, Ratio, RatioEntry};
use crate::config::DEFAULT_TOP_N;
use crate::data::filter::FilteredView;
use crate::data::model::NumericField;
use crate::error::EmptyViewError;

/// The largest group under some key, with its worker count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leader {
    pub name: String,
    pub workers: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GenderTotals {
    pub main_males: u64,
    pub main_females: u64,
    pub marginal_males: u64,
    pub marginal_females: u64,
    /// `main_males + marginal_males`
    pub male_total: u64,
    /// `main_females + marginal_females`
    pub female_total: u64,
}

/// Everything the cards, tables and narrative need for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub top_industry: Leader,
    pub top_state: Leader,
    pub gender: GenderTotals,
    pub main_total: u64,
    pub marginal_total: u64,
    /// `main_total : marginal_total` across the whole view.
    pub overall_ratio: Ratio,
    pub top_industries: RankedList,
    pub top_states: RankedList,
    pub top_ratio_states: Vec<RatioEntry>,
}

/// [`build_summary_with`] using the default table length.
pub fn build_summary(view: &FilteredView<'_>) -> Result<Summary, EmptyViewError> {
    build_summary_with(view, DEFAULT_TOP_N)
}

/// Assemble the summary for a non-empty view, with `top` rows per table.
pub fn build_summary_with(view: &FilteredView<'_>, top: usize) -> Result<Summary, EmptyViewError> {
    if view.is_empty() {
        return Err(EmptyViewError);
    }

    let industries = rank_by_workers(view, GroupKey::ByIndustry);
    let states = rank_by_workers(view, GroupKey::ByState);
    let top_industry = leader(&industries)?;
    let top_state = leader(&states)?;

    let g = sum_all(view, &NumericField::GENDER);
    let gender = GenderTotals {
        main_males: g.get(NumericField::MainMales),
        main_females: g.get(NumericField::MainFemales),
        marginal_males: g.get(NumericField::MarginalMales),
        marginal_females: g.get(NumericField::MarginalFemales),
        male_total: g.get(NumericField::MainMales) + g.get(NumericField::MarginalMales),
        female_total: g.get(NumericField::MainFemales) + g.get(NumericField::MarginalFemales),
    };

    let wt = sum_all(view, &NumericField::WORKER_TYPE);
    let main_total = wt.get(NumericField::TotalMainWorkers);
    let marginal_total = wt.get(NumericField::TotalMarginalWorkers);

    let top_ratio_states = top_n(&rank_by_ratio(&per_state_ratios(view)), top);

    debug!(
        "Built summary over {} rows: top industry {}, top state {}",
        view.len(),
        top_industry.name,
        top_state.name
    );

    Ok(Summary {
        top_industry,
        top_state,
        gender,
        main_total,
        marginal_total,
        overall_ratio: main_to_marginal_ratio(main_total, marginal_total),
        top_industries: top_n(&industries, top),
        top_states: top_n(&states, top),
        top_ratio_states,
    })
}

fn rank_by_workers(view: &FilteredView<'_>, key: GroupKey) -> RankedList {
    let sums = sum_by_group(view, key, &[NumericField::TotalWorkers]);
    rank_descending(&sums, NumericField::TotalWorkers)
}

fn leader(ranked: &[RankedEntry]) -> Result<Leader, EmptyViewError> {
    ranked
        .first()
        .map(|e| Leader {
            name: e.label.to_string(),
            workers: e.value,
        })
        .ok_or(EmptyViewError)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filter, Selection};
    use crate::data::model::{Dataset, WorkforceRecord};
    use pretty_assertions::assert_eq;

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            WorkforceRecord::from_parts("StateA".into(), "Ind1".into(), [100, 60, 40, 0, 0, 100, 0]),
            WorkforceRecord::from_parts("StateA".into(), "Ind2".into(), [50, 20, 10, 15, 5, 30, 20]),
            WorkforceRecord::from_parts("StateB".into(), "Ind1".into(), [30, 10, 5, 10, 5, 15, 15]),
        ])
    }

    #[test]
    fn test_summary_for_single_state() {
        let ds = dataset();
        let view = filter(&ds, &Selection::new(["StateA"], ["Ind1", "Ind2"]));
        let summary = build_summary(&view).unwrap();

        assert_eq!(
            summary.top_industry,
            Leader {
                name: "Ind1".into(),
                workers: 100
            }
        );
        let industries: Vec<(String, u64)> = summary
            .top_industries
            .iter()
            .map(|e| (e.label.to_string(), e.value))
            .collect();
        assert_eq!(industries, vec![("Ind1".into(), 100), ("Ind2".into(), 50)]);
        assert_eq!(summary.top_state.workers, 150);
        assert_eq!(summary.main_total, 130);
        assert_eq!(summary.marginal_total, 20);
        assert_eq!(summary.overall_ratio, Ratio::Defined(6.5));
    }

    #[test]
    fn test_gender_totals() {
        let ds = dataset();
        let view = filter(&ds, &Selection::all(&ds));
        let g = build_summary(&view).unwrap().gender;
        assert_eq!(
            g,
            GenderTotals {
                main_males: 90,
                main_females: 55,
                marginal_males: 25,
                marginal_females: 10,
                male_total: 115,
                female_total: 65,
            }
        );
    }

    #[test]
    fn test_ratio_table_skips_undefined_states() {
        let rows = vec![
            WorkforceRecord::from_parts("StateA".into(), "Ind1".into(), [100, 60, 40, 0, 0, 100, 0]),
            WorkforceRecord::from_parts("StateB".into(), "Ind1".into(), [30, 10, 5, 10, 5, 15, 15]),
        ];
        let ds = Dataset::from_records(rows);
        let summary = build_summary(&filter(&ds, &Selection::all(&ds))).unwrap();
        assert_eq!(summary.top_ratio_states.len(), 1);
        assert_eq!(summary.top_ratio_states[0].state, "StateB");
    }

    #[test]
    fn test_top_tables_truncate() {
        let records = (0..8)
            .map(|i| {
                WorkforceRecord::from_parts(
                    format!("State{i}"),
                    format!("Ind{i}"),
                    [10 * (i + 1), 0, 0, 0, 0, 5, 1 + i],
                )
            })
            .collect();
        let ds = Dataset::from_records(records);
        let view = filter(&ds, &Selection::all(&ds));

        let summary = build_summary(&view).unwrap();
        assert_eq!(summary.top_states.len(), 5);
        assert_eq!(summary.top_industries.len(), 5);
        assert_eq!(summary.top_ratio_states.len(), 5);
        assert_eq!(summary.top_states[0].label.to_string(), "State7");

        let short = build_summary_with(&view, 3).unwrap();
        assert_eq!(short.top_states.len(), 3);
    }

    #[test]
    fn test_empty_view_is_rejected() {
        let ds = dataset();
        let view = filter(&ds, &Selection::new(Vec::<String>::new(), ["Ind1"]));
        assert!(view.is_empty());
        assert_eq!(build_summary(&view), Err(EmptyViewError));
    }
}
