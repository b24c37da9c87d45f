//! Series for the four dashboard charts.

use serde::Serialize;

use super::aggregate::{rank_descending, sum_by_group, GroupKey, GroupSum, RankedList};
use crate::data::filter::FilteredView;
use crate::data::model::NumericField;

/// Chart-ready aggregates for one selection. Empty views give empty series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    /// Horizontal bar: total workers per industry group, largest first.
    pub industry_distribution: RankedList,
    /// Stacked bar: the four gender fields per state.
    pub gender_by_state: GroupSum,
    /// Grouped bar: main vs marginal workers per state.
    pub worker_type_by_state: GroupSum,
    /// Treemap: total workers per (state, industry group).
    pub state_industry_treemap: GroupSum,
}

pub fn build_charts(view: &FilteredView<'_>) -> ChartData {
    let by_industry = sum_by_group(view, GroupKey::ByIndustry, &[NumericField::TotalWorkers]);
    ChartData {
        industry_distribution: rank_descending(&by_industry, NumericField::TotalWorkers),
        gender_by_state: sum_by_group(view, GroupKey::ByState, &NumericField::GENDER),
        worker_type_by_state: sum_by_group(view, GroupKey::ByState, &NumericField::WORKER_TYPE),
        state_industry_treemap: sum_by_group(
            view,
            GroupKey::ByStateIndustry,
            &[NumericField::TotalWorkers],
        ),
    }
}
