//! Aggregation layer: filtered rows in, chart and KPI values out.
//!
//! - [`aggregate`]: group-by sums, rankings, top-N, grand totals
//! - [`ratio`]: main-to-marginal ratios with an explicit undefined case
//! - [`summary`]: the KPI/top-N bundle for cards and tables
//! - [`charts`]: series for the four dashboard charts

pub mod aggregate;
pub mod charts;
pub mod ratio;
pub mod summary;

pub use aggregate::{
    rank_descending, sum_all, sum_by_group, top_n, FieldTotals, GroupKey, GroupLabel, GroupSum,
    RankedEntry, RankedList,
};
pub use charts::{build_charts, ChartData};
pub use ratio::{main_to_marginal_ratio, per_state_ratios, rank_by_ratio, Ratio, RatioEntry};
pub use summary::{build_summary, build_summary_with, GenderTotals, Leader, Summary};
