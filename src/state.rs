use std::collections::BTreeSet;

use crate::analysis::{build_charts, build_summary, ChartData, Summary};
use crate::data::filter::{filter, FilteredView, Selection};
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// What the dashboard shows for the current selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Ready(Box<Summary>),
    /// The selection matched no rows.
    NoData,
}

/// One user's view of the shared dataset, independent of rendering.
///
/// The dataset is borrowed read-only; the selection and the derived summary
/// belong to this session alone.
pub struct Session<'a> {
    dataset: &'a Dataset,

    /// Current filter selections.
    selection: Selection,

    /// Summary for `selection` (cached until the selection changes).
    outcome: Outcome,
}

impl<'a> Session<'a> {
    /// Start with every state and industry selected.
    pub fn new(dataset: &'a Dataset) -> Self {
        Self::with_selection(dataset, Selection::all(dataset))
    }

    pub fn with_selection(dataset: &'a Dataset, selection: Selection) -> Self {
        let outcome = compute(dataset, &selection);
        Session {
            dataset,
            selection,
            outcome,
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// The summary, or `None` when the selection matched nothing.
    pub fn summary(&self) -> Option<&Summary> {
        match &self.outcome {
            Outcome::Ready(summary) => Some(summary.as_ref()),
            Outcome::NoData => None,
        }
    }

    /// Rows passing the current selection.
    pub fn view(&self) -> FilteredView<'a> {
        filter(self.dataset, &self.selection)
    }

    pub fn charts(&self) -> ChartData {
        build_charts(&self.view())
    }

    /// Replace the whole selection.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
        self.refilter();
    }

    /// Recompute the outcome after a selection change.
    fn refilter(&mut self) {
        self.outcome = compute(self.dataset, &self.selection);
    }

    /// Toggle a single state in the selection.
    pub fn toggle_state(&mut self, state: &str) {
        toggle(&mut self.selection.states, state);
        self.refilter();
    }

    /// Toggle a single industry group in the selection.
    pub fn toggle_industry(&mut self, industry: &str) {
        toggle(&mut self.selection.industries, industry);
        self.refilter();
    }

    pub fn select_all_states(&mut self) {
        self.selection.states = self.dataset.distinct_states().clone();
        self.refilter();
    }

    pub fn select_no_states(&mut self) {
        self.selection.states.clear();
        self.refilter();
    }

    pub fn select_all_industries(&mut self) {
        self.selection.industries = self.dataset.distinct_industries().clone();
        self.refilter();
    }

    pub fn select_no_industries(&mut self) {
        self.selection.industries.clear();
        self.refilter();
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}

fn compute(dataset: &Dataset, selection: &Selection) -> Outcome {
    match build_summary(&filter(dataset, selection)) {
        Ok(summary) => Outcome::Ready(Box::new(summary)),
        Err(_) => Outcome::NoData,
    }
}
