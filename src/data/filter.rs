use std::collections::BTreeSet;

use log::debug;

use super::model::{Dataset, WorkforceRecord};

// ---------------------------------------------------------------------------
// Selection: which states and industries the user has chosen
// ---------------------------------------------------------------------------

/// The user's chosen states and industry groups.
///
/// An empty set means nothing is selected for that column, so nothing passes.
/// "Everything selected" must be spelled out with [`Selection::all`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    pub states: BTreeSet<String>,
    pub industries: BTreeSet<String>,
}

impl Selection {
    pub fn new<S, I>(states: S, industries: I) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Selection {
            states: states.into_iter().map(Into::into).collect(),
            industries: industries.into_iter().map(Into::into).collect(),
        }
    }

    /// Initialise a selection with every state and industry in the dataset.
    pub fn all(dataset: &Dataset) -> Self {
        Selection {
            states: dataset.distinct_states().clone(),
            industries: dataset.distinct_industries().clone(),
        }
    }

    /// Whether a record passes this selection.
    pub fn matches(&self, record: &WorkforceRecord) -> bool {
        self.states.contains(&record.state) && self.industries.contains(&record.industry_group)
    }
}

// ---------------------------------------------------------------------------
// FilteredView: rows passing a selection
// ---------------------------------------------------------------------------

/// Borrowed subset of a [`Dataset`], in dataset order.
#[derive(Debug, Clone, Default)]
pub struct FilteredView<'a> {
    rows: Vec<&'a WorkforceRecord>,
}

impl<'a> FilteredView<'a> {
    /// Build a view over an explicit set of rows.
    pub fn from_rows(rows: Vec<&'a WorkforceRecord>) -> Self {
        FilteredView { rows }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a WorkforceRecord> + '_ {
        self.rows.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Return the rows whose state and industry group are both selected.
pub fn filter<'a>(dataset: &'a Dataset, selection: &Selection) -> FilteredView<'a> {
    if selection.states.is_empty() || selection.industries.is_empty() {
        // Nothing selected for one of the columns → hide everything
        debug!("Empty selection, returning empty view");
        return FilteredView::default();
    }

    let rows: Vec<&WorkforceRecord> = dataset
        .records()
        .iter()
        .filter(|rec| selection.matches(rec))
        .collect();

    debug!(
        "Filtered {} of {} rows ({} states, {} industries selected)",
        rows.len(),
        dataset.len(),
        selection.states.len(),
        selection.industries.len()
    );
    FilteredView { rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        let rec = |s: &str, i: &str, total: u64| WorkforceRecord {
            state: s.to_string(),
            industry_group: i.to_string(),
            total_workers: total,
            ..Default::default()
        };
        Dataset::from_records(vec![
            rec("Assam", "Tea", 10),
            rec("Assam", "Mining", 20),
            rec("Bihar", "Tea", 30),
            rec("Bihar", "Retail", 40),
        ])
    }

    #[test]
    fn test_filter_all_is_identity() {
        let ds = dataset();
        let view = filter(&ds, &Selection::all(&ds));
        let rows: Vec<WorkforceRecord> = view.iter().cloned().collect();
        assert_eq!(rows, ds.records());
    }

    #[test]
    fn test_filter_keeps_only_selected() {
        let ds = dataset();
        let selection = Selection::new(["Assam", "Bihar"], ["Tea"]);
        let view = filter(&ds, &selection);
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|r| r.industry_group == "Tea"));
    }

    #[test]
    fn test_filter_intersection() {
        let ds = dataset();
        let view = filter(&ds, &Selection::new(["Bihar"], ["Tea", "Mining"]));
        let totals: Vec<u64> = view.iter().map(|r| r.total_workers).collect();
        assert_eq!(totals, vec![30]);
    }

    #[test]
    fn test_empty_states_yields_empty_view() {
        let ds = dataset();
        let mut selection = Selection::all(&ds);
        selection.states.clear();
        assert!(filter(&ds, &selection).is_empty());
    }

    #[test]
    fn test_empty_industries_yields_empty_view() {
        let ds = dataset();
        let selection = Selection::new(["Assam"], Vec::<String>::new());
        assert!(filter(&ds, &selection).is_empty());
    }

    #[test]
    fn test_unknown_values_match_nothing() {
        let ds = dataset();
        let view = filter(&ds, &Selection::new(["Goa"], ["Tea"]));
        assert!(view.is_empty());
        // Dataset untouched
        assert_eq!(ds.len(), 4);
    }
}
