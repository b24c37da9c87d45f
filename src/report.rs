use std::fmt;

use crate::analysis::{RankedList, Ratio, Summary};

// ---------------------------------------------------------------------------
// Plain-text rendering of a summary
// ---------------------------------------------------------------------------

/// Format a count with thousands separators: `1234567` → `1,234,567`.
pub fn with_separators(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// KPI cards, top-N tables and take-aways, as printed by the CLI.
pub struct SummaryReport<'a>(pub &'a Summary);

impl fmt::Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;

        writeln!(
            f,
            "Top Industry:   {} ({} workers)",
            s.top_industry.name,
            with_separators(s.top_industry.workers)
        )?;
        writeln!(
            f,
            "Top State:      {} ({} workers)",
            s.top_state.name,
            with_separators(s.top_state.workers)
        )?;
        writeln!(f, "Male Workers:   {}", with_separators(s.gender.male_total))?;
        writeln!(f, "Female Workers: {}", with_separators(s.gender.female_total))?;

        writeln!(f)?;
        write_ranking(f, &format!("Top {} Industries by Workforce", s.top_industries.len()), &s.top_industries)?;
        writeln!(f)?;
        write_ranking(f, &format!("Top {} States by Workforce", s.top_states.len()), &s.top_states)?;

        writeln!(f)?;
        writeln!(f, "States with Highest Main : Marginal Ratio")?;
        if s.top_ratio_states.is_empty() {
            writeln!(f, "  (no state has marginal workers)")?;
        }
        for (i, e) in s.top_ratio_states.iter().enumerate() {
            writeln!(
                f,
                "  {}. {:<30} {:>12} {:>12} {:>8}",
                i + 1,
                e.state,
                with_separators(e.main_total),
                with_separators(e.marginal_total),
                e.ratio.to_string()
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Key take-aways (current filters)")?;
        writeln!(
            f,
            "- {} is the most populous industry group, employing {} workers.",
            s.top_industry.name,
            with_separators(s.top_industry.workers)
        )?;
        writeln!(
            f,
            "- {} leads all states with {} total workers.",
            s.top_state.name,
            with_separators(s.top_state.workers)
        )?;
        writeln!(
            f,
            "- Gender split shows {} males vs {} females.",
            with_separators(s.gender.male_total),
            with_separators(s.gender.female_total)
        )?;
        match s.overall_ratio {
            Ratio::Defined(_) => writeln!(
                f,
                "- Full-time (main) roles outnumber part-time/seasonal (marginal) roles by {} : 1.",
                s.overall_ratio
            ),
            Ratio::Undefined => writeln!(
                f,
                "- No part-time/seasonal (marginal) workers in the current selection."
            ),
        }
    }
}

fn write_ranking(f: &mut fmt::Formatter<'_>, title: &str, ranked: &RankedList) -> fmt::Result {
    writeln!(f, "{title}")?;
    for (i, e) in ranked.iter().enumerate() {
        writeln!(f, "  {}. {:<40} {:>12}", i + 1, e.label.to_string(), with_separators(e.value))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::build_summary;
    use crate::data::filter::FilteredView;
    use crate::data::model::WorkforceRecord;

    #[test]
    fn test_with_separators() {
        assert_eq!(with_separators(0), "0");
        assert_eq!(with_separators(999), "999");
        assert_eq!(with_separators(1000), "1,000");
        assert_eq!(with_separators(1234567), "1,234,567");
    }

    #[test]
    fn test_report_contains_kpis_and_ratio() {
        let rows = vec![
            WorkforceRecord::from_parts("Kerala".into(), "Retail".into(), [3000, 1500, 500, 600, 400, 2000, 1000]),
            WorkforceRecord::from_parts("Goa".into(), "Fishing".into(), [900, 500, 400, 0, 0, 900, 0]),
        ];
        let view = FilteredView::from_rows(rows.iter().collect());
        let text = SummaryReport(&build_summary(&view).unwrap()).to_string();

        assert!(text.contains("Top Industry:   Retail (3,000 workers)"));
        assert!(text.contains("Male Workers:   2,600"));
        assert!(text.contains("Female Workers: 1,300"));
        // Kerala 2000/1000; Goa has no marginal workers and is left out
        assert!(text.contains("2.00"));
        assert!(!text.contains("1. Goa "));
        // 2900 / 1000
        assert!(text.contains("by 2.90 : 1."));
    }

    #[test]
    fn test_report_without_marginal_workers() {
        let rows = vec![WorkforceRecord::from_parts(
            "Goa".into(),
            "Fishing".into(),
            [900, 500, 400, 0, 0, 900, 0],
        )];
        let view = FilteredView::from_rows(rows.iter().collect());
        let text = SummaryReport(&build_summary(&view).unwrap()).to_string();
        assert!(text.contains("(no state has marginal workers)"));
        assert!(text.contains("No part-time/seasonal (marginal) workers"));
    }
}
