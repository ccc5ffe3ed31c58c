//! Grading-period selection.

use crate::grading::types::GradingPeriod;

/// Picks the grading period titled exactly `target_title` with the latest
/// end date.
///
/// Titles compare case-sensitively. Periods without an end date rank below
/// every dated one, and equal end dates go to whichever appears first in
/// `periods`. Returns `None` when nothing matches.
pub fn select_period<'a>(
    periods: &'a [GradingPeriod],
    target_title: &str,
) -> Option<&'a GradingPeriod> {
    let mut matching: Vec<&GradingPeriod> = periods
        .iter()
        .filter(|gp| gp.title == target_title)
        .collect();

    matching.sort_by(|a, b| b.end_date.cmp(&a.end_date));
    matching.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::types::parse_timestamp;

    fn period(id: u64, title: &str, end: Option<&str>) -> GradingPeriod {
        GradingPeriod {
            id: id.into(),
            title: title.into(),
            end_date: end.and_then(parse_timestamp),
        }
    }

    #[test]
    fn test_no_matching_title() {
        let periods = vec![period(1, "Term 1", Some("2024-01-10"))];
        assert!(select_period(&periods, "Term 2").is_none());
        assert!(select_period(&[], "Term 2").is_none());
    }

    #[test]
    fn test_title_match_is_case_sensitive() {
        let periods = vec![period(1, "term 2", Some("2024-01-10"))];
        assert!(select_period(&periods, "Term 2").is_none());
    }

    #[test]
    fn test_latest_end_date_wins() {
        let periods = vec![
            period(100, "Term 2", Some("2024-01-10")),
            period(101, "Term 2", Some("2024-03-01")),
            period(102, "Term 3", Some("2024-06-01")),
        ];
        let selected = select_period(&periods, "Term 2").unwrap();
        assert_eq!(selected.id, 101.into());
    }

    #[test]
    fn test_ties_resolve_to_first_in_input() {
        let periods = vec![
            period(7, "Term 2", Some("2024-03-01")),
            period(8, "Term 2", Some("2024-03-01")),
        ];
        assert_eq!(select_period(&periods, "Term 2").unwrap().id, 7.into());
    }

    #[test]
    fn test_undated_periods_rank_last() {
        let periods = vec![
            period(1, "Term 2", None),
            period(2, "Term 2", Some("2023-09-01")),
        ];
        assert_eq!(select_period(&periods, "Term 2").unwrap().id, 2.into());
    }

    #[test]
    fn test_input_order_untouched() {
        let periods = vec![
            period(1, "Term 2", Some("2024-01-10")),
            period(2, "Term 2", Some("2024-03-01")),
        ];
        select_period(&periods, "Term 2");
        assert_eq!(periods[0].id, 1.into());
        assert_eq!(periods[1].id, 2.into());
    }
}
