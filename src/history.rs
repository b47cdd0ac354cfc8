//! Per-employee satisfaction history built from repeated predictions.

use chrono::NaiveDate;

use crate::models::ScoreRecord;

/// One displayable point of the satisfaction series.
#[derive(Debug, Clone, PartialEq)]
pub struct SatisfactionPoint {
    pub date: NaiveDate,
    pub satisfaction_pct: f64,
}

/// What the caller shows: a lone check-in reads better as a single value,
/// longer histories as the full ordered series.
#[derive(Debug, Clone, PartialEq)]
pub enum SatisfactionView {
    Empty,
    Point(SatisfactionPoint),
    Series(Vec<SatisfactionPoint>),
}

/// Appends a score and keeps the history ordered by date ascending. The
/// sort is stable, so same-day records keep their insertion order. Returns
/// the full ordered series for display. Nothing is ever removed.
pub fn record_score(history: &mut Vec<ScoreRecord>, record: ScoreRecord) -> &[ScoreRecord] {
    history.push(record);
    history.sort_by_key(|r| r.date);
    history.as_slice()
}

pub fn satisfaction_series(history: &[ScoreRecord]) -> Vec<SatisfactionPoint> {
    history
        .iter()
        .map(|record| SatisfactionPoint {
            date: record.date,
            satisfaction_pct: record.satisfaction_pct(),
        })
        .collect()
}

pub fn view(history: &[ScoreRecord]) -> SatisfactionView {
    let mut points = satisfaction_series(history);
    match points.len() {
        0 => SatisfactionView::Empty,
        1 => SatisfactionView::Point(points.remove(0)),
        _ => SatisfactionView::Series(points),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn score(date: NaiveDate, probability: f64) -> ScoreRecord {
        ScoreRecord {
            employee_id: 7,
            date,
            attrition_probability: probability,
        }
    }

    #[test]
    fn single_record_reports_a_point_value() {
        let mut history = Vec::new();
        record_score(&mut history, score(day(2026, 8, 1), 0.3));
        match view(&history) {
            SatisfactionView::Point(point) => {
                assert_eq!(point.date, day(2026, 8, 1));
                assert!((point.satisfaction_pct - 70.0).abs() < 1e-9);
            }
            other => panic!("expected a point, got {other:?}"),
        }
    }

    #[test]
    fn second_record_turns_the_view_into_a_series() {
        let mut history = Vec::new();
        record_score(&mut history, score(day(2026, 8, 1), 0.3));
        record_score(&mut history, score(day(2026, 8, 15), 0.5));
        match view(&history) {
            SatisfactionView::Series(points) => {
                assert_eq!(points.len(), 2);
                assert!((points[0].satisfaction_pct - 70.0).abs() < 1e-9);
                assert!((points[1].satisfaction_pct - 50.0).abs() < 1e-9);
            }
            other => panic!("expected a series, got {other:?}"),
        }
    }

    #[test]
    fn history_stays_date_ordered_whatever_the_insertion_order() {
        let mut history = Vec::new();
        record_score(&mut history, score(day(2026, 8, 20), 0.4));
        record_score(&mut history, score(day(2026, 8, 5), 0.2));
        record_score(&mut history, score(day(2026, 8, 12), 0.6));
        let dates: Vec<NaiveDate> = history.iter().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec![day(2026, 8, 5), day(2026, 8, 12), day(2026, 8, 20)]
        );
    }

    #[test]
    fn same_day_records_keep_insertion_order() {
        let mut history = Vec::new();
        record_score(&mut history, score(day(2026, 8, 10), 0.1));
        record_score(&mut history, score(day(2026, 8, 10), 0.2));
        record_score(&mut history, score(day(2026, 8, 1), 0.9));
        assert_eq!(history[0].attrition_probability, 0.9);
        assert_eq!(history[1].attrition_probability, 0.1);
        assert_eq!(history[2].attrition_probability, 0.2);
    }

    #[test]
    fn empty_history_views_as_empty() {
        assert_eq!(view(&[]), SatisfactionView::Empty);
    }
}
