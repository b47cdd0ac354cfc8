use std::fmt::Write;

use crate::history;
use crate::models::{EmployeeRecord, ScoreRecord};

#[derive(Debug, Clone)]
pub struct EmployeeSummary {
    pub employee_id: i64,
    pub name: String,
    pub latest_pct: f64,
    pub change_pct: f64,
    pub check_ins: usize,
}

/// One summary line per employee with at least one score, ordered lowest
/// current satisfaction first.
pub fn summarize(
    employees: &[EmployeeRecord],
    scores: &[ScoreRecord],
) -> Vec<EmployeeSummary> {
    let mut summaries = Vec::new();

    for employee in employees {
        let series: Vec<&ScoreRecord> = scores
            .iter()
            .filter(|s| s.employee_id == employee.id)
            .collect();
        let (Some(first), Some(last)) = (series.first(), series.last()) else {
            continue;
        };
        summaries.push(EmployeeSummary {
            employee_id: employee.id,
            name: employee.full_name(),
            latest_pct: last.satisfaction_pct(),
            change_pct: last.satisfaction_pct() - first.satisfaction_pct(),
            check_ins: series.len(),
        });
    }

    summaries.sort_by(|a, b| {
        a.latest_pct
            .partial_cmp(&b.latest_pct)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    summaries
}

pub fn build_report(employees: &[EmployeeRecord], scores: &[ScoreRecord]) -> String {
    let summaries = summarize(employees, scores);

    let mut output = String::new();
    let _ = writeln!(output, "# Work Satisfaction Report");
    let _ = writeln!(output);
    let _ = writeln!(output, "## Satisfaction by Employee");

    if summaries.is_empty() {
        let _ = writeln!(output, "No check-ins recorded yet.");
    } else {
        for summary in summaries.iter() {
            let _ = writeln!(
                output,
                "- {} (id {}) satisfaction {:.1}% ({:+.1} pts across {} check-ins)",
                summary.name,
                summary.employee_id,
                summary.latest_pct,
                summary.change_pct,
                summary.check_ins
            );
        }
    }

    let mut recent: Vec<&ScoreRecord> = scores.iter().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    let _ = writeln!(output);
    let _ = writeln!(output, "## Recent Check-ins");

    if recent.is_empty() {
        let _ = writeln!(output, "No check-ins recorded yet.");
    } else {
        for score in recent.iter().take(10) {
            let name = employees
                .iter()
                .find(|e| e.id == score.employee_id)
                .map(|e| e.full_name())
                .unwrap_or_else(|| format!("employee {}", score.employee_id));
            let _ = writeln!(
                output,
                "- {} on {}: satisfaction {:.1}%",
                name,
                score.date,
                score.satisfaction_pct()
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Series Detail");
    if summaries.is_empty() {
        let _ = writeln!(output, "Nothing to plot.");
    } else {
        for summary in summaries.iter() {
            let series: Vec<ScoreRecord> = scores
                .iter()
                .filter(|s| s.employee_id == summary.employee_id)
                .cloned()
                .collect();
            let _ = writeln!(output, "### {}", summary.name);
            match history::view(&series) {
                history::SatisfactionView::Empty => {}
                history::SatisfactionView::Point(point) => {
                    let _ = writeln!(
                        output,
                        "Single check-in on {}: {:.1}%",
                        point.date, point.satisfaction_pct
                    );
                }
                history::SatisfactionView::Series(points) => {
                    for point in points {
                        let _ = writeln!(
                            output,
                            "- {}: {:.1}%",
                            point.date, point.satisfaction_pct
                        );
                    }
                }
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::sample_new_employee;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fixture() -> (Vec<EmployeeRecord>, Vec<ScoreRecord>) {
        let today = day(2026, 8, 29);
        let employee = EmployeeRecord::create(1, sample_new_employee(), today).unwrap();
        let scores = vec![
            ScoreRecord {
                employee_id: 1,
                date: day(2026, 8, 1),
                attrition_probability: 0.3,
            },
            ScoreRecord {
                employee_id: 1,
                date: day(2026, 8, 15),
                attrition_probability: 0.5,
            },
        ];
        (vec![employee], scores)
    }

    #[test]
    fn summary_tracks_latest_and_change() {
        let (employees, scores) = fixture();
        let summaries = summarize(&employees, &scores);
        assert_eq!(summaries.len(), 1);
        assert!((summaries[0].latest_pct - 50.0).abs() < 1e-9);
        assert!((summaries[0].change_pct + 20.0).abs() < 1e-9);
        assert_eq!(summaries[0].check_ins, 2);
    }

    #[test]
    fn employees_without_scores_are_left_out() {
        let (mut employees, scores) = fixture();
        let today = day(2026, 8, 29);
        let other = EmployeeRecord::create(2, sample_new_employee(), today).unwrap();
        employees.push(other);
        assert_eq!(summarize(&employees, &scores).len(), 1);
    }

    #[test]
    fn report_lists_the_employee_series() {
        let (employees, scores) = fixture();
        let report = build_report(&employees, &scores);
        assert!(report.contains("# Work Satisfaction Report"));
        assert!(report.contains("Dana Okafor"));
        assert!(report.contains("2026-08-01: 70.0%"));
        assert!(report.contains("2026-08-15: 50.0%"));
    }

    #[test]
    fn empty_report_says_so() {
        let report = build_report(&[], &[]);
        assert!(report.contains("No check-ins recorded yet."));
    }
}
