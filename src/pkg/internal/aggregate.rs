use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::pkg::internal::adaptors::jobs::spec::JobStatus;

/// Per-status tally for one owner. Always carries all six statuses, so
/// callers never have to special-case a status the owner has no jobs in.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub applied: i64,
    pub interview: i64,
    pub offer: i64,
    pub pending: i64,
    pub declined: i64,
    pub rejected: i64,
}

impl StatusCounts {
    fn slot_mut(&mut self, status: JobStatus) -> &mut i64 {
        match status {
            JobStatus::Applied => &mut self.applied,
            JobStatus::Interview => &mut self.interview,
            JobStatus::Offer => &mut self.offer,
            JobStatus::Pending => &mut self.pending,
            JobStatus::Declined => &mut self.declined,
            JobStatus::Rejected => &mut self.rejected,
        }
    }

    pub fn total(&self) -> i64 {
        self.applied + self.interview + self.offer + self.pending + self.declined + self.rejected
    }
}

/// Folds grouped (status, count) rows into a fixed-shape tally. The fold
/// is commutative; a status appearing more than once sums.
pub fn status_counts(rows: impl IntoIterator<Item = (JobStatus, i64)>) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for (status, n) in rows {
        *counts.slot_mut(status) += n;
    }
    counts
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    pub date: String,
    pub count: i64,
}

/// Buckets creation timestamps into month labels ("Jan 24"). Input is
/// expected in ascending chronological order; each month's entry sits at
/// the position its first record appeared, and months without records
/// are absent rather than zero-filled. The label-to-index map keeps the
/// fold linear.
pub fn monthly_series(created: impl IntoIterator<Item = DateTime<Utc>>) -> Vec<MonthlyCount> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut series: Vec<MonthlyCount> = Vec::new();
    for ts in created {
        let label = ts.format("%b %y").to_string();
        match slots.get(&label) {
            Some(&i) => series[i].count += 1,
            None => {
                slots.insert(label.clone(), series.len());
                series.push(MonthlyCount {
                    date: label,
                    count: 1,
                });
            }
        }
    }
    series
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn counts_default_every_status_to_zero() {
        let counts = status_counts([(JobStatus::Applied, 2), (JobStatus::Interview, 1)]);
        assert_eq!(
            counts,
            StatusCounts {
                applied: 2,
                interview: 1,
                offer: 0,
                pending: 0,
                declined: 0,
                rejected: 0,
            }
        );
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn counts_are_order_independent_and_sum_duplicates() {
        let a = status_counts([
            (JobStatus::Offer, 1),
            (JobStatus::Applied, 2),
            (JobStatus::Offer, 3),
        ]);
        let b = status_counts([
            (JobStatus::Offer, 3),
            (JobStatus::Offer, 1),
            (JobStatus::Applied, 2),
        ]);
        assert_eq!(a, b);
        assert_eq!(a.offer, 4);
    }

    #[test]
    fn empty_input_yields_all_zeroes() {
        let counts = status_counts([]);
        assert_eq!(counts, StatusCounts::default());
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn series_buckets_by_month_label() {
        let series = monthly_series([at(2024, 1, 3), at(2024, 1, 20), at(2024, 3, 5)]);
        assert_eq!(
            series,
            vec![
                MonthlyCount {
                    date: "Jan 24".into(),
                    count: 2
                },
                MonthlyCount {
                    date: "Mar 24".into(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn series_order_follows_first_occurrence() {
        // crossing a year boundary keeps chronological order, not
        // calendar-month order
        let series = monthly_series([at(2023, 11, 1), at(2024, 1, 2), at(2024, 1, 15)]);
        let labels: Vec<&str> = series.iter().map(|e| e.date.as_str()).collect();
        assert_eq!(labels, ["Nov 23", "Jan 24"]);
        assert_eq!(series[1].count, 2);
    }

    #[test]
    fn series_skips_empty_months_and_empty_input() {
        let series = monthly_series([at(2024, 2, 1), at(2024, 5, 1)]);
        assert_eq!(series.len(), 2);
        assert!(series.iter().all(|e| e.count > 0));
        assert!(monthly_series([]).is_empty());
    }
}
