//! Free-slot computation over busy intervals.

use chrono::{DateTime, Duration, Utc};

/// A half-open busy interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Compute the gaps inside `[from, to)` not covered by `busy` that are
/// at least `min_minutes` long. Busy intervals may arrive unsorted and
/// overlapping.
pub fn free_gaps(
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    busy: &[Interval],
    min_minutes: u32,
) -> Vec<Interval> {
    let min_len = Duration::minutes(i64::from(min_minutes));

    let mut busy: Vec<Interval> = busy
        .iter()
        .filter(|b| b.end > from && b.start < to)
        .copied()
        .collect();
    busy.sort_by_key(|b| b.start);

    let mut gaps = Vec::new();
    let mut cursor = from;

    for b in busy {
        if b.start > cursor && b.start - cursor >= min_len {
            gaps.push(Interval {
                start: cursor,
                end: b.start,
            });
        }
        if b.end > cursor {
            cursor = b.end;
        }
    }

    if to > cursor && to - cursor >= min_len {
        gaps.push(Interval { start: cursor, end: to });
    }

    gaps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn iv(start: &str, end: &str) -> Interval {
        Interval {
            start: t(start),
            end: t(end),
        }
    }

    #[test]
    fn empty_busy_yields_whole_window() {
        let gaps = free_gaps(
            t("2026-03-02T09:00:00Z"),
            t("2026-03-02T17:00:00Z"),
            &[],
            30,
        );
        assert_eq!(gaps, vec![iv("2026-03-02T09:00:00Z", "2026-03-02T17:00:00Z")]);
    }

    #[test]
    fn gaps_between_meetings() {
        let busy = vec![
            iv("2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z"),
            iv("2026-03-02T13:00:00Z", "2026-03-02T14:00:00Z"),
        ];
        let gaps = free_gaps(
            t("2026-03-02T09:00:00Z"),
            t("2026-03-02T17:00:00Z"),
            &busy,
            30,
        );
        assert_eq!(
            gaps,
            vec![
                iv("2026-03-02T09:00:00Z", "2026-03-02T10:00:00Z"),
                iv("2026-03-02T11:00:00Z", "2026-03-02T13:00:00Z"),
                iv("2026-03-02T14:00:00Z", "2026-03-02T17:00:00Z"),
            ]
        );
    }

    #[test]
    fn short_gaps_are_dropped() {
        let busy = vec![
            iv("2026-03-02T09:00:00Z", "2026-03-02T09:50:00Z"),
            iv("2026-03-02T10:00:00Z", "2026-03-02T17:00:00Z"),
        ];
        // The 10-minute gap does not fit a 30-minute slot
        let gaps = free_gaps(
            t("2026-03-02T09:00:00Z"),
            t("2026-03-02T17:00:00Z"),
            &busy,
            30,
        );
        assert!(gaps.is_empty());
    }

    #[test]
    fn overlapping_busy_intervals_are_merged() {
        let busy = vec![
            iv("2026-03-02T10:00:00Z", "2026-03-02T12:00:00Z"),
            iv("2026-03-02T11:00:00Z", "2026-03-02T13:00:00Z"),
        ];
        let gaps = free_gaps(
            t("2026-03-02T09:00:00Z"),
            t("2026-03-02T17:00:00Z"),
            &busy,
            30,
        );
        assert_eq!(
            gaps,
            vec![
                iv("2026-03-02T09:00:00Z", "2026-03-02T10:00:00Z"),
                iv("2026-03-02T13:00:00Z", "2026-03-02T17:00:00Z"),
            ]
        );
    }

    #[test]
    fn busy_outside_window_ignored() {
        let busy = vec![iv("2026-03-01T10:00:00Z", "2026-03-01T11:00:00Z")];
        let gaps = free_gaps(
            t("2026-03-02T09:00:00Z"),
            t("2026-03-02T17:00:00Z"),
            &busy,
            30,
        );
        assert_eq!(gaps.len(), 1);
    }

    #[test]
    fn fully_booked_window() {
        let busy = vec![iv("2026-03-02T08:00:00Z", "2026-03-02T18:00:00Z")];
        let gaps = free_gaps(
            t("2026-03-02T09:00:00Z"),
            t("2026-03-02T17:00:00Z"),
            &busy,
            30,
        );
        assert!(gaps.is_empty());
    }
}
