//! Timeline layout: places date-ranged experience records on horizontal
//! tracks in fraction space.

pub mod axis;
pub mod tracks;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{
    DateError, ExperienceId, ExperienceRecord, LayoutResult, PositionedExperience, YearMonth,
};
use tracks::{Interval, TrackAssigner};

/// What is wrong with a single record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordDefect {
    #[error("start date: {0}")]
    StartDate(DateError),
    #[error("end date: {0}")]
    EndDate(DateError),
    #[error("starts {start} after it ends {end}")]
    EndsBeforeStart { start: YearMonth, end: YearMonth },
    #[error("id is used by another record")]
    DuplicateId,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("record {id}: {defect}")]
    InvalidRecord {
        id: ExperienceId,
        defect: RecordDefect,
    },
    #[error("invalid layout config: {0}")]
    InvalidConfig(String),
}

/// Tunables of the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Overlap (in fraction of the total span) below which two entries are
    /// treated as consecutive and may share a track.
    pub adjacency_tolerance: f64,
    /// Months between axis labels.
    pub axis_interval_months: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            adjacency_tolerance: 0.01,
            axis_interval_months: 6,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(0.0..1.0).contains(&self.adjacency_tolerance) {
            return Err(LayoutError::InvalidConfig(format!(
                "adjacency_tolerance must be in [0, 1), got {}",
                self.adjacency_tolerance
            )));
        }
        if self.axis_interval_months == 0 {
            return Err(LayoutError::InvalidConfig(
                "axis_interval_months must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// A record with its dates parsed, before placement.
struct Dated<'a> {
    record: &'a ExperienceRecord,
    start: YearMonth,
    end: Option<YearMonth>,
}

fn parse_dates(record: &ExperienceRecord) -> Result<Dated<'_>, RecordDefect> {
    let start: YearMonth = record.start_date.parse().map_err(RecordDefect::StartDate)?;
    let end = if record.is_ongoing() {
        None
    } else {
        let end: YearMonth = record.end_date.parse().map_err(RecordDefect::EndDate)?;
        if start > end {
            return Err(RecordDefect::EndsBeforeStart { start, end });
        }
        Some(end)
    };
    Ok(Dated { record, start, end })
}

fn validate(records: &[ExperienceRecord]) -> Result<Vec<Dated<'_>>, LayoutError> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .iter()
        .map(|record| {
            let invalid = |defect| LayoutError::InvalidRecord {
                id: record.id.clone(),
                defect,
            };
            if !seen.insert(&record.id) {
                return Err(invalid(RecordDefect::DuplicateId));
            }
            parse_dates(record).map_err(invalid)
        })
        .collect()
}

/// Lay out `records` on a timeline ending at `now`.
///
/// `now` is raised to the latest date any record mentions, so no bar ever has
/// a negative duration. Records are sorted by start month (stable), and each
/// organization gets one track chosen first-fit among existing tracks.
pub fn compute_layout(
    records: &[ExperienceRecord],
    now: YearMonth,
    config: &LayoutConfig,
) -> Result<LayoutResult, LayoutError> {
    config.validate()?;
    let mut dated = validate(records)?;
    if dated.is_empty() {
        return Ok(LayoutResult::empty(now));
    }

    let latest = dated
        .iter()
        .map(|d| d.end.unwrap_or(d.start))
        .fold(now, YearMonth::max);
    if latest > now {
        tracing::debug!(%now, %latest, "clamped timeline end to latest record date");
    }

    // Vec::sort_by_key is stable: equal starts keep input order.
    dated.sort_by_key(|d| d.start);
    let earliest = dated[0].start;
    let span_months = u32::try_from(earliest.months_until(latest)).unwrap_or(u32::MAX);
    let divisor = f64::from(span_months.max(1));
    let fraction = |month: YearMonth| (earliest.months_until(month) as f64 / divisor).clamp(0.0, 1.0);

    let intervals: Vec<Interval> = dated
        .iter()
        .map(|d| Interval::new(fraction(d.start), fraction(d.end.unwrap_or(latest))))
        .collect();

    let mut tracks = TrackAssigner::new(config.adjacency_tolerance);
    let positioned: Vec<PositionedExperience> = dated
        .iter()
        .zip(&intervals)
        .map(|(d, interval)| {
            let organization = d.record.organization.as_str();
            let same_organization: Vec<Interval> = dated
                .iter()
                .zip(&intervals)
                .filter(|(other, _)| other.record.organization == organization)
                .map(|(_, other)| *other)
                .collect();
            let track = tracks.assign(organization, &same_organization);
            PositionedExperience {
                record: d.record.clone(),
                start: d.start,
                end: d.end,
                effective_end: d.end.unwrap_or(latest),
                start_fraction: interval.start,
                end_fraction: interval.end,
                track,
            }
        })
        .collect();

    let result = LayoutResult {
        span_months: span_months.max(1),
        axis_labels: axis::axis_labels(earliest, latest, span_months, config.axis_interval_months),
        track_count: tracks.track_count(),
        positioned,
        earliest,
        latest,
    };
    tracing::debug!(
        records = result.positioned.len(),
        tracks = result.track_count,
        span_months = result.span_months,
        "computed timeline layout"
    );
    Ok(result)
}

/// [`compute_layout`] with the default tolerance and axis interval.
pub fn compute_layout_default(
    records: &[ExperienceRecord],
    now: YearMonth,
) -> Result<LayoutResult, LayoutError> {
    compute_layout(records, now, &LayoutConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    fn ym(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    fn job(id: u64, org: &str, start: &str, end: &str) -> ExperienceRecord {
        ExperienceRecord::new(id, org, "Engineer", Category::Work, start).ending(end)
    }

    fn assert_no_cross_org_overlap(layout: &LayoutResult, tolerance: f64) {
        for a in &layout.positioned {
            for b in &layout.positioned {
                if a.track != b.track || a.record.organization == b.record.organization {
                    continue;
                }
                let shared = a.end_fraction.min(b.end_fraction) - a.start_fraction.max(b.start_fraction);
                assert!(
                    shared <= tolerance,
                    "{} and {} overlap by {shared} on track {}",
                    a.id(),
                    b.id(),
                    a.track
                );
            }
        }
    }

    #[test]
    fn overlapping_employers_split_same_employer_aligns() {
        let records = vec![
            job(1, "A", "2024-01", "2024-06"),
            job(2, "B", "2024-03", "2024-09"),
            job(3, "A", "2024-09", "2024-12"),
        ];
        let layout = compute_layout_default(&records, ym("2025-01")).unwrap();

        assert_eq!(layout.span_months, 12);
        assert_eq!(layout.earliest, ym("2024-01"));
        assert_eq!(layout.latest, ym("2025-01"));
        let track = |id: u64| layout.get(&ExperienceId::Number(id)).unwrap().track;
        assert_eq!(track(1), 0);
        assert_eq!(track(3), 0);
        assert_eq!(track(2), 1);
        assert_eq!(layout.track_count, 2);

        let labels: Vec<_> = layout.axis_labels.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels[..2], ["Jan 2024", "Jul 2024"]);
        assert_eq!(layout.axis_labels[0].fraction, 0.0);
        assert_eq!(layout.axis_labels[1].fraction, 0.5);
    }

    #[test]
    fn empty_input_is_well_formed() {
        let layout = compute_layout_default(&[], ym("2025-01")).unwrap();
        assert!(layout.positioned.is_empty());
        assert_eq!(layout.span_months, 0);
        assert!(layout.axis_labels.is_empty());
        assert_eq!(layout.track_count, 0);
    }

    #[test]
    fn ongoing_record_ends_at_now() {
        let records = vec![
            job(1, "A", "2024-01", "2024-06"),
            ExperienceRecord::new(2u64, "B", "Lead", Category::Work, "2024-06").current(),
        ];
        let layout = compute_layout_default(&records, ym("2025-01")).unwrap();
        let current = layout.get(&ExperienceId::Number(2)).unwrap();
        assert_eq!(current.end, None);
        assert_eq!(current.effective_end, ym("2025-01"));
        assert_eq!(current.end_fraction, 1.0);
    }

    #[test]
    fn current_flag_wins_over_stored_end() {
        let records = vec![
            ExperienceRecord::new(1u64, "A", "Lead", Category::Work, "2024-01")
                .ending("2024-03")
                .current(),
        ];
        let layout = compute_layout_default(&records, ym("2024-07")).unwrap();
        assert_eq!(layout.positioned[0].end, None);
        assert_eq!(layout.positioned[0].end_fraction, 1.0);
    }

    #[test]
    fn now_is_clamped_up_to_latest_end() {
        let records = vec![job(1, "A", "2024-01", "2026-01")];
        let layout = compute_layout_default(&records, ym("2025-01")).unwrap();
        assert_eq!(layout.latest, ym("2026-01"));
        assert_eq!(layout.span_months, 24);
        assert_eq!(layout.positioned[0].end_fraction, 1.0);
    }

    #[test]
    fn future_current_record_never_has_negative_width() {
        let records = vec![
            ExperienceRecord::new(1u64, "A", "Incoming", Category::Internship, "2025-09").current(),
        ];
        let layout = compute_layout_default(&records, ym("2025-05")).unwrap();
        assert_eq!(layout.latest, ym("2025-09"));
        let bar = &layout.positioned[0];
        assert!(bar.start_fraction <= bar.end_fraction);
    }

    #[test]
    fn degenerate_span_uses_one_month() {
        let records = vec![
            job(1, "A", "2024-05", "2024-05"),
            job(2, "B", "2024-05", "2024-05"),
        ];
        let layout = compute_layout_default(&records, ym("2024-05")).unwrap();
        assert_eq!(layout.span_months, 1);
        for bar in &layout.positioned {
            assert_eq!(bar.start_fraction, 0.0);
            assert_eq!(bar.end_fraction, 0.0);
            assert!(bar.start_fraction.is_finite());
        }
        assert_eq!(layout.axis_labels.len(), 1);
    }

    #[test]
    fn ties_keep_input_order() {
        let records = vec![
            job(10, "C", "2024-01", "2024-02"),
            job(11, "A", "2024-01", "2024-02"),
            job(12, "B", "2023-06", "2023-07"),
        ];
        let layout = compute_layout_default(&records, ym("2024-06")).unwrap();
        let ids: Vec<_> = layout.positioned.iter().map(|p| p.id().to_string()).collect();
        assert_eq!(ids, ["12", "10", "11"]);
    }

    #[test]
    fn back_to_back_roles_share_a_track() {
        let records = vec![
            job(1, "A", "2024-01", "2024-05"),
            job(2, "B", "2024-05", "2024-09"),
            job(3, "C", "2024-09", "2025-01"),
        ];
        let layout = compute_layout_default(&records, ym("2025-01")).unwrap();
        assert_eq!(layout.track_count, 1);
    }

    #[test]
    fn later_entry_of_a_placed_employer_never_collides() {
        let records = vec![
            job(1, "A", "2024-01", "2024-03"),
            job(2, "B", "2024-04", "2024-10"),
            job(3, "A", "2024-08", "2024-12"),
        ];
        let layout = compute_layout_default(&records, ym("2025-01")).unwrap();
        let a1 = layout.get(&ExperienceId::Number(1)).unwrap().track;
        let a2 = layout.get(&ExperienceId::Number(3)).unwrap().track;
        let b = layout.get(&ExperienceId::Number(2)).unwrap().track;
        assert_eq!(a1, a2);
        assert_ne!(a1, b);
        assert_no_cross_org_overlap(&layout, 0.01);
    }

    #[test]
    fn tolerance_is_configurable() {
        let records = vec![
            job(1, "A", "2024-01", "2024-07"),
            job(2, "B", "2024-06", "2025-01"),
        ];
        let strict = compute_layout_default(&records, ym("2025-01")).unwrap();
        assert_eq!(strict.track_count, 2);

        let lenient = LayoutConfig {
            adjacency_tolerance: 0.1,
            ..LayoutConfig::default()
        };
        let relaxed = compute_layout(&records, ym("2025-01"), &lenient).unwrap();
        assert_eq!(relaxed.track_count, 1);
    }

    #[test]
    fn invariants_hold_on_dense_history() {
        let orgs = ["A", "B", "C", "D", "E"];
        let records: Vec<_> = (0..20u64)
            .map(|i| {
                let start = ym("2018-01").add_months((i * 5) as i64);
                let end = start.add_months(((i * 7) % 13 + 1) as i64);
                job(i, orgs[(i % 5) as usize], &start.to_string(), &end.to_string())
            })
            .collect();
        let layout = compute_layout_default(&records, ym("2026-01")).unwrap();

        assert_eq!(layout.positioned.len(), records.len());
        assert_no_cross_org_overlap(&layout, 0.01);
        for bar in &layout.positioned {
            assert!(0.0 <= bar.start_fraction);
            assert!(bar.start_fraction <= bar.end_fraction);
            assert!(bar.end_fraction <= 1.0);
            assert!(bar.track < layout.track_count);
        }
        for org in orgs {
            let tracks: HashSet<_> = layout
                .positioned
                .iter()
                .filter(|p| p.record.organization == org)
                .map(|p| p.track)
                .collect();
            assert_eq!(tracks.len(), 1, "{org} spans several tracks");
        }
    }

    #[test]
    fn identical_input_gives_identical_output() {
        let records = vec![
            job(1, "A", "2024-01", "2024-06"),
            job(2, "B", "2024-01", "2024-09"),
            job(3, "C", "2024-02", "2024-04"),
        ];
        let first = compute_layout_default(&records, ym("2025-01")).unwrap();
        let second = compute_layout_default(&records, ym("2025-01")).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn malformed_start_fails_fast() {
        let records = vec![job(1, "A", "2024-01", "2024-06"), job(2, "B", "soon", "2024-09")];
        let err = compute_layout_default(&records, ym("2025-01")).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InvalidRecord {
                id: ExperienceId::Number(2),
                defect: RecordDefect::StartDate(_),
            }
        ));
        assert!(err.to_string().starts_with("record 2: start date"));
    }

    #[test]
    fn malformed_end_fails_fast() {
        let records = vec![job(1, "A", "2024-01", "June")];
        let err = compute_layout_default(&records, ym("2025-01")).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InvalidRecord {
                defect: RecordDefect::EndDate(_),
                ..
            }
        ));
    }

    #[test]
    fn end_before_start_is_rejected() {
        let records = vec![job(1, "A", "2024-06", "2024-01")];
        let err = compute_layout_default(&records, ym("2025-01")).unwrap_err();
        assert_eq!(
            err,
            LayoutError::InvalidRecord {
                id: ExperienceId::Number(1),
                defect: RecordDefect::EndsBeforeStart {
                    start: ym("2024-06"),
                    end: ym("2024-01"),
                },
            }
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let records = vec![job(1, "A", "2024-01", "2024-06"), job(1, "B", "2024-02", "2024-03")];
        let err = compute_layout_default(&records, ym("2025-01")).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InvalidRecord {
                defect: RecordDefect::DuplicateId,
                ..
            }
        ));
    }

    #[test]
    fn config_validation() {
        let bad = LayoutConfig {
            adjacency_tolerance: 1.5,
            ..LayoutConfig::default()
        };
        assert!(matches!(
            compute_layout(&[], ym("2025-01"), &bad),
            Err(LayoutError::InvalidConfig(_))
        ));
        let no_interval = LayoutConfig {
            axis_interval_months: 0,
            ..LayoutConfig::default()
        };
        assert!(no_interval.validate().is_err());
        assert!(LayoutConfig::default().validate().is_ok());
    }

    #[test]
    fn config_fills_missing_fields() {
        let config: LayoutConfig = serde_json::from_str(r#"{"adjacency_tolerance":0.05}"#).unwrap();
        assert_eq!(config.adjacency_tolerance, 0.05);
        assert_eq!(config.axis_interval_months, 6);
    }
}
