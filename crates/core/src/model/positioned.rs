use serde::{Deserialize, Serialize};

use super::experience::{ExperienceId, ExperienceRecord};
use super::year_month::YearMonth;

/// An experience record placed on the timeline.
///
/// Produced only by the layout engine and recomputed from scratch whenever
/// the input list changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedExperience {
    #[serde(flatten)]
    pub record: ExperienceRecord,
    pub start: YearMonth,
    /// `None` while the engagement is ongoing.
    pub end: Option<YearMonth>,
    /// `end`, or the layout's `latest` month when ongoing.
    pub effective_end: YearMonth,
    /// Fraction of the observed span, in `[0, 1]`.
    pub start_fraction: f64,
    pub end_fraction: f64,
    /// Horizontal lane index (0 = top).
    pub track: usize,
}

impl PositionedExperience {
    pub fn id(&self) -> &ExperienceId {
        &self.record.id
    }

    pub fn width_fraction(&self) -> f64 {
        self.end_fraction - self.start_fraction
    }

    /// Calendar months touched, counting both the start and end month.
    pub fn duration_months(&self) -> i64 {
        self.start.months_until(self.effective_end) + 1
    }
}

/// A tick label under the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabel {
    pub fraction: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    /// Sorted by start month, ties in input order.
    pub positioned: Vec<PositionedExperience>,
    pub span_months: u32,
    pub earliest: YearMonth,
    pub latest: YearMonth,
    pub axis_labels: Vec<AxisLabel>,
    pub track_count: usize,
}

impl LayoutResult {
    pub fn empty(now: YearMonth) -> Self {
        Self {
            positioned: Vec::new(),
            span_months: 0,
            earliest: now,
            latest: now,
            axis_labels: Vec::new(),
            track_count: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.positioned.is_empty()
    }

    pub fn len(&self) -> usize {
        self.positioned.len()
    }

    pub fn index_of(&self, id: &ExperienceId) -> Option<usize> {
        self.positioned.iter().position(|p| p.id() == id)
    }

    pub fn get(&self, id: &ExperienceId) -> Option<&PositionedExperience> {
        self.positioned.iter().find(|p| p.id() == id)
    }

    /// Most recent start first; entries starting the same month keep input
    /// order. This is the order of the "all experiences" list.
    pub fn by_recency(&self) -> Vec<&PositionedExperience> {
        let mut entries: Vec<&PositionedExperience> = self.positioned.iter().collect();
        entries.sort_by(|a, b| b.start.cmp(&a.start));
        entries
    }
}
