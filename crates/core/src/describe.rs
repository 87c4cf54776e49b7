//! Human-readable summaries of an experience for tooltips and bar labels.

use serde::{Deserialize, Serialize};

use crate::model::{DateError, ExperienceRecord, PositionedExperience, YearMonth};

pub const PRESENT: &str = "Present";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    /// Role / position.
    pub title: String,
    /// Organization.
    pub subtitle: String,
    /// `"May 2025 – Present"`
    pub caption: String,
}

impl Description {
    /// All three lines, for hover text.
    pub fn tooltip(&self) -> String {
        format!("{}\n{}\n{}", self.title, self.subtitle, self.caption)
    }
}

pub fn date_range_caption(start: YearMonth, end: Option<YearMonth>) -> String {
    let end = end.map_or_else(|| PRESENT.to_string(), |end| end.long_label());
    format!("{} – {}", start.long_label(), end)
}

pub fn describe(experience: &PositionedExperience) -> Description {
    Description {
        title: experience.record.title.clone(),
        subtitle: experience.record.organization.clone(),
        caption: date_range_caption(experience.start, experience.end),
    }
}

/// Same as [`describe`] for a record that has not been laid out.
pub fn describe_record(record: &ExperienceRecord) -> Result<Description, DateError> {
    let start: YearMonth = record.start_date.parse()?;
    let end = if record.is_ongoing() {
        None
    } else {
        Some(record.end_date.parse::<YearMonth>()?)
    };
    Ok(Description {
        title: record.title.clone(),
        subtitle: record.organization.clone(),
        caption: date_range_caption(start, end),
    })
}
