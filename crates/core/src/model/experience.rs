use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use worklane_protocol::ThemeToken;

/// Identifier of an experience record. The backend uses integers; string
/// ids are accepted for hand-written data files.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExperienceId {
    Number(u64),
    Text(String),
}

impl From<u64> for ExperienceId {
    fn from(id: u64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for ExperienceId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for ExperienceId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

impl fmt::Display for ExperienceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperienceId::Number(n) => write!(f, "{n}"),
            ExperienceId::Text(s) => f.write_str(s),
        }
    }
}

/// Kind of engagement. Drives the bar color and icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Work,
    Internship,
    Freelance,
}

/// Presentation attributes of a [`Category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStyle {
    pub label: &'static str,
    /// Material icon name.
    pub icon: &'static str,
    pub color: ThemeToken,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Work, Category::Internship, Category::Freelance];

    pub fn style(self) -> CategoryStyle {
        match self {
            Category::Work => CategoryStyle {
                label: "Work",
                icon: "work",
                color: ThemeToken::CategoryWork,
            },
            Category::Internship => CategoryStyle {
                label: "Internship",
                icon: "school",
                color: ThemeToken::CategoryInternship,
            },
            Category::Freelance => CategoryStyle {
                label: "Freelance",
                icon: "business",
                color: ThemeToken::CategoryFreelance,
            },
        }
    }

    pub fn label(self) -> &'static str {
        self.style().label
    }

    pub fn color(self) -> ThemeToken {
        self.style().color
    }
}

/// One entry of the work history, as served by the profile backend.
///
/// Dates stay as the raw strings received; they are parsed and validated by
/// the layout engine so that a bad record is reported with its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceRecord {
    pub id: ExperienceId,
    #[serde(rename = "company")]
    pub organization: String,
    #[serde(rename = "position")]
    pub title: String,
    #[serde(default)]
    pub location: String,
    pub start_date: String,
    /// Empty means ongoing.
    #[serde(default, deserialize_with = "empty_if_null")]
    pub end_date: String,
    #[serde(rename = "current", default)]
    pub is_current: bool,
    #[serde(rename = "description", default)]
    pub summary_points: Vec<String>,
    #[serde(rename = "technologies", default)]
    pub skills: Vec<String>,
    #[serde(rename = "type")]
    pub category: Category,
}

impl ExperienceRecord {
    pub fn new(
        id: impl Into<ExperienceId>,
        organization: impl Into<String>,
        title: impl Into<String>,
        category: Category,
        start_date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            organization: organization.into(),
            title: title.into(),
            location: String::new(),
            start_date: start_date.into(),
            end_date: String::new(),
            is_current: false,
            summary_points: Vec::new(),
            skills: Vec::new(),
            category,
        }
    }

    #[must_use]
    pub fn ending(mut self, end_date: impl Into<String>) -> Self {
        self.end_date = end_date.into();
        self
    }

    #[must_use]
    pub fn current(mut self) -> Self {
        self.is_current = true;
        self
    }

    #[must_use]
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    #[must_use]
    pub fn with_summary<I, S>(mut self, points: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.summary_points = points.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    /// `is_current` wins over any stored end date.
    pub fn is_ongoing(&self) -> bool {
        self.is_current || self.end_date.trim().is_empty()
    }
}

fn empty_if_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
