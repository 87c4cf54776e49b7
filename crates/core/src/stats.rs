//! Headline numbers shown under the timeline.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::{Category, LayoutResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub work: usize,
    pub internship: usize,
    pub freelance: usize,
}

impl CategoryCounts {
    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::Work => self.work,
            Category::Internship => self.internship,
            Category::Freelance => self.freelance,
        }
    }

    fn bump(&mut self, category: Category) {
        match category {
            Category::Work => self.work += 1,
            Category::Internship => self.internship += 1,
            Category::Freelance => self.freelance += 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceStats {
    /// Calendar months covered by at least one engagement, counting each
    /// entry's start and end month. Concurrent roles count once.
    pub covered_months: u32,
    /// `covered_months` in whole years.
    pub years: u32,
    pub per_category: CategoryCounts,
    /// Entries that have ended, per category.
    pub completed: CategoryCounts,
    /// Distinct skills across all entries, compared case-insensitively.
    pub distinct_skills: usize,
    pub current_roles: usize,
}

pub fn experience_stats(layout: &LayoutResult) -> ExperienceStats {
    let mut stats = ExperienceStats::default();
    let mut skills = HashSet::new();
    let mut ranges: Vec<(i64, i64)> = Vec::with_capacity(layout.positioned.len());

    for entry in &layout.positioned {
        let category = entry.record.category;
        stats.per_category.bump(category);
        match entry.end {
            Some(_) => stats.completed.bump(category),
            None => stats.current_roles += 1,
        }
        for skill in &entry.record.skills {
            skills.insert(skill.trim().to_lowercase());
        }
        // The end month is worked too: May through August is four months.
        ranges.push((entry.start.month_index(), entry.effective_end.month_index() + 1));
    }

    stats.distinct_skills = skills.len();
    stats.covered_months = u32::try_from(covered_months(ranges)).unwrap_or(u32::MAX);
    stats.years = stats.covered_months / 12;
    stats
}

/// Length of the union of half-open month ranges.
fn covered_months(mut ranges: Vec<(i64, i64)>) -> i64 {
    ranges.sort_unstable();
    let mut total = 0;
    let mut current: Option<(i64, i64)> = None;
    for (start, end) in ranges {
        current = match current {
            Some((cur_start, cur_end)) if start <= cur_end => Some((cur_start, cur_end.max(end))),
            Some((cur_start, cur_end)) => {
                total += cur_end - cur_start;
                Some((start, end))
            }
            None => Some((start, end)),
        };
    }
    if let Some((start, end)) = current {
        total += end - start;
    }
    total
}
