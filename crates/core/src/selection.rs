//! Click-to-drill-down selection as a pure reducer.

use serde::{Deserialize, Serialize};

use crate::model::{ExperienceId, LayoutResult, PositionedExperience};

/// An interaction coming from the timeline or the details panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum SelectionEvent {
    /// A bar was clicked.
    Activated(ExperienceId),
    /// A close control was used.
    Cleared,
}

/// The currently selected experience, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    selected: Option<ExperienceId>,
}

impl Selection {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn of(id: impl Into<ExperienceId>) -> Self {
        Self {
            selected: Some(id.into()),
        }
    }

    pub fn selected(&self) -> Option<&ExperienceId> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, id: &ExperienceId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    #[must_use]
    pub fn apply(self, event: SelectionEvent) -> Self {
        match event {
            SelectionEvent::Activated(id) => self.on_bar_activated(id),
            SelectionEvent::Cleared => self.on_clear_selection(),
        }
    }

    /// Clicking the selected bar again closes the details; clicking any
    /// other bar switches to it.
    #[must_use]
    pub fn on_bar_activated(self, id: ExperienceId) -> Self {
        if self.is_selected(&id) {
            Self::none()
        } else {
            Self { selected: Some(id) }
        }
    }

    #[must_use]
    pub fn on_clear_selection(self) -> Self {
        Self::none()
    }

    /// The selected entry, for the details panel.
    pub fn resolve<'a>(&self, layout: &'a LayoutResult) -> Option<&'a PositionedExperience> {
        self.selected.as_ref().and_then(|id| layout.get(id))
    }

    /// Drop a selection whose record is no longer in `layout`, e.g. after the
    /// records were fetched again.
    #[must_use]
    pub fn retain_in(self, layout: &LayoutResult) -> Self {
        if let Some(id) = &self.selected
            && layout.get(id).is_none()
        {
            tracing::warn!(%id, "selected experience disappeared, clearing selection");
            return Self::none();
        }
        self
    }
}
