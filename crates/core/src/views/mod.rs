//! View transforms: turn a [`LayoutResult`] into render commands.
//!
//! All coordinates are logical pixels relative to the top-left of the
//! viewport. Front-ends paint the commands and feed clicks back through
//! [`hit_test::event_at`].

pub mod details;
pub mod hit_test;
pub mod legend;
pub mod time_axis;
pub mod timeline;

use serde::{Deserialize, Serialize};
use worklane_protocol::{RenderCommand, Viewport};

use crate::model::LayoutResult;
use crate::selection::Selection;

/// Geometry shared by the timeline views.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineStyle {
    pub row_height: f64,
    pub bar_height: f64,
    pub axis_height: f64,
    pub legend_height: f64,
    pub font_size: f64,
    /// Bars narrower than this are widened so they stay visible and
    /// clickable.
    pub min_bar_width: f64,
    /// Bars narrower than this carry no inline label.
    pub min_label_width: f64,
    pub panel_padding: f64,
}

impl Default for TimelineStyle {
    fn default() -> Self {
        Self {
            row_height: 28.0,
            bar_height: 20.0,
            axis_height: 24.0,
            legend_height: 22.0,
            font_size: 11.0,
            min_bar_width: 2.0,
            min_label_width: 48.0,
            panel_padding: 12.0,
        }
    }
}

impl TimelineStyle {
    /// Rough advance of `text` at `font_size`; renderers measure exactly,
    /// this is only used to lay out labels and chips.
    pub fn text_width(text: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * font_size * 0.6
    }

    pub fn tracks_height(&self, layout: &LayoutResult) -> f64 {
        layout.track_count as f64 * self.row_height
    }
}

/// Vertical placement of the page sections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub tracks_top: f64,
    pub axis_top: f64,
    pub details_top: f64,
    pub height: f64,
}

pub fn page_layout(
    layout: &LayoutResult,
    selection: &Selection,
    width: f64,
    style: &TimelineStyle,
) -> PageLayout {
    let tracks_top = style.legend_height;
    let axis_top = tracks_top + style.tracks_height(layout);
    let details_top = axis_top + style.axis_height;
    let details = selection
        .resolve(layout)
        .map_or(0.0, |entry| details::details_height(entry, width, style));
    PageLayout {
        tracks_top,
        axis_top,
        details_top,
        height: details_top + details,
    }
}

/// Legend, bars, axis and (when something is selected) the details panel.
pub fn render_page(
    layout: &LayoutResult,
    selection: &Selection,
    viewport: &Viewport,
    style: &TimelineStyle,
) -> Vec<RenderCommand> {
    if layout.is_empty() {
        return Vec::new();
    }

    let page = page_layout(layout, selection, viewport.width, style);
    let mut commands = legend::render_legend(viewport, style);
    commands.extend(timeline::render_tracks(
        layout,
        selection,
        viewport,
        page.tracks_top,
        style,
    ));
    commands.extend(time_axis::render_time_axis(
        layout,
        viewport,
        page.axis_top,
        page.tracks_top,
        style,
    ));
    if let Some(entry) = selection.resolve(layout) {
        commands.extend(details::render_details(
            entry,
            viewport,
            page.details_top,
            style,
        ));
    }
    commands
}
