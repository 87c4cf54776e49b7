use worklane_protocol::{Point, Rect, RenderCommand, TextAlign, ThemeToken, Viewport};

use super::TimelineStyle;
use crate::describe::describe;
use crate::model::LayoutResult;
use crate::selection::Selection;

/// Render one row per track and one bar per positioned experience.
///
/// Bars sit at `(start_fraction * width, top + track * row_height)`. Each
/// bar's hit id is its index in `layout.positioned`. The selected bar gets a
/// highlight border.
pub fn render_tracks(
    layout: &LayoutResult,
    selection: &Selection,
    viewport: &Viewport,
    top: f64,
    style: &TimelineStyle,
) -> Vec<RenderCommand> {
    if layout.is_empty() {
        return Vec::new();
    }

    let width = viewport.width;
    let mut commands = Vec::with_capacity(layout.track_count + layout.positioned.len() * 2 + 2);

    commands.push(RenderCommand::BeginGroup {
        id: "tracks".into(),
        label: Some("Timeline".into()),
    });

    for track in 0..layout.track_count {
        let y = top + track as f64 * style.row_height;
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(0.0, y, width, style.row_height),
            color: ThemeToken::TrackBackground,
            border_color: None,
            label: None,
            hit_id: None,
        });
        commands.push(RenderCommand::DrawLine {
            from: Point::new(0.0, y + style.row_height),
            to: Point::new(width, y + style.row_height),
            color: ThemeToken::TrackBorder,
            width: 0.5,
        });
    }

    let inset = (style.row_height - style.bar_height).max(0.0) / 2.0;
    for (index, entry) in layout.positioned.iter().enumerate() {
        let x = entry.start_fraction * width;
        let w = (entry.width_fraction() * width).max(style.min_bar_width);
        // Keep widened bars inside the viewport.
        let x = x.min(width - w).max(0.0);
        let y = top + entry.track as f64 * style.row_height + inset;
        let selected = selection.is_selected(entry.id());

        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(x, y, w, style.bar_height),
            color: entry.record.category.color(),
            border_color: selected.then_some(ThemeToken::SelectionHighlight),
            label: Some(describe(entry).tooltip()),
            hit_id: Some(index as u64),
        });

        if w > style.min_label_width {
            commands.push(RenderCommand::DrawText {
                position: Point::new(x + 4.0, y + style.bar_height / 2.0 + style.font_size / 3.0),
                text: entry.record.organization.clone(),
                color: ThemeToken::TextPrimary,
                font_size: style.font_size,
                align: TextAlign::Left,
            });
        }
    }

    commands.push(RenderCommand::EndGroup);
    commands
}
