use worklane_protocol::{Point, Rect, RenderCommand, TextAlign, ThemeToken, Viewport};

use super::TimelineStyle;
use crate::model::LayoutResult;

const MAJOR_TICK_HEIGHT: f64 = 8.0;
const MINOR_TICK_HEIGHT: f64 = 3.0;
/// Month ticks are dropped when they would be closer than this.
const MIN_MINOR_SPACING_PX: f64 = 6.0;
/// A label closer than this to the previous one is skipped.
const MIN_LABEL_SPACING_PX: f64 = 56.0;

/// Render the month ruler under the tracks.
///
/// Major ticks and labels come from `layout.axis_labels`; a minor tick marks
/// every month when there is room. Each major tick extends as a gridline up
/// through the tracks starting at `grid_top`.
pub fn render_time_axis(
    layout: &LayoutResult,
    viewport: &Viewport,
    top: f64,
    grid_top: f64,
    style: &TimelineStyle,
) -> Vec<RenderCommand> {
    if layout.axis_labels.is_empty() {
        return Vec::new();
    }

    let width = viewport.width;
    let bottom = top + style.axis_height;
    let mut commands = Vec::with_capacity(layout.axis_labels.len() * 3 + 16);

    commands.push(RenderCommand::BeginGroup {
        id: "axis".into(),
        label: None,
    });
    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(0.0, top, width, style.axis_height),
        color: ThemeToken::AxisBackground,
        border_color: None,
        label: None,
        hit_id: None,
    });

    let months = layout.span_months.max(1);
    let month_px = width / f64::from(months);
    if month_px >= MIN_MINOR_SPACING_PX {
        for month in 0..=months {
            let x = f64::from(month) * month_px;
            commands.push(RenderCommand::DrawLine {
                from: Point::new(x, top),
                to: Point::new(x, top + MINOR_TICK_HEIGHT),
                color: ThemeToken::AxisTick,
                width: 0.5,
            });
        }
    }

    let mut last_label_x = f64::NEG_INFINITY;
    for label in &layout.axis_labels {
        let x = label.fraction * width;

        if top > grid_top {
            commands.push(RenderCommand::DrawLine {
                from: Point::new(x, grid_top),
                to: Point::new(x, top),
                color: ThemeToken::GridLine,
                width: 0.5,
            });
        }
        commands.push(RenderCommand::DrawLine {
            from: Point::new(x, top),
            to: Point::new(x, top + MAJOR_TICK_HEIGHT),
            color: ThemeToken::AxisTick,
            width: 1.0,
        });

        if x - last_label_x >= MIN_LABEL_SPACING_PX {
            // The rightmost label would run off the edge when left-aligned.
            let align = if width - x < MIN_LABEL_SPACING_PX {
                TextAlign::Right
            } else {
                TextAlign::Left
            };
            let text_x = match align {
                TextAlign::Right => x - 2.0,
                _ => x + 2.0,
            };
            commands.push(RenderCommand::DrawText {
                position: Point::new(text_x, bottom - 4.0),
                text: label.label.clone(),
                color: ThemeToken::TextSecondary,
                font_size: style.font_size - 1.0,
                align,
            });
            last_label_x = x;
        }
    }

    commands.push(RenderCommand::EndGroup);
    commands
}
