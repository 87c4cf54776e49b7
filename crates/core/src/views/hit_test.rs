//! Map pointer positions back to timeline entries.

use worklane_protocol::{Point, RenderCommand};

use crate::describe::describe;
use crate::model::LayoutResult;
use crate::selection::SelectionEvent;

/// Hit id carried by the details panel's close control.
pub const CLOSE_HIT_ID: u64 = u64::MAX;

/// Hit id of the topmost clickable rect under `point`.
///
/// Commands are painted in order, so later rects win.
pub fn hit_test(commands: &[RenderCommand], point: Point) -> Option<u64> {
    commands.iter().rev().find_map(|cmd| match cmd {
        RenderCommand::DrawRect {
            rect,
            hit_id: Some(id),
            ..
        } if rect.contains(point) => Some(*id),
        _ => None,
    })
}

/// Translate a click at `point` into a selection event.
///
/// Clicks on empty space produce nothing; the current selection stays.
pub fn event_at(
    commands: &[RenderCommand],
    layout: &LayoutResult,
    point: Point,
) -> Option<SelectionEvent> {
    match hit_test(commands, point)? {
        CLOSE_HIT_ID => Some(SelectionEvent::Cleared),
        index => {
            let entry = layout.positioned.get(usize::try_from(index).ok()?)?;
            Some(SelectionEvent::Activated(entry.id().clone()))
        }
    }
}

/// Tooltip for the bar under `point`.
pub fn hover_text(commands: &[RenderCommand], layout: &LayoutResult, point: Point) -> Option<String> {
    let index = hit_test(commands, point).filter(|&id| id != CLOSE_HIT_ID)?;
    let entry = layout.positioned.get(usize::try_from(index).ok()?)?;
    Some(describe(entry).tooltip())
}

#[cfg(test)]
mod tests {
    use worklane_protocol::{Rect, ThemeToken};

    use super::*;
    use crate::layout::compute_layout_default;
    use crate::model::{Category, ExperienceId, ExperienceRecord};

    fn rect(x: f64, w: f64, hit_id: Option<u64>) -> RenderCommand {
        RenderCommand::DrawRect {
            rect: Rect::new(x, 0.0, w, 20.0),
            color: ThemeToken::CategoryWork,
            border_color: None,
            label: None,
            hit_id,
        }
    }

    fn layout() -> LayoutResult {
        let records = vec![
            ExperienceRecord::new(1u64, "A", "Dev", Category::Work, "2024-01").ending("2024-06"),
            ExperienceRecord::new(2u64, "B", "Intern", Category::Internship, "2024-07").ending("2024-12"),
        ];
        compute_layout_default(&records, "2025-01".parse().unwrap()).unwrap()
    }

    #[test]
    fn topmost_rect_wins() {
        let cmds = vec![rect(0.0, 100.0, Some(0)), rect(50.0, 100.0, Some(1)), rect(60.0, 10.0, None)];
        assert_eq!(hit_test(&cmds, Point::new(10.0, 5.0)), Some(0));
        assert_eq!(hit_test(&cmds, Point::new(65.0, 5.0)), Some(1));
        assert_eq!(hit_test(&cmds, Point::new(200.0, 5.0)), None);
        assert_eq!(hit_test(&cmds, Point::new(10.0, 25.0)), None);
    }

    #[test]
    fn clicks_become_selection_events() {
        let layout = layout();
        let cmds = vec![
            rect(0.0, 100.0, Some(0)),
            rect(100.0, 100.0, Some(1)),
            rect(300.0, 16.0, Some(CLOSE_HIT_ID)),
        ];
        assert_eq!(
            event_at(&cmds, &layout, Point::new(150.0, 5.0)),
            Some(SelectionEvent::Activated(ExperienceId::from(2u64)))
        );
        assert_eq!(
            event_at(&cmds, &layout, Point::new(305.0, 5.0)),
            Some(SelectionEvent::Cleared)
        );
        assert_eq!(event_at(&cmds, &layout, Point::new(250.0, 5.0)), None);
    }

    #[test]
    fn stale_hit_ids_are_ignored() {
        let layout = layout();
        let cmds = vec![rect(0.0, 100.0, Some(7))];
        assert_eq!(event_at(&cmds, &layout, Point::new(5.0, 5.0)), None);
        assert_eq!(hover_text(&cmds, &layout, Point::new(5.0, 5.0)), None);
    }

    #[test]
    fn hover_describes_bar() {
        let layout = layout();
        let cmds = vec![rect(0.0, 100.0, Some(0))];
        let text = hover_text(&cmds, &layout, Point::new(5.0, 5.0)).unwrap();
        assert!(text.contains("Dev"));
        assert!(text.contains("January 2024 – June 2024"));
    }
}
