use worklane_protocol::{Point, RenderCommand, TextAlign, ThemeToken, Viewport};

use super::TimelineStyle;
use crate::model::Category;

const ICON: f64 = 12.0;
const ITEM_GAP: f64 = 16.0;

/// The category icon, in the category color, and label per category, in a
/// row along the top edge.
pub fn render_legend(viewport: &Viewport, style: &TimelineStyle) -> Vec<RenderCommand> {
    let mut commands = Vec::with_capacity(Category::ALL.len() * 2 + 2);
    commands.push(RenderCommand::BeginGroup {
        id: "legend".into(),
        label: Some("Legend".into()),
    });

    let center_y = style.legend_height / 2.0;
    let mut x = 0.0;
    for category in Category::ALL {
        let look = category.style();
        let item_width = ICON + 4.0 + TimelineStyle::text_width(look.label, style.font_size);
        if x + item_width > viewport.width {
            break;
        }

        commands.push(RenderCommand::DrawIcon {
            position: Point::new(x + ICON / 2.0, center_y),
            name: look.icon.to_string(),
            color: look.color,
            size: ICON,
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(x + ICON + 4.0, center_y + style.font_size / 3.0),
            text: look.label.to_string(),
            color: ThemeToken::TextSecondary,
            font_size: style.font_size,
            align: TextAlign::Left,
        });
        x += item_width + ITEM_GAP;
    }

    commands.push(RenderCommand::EndGroup);
    commands
}
