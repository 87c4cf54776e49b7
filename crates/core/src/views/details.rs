use worklane_protocol::{Point, Rect, RenderCommand, TextAlign, ThemeToken, Viewport};

use super::TimelineStyle;
use super::hit_test::CLOSE_HIT_ID;
use crate::describe::describe;
use crate::model::PositionedExperience;

const TITLE_LINE: f64 = 22.0;
const LINE: f64 = 17.0;
const SECTION_GAP: f64 = 6.0;
const CHIP_HEIGHT: f64 = 18.0;
const CHIP_GAP: f64 = 4.0;
const CHIP_PADDING: f64 = 6.0;
const CLOSE_SIZE: f64 = 16.0;

/// A skill chip placed inside the panel's content box.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Chip {
    x: f64,
    row: usize,
    w: f64,
}

/// Flow chips left to right, wrapping at `max_width`. A chip wider than the
/// whole row still gets a row of its own.
fn flow_chips(skills: &[String], max_width: f64, font_size: f64) -> Vec<Chip> {
    let mut chips = Vec::with_capacity(skills.len());
    let mut x = 0.0;
    let mut row = 0;
    for skill in skills {
        let w = TimelineStyle::text_width(skill, font_size) + 2.0 * CHIP_PADDING;
        if x > 0.0 && x + w > max_width {
            row += 1;
            x = 0.0;
        }
        chips.push(Chip { x, row, w });
        x += w + CHIP_GAP;
    }
    chips
}

fn chip_rows(chips: &[Chip]) -> usize {
    chips.last().map_or(0, |c| c.row + 1)
}

/// Height of the panel [`render_details`] draws for `entry`.
pub fn details_height(entry: &PositionedExperience, width: f64, style: &TimelineStyle) -> f64 {
    let inner = (width - 2.0 * style.panel_padding).max(0.0);
    let chips = flow_chips(&entry.record.skills, inner, style.font_size - 1.0);
    let mut height = 2.0 * style.panel_padding + TITLE_LINE + 2.0 * LINE;
    if !entry.record.summary_points.is_empty() {
        height += SECTION_GAP + entry.record.summary_points.len() as f64 * LINE;
    }
    let rows = chip_rows(&chips);
    if rows > 0 {
        height += SECTION_GAP + rows as f64 * (CHIP_HEIGHT + CHIP_GAP);
    }
    height
}

/// The drilldown panel for the selected experience: role, organization with
/// its category icon, location and dates, a "Current" badge, bullet points and skill chips.
///
/// The close control in the top-right corner carries [`CLOSE_HIT_ID`].
pub fn render_details(
    entry: &PositionedExperience,
    viewport: &Viewport,
    top: f64,
    style: &TimelineStyle,
) -> Vec<RenderCommand> {
    let width = viewport.width;
    let pad = style.panel_padding;
    let height = details_height(entry, width, style);
    let description = describe(entry);
    let record = &entry.record;
    let mut commands = Vec::with_capacity(16 + record.summary_points.len() + record.skills.len() * 2);

    commands.push(RenderCommand::BeginGroup {
        id: "details".into(),
        label: Some(description.title.clone()),
    });
    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(0.0, top, width, height),
        color: ThemeToken::PanelBackground,
        border_color: Some(ThemeToken::PanelBorder),
        label: None,
        hit_id: None,
    });

    let close = Rect::new(width - pad - CLOSE_SIZE, top + pad, CLOSE_SIZE, CLOSE_SIZE);
    commands.push(RenderCommand::DrawRect {
        rect: close,
        color: ThemeToken::Surface,
        border_color: Some(ThemeToken::Border),
        label: Some("Close".into()),
        hit_id: Some(CLOSE_HIT_ID),
    });
    commands.push(RenderCommand::DrawText {
        position: Point::new(close.x + CLOSE_SIZE / 2.0, close.y + CLOSE_SIZE * 0.75),
        text: "×".into(),
        color: ThemeToken::TextSecondary,
        font_size: style.font_size + 1.0,
        align: TextAlign::Center,
    });

    let title_size = style.font_size + 3.0;
    let mut y = top + pad + TITLE_LINE - 6.0;
    commands.push(RenderCommand::DrawText {
        position: Point::new(pad, y),
        text: description.title.clone(),
        color: ThemeToken::TextPrimary,
        font_size: title_size,
        align: TextAlign::Left,
    });

    if record.is_current {
        let badge_x = pad + TimelineStyle::text_width(&description.title, title_size) + 8.0;
        let badge_w = TimelineStyle::text_width("Current", style.font_size - 1.0) + 2.0 * CHIP_PADDING;
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(badge_x, y - CHIP_HEIGHT + 4.0, badge_w, CHIP_HEIGHT),
            color: ThemeToken::CurrentBadge,
            border_color: None,
            label: None,
            hit_id: None,
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(badge_x + CHIP_PADDING, y - 1.0),
            text: "Current".into(),
            color: ThemeToken::SkillChipText,
            font_size: style.font_size - 1.0,
            align: TextAlign::Left,
        });
    }

    y += LINE;
    let look = record.category.style();
    let icon_size = style.font_size + 1.0;
    commands.push(RenderCommand::DrawIcon {
        position: Point::new(pad + icon_size / 2.0, y - icon_size / 3.0),
        name: look.icon.to_string(),
        color: look.color,
        size: icon_size,
    });
    commands.push(RenderCommand::DrawText {
        position: Point::new(pad + icon_size + 4.0, y),
        text: description.subtitle.clone(),
        color: look.color,
        font_size: style.font_size + 1.0,
        align: TextAlign::Left,
    });

    y += LINE;
    let meta = if record.location.is_empty() {
        description.caption.clone()
    } else {
        format!("{} • {}", record.location, description.caption)
    };
    commands.push(RenderCommand::DrawText {
        position: Point::new(pad, y),
        text: meta,
        color: ThemeToken::TextMuted,
        font_size: style.font_size,
        align: TextAlign::Left,
    });

    if !record.summary_points.is_empty() {
        y += SECTION_GAP;
        for point in &record.summary_points {
            y += LINE;
            commands.push(RenderCommand::DrawText {
                position: Point::new(pad, y),
                text: format!("• {point}"),
                color: ThemeToken::TextPrimary,
                font_size: style.font_size,
                align: TextAlign::Left,
            });
        }
    }

    let chip_font = style.font_size - 1.0;
    let chips = flow_chips(&record.skills, (width - 2.0 * pad).max(0.0), chip_font);
    let chips_top = y + SECTION_GAP + 6.0;
    for (chip, skill) in chips.iter().zip(&record.skills) {
        let rect = Rect::new(
            pad + chip.x,
            chips_top + chip.row as f64 * (CHIP_HEIGHT + CHIP_GAP),
            chip.w,
            CHIP_HEIGHT,
        );
        commands.push(RenderCommand::DrawRect {
            rect,
            color: ThemeToken::SkillChip,
            border_color: Some(record.category.color()),
            label: None,
            hit_id: None,
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(rect.x + CHIP_PADDING, rect.y + CHIP_HEIGHT * 0.7),
            text: skill.clone(),
            color: ThemeToken::SkillChipText,
            font_size: chip_font,
            align: TextAlign::Left,
        });
    }

    commands.push(RenderCommand::EndGroup);
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute_layout_default;
    use crate::model::{Category, ExperienceRecord};

    fn entry(record: ExperienceRecord) -> PositionedExperience {
        compute_layout_default(&[record], "2025-10".parse().unwrap())
            .unwrap()
            .positioned
            .remove(0)
    }

    fn texts(cmds: &[RenderCommand]) -> Vec<String> {
        cmds.iter()
            .filter_map(|c| match c {
                RenderCommand::DrawText { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn chips_wrap() {
        let skills: Vec<String> = ["Java", "Spring Boot", "React", "TypeScript"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let chips = flow_chips(&skills, 120.0, 10.0);
        assert_eq!((chips[0].x, chips[0].row), (0.0, 0));
        assert!((chips[0].w - 36.0).abs() < 1e-9);
        assert_eq!(chips[1].row, 0);
        assert_eq!(chips[2].row, 1);
        assert_eq!(chips[2].x, 0.0);
        assert_eq!(chips[3].row, 1);
        assert_eq!(chip_rows(&chips), 2);
        assert_eq!(chip_rows(&[]), 0);
    }

    #[test]
    fn panel_shows_record_details() {
        let e = entry(
            ExperienceRecord::new(5u64, "McGill CSUS", "Social Media Executive", Category::Work, "2025-04")
                .current()
                .at("Montreal, Quebec, Canada")
                .with_summary(["Managing social media content"])
                .with_skills(["Photography", "Social Media"]),
        );
        let cmds = render_details(&e, &Viewport::new(640.0, 400.0), 100.0, &TimelineStyle::default());
        let texts = texts(&cmds);
        assert!(texts.contains(&"Social Media Executive".to_string()));
        assert!(texts.contains(&"McGill CSUS".to_string()));
        assert!(texts.contains(&"Montreal, Quebec, Canada • April 2025 – Present".to_string()));
        assert!(texts.contains(&"Current".to_string()));
        assert!(texts.contains(&"• Managing social media content".to_string()));
        assert!(texts.contains(&"Photography".to_string()));
        assert!(cmds.iter().any(|c| c.hit_id() == Some(CLOSE_HIT_ID)));
    }

    #[test]
    fn finished_role_has_no_badge() {
        let e = entry(
            ExperienceRecord::new(2u64, "Intact", "DevOps I", Category::Internship, "2025-01").ending("2025-04"),
        );
        let cmds = render_details(&e, &Viewport::new(640.0, 400.0), 0.0, &TimelineStyle::default());
        let texts = texts(&cmds);
        assert!(!texts.contains(&"Current".to_string()));
        assert!(cmds.iter().any(|c| matches!(
            c,
            RenderCommand::DrawIcon { name, color: ThemeToken::CategoryInternship, .. } if name == "school"
        )));
        assert!(texts.contains(&"January 2025 – April 2025".to_string()));
    }

    #[test]
    fn height_grows_with_content() {
        let style = TimelineStyle::default();
        let bare = entry(ExperienceRecord::new(1u64, "A", "Dev", Category::Work, "2024-01"));
        let rich = entry(
            ExperienceRecord::new(1u64, "A", "Dev", Category::Work, "2024-01")
                .with_summary(["one", "two"])
                .with_skills(["Rust"]),
        );
        let bare_h = details_height(&bare, 600.0, &style);
        let rich_h = details_height(&rich, 600.0, &style);
        assert_eq!(bare_h, 2.0 * style.panel_padding + TITLE_LINE + 2.0 * LINE);
        assert_eq!(
            rich_h,
            bare_h + SECTION_GAP + 2.0 * LINE + SECTION_GAP + CHIP_HEIGHT + CHIP_GAP
        );
    }
}
