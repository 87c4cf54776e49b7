//! SVG renderer: converts `RenderCommand` lists into standalone SVG strings.

use worklane_protocol::{RenderCommand, TextAlign, ThemeToken, Viewport};

use crate::model::LayoutResult;
use crate::selection::Selection;
use crate::views::{TimelineStyle, page_layout, render_page};

/// Render a list of commands as an SVG document string.
///
/// `width` and `height` define the SVG viewBox dimensions.
/// `dark` selects the color palette.
pub fn render_svg(commands: &[RenderCommand], width: f64, height: f64, dark: bool) -> String {
    let mut svg = String::with_capacity(commands.len() * 160);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:system-ui,-apple-system,sans-serif">"#,
    ));

    let bg = resolve_color(ThemeToken::Background, dark);
    svg.push_str(&format!(
        r#"<rect width="{width}" height="{height}" fill="{bg}"/>"#,
    ));

    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
                label,
                ..
            } => {
                let fill = resolve_color(*color, dark);
                let stroke = border_color.map_or_else(String::new, |b| {
                    format!(r#" stroke="{}" stroke-width="1.5""#, resolve_color(b, dark))
                });
                svg.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}"{stroke} rx="3">"#,
                    rect.x, rect.y, rect.w, rect.h,
                ));
                if let Some(label) = label {
                    svg.push_str(&format!("<title>{}</title>", escape_xml(label)));
                }
                svg.push_str("</rect>");
            }
            RenderCommand::DrawLine {
                from,
                to,
                color,
                width: line_width,
            } => {
                let stroke = resolve_color(*color, dark);
                svg.push_str(&format!(
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{stroke}" stroke-width="{line_width}"/>"#,
                    from.x, from.y, to.x, to.y,
                ));
            }
            RenderCommand::DrawText {
                text,
                position,
                color,
                font_size,
                align,
            } => {
                let fill = resolve_color(*color, dark);
                let anchor = match align {
                    TextAlign::Left => "start",
                    TextAlign::Center => "middle",
                    TextAlign::Right => "end",
                };
                svg.push_str(&format!(
                    r#"<text x="{}" y="{}" fill="{fill}" font-size="{font_size}" text-anchor="{anchor}">{}</text>"#,
                    position.x,
                    position.y,
                    escape_xml(text),
                ));
            }
            RenderCommand::DrawIcon {
                position,
                name,
                color,
                size,
            } => {
                // Icon fonts are not available in a standalone file; a tinted
                // dot stands in, named by its title.
                let fill = resolve_color(*color, dark);
                svg.push_str(&format!(
                    r#"<circle cx="{}" cy="{}" r="{}" fill="{fill}"><title>{}</title></circle>"#,
                    position.x,
                    position.y,
                    size / 2.0,
                    escape_xml(name),
                ));
            }
            RenderCommand::BeginGroup { id, .. } => {
                svg.push_str(&format!(r#"<g id="{}">"#, escape_xml(id)));
            }
            RenderCommand::EndGroup => svg.push_str("</g>"),
        }
    }

    svg.push_str("</svg>");
    svg
}

/// Render the whole page for `layout` at `width`, sized to fit its content.
pub fn render_timeline_svg(
    layout: &LayoutResult,
    selection: &Selection,
    width: f64,
    style: &TimelineStyle,
    dark: bool,
) -> String {
    let height = page_layout(layout, selection, width, style).height;
    let viewport = Viewport::new(width, height);
    let commands = render_page(layout, selection, &viewport, style);
    render_svg(&commands, width, height, dark)
}

fn resolve_color(token: ThemeToken, dark: bool) -> &'static str {
    if dark {
        match token {
            ThemeToken::CategoryWork => "#64b5f6",
            ThemeToken::CategoryInternship => "#81c784",
            ThemeToken::CategoryFreelance => "#ffb74d",
            ThemeToken::TrackBackground | ThemeToken::Surface => "#202020",
            ThemeToken::AxisBackground | ThemeToken::PanelBackground => "#242424",
            ThemeToken::TrackBorder | ThemeToken::Border | ThemeToken::PanelBorder => "#303030",
            ThemeToken::GridLine => "#2c2c2c",
            ThemeToken::AxisTick => "#757575",
            ThemeToken::TextPrimary => "#ececec",
            ThemeToken::TextSecondary | ThemeToken::TextMuted => "#9e9e9e",
            ThemeToken::Background => "#181818",
            ThemeToken::SelectionHighlight => "#ffd600",
            ThemeToken::CurrentBadge => "#2e7d32",
            ThemeToken::SkillChip => "#37474f",
            ThemeToken::SkillChipText => "#eceff1",
        }
    } else {
        match token {
            ThemeToken::CategoryWork => "#1976d2",
            ThemeToken::CategoryInternship => "#388e3c",
            ThemeToken::CategoryFreelance => "#f57c00",
            ThemeToken::TrackBackground | ThemeToken::Surface => "#f8f9fa",
            ThemeToken::AxisBackground | ThemeToken::PanelBackground => "#ffffff",
            ThemeToken::TrackBorder | ThemeToken::Border | ThemeToken::PanelBorder => "#dee2e6",
            ThemeToken::GridLine => "#e9ecef",
            ThemeToken::AxisTick => "#868e96",
            ThemeToken::TextPrimary => "#1a1a2e",
            ThemeToken::TextSecondary | ThemeToken::TextMuted => "#666677",
            ThemeToken::Background => "#ffffff",
            ThemeToken::SelectionHighlight => "#212529",
            ThemeToken::CurrentBadge => "#2e7d32",
            ThemeToken::SkillChip => "#e3f2fd",
            ThemeToken::SkillChipText => "#0d47a1",
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
